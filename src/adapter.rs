// Host adapter traits
//
// The controller never touches markup. It reads the form through a
// `FormSource` and reports state changes through a `FormView`.

use formguard_validation::{DataMap, merge_data};
use serde_json::Value;

use crate::input::InputDescriptor;

/// Read side of a form.
pub trait FormSource {
    /// Options declared by the form itself, e.g. through
    /// [`formguard_config::from_attributes`]. Lowest layer above the defaults.
    fn form_options(&self) -> Value {
        Value::Object(Default::default())
    }

    /// Named controls of the form, in document order.
    fn inputs(&self) -> Vec<InputDescriptor>;

    /// Current data of the controls named `name`.
    fn input_data(&self, name: &str) -> DataMap;

    /// Snapshot of the whole form.
    fn data(&self) -> DataMap {
        let mut data = DataMap::new();
        let mut seen = Vec::new();
        for input in self.inputs() {
            if seen.contains(&input.name) {
                continue;
            }
            merge_data(&mut data, self.input_data(&input.name));
            seen.push(input.name);
        }
        data
    }
}

/// States to switch on and off in one update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateChange {
    pub add: Vec<String>,
    pub remove: Vec<String>,
}

impl StateChange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, state: impl Into<String>) -> Self {
        self.add.push(state.into());
        self
    }

    pub fn remove(mut self, state: impl Into<String>) -> Self {
        self.remove.push(state.into());
        self
    }
}

/// Write side of a form.
pub trait FormView {
    /// Update a field's states and, when given, its message. An empty
    /// message clears the previous one.
    fn mark_field(&mut self, field: &str, change: &StateChange, message: Option<&str>);

    /// Update form-level states.
    fn mark_form(&mut self, change: &StateChange);

    /// Form-level message; empty clears it.
    fn set_base_message(&mut self, message: &str);

    /// Clear every control.
    fn reset(&mut self);

    /// Navigate away after a successful submission.
    fn redirect(&mut self, url: &str);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputKind;
    use formguard_validation::FieldValue;

    struct Radios;

    impl FormSource for Radios {
        fn inputs(&self) -> Vec<InputDescriptor> {
            vec![
                InputDescriptor::new("size", InputKind::Radio),
                InputDescriptor::new("size", InputKind::Radio),
                InputDescriptor::new("note", InputKind::Text),
            ]
        }

        fn input_data(&self, name: &str) -> DataMap {
            let mut data = DataMap::new();
            match name {
                "size" => data.insert("size".into(), FieldValue::from("m")),
                _ => data.insert(name.into(), FieldValue::Null),
            };
            data
        }
    }

    #[test]
    fn test_default_data_dedupes_names() {
        let data = Radios.data();
        assert_eq!(data.len(), 2);
        assert_eq!(data.get("size"), Some(&FieldValue::from("m")));
        assert_eq!(Radios.form_options(), serde_json::json!({}));
    }

    struct Address;

    impl FormSource for Address {
        fn inputs(&self) -> Vec<InputDescriptor> {
            vec![
                InputDescriptor::new("address[city]", InputKind::Text),
                InputDescriptor::new("address[zip]", InputKind::Text),
            ]
        }

        fn input_data(&self, name: &str) -> DataMap {
            let (key, value) = match name {
                "address[city]" => ("city", "Oslo"),
                _ => ("zip", "0150"),
            };
            let mut group = DataMap::new();
            group.insert(key.into(), FieldValue::from(value));

            let mut data = DataMap::new();
            data.insert("address".into(), FieldValue::Group(group));
            data
        }
    }

    #[test]
    fn test_default_data_merges_groups() {
        let data = Address.data();
        assert_eq!(data.len(), 1);

        let Some(FieldValue::Group(address)) = data.get("address") else {
            panic!("address should be a group");
        };
        assert_eq!(address.get("city"), Some(&FieldValue::from("Oslo")));
        assert_eq!(address.get("zip"), Some(&FieldValue::from("0150")));
    }

    #[test]
    fn test_state_change_builder() {
        let change = StateChange::new().add("dirty").remove("pristine");
        assert_eq!(change.add, vec!["dirty"]);
        assert_eq!(change.remove, vec!["pristine"]);
    }
}
