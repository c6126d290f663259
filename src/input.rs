// Input descriptors and rule inference

use formguard_validation::{FieldRules, Param};
use indexmap::IndexMap;

/// Kind of a form control, as declared by its `type` attribute or tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Tel,
    Url,
    Number,
    Date,
    Time,
    Password,
    Checkbox,
    Radio,
    File,
    Select,
    Textarea,
    Hidden,
    Other(String),
}

impl InputKind {
    pub fn parse(kind: &str) -> Self {
        match kind.to_ascii_lowercase().as_str() {
            "" | "text" | "search" => InputKind::Text,
            "email" => InputKind::Email,
            "tel" => InputKind::Tel,
            "url" => InputKind::Url,
            "number" | "range" => InputKind::Number,
            "date" => InputKind::Date,
            "time" => InputKind::Time,
            "password" => InputKind::Password,
            "checkbox" => InputKind::Checkbox,
            "radio" => InputKind::Radio,
            "file" => InputKind::File,
            "select" | "select-one" | "select-multiple" => InputKind::Select,
            "textarea" => InputKind::Textarea,
            "hidden" => InputKind::Hidden,
            other => InputKind::Other(other.to_string()),
        }
    }

    /// Format rule implied by the kind.
    fn format_rule(&self) -> Option<&'static str> {
        match self {
            InputKind::Email => Some("email"),
            InputKind::Tel => Some("tel"),
            InputKind::Url => Some("url"),
            InputKind::Number => Some("number"),
            InputKind::Date => Some("date"),
            InputKind::Time => Some("time"),
            _ => None,
        }
    }
}

/// One named control of a form, with the attributes rules are inferred from.
///
/// Several descriptors may share a name (radio groups, `phone[]` lists);
/// the controller treats them as one field.
#[derive(Debug, Clone, PartialEq)]
pub struct InputDescriptor {
    pub name: String,
    pub kind: InputKind,
    pub attributes: IndexMap<String, String>,
}

impl InputDescriptor {
    pub fn new(name: impl Into<String>, kind: InputKind) -> Self {
        Self {
            name: name.into(),
            kind,
            attributes: IndexMap::new(),
        }
    }

    /// Builder-style attribute. Names are stored lowercase.
    pub fn attr(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.attributes
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn is_required(&self) -> bool {
        self.attribute("required")
            .is_some_and(|value| !value.eq_ignore_ascii_case("false"))
    }

    /// Rules declared by the control itself.
    ///
    /// `required`, the format implied by `type`, `pattern` (matched against
    /// the whole value), `minlength`, `maxlength`, `min`, `max` and, for file
    /// inputs, the extensions listed in `accept`.
    pub fn rules(&self) -> FieldRules {
        let mut rules = FieldRules::new();

        if self.is_required() {
            rules.insert("required", true);
        }

        if let Some(rule) = self.kind.format_rule() {
            rules.insert(rule, true);
        }

        if let Some(pattern) = self.attribute("pattern").filter(|p| !p.is_empty()) {
            rules.insert("regexp", format!("^(?:{})$", pattern));
        }

        for (attribute, rule) in [
            ("minlength", "minLength"),
            ("maxlength", "maxLength"),
            ("min", "min"),
            ("max", "max"),
        ] {
            if let Some(param) = self.attribute(attribute).and_then(numeric_param) {
                rules.insert(rule, param);
            }
        }

        if self.kind == InputKind::File
            && let Some(extensions) = self.attribute("accept").and_then(accepted_extensions)
        {
            rules.insert("extension", extensions);
        }

        rules
    }
}

fn numeric_param(value: &str) -> Option<Param> {
    value.trim().parse::<f64>().ok().map(Param::Number)
}

/// Extensions of an `accept` list; MIME entries such as `image/*` are skipped.
fn accepted_extensions(accept: &str) -> Option<String> {
    let extensions: Vec<&str> = accept
        .split(',')
        .map(str::trim)
        .filter_map(|entry| entry.strip_prefix('.'))
        .filter(|ext| !ext.is_empty())
        .collect();

    (!extensions.is_empty()).then(|| extensions.join(","))
}
