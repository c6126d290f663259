// Error message resolution

use crate::{MethodRegistry, RuleError, RuleSet};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// One entry of the `messages` option: a message for a rule on every field,
/// or messages for the rules of one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageEntry {
    Rule(String),
    Field(IndexMap<String, String>),
}

/// Messages supplied by the integrator.
///
/// In JSON, a string value sets the message of a rule for all fields and an
/// object value sets messages for the rules of one field:
///
/// ```json
/// { "required": "Required!", "email": { "email": "Bad address" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "IndexMap<String, MessageEntry>", into = "IndexMap<String, MessageEntry>")]
pub struct CustomMessages {
    fields: IndexMap<String, IndexMap<String, String>>,
    rules: IndexMap<String, String>,
}

impl From<IndexMap<String, MessageEntry>> for CustomMessages {
    fn from(entries: IndexMap<String, MessageEntry>) -> Self {
        let mut messages = CustomMessages::new();
        for (key, entry) in entries {
            match entry {
                MessageEntry::Rule(text) => {
                    messages.rules.insert(key, text);
                }
                MessageEntry::Field(map) => {
                    messages.fields.insert(key, map);
                }
            }
        }
        messages
    }
}

impl From<CustomMessages> for IndexMap<String, MessageEntry> {
    fn from(messages: CustomMessages) -> Self {
        let mut entries: IndexMap<String, MessageEntry> = messages
            .rules
            .into_iter()
            .map(|(rule, text)| (rule, MessageEntry::Rule(text)))
            .collect();
        entries.extend(
            messages
                .fields
                .into_iter()
                .map(|(field, map)| (field, MessageEntry::Field(map))),
        );
        entries
    }
}

impl CustomMessages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Message for `rule` on one field.
    pub fn for_field(
        mut self,
        field: impl Into<String>,
        rule: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.fields
            .entry(field.into())
            .or_default()
            .insert(rule.into(), text.into());
        self
    }

    /// Message for `rule` on every field.
    pub fn for_rule(mut self, rule: impl Into<String>, text: impl Into<String>) -> Self {
        self.rules.insert(rule.into(), text.into());
        self
    }

    pub fn field_message(&self, field: &str, rule: &str) -> Option<&str> {
        self.fields.get(field)?.get(rule).map(String::as_str)
    }

    pub fn rule_message(&self, rule: &str) -> Option<&str> {
        self.rules.get(rule).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.rules.is_empty()
    }

    pub fn from_json(value: &Value) -> Result<Self, RuleError> {
        if value.is_null() {
            return Ok(Self::new());
        }
        let Value::Object(map) = value else {
            return Err(RuleError::InvalidMessage("<messages>".to_string()));
        };

        map.iter()
            .map(|(key, entry)| {
                serde_json::from_value::<MessageEntry>(entry.clone())
                    .map(|entry| (key.clone(), entry))
                    .map_err(|_| RuleError::InvalidMessage(key.clone()))
            })
            .collect::<Result<IndexMap<_, _>, _>>()
            .map(CustomMessages::from)
    }
}

/// Resolved message text for every field/rule pair of a rule set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ErrorMessageTable {
    entries: IndexMap<String, IndexMap<String, String>>,
}

impl ErrorMessageTable {
    pub fn get(&self, field: &str, rule: &str) -> Option<&str> {
        self.entries.get(field)?.get(rule).map(String::as_str)
    }

    pub fn field(&self, field: &str) -> Option<&IndexMap<String, String>> {
        self.entries.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the message table for a rule set.
///
/// For every declared field/rule pair the text is, in order of preference:
/// the field's custom message, the rule's custom message, the method's
/// default message, or an empty string when the method is unknown.
/// Texts are stored untranslated.
pub fn init_error_messages(
    rules: &RuleSet,
    custom: &CustomMessages,
    methods: &MethodRegistry,
) -> ErrorMessageTable {
    let entries = rules
        .iter()
        .map(|(field, field_rules)| {
            let resolved = field_rules
                .names()
                .map(|rule| {
                    let text = custom
                        .field_message(field, rule)
                        .or_else(|| custom.rule_message(rule))
                        .or_else(|| methods.get(rule).map(|m| m.message()))
                        .unwrap_or_default();
                    (rule.to_string(), text.to_string())
                })
                .collect();
            (field.to_string(), resolved)
        })
        .collect();

    ErrorMessageTable { entries }
}

/// Owned, versioned handle on the current message table.
///
/// Every rebuild produces a fresh table and replaces the shared pointer in a
/// single assignment; holders of an older `Arc` keep a complete old table.
#[derive(Debug, Clone, Default)]
pub struct MessageCache {
    table: Arc<ErrorMessageTable>,
    version: u64,
}

impl MessageCache {
    pub fn build(rules: &RuleSet, custom: &CustomMessages, methods: &MethodRegistry) -> Self {
        Self {
            table: Arc::new(init_error_messages(rules, custom, methods)),
            version: 1,
        }
    }

    /// Recompute the table and swap it in.
    pub fn rebuild(&mut self, rules: &RuleSet, custom: &CustomMessages, methods: &MethodRegistry) {
        let next = Arc::new(init_error_messages(rules, custom, methods));
        self.table = next;
        self.version += 1;
        formguard_log::debug!(
            "Message table rebuilt (version {}, {} fields)",
            self.version,
            self.table.len()
        );
    }

    /// Snapshot of the current table.
    pub fn current(&self) -> Arc<ErrorMessageTable> {
        Arc::clone(&self.table)
    }

    pub fn table(&self) -> &ErrorMessageTable {
        &self.table
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldRules, default_messages};
    use serde_json::json;

    fn rules() -> RuleSet {
        RuleSet::new()
            .field(
                "email",
                FieldRules::new().rule("required", true).rule("email", true),
            )
            .field("name", FieldRules::new().rule("required", true).rule("shout", true))
    }

    #[test]
    fn test_precedence() {
        let custom = CustomMessages::new()
            .for_rule("required", "Rule-wide required")
            .for_field("email", "required", "Email is required");

        let table = init_error_messages(&rules(), &custom, &MethodRegistry::new());

        assert_eq!(table.get("email", "required"), Some("Email is required"));
        assert_eq!(table.get("name", "required"), Some("Rule-wide required"));
        assert_eq!(table.get("email", "email"), Some(default_messages::EMAIL));
        assert_eq!(table.get("name", "shout"), Some(""));
    }

    #[test]
    fn test_custom_messages_from_json() {
        let custom = CustomMessages::from_json(&json!({
            "required": "Required!",
            "email": { "email": "Bad address" }
        }))
        .unwrap();

        assert_eq!(custom.rule_message("required"), Some("Required!"));
        assert_eq!(custom.field_message("email", "email"), Some("Bad address"));
        assert!(CustomMessages::from_json(&json!({ "x": 1 })).is_err());
        assert!(CustomMessages::from_json(&json!(null)).unwrap().is_empty());
    }

    #[test]
    fn test_custom_messages_serde_shape() {
        let custom: CustomMessages =
            serde_json::from_value(json!({ "required": "R", "name": { "min": "M" } })).unwrap();
        assert_eq!(
            serde_json::to_value(&custom).unwrap(),
            json!({ "required": "R", "name": { "min": "M" } })
        );
    }

    #[test]
    fn test_rebuild_swaps_whole_table() {
        let mut methods = MethodRegistry::new();
        let mut cache = MessageCache::build(&rules(), &CustomMessages::new(), &methods);
        let before = cache.current();

        methods.add("shout", |_: &crate::FieldValue, _: &crate::Param| true, "Too quiet");
        cache.rebuild(&rules(), &CustomMessages::new(), &methods);

        assert_eq!(before.get("name", "shout"), Some(""));
        assert_eq!(cache.table().get("name", "shout"), Some("Too quiet"));
        assert_eq!(cache.version(), 2);
    }
}
