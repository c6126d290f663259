// Validation errors

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use thiserror::Error;

/// Errors raised while building rule sets or editing the method registry.
///
/// Validation itself never returns these; a pass always completes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    #[error("Rules for field \"{0}\" must be an object")]
    NotAnObject(String),

    #[error("Invalid parameter for rule \"{rule}\" on field \"{field}\": {reason}")]
    InvalidParam {
        field: String,
        rule: String,
        reason: String,
    },

    #[error("Dependency #{index} of rule \"{rule}\" on field \"{field}\" must be a field name")]
    InvalidDependency {
        field: String,
        rule: String,
        index: usize,
    },

    #[error("Invalid pattern \"{pattern}\": {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Custom message for \"{0}\" must be a string or an object of strings")]
    InvalidMessage(String),

    #[error("The \"required\" method cannot be removed")]
    RequiredMethod,
}

/// Failure reported by a dependency predicate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct DependencyError(pub String);

impl DependencyError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Best-effort text of a caught panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Result of validating a whole form.
///
/// Every validated field has an entry: `None` when the field is valid,
/// `Some` with a non-empty, ordered list of messages when it is not.
/// Field order follows the rule set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormErrors {
    fields: IndexMap<String, Option<Vec<String>>>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a field's messages; an empty list records the field as valid.
    pub fn insert(&mut self, field: impl Into<String>, messages: Vec<String>) {
        let entry = if messages.is_empty() {
            None
        } else {
            Some(messages)
        };
        self.fields.insert(field.into(), entry);
    }

    /// Messages for a field, `None` if the field is valid or was not validated.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).and_then(|e| e.as_deref())
    }

    /// Raw entry for a field: `None` if not validated, `Some(None)` if valid.
    pub fn entry(&self, field: &str) -> Option<Option<&[String]>> {
        self.fields.get(field).map(|e| e.as_deref())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// `true` when no validated field has messages.
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(Option::is_none)
    }

    /// Names of fields that have messages, in rule-set order.
    pub fn invalid_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, e)| e.is_some())
            .map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&[String]>)> {
        self.fields
            .iter()
            .map(|(name, e)| (name.as_str(), e.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Remove and return a field's entry.
    pub fn take(&mut self, field: &str) -> Option<Option<Vec<String>>> {
        self.fields.shift_remove(field)
    }

    /// Apply `f` to every message, keeping structure and order.
    pub fn map_messages(self, mut f: impl FnMut(String) -> String) -> Self {
        let fields = self
            .fields
            .into_iter()
            .map(|(name, e)| (name, e.map(|msgs| msgs.into_iter().map(&mut f).collect())))
            .collect();
        Self { fields }
    }

    /// Convert to JSON; valid fields become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, messages) in self.iter() {
            if let Some(messages) = messages {
                writeln!(f, "{}: {}", field, messages.join(", "))?;
            }
        }
        Ok(())
    }
}
