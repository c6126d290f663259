// Form options model

use crate::{ConfigError, Result};
use formguard_validation::{CustomMessages, RuleSet};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How the form data is encoded for submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SendType {
    /// URL-encoded pairs sent with the configured enctype
    #[default]
    Serialize,
    /// JSON object body
    Json,
    /// Multipart form data
    FormData,
}

/// Submission settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AjaxOptions {
    /// Target URL. Without one the form is not sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub enctype: String,
    pub send_type: SendType,
    pub method: String,
}

impl Default for AjaxOptions {
    fn default() -> Self {
        Self {
            url: None,
            enctype: "application/x-www-form-urlencoded".to_string(),
            send_type: SendType::Serialize,
            method: "GET".to_string(),
        }
    }
}

/// Names of the view containers a field and the form are marked in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Containers {
    pub parent: String,
    pub message: String,
    pub base_message: String,
}

impl Default for Containers {
    fn default() -> Self {
        Self {
            parent: "form-group".to_string(),
            message: "help-block".to_string(),
            base_message: "base-error".to_string(),
        }
    }
}

/// State names applied to fields and, with a prefix, to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct States {
    pub error: String,
    pub valid: String,
    pub pristine: String,
    pub dirty: String,
}

impl Default for States {
    fn default() -> Self {
        Self {
            error: "error".to_string(),
            valid: "valid".to_string(),
            pristine: "pristine".to_string(),
            dirty: "dirty".to_string(),
        }
    }
}

/// Per-language translations: `language -> source text -> translation`.
pub type Translations = IndexMap<String, IndexMap<String, String>>;

/// Fully merged form options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    pub ajax: AjaxOptions,

    /// Rules in their JSON form, parsed by [`Options::rule_set`]
    pub rules: Map<String, Value>,

    pub messages: CustomMessages,
    pub containers: Containers,
    pub states: States,
    pub form_state_prefix: String,

    /// Reset the form after a successful submission
    pub clean: bool,

    /// Follow the `redirect` of a successful response
    pub redirect: bool,

    pub language: String,
    pub translations: Translations,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            ajax: AjaxOptions::default(),
            rules: Map::new(),
            messages: CustomMessages::default(),
            containers: Containers::default(),
            states: States::default(),
            form_state_prefix: "form-".to_string(),
            clean: true,
            redirect: true,
            language: "en".to_string(),
            translations: Translations::new(),
        }
    }
}

impl Options {
    /// Built-in defaults as a JSON value, the lowest layer of the merge.
    pub fn defaults_value() -> Value {
        serde_json::to_value(Options::default()).unwrap_or(Value::Object(Map::new()))
    }

    /// Deserialize merged options.
    pub fn from_value(value: Value) -> Result<Self> {
        let options: Options = serde_json::from_value(value)
            .map_err(|e| ConfigError::DeserializationError(e.to_string()))?;
        options.check()?;
        Ok(options)
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::SerializationError(e.to_string()))
    }

    /// Parse the configured rules.
    pub fn rule_set(&self) -> Result<RuleSet> {
        Ok(RuleSet::from_json(&Value::Object(self.rules.clone()))?)
    }

    pub fn custom_messages(&self) -> &CustomMessages {
        &self.messages
    }

    /// Whether submission is configured.
    pub fn has_url(&self) -> bool {
        self.ajax.url.as_deref().is_some_and(|url| !url.is_empty())
    }

    /// Form-level state name, e.g. `form-error`.
    pub fn form_state(&self, state: &str) -> String {
        format!("{}{}", self.form_state_prefix, state)
    }

    fn check(&self) -> Result<()> {
        let method = self.ajax.method.to_ascii_uppercase();
        if !matches!(
            method.as_str(),
            "GET" | "POST" | "PUT" | "PATCH" | "DELETE" | "HEAD" | "OPTIONS"
        ) {
            return Err(ConfigError::InvalidOption {
                key: "ajax.method".to_string(),
                reason: format!("unsupported HTTP method \"{}\"", self.ajax.method),
            });
        }
        if self.language.is_empty() {
            return Err(ConfigError::InvalidOption {
                key: "language".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
