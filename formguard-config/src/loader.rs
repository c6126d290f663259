// Option file and markup loaders

use crate::{ConfigError, Result};
use serde_json::{Map, Value, json};
use std::fs;
use std::path::Path;

/// Supported option file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }
}

/// Option file loader
pub struct OptionsLoader {
    format: FileFormat,
}

impl OptionsLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Auto-detect format from file extension
    pub fn auto(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::LoadError("No file extension found".to_string()))?;

        let format = FileFormat::from_extension(ext)
            .ok_or_else(|| ConfigError::LoadError(format!("Unsupported format: {}", ext)))?;

        Ok(Self::new(format))
    }

    /// Load options from file
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Value> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadError(format!("Failed to read {}: {}", path.display(), e)))?;

        formguard_log::debug!("Loaded options from {}", path.display());
        self.parse(&content)
    }

    /// Parse options from string
    pub fn parse(&self, content: &str) -> Result<Value> {
        let value = match self.format {
            FileFormat::Json => self.parse_json(content)?,
            FileFormat::Toml => self.parse_toml(content)?,
        };

        if !value.is_object() {
            return Err(ConfigError::ParseError(
                "Options must be a table/object at the top level".to_string(),
            ));
        }
        Ok(value)
    }

    fn parse_json(&self, content: &str) -> Result<Value> {
        serde_json::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e)))
    }

    fn parse_toml(&self, content: &str) -> Result<Value> {
        let toml_value: toml::Value = toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;

        serde_json::to_value(toml_value)
            .map_err(|e| ConfigError::ParseError(format!("TOML to JSON conversion error: {}", e)))
    }
}

/// Build the form-declared option layer from markup attributes.
///
/// `data-*` attributes win over the native `action`, `method` and `enctype`
/// attributes. Empty values are ignored.
pub fn from_attributes<I, K, V>(attributes: I) -> Value
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut url = (None, None);
    let mut method = (None, None);
    let mut enctype = (None, None);
    let mut send_type = None;
    let mut language = None;

    for (name, value) in attributes {
        let value = value.as_ref().trim();
        if value.is_empty() {
            continue;
        }
        let value = Some(value.to_string());

        match name.as_ref().to_ascii_lowercase().as_str() {
            "data-url" => url.0 = value,
            "action" => url.1 = value,
            "data-method" => method.0 = value,
            "method" => method.1 = value,
            "data-enctype" => enctype.0 = value,
            "enctype" => enctype.1 = value,
            "data-send-type" => send_type = value,
            "data-language" => language = value,
            _ => {}
        }
    }

    let mut ajax = Map::new();
    if let Some(url) = url.0.or(url.1) {
        ajax.insert("url".to_string(), json!(url));
    }
    if let Some(method) = method.0.or(method.1) {
        ajax.insert("method".to_string(), json!(method.to_ascii_uppercase()));
    }
    if let Some(enctype) = enctype.0.or(enctype.1) {
        ajax.insert("enctype".to_string(), json!(enctype));
    }
    if let Some(send_type) = send_type {
        ajax.insert("sendType".to_string(), json!(send_type));
    }

    let mut options = Map::new();
    if !ajax.is_empty() {
        options.insert("ajax".to_string(), Value::Object(ajax));
    }
    if let Some(language) = language {
        options.insert("language".to_string(), json!(language));
    }
    Value::Object(options)
}
