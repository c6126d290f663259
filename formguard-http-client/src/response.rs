//! Submission response.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Key of form-level messages in `validationErrors`.
pub const BASE: &str = "base";

/// Message reported when a successful response body is not valid JSON.
pub const JSON_PARSING_ERROR: &str = "JSON parsing error";

/// Parsed body of a successful submission.
///
/// ```json
/// { "validationErrors": { "base": ["..."], "email": ["..."] }, "redirect": "/thanks" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    #[serde(
        default,
        deserialize_with = "deserialize_errors",
        skip_serializing_if = "Option::is_none"
    )]
    pub validation_errors: Option<IndexMap<String, Vec<String>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

/// A field's server messages: one string or a list.
#[derive(Deserialize)]
#[serde(untagged)]
enum ServerMessages {
    One(String),
    Many(Vec<String>),
    Nothing(()),
}

fn deserialize_errors<'de, D>(
    deserializer: D,
) -> Result<Option<IndexMap<String, Vec<String>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<IndexMap<String, ServerMessages>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|map| {
        map.into_iter()
            .map(|(field, messages)| {
                let messages = match messages {
                    ServerMessages::One(message) => vec![message],
                    ServerMessages::Many(messages) => messages,
                    ServerMessages::Nothing(()) => Vec::new(),
                };
                (field, messages)
            })
            .collect()
    }))
}

impl SubmitResponse {
    /// Parse a 200 response body. An unparsable body yields a single base
    /// error so the form can report it.
    pub fn parse(body: &[u8]) -> Self {
        match serde_json::from_slice(body) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Response body is not valid JSON");
                Self::base_error(JSON_PARSING_ERROR)
            }
        }
    }

    /// Response carrying one form-level message.
    pub fn base_error(message: impl Into<String>) -> Self {
        let mut errors = IndexMap::new();
        errors.insert(BASE.to_string(), vec![message.into()]);
        Self {
            validation_errors: Some(errors),
            redirect: None,
        }
    }

    /// `true` when the server reported no validation errors.
    pub fn is_success(&self) -> bool {
        self.validation_errors.is_none()
    }

    /// Form-level messages, if any.
    pub fn base_errors(&self) -> Option<&[String]> {
        self.validation_errors
            .as_ref()?
            .get(BASE)
            .map(Vec::as_slice)
    }

    /// Field messages, without the form-level entry.
    pub fn field_errors(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.validation_errors
            .iter()
            .flat_map(|errors| errors.iter())
            .filter(|(field, _)| field.as_str() != BASE)
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success() {
        let response = SubmitResponse::parse(br#"{"redirect": "/thanks"}"#);
        assert!(response.is_success());
        assert_eq!(response.redirect.as_deref(), Some("/thanks"));
    }

    #[test]
    fn test_parse_validation_errors() {
        let response = SubmitResponse::parse(
            br#"{"validationErrors": {"base": "Try later", "email": ["Taken"], "name": null}}"#,
        );

        assert!(!response.is_success());
        assert_eq!(response.base_errors(), Some(&["Try later".to_string()][..]));
        let fields: Vec<_> = response.field_errors().collect();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], ("email", &["Taken".to_string()][..]));
        assert!(fields[1].1.is_empty());
    }

    #[test]
    fn test_parse_garbage() {
        let response = SubmitResponse::parse(b"<html>oops</html>");
        assert_eq!(response.base_errors(), Some(&[JSON_PARSING_ERROR.to_string()][..]));
        assert_eq!(response.field_errors().count(), 0);
    }
}
