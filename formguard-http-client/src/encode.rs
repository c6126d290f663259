//! Request body encoding.

use crate::{HttpClientError, Result};
use formguard_config::SendType;
use formguard_validation::{DataMap, FieldValue};

/// Content type used for JSON bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Value of a checked box without an explicit value.
const CHECKED: &str = "on";

/// Encoded request body.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodedBody {
    /// `application/x-www-form-urlencoded` style text sent with a content type.
    Form { content_type: String, body: String },
    /// JSON text.
    Json(String),
    /// Multipart text parts.
    Multipart(Vec<(String, String)>),
}

/// Flatten a data snapshot into ordered key/value pairs.
///
/// `Group` entries become `parent[child]` keys, list items repeat their key,
/// file selections contribute their names, `Null` and unchecked boxes are
/// skipped.
pub fn encode_pairs(data: &DataMap) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (name, value) in data {
        push_pairs(name, value, &mut pairs);
    }
    pairs
}

fn push_pairs(key: &str, value: &FieldValue, pairs: &mut Vec<(String, String)>) {
    match value {
        FieldValue::Null | FieldValue::Bool(false) => {}
        FieldValue::Bool(true) => pairs.push((key.to_string(), CHECKED.to_string())),
        FieldValue::Text(text) => pairs.push((key.to_string(), text.clone())),
        FieldValue::List(items) => {
            pairs.extend(items.iter().map(|item| (key.to_string(), item.clone())));
        }
        FieldValue::Files(files) => {
            pairs.extend(files.iter().map(|file| (key.to_string(), file.name.clone())));
        }
        FieldValue::Group(map) => {
            for (child, value) in map {
                push_pairs(&format!("{}[{}]", key, child), value, pairs);
            }
        }
    }
}

/// URL-encode a data snapshot.
pub fn to_urlencoded(data: &DataMap) -> Result<String> {
    serde_urlencoded::to_string(encode_pairs(data)).map_err(|e| HttpClientError::Encode(e.to_string()))
}

/// Encode a data snapshot for the given send type.
pub fn encode_body(data: &DataMap, send_type: SendType, enctype: &str) -> Result<EncodedBody> {
    match send_type {
        SendType::Serialize => Ok(EncodedBody::Form {
            content_type: enctype.to_string(),
            body: to_urlencoded(data)?,
        }),
        SendType::Json => serde_json::to_string(data)
            .map(EncodedBody::Json)
            .map_err(|e| HttpClientError::Encode(e.to_string())),
        SendType::FormData => Ok(EncodedBody::Multipart(encode_pairs(data))),
    }
}
