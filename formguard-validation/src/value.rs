// Form data snapshot

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Flat, insertion-ordered snapshot of a form's values keyed by field name.
pub type DataMap = IndexMap<String, FieldValue>;

/// Marker for a selected file. Only metadata is carried; contents stay with
/// the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    /// File name including extension
    pub name: String,

    /// Size in bytes
    pub size: u64,

    /// MIME type reported by the host, if any
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
}

impl FileRef {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            mime: None,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Lowercased extension without the dot.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}

/// Current value of one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// No value at all (missing input, unchecked radio group)
    Null,
    Bool(bool),
    Text(String),
    /// Multi-valued input such as `tags[]` or a checkbox group
    List(Vec<String>),
    Files(Vec<FileRef>),
    /// Values nested under a compound name (`user[name]`, `user.name`)
    Group(DataMap),
}

/// Shared absent value returned for fields missing from a snapshot.
pub static NULL: FieldValue = FieldValue::Null;

impl FieldValue {
    /// Truthiness used by field-name dependencies.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Null => false,
            FieldValue::Bool(b) => *b,
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::List(items) => !items.is_empty(),
            FieldValue::Files(files) => !files.is_empty(),
            FieldValue::Group(map) => !map.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Textual items: a single text or every entry of a list.
    pub fn texts(&self) -> Option<Vec<&str>> {
        match self {
            FieldValue::Text(s) => Some(vec![s.as_str()]),
            FieldValue::List(items) => Some(items.iter().map(String::as_str).collect()),
            _ => None,
        }
    }

    pub fn files(&self) -> Option<&[FileRef]> {
        match self {
            FieldValue::Files(files) => Some(files),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(value: Vec<&str>) -> Self {
        FieldValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<FileRef>> for FieldValue {
    fn from(value: Vec<FileRef>) -> Self {
        FieldValue::Files(value)
    }
}

impl From<DataMap> for FieldValue {
    fn from(value: DataMap) -> Self {
        FieldValue::Group(value)
    }
}

/// Split a compound field name into its path segments.
///
/// `user[address][city]`, `user.address.city` and `user[address].city` all
/// give `["user", "address", "city"]`; a trailing `[]` adds nothing.
pub fn name_path(name: &str) -> Vec<&str> {
    name.split(['.', '[', ']'])
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Look up a field's value by its (possibly compound) name.
///
/// An exact key wins over path resolution, so a host that stores `phone[]`
/// verbatim is served directly.
pub fn get_value_by_name<'a>(name: &str, data: &'a DataMap) -> Option<&'a FieldValue> {
    if let Some(value) = data.get(name) {
        return Some(value);
    }

    let mut segments = name_path(name).into_iter();
    let mut current = data.get(segments.next()?)?;

    for segment in segments {
        match current {
            FieldValue::Group(map) => current = map.get(segment)?,
            _ => return None,
        }
    }

    Some(current)
}

/// Merge `update` into `data`; groups merge per child, other values replace.
///
/// Inputs under one compound parent (`user[name]`, `user[email]`) each read
/// as `{user: Group}`, so a plain `extend` would keep only the last child.
pub fn merge_data(data: &mut DataMap, update: DataMap) {
    for (name, value) in update {
        match value {
            FieldValue::Group(next) => match data.get_mut(&name) {
                Some(FieldValue::Group(current)) => merge_data(current, next),
                _ => {
                    data.insert(name, FieldValue::Group(next));
                }
            },
            value => {
                data.insert(name, value);
            }
        }
    }
}
