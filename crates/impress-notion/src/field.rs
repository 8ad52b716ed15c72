//! Field kinds and the mapping between plain values and page properties.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::property::{FileObject, PropertyValue, RichText, SelectOption};

/// How a schema field is represented in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Title,
    RichText,
    Select,
    MultiSelect,
    Files,
}

impl FieldKind {
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Title,
        FieldKind::RichText,
        FieldKind::Select,
        FieldKind::MultiSelect,
        FieldKind::Files,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Title => "title",
            FieldKind::RichText => "rich_text",
            FieldKind::Select => "select",
            FieldKind::MultiSelect => "multi_select",
            FieldKind::Files => "files",
        }
    }

    /// Whether plain values of this kind are lists.
    pub fn is_list(&self) -> bool {
        matches!(self, FieldKind::MultiSelect | FieldKind::Files)
    }

    /// Value a record carries for this kind when the property is absent or unset.
    pub fn empty_value(&self) -> FieldValue {
        if self.is_list() {
            FieldValue::List(Vec::new())
        } else {
            FieldValue::Text(String::new())
        }
    }

    /// Kind of a property as returned by the store, if it is one we map.
    pub fn of_property(property: &PropertyValue) -> Option<FieldKind> {
        match property {
            PropertyValue::Title { .. } => Some(FieldKind::Title),
            PropertyValue::RichText { .. } => Some(FieldKind::RichText),
            PropertyValue::Select { .. } => Some(FieldKind::Select),
            PropertyValue::MultiSelect { .. } => Some(FieldKind::MultiSelect),
            PropertyValue::Files { .. } => Some(FieldKind::Files),
            PropertyValue::Unsupported => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ModelError::UnknownFieldKind(s.to_string()))
    }
}

/// Plain application value of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            FieldValue::Text(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::List(items) => items.is_empty(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        FieldValue::List(items.into_iter().map(str::to_string).collect())
    }
}

/// Convert a property returned by the store to a plain value.
///
/// Dispatches on the property's own tag. Unsupported tags degrade to an
/// empty string and are logged, so one odd column never fails a record.
pub fn read_property(field: &str, property: &PropertyValue) -> FieldValue {
    match property {
        PropertyValue::Title { title } => FieldValue::Text(first_run_text(title)),
        PropertyValue::RichText { rich_text } => FieldValue::Text(first_run_text(rich_text)),
        PropertyValue::Select { select } => FieldValue::Text(
            select
                .as_ref()
                .map(|option| option.name.clone())
                .unwrap_or_default(),
        ),
        PropertyValue::MultiSelect { multi_select } => FieldValue::List(
            multi_select
                .iter()
                .map(|option| option.name.clone())
                .collect(),
        ),
        PropertyValue::Files { files } => FieldValue::List(
            files
                .iter()
                .filter_map(FileObject::url)
                .map(str::to_string)
                .collect(),
        ),
        PropertyValue::Unsupported => {
            tracing::warn!("Unsupported property type for field '{}', using empty value", field);
            FieldValue::Text(String::new())
        }
    }
}

fn first_run_text(runs: &[RichText]) -> String {
    runs.first()
        .map(|run| run.plain_text().to_string())
        .unwrap_or_default()
}

/// Build the property the store expects for `value`, according to the
/// field's declared kind.
pub fn write_property(
    field: &str,
    kind: FieldKind,
    value: &FieldValue,
) -> Result<PropertyValue, ModelError> {
    let shape_error = |expected| ModelError::ValueShape {
        field: field.to_string(),
        kind,
        expected,
    };

    let property = match (kind, value) {
        (FieldKind::Title, FieldValue::Text(s)) => PropertyValue::Title {
            title: vec![RichText::text(s.as_str())],
        },
        (FieldKind::RichText, FieldValue::Text(s)) => PropertyValue::RichText {
            rich_text: vec![RichText::text(s.as_str())],
        },
        (FieldKind::Select, FieldValue::Text(s)) => PropertyValue::Select {
            select: Some(SelectOption::named(s.as_str())),
        },
        (FieldKind::MultiSelect, FieldValue::List(items)) => PropertyValue::MultiSelect {
            multi_select: items.iter().map(|s| SelectOption::named(s.as_str())).collect(),
        },
        (FieldKind::Files, FieldValue::Text(url)) => PropertyValue::Files {
            files: vec![external_file(url)],
        },
        (FieldKind::Files, FieldValue::List(urls)) => PropertyValue::Files {
            files: urls.iter().map(|url| external_file(url)).collect(),
        },
        (FieldKind::Title | FieldKind::RichText | FieldKind::Select, FieldValue::List(_)) => {
            return Err(shape_error("text"))
        }
        (FieldKind::MultiSelect, FieldValue::Text(_)) => return Err(shape_error("list")),
    };

    Ok(property)
}

fn external_file(url: &str) -> FileObject {
    FileObject::external(file_name(url), url)
}

/// Display name for an external file: the last non-empty path segment of
/// the value as written, with query and fragment removed, or the whole value
/// when it has none. The segment is not percent-encoded or decoded.
pub fn file_name(value: &str) -> String {
    let without_suffix = value.split(['?', '#']).next().unwrap_or(value);
    let path = match without_suffix.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map_or("", |(_, path)| path),
        None => without_suffix,
    };
    path.split('/')
        .filter(|s| !s.is_empty())
        .last()
        .map_or_else(|| value.to_string(), str::to_string)
}
