use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::field::FieldValue;

/// Key under which the page id appears in a flattened record.
pub const ID_FIELD: &str = "_id";

/// A page normalized against a schema.
///
/// `fields` holds exactly one entry per schema field. Serializes flat, with
/// the page id under `_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    pub fn list(&self, field: &str) -> Option<&[String]> {
        self.get(field).and_then(FieldValue::as_list)
    }

    /// Flatten into a single map, with the page id under `_id`.
    pub fn into_map(self) -> BTreeMap<String, FieldValue> {
        let mut map = self.fields;
        map.insert(ID_FIELD.to_string(), FieldValue::Text(self.id));
        map
    }
}
