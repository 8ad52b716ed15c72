use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{ModelError, Result};
use crate::field::FieldKind;
use crate::record::ID_FIELD;

/// A field definition within a model schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
    /// Marks the field used by `find_by_unique_field`.
    #[serde(default)]
    pub unique: bool,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            unique: false,
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// Immutable set of field definitions for one database.
///
/// The unique field is resolved once when the schema is built:
/// an explicit `unique` mark wins, otherwise the single `title` field is
/// used. Several `title` fields without a mark resolve to none.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSchema {
    fields: Vec<FieldDef>,
    #[serde(skip)]
    unique_field: Option<usize>,
}

impl ModelSchema {
    pub fn new(fields: Vec<FieldDef>) -> Result<Self> {
        let mut seen = HashSet::new();
        for field in &fields {
            if field.name == ID_FIELD {
                return Err(ModelError::ReservedField(field.name.clone()));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(ModelError::DuplicateField(field.name.clone()));
            }
        }

        let unique_field = resolve_unique_field(&fields)?;
        Ok(Self {
            fields,
            unique_field,
        })
    }

    /// Build a schema from `(name, kind)` pairs.
    pub fn from_kinds<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, FieldKind)>,
        S: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(name, kind)| FieldDef::new(name, kind))
                .collect(),
        )
    }

    /// Build a schema from `(name, kind name)` pairs, as found in config.
    pub fn parse<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let fields = pairs
            .into_iter()
            .map(|(name, kind)| -> Result<FieldDef> { Ok(FieldDef::new(name, kind.parse()?)) })
            .collect::<Result<Vec<_>>>()?;
        Self::new(fields)
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn kind_of(&self, name: &str) -> Option<FieldKind> {
        self.get(name).map(|f| f.kind)
    }

    pub fn unique_field(&self) -> Option<&FieldDef> {
        self.unique_field.map(|i| &self.fields[i])
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'de> Deserialize<'de> for ModelSchema {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            fields: Vec<FieldDef>,
        }

        let raw = Raw::deserialize(deserializer)?;
        ModelSchema::new(raw.fields).map_err(serde::de::Error::custom)
    }
}

fn resolve_unique_field(fields: &[FieldDef]) -> Result<Option<usize>> {
    let mut marked: Option<usize> = None;
    for (i, field) in fields.iter().enumerate() {
        if !field.unique {
            continue;
        }
        if field.kind == FieldKind::Files {
            return Err(ModelError::InvalidUniqueField {
                field: field.name.clone(),
                kind: field.kind,
            });
        }
        if let Some(first) = marked {
            return Err(ModelError::MultipleUniqueFields {
                first: fields[first].name.clone(),
                second: field.name.clone(),
            });
        }
        marked = Some(i);
    }
    if marked.is_some() {
        return Ok(marked);
    }

    let titles: Vec<usize> = fields
        .iter()
        .enumerate()
        .filter(|(_, f)| f.kind == FieldKind::Title)
        .map(|(i, _)| i)
        .collect();
    match titles.as_slice() {
        [only] => Ok(Some(*only)),
        [] => Ok(None),
        _ => {
            tracing::warn!(
                "{} title fields and none marked unique; unique lookups are disabled",
                titles.len()
            );
            Ok(None)
        }
    }
}
