//! impress-notion: schema-mapped records over Notion databases.
//!
//! A [`Model`] pairs a database id with a [`ModelSchema`] and converts
//! between Notion's typed page properties and plain [`FieldValue`]s:
//!
//! - `title`, `rich_text`, `select` ↔ `FieldValue::Text`
//! - `multi_select`, `files` ↔ `FieldValue::List`
//!
//! Remote calls go through a [`PageTransport`]. The `native` feature
//! provides [`HttpTransport`] for the public REST API; tests supply their
//! own.

pub mod config;
pub mod error;
pub mod field;
pub mod model;
pub mod property;
pub mod query;
pub mod record;
pub mod schema;
pub mod transport;

#[cfg(feature = "native")]
pub mod http;

pub use config::NotionConfig;
pub use error::{ConfigError, ModelError, Result};
pub use field::{FieldKind, FieldValue};
pub use model::Model;
pub use property::{PropertyValue, QueryResponse, RawPage};
pub use query::*;
pub use record::Record;
pub use schema::{FieldDef, ModelSchema};
pub use transport::{PageTransport, TransportError};

#[cfg(feature = "native")]
pub use http::HttpTransport;
