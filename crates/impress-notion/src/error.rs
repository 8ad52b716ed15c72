//! Error types for impress-notion

use thiserror::Error;

use crate::field::FieldKind;
use crate::transport::TransportError;

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Main error type for schema and model operations
#[derive(Error, Debug)]
pub enum ModelError {
    /// The transport failed to complete a remote call
    #[error("Remote call failed: {source}")]
    RemoteCallFailed {
        #[from]
        source: TransportError,
    },

    /// Input named a field the schema does not declare
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Input value does not have the shape its declared kind needs
    #[error("Field '{field}' expects a {expected} value for kind {kind}")]
    ValueShape {
        field: String,
        kind: FieldKind,
        expected: &'static str,
    },

    /// Schema declared a kind name that is not supported
    #[error("Unknown field kind: {0}")]
    UnknownFieldKind(String),

    /// Schema declared the same field twice
    #[error("Duplicate field name: {0}")]
    DuplicateField(String),

    /// Schema marked more than one field as unique
    #[error("More than one unique field: {first} and {second}")]
    MultipleUniqueFields { first: String, second: String },

    /// Schema marked a field unique whose kind cannot be matched by equality
    #[error("Field '{field}' of kind {kind} cannot be unique")]
    InvalidUniqueField { field: String, kind: FieldKind },

    /// Schema declared a field under a name records reserve for themselves
    #[error("Reserved field name: {0}")]
    ReservedField(String),
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required variable or key is missing
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Value present but unusable
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// TOML parse error
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
