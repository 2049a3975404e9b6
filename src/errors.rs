//! Error types for swaggen

use thiserror::Error;

/// Main error type for swaggen
#[derive(Error, Debug)]
pub enum SwaggenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Unknown type {schema_type} for schema {key}")]
    UnsupportedSchemaType {
        key: String,
        schema_type: String,
    },

    #[error("Unsupported array property")]
    UnsupportedArrayProperty,

    #[error("Unsupported property")]
    UnsupportedProperty,

    #[error("Unsupported allOf entry")]
    UnsupportedAllOfEntry,

    #[error("Unsupported payload type")]
    UnsupportedPayloadType,

    #[error("Empty url parts")]
    EmptyUrlParts,
}

pub type Result<T> = std::result::Result<T, SwaggenError>;
