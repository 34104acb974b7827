//! Error types shared by the content graph, schema and sampler

use thiserror::Error;

/// Errors raised by the library layer
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Unknown field `{field}` on type {type_name}")]
    UnknownField { type_name: String, field: String },

    #[error("Unknown field extension: @{0}")]
    UnknownExtension(String),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Invalid front-matter in {path}: {message}")]
    InvalidFrontMatter { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
