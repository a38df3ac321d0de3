use thiserror::Error;

/// Core error type shared across beanmock crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The catalog violates internal invariants.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
    /// The requested type is not described by the catalog.
    #[error("unknown type '{0}'")]
    UnknownType(String),
    /// A field's accessor pair could not be resolved.
    #[error("cannot introspect {type_name}.{field}: {reason}")]
    Introspection {
        type_name: String,
        field: String,
        reason: String,
    },
    /// An accessor invocation was rejected.
    #[error("cannot access {type_name}.{field}: {reason}")]
    Access {
        type_name: String,
        field: String,
        reason: String,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results returned by beanmock crates.
pub type Result<T> = std::result::Result<T, Error>;
