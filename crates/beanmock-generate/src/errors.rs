use thiserror::Error;

/// Errors emitted by the mock generation engine.
#[derive(Debug, Error)]
pub enum MockError {
    /// The type has no usable no-argument constructor.
    #[error("cannot construct '{type_name}': {reason}")]
    Construction { type_name: String, reason: String },
    /// The instance to fill is of a type the catalog does not describe.
    #[error("unknown bean type '{0}'")]
    UnknownType(String),
    /// An accessor invocation failed; the whole call is abandoned.
    #[error("access error: {0}")]
    Access(#[source] beanmock_core::Error),
    /// Nested building went deeper than the configured bound.
    #[error("maximum recursion depth {max_depth} exceeded while building '{type_name}'")]
    MaxDepthExceeded { type_name: String, max_depth: usize },
    #[error("catalog error: {0}")]
    Catalog(#[from] beanmock_core::Error),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("toml encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
    #[error("logging error: {0}")]
    Logging(String),
}
