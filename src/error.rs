//! Error types for the General lingo handler.
//!
//! The protocol core never fails: [`Dispatcher::handle`] always completes and
//! reports protocol-level problems through status codes inside normal
//! responses. Errors only arise at the edges, when loading configuration,
//! parsing request scripts, or doing I/O.
//!
//! [`Dispatcher::handle`]: crate::protocol::Dispatcher::handle

use thiserror::Error;

/// iAP General lingo errors.
#[derive(Error, Debug)]
pub enum IapError {
    /// Configuration could not be loaded or is inconsistent.
    #[error("Config error: {0}")]
    Config(String),

    /// A decoded message or command identifier is malformed.
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// A request script line could not be parsed.
    #[error("Script error at line {line}: {source}")]
    Script {
        /// 1-based line number in the script.
        line: usize,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for iAP operations
pub type Result<T> = std::result::Result<T, IapError>;

impl From<toml::de::Error> for IapError {
    fn from(err: toml::de::Error) -> Self {
        IapError::Config(err.to_string())
    }
}
