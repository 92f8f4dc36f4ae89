//! Error types for rendering operations

use thiserror::Error;

pub use config::ConfigError;

/// Errors that abort a rendering pass.
///
/// Recoverable irregularities in the input (unknown node types, malformed
/// definition entries, levels climbing past the root) are never reported here;
/// they resolve to documented fallbacks instead.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A block the parser promised content for arrived without a text child.
    #[error("{node} node is missing its text content")]
    MissingContent { node: &'static str },

    /// The input document could not be deserialized.
    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Render settings could not be loaded.
    #[error("invalid render settings: {0}")]
    Config(#[from] ConfigError),

    /// No output format is registered under the requested name.
    #[error("format '{0}' not found")]
    FormatNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
