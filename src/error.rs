//! Typed import failures.

use thiserror::Error;

/// Error raised while importing screens from a remote YAML document.
///
/// The whole import fails atomically: whichever variant is produced, no
/// partial screen list is committed to the store. `Display` is the single
/// human-readable message shown to the user.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Network failure or non-2xx response while fetching the document.
    #[error("failed to fetch configuration: {0}")]
    FetchFailed(String),

    /// The response body is not well-formed YAML.
    #[error("YAML syntax error: {0}")]
    Syntax(String),

    /// A document is well-formed YAML but not a valid screen definition.
    /// `index` is the document's 1-based position in the stream.
    #[error("invalid screen in document {index}: {reason}")]
    InvalidDocument { index: usize, reason: String },
}
