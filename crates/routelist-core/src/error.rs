use thiserror::Error;

/// Result type alias for corpus operations
pub type Result<T> = std::result::Result<T, CorpusError>;

/// Errors that can occur while compiling the rule corpus
#[derive(Error, Debug)]
pub enum CorpusError {
    /// A required core source list does not exist
    #[error("missing upstream list {name}: {location}")]
    MissingSource {
        /// Source name as configured
        name: String,
        /// Where the source was expected
        location: String,
    },

    /// Configuration is invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading a source failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CorpusError {
    /// Returns true if the error is a setup problem rather than a data problem
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::MissingSource { .. } | Self::Config(_))
    }
}
