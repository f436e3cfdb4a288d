//! Error types for OWL model operations.

/// Errors that can occur while building an ontology.
#[derive(Debug, thiserror::Error)]
pub enum OwlError {
    /// IRI parsing error.
    #[error("Invalid IRI: {0}")]
    InvalidIri(#[from] oxiri::IriParseError),

    /// General error with message.
    #[error("{0}")]
    Other(String),
}

/// Result type for OWL operations.
pub type OwlResult<T> = Result<T, OwlError>;
