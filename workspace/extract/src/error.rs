use thiserror::Error;

/// Error types for the extract module
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The uploaded document could not be read
    #[error("Document error: {0}")]
    Document(String),

    /// The uploaded document contains no usable text
    #[error("Document '{0}' contains no text")]
    EmptyDocument(String),

    /// The configured LLM provider is not supported
    #[error("Unsupported LLM provider '{0}'")]
    UnsupportedProvider(String),

    /// The LLM request itself failed
    #[error("LLM error: {0}")]
    Llm(String),

    /// The LLM reply could not be parsed into plan metrics
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Type alias for Result with ExtractError
pub type Result<T> = std::result::Result<T, ExtractError>;
