//! Error types for the export engine

use thiserror::Error;

/// Result type alias for export operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while exporting a layout
#[derive(Error, Debug)]
pub enum Error {
    /// A caller-supplied argument is out of range or inconsistent
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested render engine is not known
    #[error("Unknown render engine: {0}")]
    UnknownEngine(String),

    /// Failed to render content
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Failed to encode or decode an image payload
    #[error("Image codec failed: {0}")]
    CodecError(String),

    /// Failed to serialize the document model
    #[error("Serialization failed: {0}")]
    SerializeError(String),

    /// Filesystem error while writing export artifacts
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializeError(err.to_string())
    }
}

impl From<png::EncodingError> for Error {
    fn from(err: png::EncodingError) -> Self {
        Error::CodecError(err.to_string())
    }
}

impl From<png::DecodingError> for Error {
    fn from(err: png::DecodingError) -> Self {
        Error::CodecError(err.to_string())
    }
}
