//! Error types for codec operations

use thiserror::Error;

/// Result type for codec operations
pub type OnasResult<T> = Result<T, OnasError>;

/// Errors that can occur while encoding, decoding or measuring images
#[derive(Error, Debug)]
pub enum OnasError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        expected: crate::Dimensions,
        actual: crate::Dimensions,
    },

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid sample data: {0}")]
    InvalidSample(String),

    #[error("Invalid bitstream: {0}")]
    InvalidBitstream(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image error: {0}")]
    ImageError(String),
}
