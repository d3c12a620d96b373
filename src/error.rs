//! Error types for the segmentation library

use thiserror::Error;

/// Result type alias for segmentation operations
pub type Result<T> = std::result::Result<T, SegmentationError>;

/// Error types for change-region detection
#[derive(Error, Debug)]
pub enum SegmentationError {
    /// Image file could not be read or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<opencv::Error>,
    },

    /// OpenCV operation failed
    #[error("OpenCV error: {operation}")]
    OpenCvError {
        operation: String,
        #[source]
        source: Option<opencv::Error>,
    },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Result could not be encoded for output
    #[error("Failed to encode result: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },
}

impl SegmentationError {
    /// Create an image load error with context
    pub fn image_load(message: impl Into<String>, source: opencv::Error) -> Self {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create an image load error without an underlying cause
    pub fn image_load_message(message: impl Into<String>) -> Self {
        Self::ImageLoadError {
            message: message.into(),
            source: None,
        }
    }

    /// Create an OpenCV error with context
    pub fn opencv(operation: impl Into<String>, source: opencv::Error) -> Self {
        Self::OpenCvError {
            operation: operation.into(),
            source: Some(source),
        }
    }
}
