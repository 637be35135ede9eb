use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing image files
#[derive(Debug, Error)]
pub enum ImageIoError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Image {path} has no pixels")]
    EmptyImage { path: PathBuf },

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
}

/// Errors raised by canvas operations
#[derive(Debug, Error)]
pub enum CanvasError {
    /// The raster is created on the first layout pass; nothing can be loaded before that
    #[error("Canvas has not been sized yet")]
    NotInitialized,

    #[error(transparent)]
    Image(#[from] ImageIoError),
}

/// Result type for image file operations
pub type ImageIoResult<T> = Result<T, ImageIoError>;

/// Result type for canvas operations
pub type CanvasResult<T> = Result<T, CanvasError>;
