//! Error types for render setup and image output.

use std::path::PathBuf;
use thiserror::Error;

/// Rejected render configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("samples per pixel must be at least 1")]
    NoSamples,

    #[error("bucket size must be at least 1 pixel")]
    EmptyBucket,
}

/// Errors that can occur while writing a rendered image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Image buffer is {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

pub type OutputResult<T> = Result<T, OutputError>;
