// THEORY:
// A single error enum covers every failure the library can surface. The core
// classifier itself is total; the only condition it reports is an empty
// classification, which callers must handle instead of dividing by zero. The
// remaining variants belong to the acquisition layer (decoding, buffer shape)
// and to the parallel pipeline (worker joins).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TriageError {
    #[error("no classifiable pixels: every pixel fell outside the color buckets")]
    EmptyClassification,

    #[error("unsupported channel count: {0} (expected 3 for RGB or 4 for RGBA)")]
    InvalidChannelCount(usize),

    #[error("pixel buffer of {len} bytes is not a multiple of {channels} channels")]
    TruncatedBuffer { len: usize, channels: usize },

    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("classification worker failed: {0}")]
    Worker(String),
}

pub type Result<T> = std::result::Result<T, TriageError>;
