// One error type for the raster engine.
// Every variant states *which* operation failed; out-of-bounds pixel access is
// not in here because clipping is silent.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Input bytes could not be decoded into an image.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Input is a known image format, but not one we accept.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Serializing the canvas failed; no bytes were produced.
    #[error("Encode error: {0}")]
    Encode(String),

    /// Brush radius must be finite and strictly positive.
    #[error("Invalid brush radius: {0}")]
    InvalidRadius(f32),

    /// A canvas needs at least one pixel in each direction.
    #[error("Invalid canvas size {width}x{height}")]
    InvalidCanvasSize { width: usize, height: usize },

    /// Reading or writing a stored logo failed.
    #[error("Blob store error: {0}")]
    Store(#[from] std::io::Error),
}

impl Error {
    /// True for both flavors of "these bytes are not a usable image".
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode(_) | Error::UnsupportedFormat(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
