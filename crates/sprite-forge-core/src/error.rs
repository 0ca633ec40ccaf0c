use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpriteForgeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Manifest error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Cannot allocate a {width}x{height} canvas")]
    Allocation { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, SpriteForgeError>;
