mod client;
mod types;

pub use client::BannerClient;
pub use types::{GenerateRequest, ShapeKind, ShapeOverlay};

use thiserror::Error;

/// Failures from the backend boundary: transport problems, non-success
/// statuses, and responses that could not be read or parsed.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(#[from] Box<ureq::Error>),
    #[error("service returned status {0}")]
    Status(u16),
    #[error("unreadable response: {0}")]
    Io(#[from] std::io::Error),
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

/// Submits generation parameters and returns the rendered banner bytes.
pub trait GenerateBanner {
    fn generate(&self, request: &GenerateRequest) -> Result<Vec<u8>, ServiceError>;
}

/// Submits an image's encoded bytes for AI enhancement and returns the
/// enhanced image bytes.
pub trait EnhanceImage {
    fn enhance_image(&self, image: &[u8]) -> Result<Vec<u8>, ServiceError>;
}

/// Resolves a remote image URL into its raw bytes.
pub trait FetchImage {
    fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ServiceError>;
}
