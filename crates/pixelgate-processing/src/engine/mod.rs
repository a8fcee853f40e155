//! Transformation engine
//!
//! The engine is the only component that touches pixels. The rest of the
//! crate sees it through the `Engine` trait so it can be replaced (and mocked
//! in tests); `PixelEngine` is the implementation backed by the `image`
//! ecosystem.
//!
//! Engine calls are blocking and CPU bound. They may also panic on
//! malformed input; the executor is responsible for containing that.

mod encode;
mod geometry;
mod metadata;
mod orientation;
mod pixel;
mod watermark;

pub use pixel::PixelEngine;

use crate::descriptor::TransformDescriptor;
use crate::format::ImageType;
use serde::{Deserialize, Serialize};

/// Engine errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    #[error("Unsupported or unrecognised image type")]
    UnsupportedType,

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Invalid geometry: {0}")]
    Geometry(String),

    #[error("Watermark failed: {0}")]
    Watermark(String),
}

/// Image details and metadata as reported by the info operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    #[serde(rename = "type")]
    pub image_type: String,
    pub space: String,
    #[serde(rename = "hasAlpha")]
    pub has_alpha: bool,
    #[serde(rename = "hasProfile")]
    pub has_profile: bool,
    pub channels: u8,
    pub orientation: u32,
}

pub trait Engine: Send + Sync {
    /// Apply `descriptor` to the encoded image in `data` and return the
    /// re-encoded result.
    fn transform(&self, data: &[u8], descriptor: &TransformDescriptor)
        -> Result<Vec<u8>, EngineError>;

    /// Read image details without transforming
    fn metadata(&self, data: &[u8]) -> Result<ImageInfo, EngineError>;

    /// Identify the encoded type of `data`
    fn detect_type(&self, data: &[u8]) -> Option<ImageType> {
        ImageType::detect(data)
    }
}
