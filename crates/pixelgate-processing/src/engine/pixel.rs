use super::{encode, geometry, metadata, orientation, watermark};
use super::{Engine, EngineError, ImageInfo};
use crate::descriptor::TransformDescriptor;
use crate::format::ImageType;
use image::{DynamicImage, ImageReader};
use std::io::Cursor;
use std::path::PathBuf;

/// Engine backed by the `image` and `imageproc` crates
///
/// Pipeline order: rotate, flip/flop, extract, zoom, resize, watermark,
/// encode. The output keeps the source type unless the descriptor names one.
#[derive(Debug, Clone, Default)]
pub struct PixelEngine {
    default_font: Option<PathBuf>,
}

impl PixelEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Font used by watermarks whose font option does not name a file
    pub fn with_default_font(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_font = Some(path.into());
        self
    }

    fn decode(data: &[u8]) -> Result<DynamicImage, EngineError> {
        ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| EngineError::Decode(e.to_string()))?
            .decode()
            .map_err(|e| EngineError::Decode(e.to_string()))
    }
}

impl Engine for PixelEngine {
    fn transform(
        &self,
        data: &[u8],
        descriptor: &TransformDescriptor,
    ) -> Result<Vec<u8>, EngineError> {
        let source_type = ImageType::detect(data).ok_or(EngineError::UnsupportedType)?;
        let mut img = Self::decode(data)?;

        img = orientation::rotate(img, descriptor.rotate);
        if descriptor.flip {
            img = orientation::flip(img);
        }
        if descriptor.flop {
            img = orientation::flop(img);
        }
        img = geometry::extract(img, descriptor)?;
        img = geometry::zoom(img, descriptor.zoom)?;
        img = geometry::resize(img, descriptor)?;
        if let Some(wm) = &descriptor.watermark {
            img = watermark::apply(img, wm, self.default_font.as_deref())?;
        }

        let target = descriptor.format.unwrap_or(source_type);
        encode::encode(&img, target, descriptor.quality, descriptor.compression)
    }

    fn metadata(&self, data: &[u8]) -> Result<ImageInfo, EngineError> {
        metadata::read_info(data)
    }
}
