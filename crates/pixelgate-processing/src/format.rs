//! Image type registry
//!
//! The single list of formats the engine decodes and encodes. Convert
//! validation and the engine both resolve names through `ImageType::from_name`,
//! so a format accepted at validation time is always one the engine can write.

use image::ImageFormat;
use pixelgate_core::constants::FALLBACK_CONTENT_TYPE;
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageType {
    Jpeg,
    Png,
    Webp,
    Gif,
    Tiff,
}

impl ImageType {
    pub const ALL: [ImageType; 5] = [
        ImageType::Jpeg,
        ImageType::Png,
        ImageType::Webp,
        ImageType::Gif,
        ImageType::Tiff,
    ];

    /// Resolve a caller-supplied type name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "jpeg" | "jpg" => Some(ImageType::Jpeg),
            "png" => Some(ImageType::Png),
            "webp" => Some(ImageType::Webp),
            "gif" => Some(ImageType::Gif),
            "tiff" | "tif" => Some(ImageType::Tiff),
            _ => None,
        }
    }

    /// Canonical lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            ImageType::Jpeg => "jpeg",
            ImageType::Png => "png",
            ImageType::Webp => "webp",
            ImageType::Gif => "gif",
            ImageType::Tiff => "tiff",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ImageType::Jpeg => "image/jpeg",
            ImageType::Png => "image/png",
            ImageType::Webp => "image/webp",
            ImageType::Gif => "image/gif",
            ImageType::Tiff => "image/tiff",
        }
    }

    pub fn to_image_format(self) -> ImageFormat {
        match self {
            ImageType::Jpeg => ImageFormat::Jpeg,
            ImageType::Png => ImageFormat::Png,
            ImageType::Webp => ImageFormat::WebP,
            ImageType::Gif => ImageFormat::Gif,
            ImageType::Tiff => ImageFormat::Tiff,
        }
    }

    pub fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(ImageType::Jpeg),
            ImageFormat::Png => Some(ImageType::Png),
            ImageFormat::WebP => Some(ImageType::Webp),
            ImageFormat::Gif => Some(ImageType::Gif),
            ImageFormat::Tiff => Some(ImageType::Tiff),
            _ => None,
        }
    }

    /// Sniff the type from the buffer's magic bytes
    pub fn detect(data: &[u8]) -> Option<Self> {
        image::guess_format(data)
            .ok()
            .and_then(Self::from_image_format)
    }
}

impl Display for ImageType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Content type for a detected type; unknown content is an opaque stream
pub fn content_type(kind: Option<ImageType>) -> &'static str {
    kind.map(ImageType::mime).unwrap_or(FALLBACK_CONTENT_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(ImageType::from_name("JPG"), Some(ImageType::Jpeg));
        assert_eq!(ImageType::from_name("webp"), Some(ImageType::Webp));
        assert_eq!(ImageType::from_name(" png "), Some(ImageType::Png));
        assert_eq!(ImageType::from_name(""), None);
        assert_eq!(ImageType::from_name("not-a-real-format"), None);
    }

    #[test]
    fn test_names_round_trip_through_registry() {
        for kind in ImageType::ALL {
            assert_eq!(ImageType::from_name(kind.as_str()), Some(kind));
            assert_eq!(
                ImageType::from_image_format(kind.to_image_format()),
                Some(kind)
            );
        }
    }

    #[test]
    fn test_detect_by_magic_bytes() {
        let png_signature = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
        assert_eq!(ImageType::detect(&png_signature), Some(ImageType::Png));
        assert_eq!(content_type(ImageType::detect(&png_signature)), "image/png");

        let jpeg_signature = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0];
        assert_eq!(content_type(ImageType::detect(&jpeg_signature)), "image/jpeg");

        assert_eq!(ImageType::detect(b"{\"width\":1}"), None);
        assert_eq!(content_type(None), "application/octet-stream");
    }
}
