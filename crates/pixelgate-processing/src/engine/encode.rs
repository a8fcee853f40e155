//! Output encoding

use super::EngineError;
use crate::format::ImageType;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;

pub const DEFAULT_JPEG_QUALITY: u8 = 80;
pub const DEFAULT_WEBP_QUALITY: u8 = 80;
pub const DEFAULT_PNG_COMPRESSION: u8 = 6;

/// Quality 0 means "use the default"; anything above 100 is clamped
fn effective_quality(quality: u8, default: u8) -> u8 {
    if quality == 0 {
        default
    } else {
        quality.min(100)
    }
}

/// Map a zlib-style 0-9 level onto the encoder presets
fn png_compression(level: u8) -> CompressionType {
    let level = if level == 0 {
        DEFAULT_PNG_COMPRESSION
    } else {
        level
    };
    match level {
        1..=3 => CompressionType::Fast,
        4..=6 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}

fn encode_err(err: impl std::fmt::Display) -> EngineError {
    EngineError::Encode(err.to_string())
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, EngineError> {
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(
        &mut buffer,
        effective_quality(quality, DEFAULT_JPEG_QUALITY),
    );
    img.to_rgb8().write_with_encoder(encoder).map_err(encode_err)?;
    Ok(buffer)
}

fn encode_png(img: &DynamicImage, compression: u8) -> Result<Vec<u8>, EngineError> {
    let mut buffer = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut buffer, png_compression(compression), PngFilter::Adaptive);
    img.write_with_encoder(encoder).map_err(encode_err)?;
    Ok(buffer)
}

fn encode_webp(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, EngineError> {
    let (width, height) = img.dimensions();
    let rgba_img = img.to_rgba8();

    // libwebp rejects sides above 16383 px; `encode` would panic on that
    let encoder = webp::Encoder::from_rgba(&rgba_img, width, height);
    let webp_data = encoder
        .encode_simple(false, effective_quality(quality, DEFAULT_WEBP_QUALITY) as f32)
        .map_err(|e| EngineError::Encode(format!("webp: {:?}", e)))?;

    Ok(webp_data.to_vec())
}

/// GIF and TIFF go through the generic writer, which needs a seekable sink
fn encode_generic(img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, EngineError> {
    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img.to_rgba8())
        .write_to(&mut cursor, format)
        .map_err(encode_err)?;
    Ok(cursor.into_inner())
}

/// Encode `img` as `kind`
pub fn encode(
    img: &DynamicImage,
    kind: ImageType,
    quality: u8,
    compression: u8,
) -> Result<Vec<u8>, EngineError> {
    match kind {
        ImageType::Jpeg => encode_jpeg(img, quality),
        ImageType::Png => encode_png(img, compression),
        ImageType::Webp => encode_webp(img, quality),
        ImageType::Gif | ImageType::Tiff => encode_generic(img, kind.to_image_format()),
    }
}
