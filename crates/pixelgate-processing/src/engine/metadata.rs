use super::{EngineError, ImageInfo};
use crate::format::ImageType;
use image::{ImageDecoder, ImageReader};
use std::io::Cursor;

/// Read dimensions, colour layout and orientation without decoding pixels
pub fn read_info(data: &[u8]) -> Result<ImageInfo, EngineError> {
    let kind = ImageType::detect(data).ok_or(EngineError::UnsupportedType)?;

    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| EngineError::Decode(e.to_string()))?;
    let mut decoder = reader
        .into_decoder()
        .map_err(|e| EngineError::Decode(e.to_string()))?;

    let (width, height) = decoder.dimensions();
    let color = decoder.color_type();
    let has_profile = decoder
        .icc_profile()
        .ok()
        .flatten()
        .is_some_and(|profile| !profile.is_empty());

    Ok(ImageInfo {
        width,
        height,
        image_type: kind.as_str().to_string(),
        space: if color.has_color() { "srgb" } else { "b-w" }.to_string(),
        has_alpha: color.has_alpha(),
        has_profile,
        channels: color.channel_count(),
        orientation: read_orientation(data).unwrap_or(0),
    })
}

/// EXIF orientation tag, if the container carries one
pub fn read_orientation(data: &[u8]) -> Option<u32> {
    let exif = exif::Reader::new()
        .read_from_container(&mut Cursor::new(data))
        .ok()?;
    let field = exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?;
    field.value.get_uint(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, Luma, Rgba, RgbaImage};

    fn encode_png(img: DynamicImage) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        img.write_to(&mut cursor, image::ImageFormat::Png).unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_rgba_png_info() {
        let data = encode_png(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            40,
            30,
            Rgba([1, 2, 3, 4]),
        )));
        let info = read_info(&data).unwrap();
        assert_eq!((info.width, info.height), (40, 30));
        assert_eq!(info.image_type, "png");
        assert_eq!(info.space, "srgb");
        assert!(info.has_alpha);
        assert!(!info.has_profile);
        assert_eq!(info.channels, 4);
        assert_eq!(info.orientation, 0);
    }

    #[test]
    fn test_grayscale_png_info() {
        let data = encode_png(DynamicImage::ImageLuma8(GrayImage::from_pixel(
            5,
            5,
            Luma([9]),
        )));
        let info = read_info(&data).unwrap();
        assert_eq!(info.space, "b-w");
        assert_eq!(info.channels, 1);
        assert!(!info.has_alpha);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(
            read_info(b"definitely not an image"),
            Err(EngineError::UnsupportedType)
        ));
        assert_eq!(read_orientation(b"nope"), None);
    }
}
