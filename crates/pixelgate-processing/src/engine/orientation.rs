use crate::descriptor::Angle;
use image::{imageops, DynamicImage};

/// Rotate image clockwise by the given angle
pub fn rotate(img: DynamicImage, angle: Angle) -> DynamicImage {
    match angle {
        Angle::D0 => img,
        Angle::D90 => img.rotate90(),
        Angle::D180 => img.rotate180(),
        Angle::D270 => img.rotate270(),
    }
}

/// Flip: mirror top to bottom
pub fn flip(img: DynamicImage) -> DynamicImage {
    DynamicImage::ImageRgba8(imageops::flip_vertical(&img.to_rgba8()))
}

/// Flop: mirror left to right
pub fn flop(img: DynamicImage) -> DynamicImage {
    DynamicImage::ImageRgba8(imageops::flip_horizontal(&img.to_rgba8()))
}
