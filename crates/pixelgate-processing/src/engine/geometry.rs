//! Resize, crop, embed, extract and zoom

use super::EngineError;
use crate::descriptor::{Rgb, TransformDescriptor};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use pixelgate_core::Gravity;

/// Largest edge the engine will produce
pub const MAX_OUTPUT_DIMENSION: u32 = 16_384;

const DEFAULT_PADDING: Rgb = Rgb([0, 0, 0]);

/// Target size for a resize request. A missing side (0) is derived from the
/// source aspect ratio.
pub fn target_dimensions(orig_width: u32, orig_height: u32, width: u32, height: u32) -> (u32, u32) {
    match (width, height) {
        (0, 0) => (orig_width, orig_height),
        (w, 0) => {
            let aspect_ratio = orig_height as f32 / orig_width as f32;
            let h = (w as f32 * aspect_ratio).round() as u32;
            (w, h.max(1))
        }
        (0, h) => {
            let aspect_ratio = orig_width as f32 / orig_height as f32;
            let w = (h as f32 * aspect_ratio).round() as u32;
            (w.max(1), h)
        }
        (w, h) => (w, h),
    }
}

/// Pick a filter based on how much the image shrinks
pub fn select_filter(orig_width: u32, orig_height: u32, new_width: u32, new_height: u32) -> FilterType {
    let width_ratio = orig_width as f32 / new_width.max(1) as f32;
    let height_ratio = orig_height as f32 / new_height.max(1) as f32;
    let max_ratio = width_ratio.max(height_ratio);

    if max_ratio > 2.0 {
        FilterType::Triangle
    } else if max_ratio > 1.5 {
        FilterType::CatmullRom
    } else {
        FilterType::Lanczos3
    }
}

fn check_bounds(width: u32, height: u32) -> Result<(), EngineError> {
    if width == 0 || height == 0 {
        return Err(EngineError::Geometry(format!(
            "output size {}x{} is empty",
            width, height
        )));
    }
    if width > MAX_OUTPUT_DIMENSION || height > MAX_OUTPUT_DIMENSION {
        return Err(EngineError::Geometry(format!(
            "output size {}x{} exceeds the {}px limit",
            width, height, MAX_OUTPUT_DIMENSION
        )));
    }
    Ok(())
}

fn scale_exact(img: &DynamicImage, width: u32, height: u32, thumbnail: bool) -> DynamicImage {
    if thumbnail {
        return img.thumbnail_exact(width, height);
    }
    let (orig_width, orig_height) = img.dimensions();
    let filter = select_filter(orig_width, orig_height, width, height);
    img.resize_exact(width, height, filter)
}

/// Top-left corner of a `width`x`height` window inside `outer_w`x`outer_h`
fn gravity_offset(gravity: Gravity, outer_w: u32, outer_h: u32, width: u32, height: u32) -> (u32, u32) {
    let dx = outer_w.saturating_sub(width);
    let dy = outer_h.saturating_sub(height);
    match gravity {
        Gravity::Centre => (dx / 2, dy / 2),
        Gravity::North => (dx / 2, 0),
        Gravity::South => (dx / 2, dy),
        Gravity::East => (dx, dy / 2),
        Gravity::West => (0, dy / 2),
    }
}

/// Scale to cover the target, then cut the overflow according to gravity.
/// Without upscaling a small source yields a window smaller than requested.
fn cover(
    img: &DynamicImage,
    width: u32,
    height: u32,
    gravity: Gravity,
    allow_upscale: bool,
    thumbnail: bool,
) -> DynamicImage {
    let (orig_width, orig_height) = img.dimensions();
    let mut scale = (width as f32 / orig_width as f32).max(height as f32 / orig_height as f32);
    if !allow_upscale {
        scale = scale.min(1.0);
    }
    let scaled_width = ((orig_width as f32 * scale).round() as u32).max(1);
    let scaled_height = ((orig_height as f32 * scale).round() as u32).max(1);

    let scaled = if (scaled_width, scaled_height) == (orig_width, orig_height) {
        img.clone()
    } else {
        scale_exact(img, scaled_width, scaled_height, thumbnail)
    };
    let window_width = width.min(scaled_width);
    let window_height = height.min(scaled_height);
    let (x, y) = gravity_offset(gravity, scaled_width, scaled_height, window_width, window_height);
    scaled.crop_imm(x, y, window_width, window_height)
}

/// Scale to fit inside the target and pad the rest with `background`
fn embed(
    img: &DynamicImage,
    width: u32,
    height: u32,
    background: Rgb,
    gravity: Gravity,
    allow_upscale: bool,
    thumbnail: bool,
) -> DynamicImage {
    let (orig_width, orig_height) = img.dimensions();
    let mut scale = (width as f32 / orig_width as f32).min(height as f32 / orig_height as f32);
    if !allow_upscale {
        scale = scale.min(1.0);
    }

    let scaled_width = ((orig_width as f32 * scale).round() as u32).clamp(1, width);
    let scaled_height = ((orig_height as f32 * scale).round() as u32).clamp(1, height);

    let [r, g, b] = background.0;
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255]));
    let scaled = if (scaled_width, scaled_height) == (orig_width, orig_height) {
        img.clone()
    } else {
        scale_exact(img, scaled_width, scaled_height, thumbnail)
    };
    let (x, y) = gravity_offset(gravity, width, height, scaled_width, scaled_height);
    imageops::overlay(&mut canvas, &scaled.to_rgba8(), x as i64, y as i64);

    DynamicImage::ImageRgba8(canvas)
}

/// Cut the configured area out of the image
pub fn extract(img: DynamicImage, d: &TransformDescriptor) -> Result<DynamicImage, EngineError> {
    if !d.has_area() {
        return Ok(img);
    }
    let (orig_width, orig_height) = img.dimensions();
    let fits_horizontally = d.left.checked_add(d.area_width).is_some_and(|r| r <= orig_width);
    let fits_vertically = d.top.checked_add(d.area_height).is_some_and(|b| b <= orig_height);
    if !fits_horizontally || !fits_vertically {
        return Err(EngineError::Geometry(format!(
            "area {}x{}+{}+{} is outside the {}x{} image",
            d.area_width, d.area_height, d.left, d.top, orig_width, orig_height
        )));
    }
    Ok(img.crop_imm(d.left, d.top, d.area_width, d.area_height))
}

/// Integer magnification; factors of 0 and 1 are a no-op
pub fn zoom(img: DynamicImage, factor: u32) -> Result<DynamicImage, EngineError> {
    if factor <= 1 {
        return Ok(img);
    }
    let (orig_width, orig_height) = img.dimensions();
    let width = orig_width.saturating_mul(factor);
    let height = orig_height.saturating_mul(factor);
    check_bounds(width, height)?;
    Ok(img.resize_exact(width, height, FilterType::Nearest))
}

/// Apply the resize part of a descriptor
pub fn resize(img: DynamicImage, d: &TransformDescriptor) -> Result<DynamicImage, EngineError> {
    if !d.has_resize() {
        return Ok(img);
    }
    let (orig_width, orig_height) = img.dimensions();
    let (width, height) = target_dimensions(orig_width, orig_height, d.width, d.height);
    check_bounds(width, height)?;

    if (width, height) == (orig_width, orig_height) {
        return Ok(img);
    }

    if d.force {
        return Ok(scale_exact(&img, width, height, d.thumbnail));
    }

    let allow_upscale = d.enlarge;

    if d.crop {
        return Ok(cover(&img, width, height, d.gravity, allow_upscale, d.thumbnail));
    }

    if d.embed {
        let background = d.background.unwrap_or(DEFAULT_PADDING);
        return Ok(embed(&img, width, height, background, d.gravity, allow_upscale, d.thumbnail));
    }

    // Fit inside the box, keeping the aspect ratio
    if !allow_upscale && width >= orig_width && height >= orig_height {
        return Ok(img);
    }
    if d.thumbnail {
        Ok(img.thumbnail(width, height))
    } else {
        let filter = select_filter(orig_width, orig_height, width, height);
        Ok(img.resize(width, height, filter))
    }
}
