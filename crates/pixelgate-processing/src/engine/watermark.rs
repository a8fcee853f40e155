//! Text watermark
//!
//! The text is rendered once into a transparent block, its alpha scaled by
//! the requested opacity, then overlaid either once at the margin or tiled
//! across the whole image.

use super::geometry::MAX_OUTPUT_DIMENSION;
use super::EngineError;
use crate::descriptor::{Rgb, WatermarkDescriptor};
use ab_glyph::{FontVec, PxScale};
use image::{imageops, DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::Path;

pub const DEFAULT_POINT_SIZE: f32 = 10.0;
pub const DEFAULT_DPI: u32 = 75;
const DEFAULT_INK: Rgb = Rgb([0, 0, 0]);
const LINE_SPACING: f32 = 1.2;

/// Largest rendered glyph height in pixels (points * dpi / 72)
pub const MAX_TEXT_PX: f32 = 2048.0;

/// Largest text block in pixels, checked before the block is allocated
pub const MAX_BLOCK_PIXELS: u64 = 1 << 26;

/// Parsed font option: "<family or path> <points>"
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub points: f32,
}

impl FontSpec {
    pub fn parse(spec: &str) -> Self {
        let mut tokens: Vec<&str> = spec.split_whitespace().collect();
        let points = match tokens.last().and_then(|t| t.parse::<f32>().ok()) {
            Some(points) if points > 0.0 => {
                tokens.pop();
                points
            }
            _ => DEFAULT_POINT_SIZE,
        };
        FontSpec {
            family: tokens.join(" "),
            points,
        }
    }
}

fn load_font(family: &str, fallback: Option<&Path>) -> Result<FontVec, EngineError> {
    let candidate = Path::new(family);
    let path = if !family.is_empty() && candidate.is_file() {
        candidate
    } else {
        fallback.ok_or_else(|| {
            EngineError::Watermark(format!("no font available for '{}'", family))
        })?
    };

    let data = std::fs::read(path)
        .map_err(|e| EngineError::Watermark(format!("cannot read font {}: {}", path.display(), e)))?;
    FontVec::try_from_vec(data)
        .map_err(|e| EngineError::Watermark(format!("invalid font {}: {}", path.display(), e)))
}

/// Greedy word wrap. `max_width` of 0 only splits on explicit newlines.
pub fn wrap_lines(text: &str, max_width: u32, measure: impl Fn(&str) -> u32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        if max_width == 0 {
            lines.push(paragraph.to_string());
            continue;
        }
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{} {}", current, word);
            if measure(&candidate) > max_width {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            } else {
                current = candidate;
            }
        }
        lines.push(current);
    }
    lines
}

fn effective_opacity(opacity: f32) -> f32 {
    if opacity <= 0.0 || opacity > 1.0 || opacity.is_nan() {
        1.0
    } else {
        opacity
    }
}

fn text_scale(points: f32, dpi: u32) -> Result<PxScale, EngineError> {
    let px = points * dpi as f32 / 72.0;
    if !px.is_finite() || px > MAX_TEXT_PX {
        return Err(EngineError::Watermark(format!(
            "text size {}pt at {}dpi exceeds the {}px limit",
            points, dpi, MAX_TEXT_PX
        )));
    }
    Ok(PxScale::from(px))
}

fn check_block(width: u64, height: u64) -> Result<(), EngineError> {
    let max = MAX_OUTPUT_DIMENSION as u64;
    if width > max || height > max || width * height > MAX_BLOCK_PIXELS {
        return Err(EngineError::Watermark(format!(
            "text block {}x{} is too large",
            width, height
        )));
    }
    Ok(())
}

/// Render the text block; `None` when nothing visible would be drawn
fn render_block(
    font: &FontVec,
    scale: PxScale,
    wm: &WatermarkDescriptor,
) -> Result<Option<RgbaImage>, EngineError> {
    let lines = wrap_lines(&wm.text, wm.width, |line| text_size(scale, font, line).0);
    let line_height = (scale.y * LINE_SPACING).ceil() as u64;
    let block_width = lines
        .iter()
        .map(|line| text_size(scale, font, line).0)
        .max()
        .unwrap_or(0) as u64;
    let block_height = line_height * lines.len() as u64;
    if block_width == 0 || block_height == 0 {
        return Ok(None);
    }
    check_block(block_width, block_height)?;
    let (block_width, block_height, line_height) =
        (block_width as u32, block_height as u32, line_height as u32);

    let [r, g, b] = wm.background.unwrap_or(DEFAULT_INK).0;
    let ink = Rgba([r, g, b, 255]);
    let mut block = RgbaImage::new(block_width, block_height);
    for (i, line) in lines.iter().enumerate() {
        let y = (i as u32 * line_height) as i32;
        draw_text_mut(&mut block, ink, 0, y, scale, font, line);
    }

    let opacity = effective_opacity(wm.opacity);
    if opacity < 1.0 {
        for pixel in block.pixels_mut() {
            pixel[3] = (pixel[3] as f32 * opacity) as u8;
        }
    }
    Ok(Some(block))
}

/// Draw the watermark onto `img`
pub fn apply(
    img: DynamicImage,
    wm: &WatermarkDescriptor,
    default_font: Option<&Path>,
) -> Result<DynamicImage, EngineError> {
    let spec = FontSpec::parse(&wm.font);
    let dpi = if wm.dpi == 0 { DEFAULT_DPI } else { wm.dpi };
    let scale = text_scale(spec.points, dpi)?;
    let font = load_font(&spec.family, default_font)?;

    let Some(block) = render_block(&font, scale, wm)? else {
        return Ok(img);
    };

    let mut canvas = img.to_rgba8();
    let margin = wm.margin as i64;
    if wm.no_replicate {
        imageops::overlay(&mut canvas, &block, margin, margin);
    } else {
        let step_x = block.width() as i64 + margin * 2;
        let step_y = block.height() as i64 + margin * 2;
        let mut y = margin;
        while y < canvas.height() as i64 {
            let mut x = margin;
            while x < canvas.width() as i64 {
                imageops::overlay(&mut canvas, &block, x, y);
                x += step_x;
            }
            y += step_y;
        }
    }

    Ok(DynamicImage::ImageRgba8(canvas))
}
