//! Transformation descriptor
//!
//! The fully resolved parameter set handed to the engine. A descriptor is
//! built once per call and never mutated afterwards; fields an operation
//! does not use stay at their neutral defaults so the engine applies no
//! unintended effect.

use crate::format::ImageType;
use pixelgate_core::Gravity;

/// Clockwise rotation supported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Angle {
    #[default]
    D0,
    D90,
    D180,
    D270,
}

impl Angle {
    /// Normalise arbitrary degrees: reduce modulo 360, then truncate to the
    /// lower multiple of 90 (45 -> 0, 135 -> 90, -90 -> 270).
    pub fn from_degrees(degrees: i32) -> Self {
        match degrees.rem_euclid(360) / 90 {
            1 => Angle::D90,
            2 => Angle::D180,
            3 => Angle::D270,
            _ => Angle::D0,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Angle::D0 => 0,
            Angle::D90 => 90,
            Angle::D180 => 180,
            Angle::D270 => 270,
        }
    }
}

/// RGB colour triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// First three channels, or `None` when fewer than three are supplied
    pub fn from_channels(channels: &[u8]) -> Option<Self> {
        match channels {
            [r, g, b, ..] => Some(Rgb([*r, *g, *b])),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WatermarkDescriptor {
    pub text: String,
    pub font: String,
    pub dpi: u32,
    pub margin: u32,
    /// Wrap width for the text block in pixels, 0 = no wrapping
    pub width: u32,
    /// 0 means "unset"; the engine treats it as fully opaque
    pub opacity: f32,
    pub no_replicate: bool,
    /// Ink colour; `None` leaves the engine default
    pub background: Option<Rgb>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransformDescriptor {
    pub width: u32,
    pub height: u32,
    pub top: u32,
    pub left: u32,
    pub area_width: u32,
    pub area_height: u32,
    pub crop: bool,
    pub embed: bool,
    pub enlarge: bool,
    pub force: bool,
    pub thumbnail: bool,
    pub zoom: u32,
    pub rotate: Angle,
    pub flip: bool,
    pub flop: bool,
    pub quality: u8,
    pub compression: u8,
    pub format: Option<ImageType>,
    pub gravity: Gravity,
    /// Padding colour for embed
    pub background: Option<Rgb>,
    pub watermark: Option<WatermarkDescriptor>,
}

impl TransformDescriptor {
    pub fn has_area(&self) -> bool {
        self.area_width > 0 && self.area_height > 0
    }

    pub fn has_resize(&self) -> bool {
        self.width > 0 || self.height > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_normalisation() {
        assert_eq!(Angle::from_degrees(0), Angle::D0);
        assert_eq!(Angle::from_degrees(45), Angle::D0);
        assert_eq!(Angle::from_degrees(90), Angle::D90);
        assert_eq!(Angle::from_degrees(135), Angle::D90);
        assert_eq!(Angle::from_degrees(180), Angle::D180);
        assert_eq!(Angle::from_degrees(270), Angle::D270);
        assert_eq!(Angle::from_degrees(360), Angle::D0);
        assert_eq!(Angle::from_degrees(450), Angle::D90);
        assert_eq!(Angle::from_degrees(-90), Angle::D270);
    }

    #[test]
    fn test_rgb_requires_three_channels() {
        assert_eq!(Rgb::from_channels(&[1, 2]), None);
        assert_eq!(Rgb::from_channels(&[1, 2, 3]), Some(Rgb([1, 2, 3])));
        assert_eq!(Rgb::from_channels(&[1, 2, 3, 4]), Some(Rgb([1, 2, 3])));
    }

    #[test]
    fn test_default_descriptor_is_neutral() {
        let descriptor = TransformDescriptor::default();
        assert!(!descriptor.has_area());
        assert!(!descriptor.has_resize());
        assert!(!descriptor.crop && !descriptor.embed && !descriptor.enlarge);
        assert_eq!(descriptor.rotate, Angle::D0);
        assert!(descriptor.watermark.is_none());
    }
}
