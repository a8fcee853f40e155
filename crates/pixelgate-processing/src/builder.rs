//! Descriptor builder
//!
//! Pure translation from validated `ImageOptions` to a `TransformDescriptor`.
//! No I/O and no validation: the registry has already rejected bad input
//! before anything here runs.

use crate::descriptor::{Angle, Rgb, TransformDescriptor, WatermarkDescriptor};
use crate::format::ImageType;
use crate::operation::Operation;
use pixelgate_core::ImageOptions;

/// Fields passed through unchanged for every operation
fn base(opts: &ImageOptions) -> TransformDescriptor {
    TransformDescriptor {
        width: opts.width_or_zero(),
        height: opts.height_or_zero(),
        rotate: Angle::from_degrees(opts.rotate_or_zero()),
        flip: opts.flip(),
        flop: opts.flop(),
        force: opts.force(),
        quality: opts.quality.unwrap_or(0),
        compression: opts.compression.unwrap_or(0),
        format: ImageType::from_name(opts.image_type()),
        gravity: opts.gravity.unwrap_or_default(),
        background: opts.background.as_deref().and_then(Rgb::from_channels),
        ..Default::default()
    }
}

fn set_area(descriptor: &mut TransformDescriptor, opts: &ImageOptions) {
    descriptor.top = opts.top_or_zero();
    descriptor.left = opts.left_or_zero();
    descriptor.area_width = opts.area_width_or_zero();
    descriptor.area_height = opts.area_height_or_zero();
}

fn watermark(opts: &ImageOptions) -> WatermarkDescriptor {
    WatermarkDescriptor {
        text: opts.text().to_string(),
        font: opts.font().to_string(),
        dpi: opts.dpi.unwrap_or(0),
        margin: opts.margin.unwrap_or(0),
        width: opts.text_width.unwrap_or(0),
        opacity: opts.opacity.unwrap_or(0.0),
        no_replicate: opts.no_replicate(),
        background: opts.color.as_deref().and_then(Rgb::from_channels),
    }
}

/// Build the descriptor for `operation` from already validated options
pub fn build_descriptor(operation: Operation, opts: &ImageOptions) -> TransformDescriptor {
    let mut descriptor = base(opts);
    let crop = !opts.no_crop();

    match operation {
        Operation::Resize => {
            descriptor.embed = true;
            descriptor.crop = crop;
        }
        Operation::Enlarge => {
            descriptor.enlarge = true;
            descriptor.crop = crop;
        }
        Operation::Crop => {
            descriptor.crop = crop;
        }
        Operation::Thumbnail => {
            descriptor.thumbnail = true;
            descriptor.crop = crop;
        }
        Operation::Extract => set_area(&mut descriptor, opts),
        Operation::Zoom => {
            if opts.has_offset() {
                set_area(&mut descriptor, opts);
                descriptor.crop = crop;
            }
            descriptor.zoom = opts.factor_or_zero();
        }
        Operation::Flip => descriptor.flip = true,
        Operation::Flop => descriptor.flop = true,
        Operation::Watermark => descriptor.watermark = Some(watermark(opts)),
        Operation::Info | Operation::Rotate | Operation::Convert => {}
    }

    descriptor
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelgate_core::Gravity;

    fn opts() -> ImageOptions {
        ImageOptions::default()
    }

    #[test]
    fn test_resize_enables_crop_and_embed() {
        let o = ImageOptions {
            width: Some(100),
            height: Some(0),
            no_crop: Some(false),
            ..opts()
        };
        let d = build_descriptor(Operation::Resize, &o);
        assert!(d.crop);
        assert!(d.embed);
        assert!(!d.enlarge);
        assert_eq!((d.width, d.height), (100, 0));
    }

    #[test]
    fn test_no_crop_is_respected() {
        let o = ImageOptions {
            width: Some(100),
            no_crop: Some(true),
            ..opts()
        };
        for op in [
            Operation::Resize,
            Operation::Enlarge,
            Operation::Crop,
            Operation::Thumbnail,
        ] {
            assert!(!build_descriptor(op, &o).crop, "{} should not crop", op);
        }
    }

    #[test]
    fn test_enlarge_and_thumbnail_flags() {
        let o = ImageOptions {
            width: Some(10),
            height: Some(10),
            ..opts()
        };
        let d = build_descriptor(Operation::Enlarge, &o);
        assert!(d.enlarge && d.crop && !d.embed);

        let d = build_descriptor(Operation::Thumbnail, &o);
        assert!(d.thumbnail && d.crop && !d.enlarge);
    }

    #[test]
    fn test_extract_copies_area_without_crop() {
        let o = ImageOptions {
            top: Some(5),
            left: Some(6),
            area_width: Some(70),
            area_height: Some(80),
            ..opts()
        };
        let d = build_descriptor(Operation::Extract, &o);
        assert_eq!((d.top, d.left, d.area_width, d.area_height), (5, 6, 70, 80));
        assert!(!d.crop);
    }

    #[test]
    fn test_area_ignored_outside_extract_and_zoom() {
        let o = ImageOptions {
            width: Some(10),
            top: Some(5),
            area_width: Some(70),
            area_height: Some(80),
            ..opts()
        };
        let d = build_descriptor(Operation::Resize, &o);
        assert!(!d.has_area());
        assert_eq!(d.top, 0);
    }

    #[test]
    fn test_zoom_with_and_without_offset() {
        let o = ImageOptions {
            factor: Some(2),
            ..opts()
        };
        let d = build_descriptor(Operation::Zoom, &o);
        assert_eq!(d.zoom, 2);
        assert!(!d.has_area());
        assert!(!d.crop);

        let o = ImageOptions {
            factor: Some(3),
            left: Some(4),
            area_width: Some(10),
            area_height: Some(12),
            ..opts()
        };
        let d = build_descriptor(Operation::Zoom, &o);
        assert_eq!(d.zoom, 3);
        assert_eq!((d.left, d.area_width, d.area_height), (4, 10, 12));
        assert!(d.crop);
    }

    #[test]
    fn test_watermark_color_needs_three_channels() {
        let o = ImageOptions {
            text: Some("hello".to_string()),
            color: Some(vec![255, 0]),
            ..opts()
        };
        let wm = build_descriptor(Operation::Watermark, &o).watermark.unwrap();
        assert_eq!(wm.text, "hello");
        assert_eq!(wm.background, None);

        let o = ImageOptions {
            text: Some("hello".to_string()),
            color: Some(vec![1, 2, 3, 4]),
            opacity: Some(0.5),
            margin: Some(8),
            dpi: Some(150),
            text_width: Some(200),
            no_replicate: Some(true),
            font: Some("sans 12".to_string()),
            ..opts()
        };
        let wm = build_descriptor(Operation::Watermark, &o).watermark.unwrap();
        assert_eq!(wm.background, Some(Rgb([1, 2, 3])));
        assert_eq!(wm.opacity, 0.5);
        assert_eq!((wm.margin, wm.dpi, wm.width), (8, 150, 200));
        assert!(wm.no_replicate);
        assert_eq!(wm.font, "sans 12");
    }

    #[test]
    fn test_convert_sets_format_only() {
        let o = ImageOptions {
            image_type: Some("webp".to_string()),
            ..opts()
        };
        let d = build_descriptor(Operation::Convert, &o);
        assert_eq!(
            d,
            TransformDescriptor {
                format: Some(ImageType::Webp),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_passthrough_fields() {
        let o = ImageOptions {
            rotate: Some(90),
            quality: Some(60),
            gravity: Some(Gravity::North),
            background: Some(vec![9, 9, 9]),
            ..opts()
        };
        let d = build_descriptor(Operation::Rotate, &o);
        assert_eq!(d.rotate, Angle::D90);
        assert_eq!(d.quality, 60);
        assert_eq!(d.gravity, Gravity::North);
        assert_eq!(d.background, Some(Rgb([9, 9, 9])));
        assert!(d.watermark.is_none());
    }

    #[test]
    fn test_flip_and_flop_operations() {
        assert!(build_descriptor(Operation::Flip, &opts()).flip);
        assert!(!build_descriptor(Operation::Flip, &opts()).flop);
        assert!(build_descriptor(Operation::Flop, &opts()).flop);
    }

    #[test]
    fn test_builder_is_deterministic() {
        let o = ImageOptions {
            width: Some(120),
            text: Some("x".to_string()),
            ..opts()
        };
        for op in Operation::ALL {
            assert_eq!(build_descriptor(op, &o), build_descriptor(op, &o));
        }
    }
}
