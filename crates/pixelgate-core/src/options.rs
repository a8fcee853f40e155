//! Caller-supplied image options
//!
//! `ImageOptions` is operation agnostic: it only describes what the caller
//! asked for. Every field is optional and an absent field means "not
//! requested". Numeric fields set to zero are treated the same as absent,
//! so `width=0` and no width at all are indistinguishable to validation.

use serde::{Deserialize, Deserializer};

/// Anchor used when cropping to a target box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gravity {
    #[default]
    #[serde(alias = "center")]
    Centre,
    North,
    South,
    East,
    West,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImageOptions {
    // Geometry
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub top: Option<u32>,
    pub left: Option<u32>,
    #[serde(alias = "areawidth")]
    pub area_width: Option<u32>,
    #[serde(alias = "areaheight")]
    pub area_height: Option<u32>,
    pub factor: Option<u32>,
    pub rotate: Option<i32>,
    #[serde(alias = "nocrop")]
    pub no_crop: Option<bool>,
    pub force: Option<bool>,
    pub gravity: Option<Gravity>,

    // Appearance
    #[serde(rename = "type")]
    pub image_type: Option<String>,
    pub quality: Option<u8>,
    pub compression: Option<u8>,
    pub flip: Option<bool>,
    pub flop: Option<bool>,
    #[serde(deserialize_with = "deserialize_channels")]
    pub background: Option<Vec<u8>>,

    // Watermark
    pub text: Option<String>,
    pub font: Option<String>,
    pub dpi: Option<u32>,
    pub margin: Option<u32>,
    #[serde(alias = "textwidth")]
    pub text_width: Option<u32>,
    pub opacity: Option<f32>,
    #[serde(alias = "noreplicate")]
    pub no_replicate: Option<bool>,
    #[serde(deserialize_with = "deserialize_channels")]
    pub color: Option<Vec<u8>>,

    // Persistence
    pub bucket: Option<String>,
    pub name: Option<String>,
}

fn value(v: Option<u32>) -> u32 {
    v.unwrap_or(0)
}

fn flag(v: Option<bool>) -> bool {
    v.unwrap_or(false)
}

fn text(v: &Option<String>) -> &str {
    v.as_deref().unwrap_or("")
}

impl ImageOptions {
    pub fn width_or_zero(&self) -> u32 {
        value(self.width)
    }

    pub fn height_or_zero(&self) -> u32 {
        value(self.height)
    }

    pub fn top_or_zero(&self) -> u32 {
        value(self.top)
    }

    pub fn left_or_zero(&self) -> u32 {
        value(self.left)
    }

    pub fn area_width_or_zero(&self) -> u32 {
        value(self.area_width)
    }

    pub fn area_height_or_zero(&self) -> u32 {
        value(self.area_height)
    }

    pub fn factor_or_zero(&self) -> u32 {
        value(self.factor)
    }

    pub fn rotate_or_zero(&self) -> i32 {
        self.rotate.unwrap_or(0)
    }

    pub fn no_crop(&self) -> bool {
        flag(self.no_crop)
    }

    pub fn force(&self) -> bool {
        flag(self.force)
    }

    pub fn flip(&self) -> bool {
        flag(self.flip)
    }

    pub fn flop(&self) -> bool {
        flag(self.flop)
    }

    pub fn no_replicate(&self) -> bool {
        flag(self.no_replicate)
    }

    pub fn image_type(&self) -> &str {
        text(&self.image_type)
    }

    pub fn text(&self) -> &str {
        text(&self.text)
    }

    pub fn font(&self) -> &str {
        text(&self.font)
    }

    /// At least one of width/height is non-zero
    pub fn has_any_dimension(&self) -> bool {
        self.width_or_zero() != 0 || self.height_or_zero() != 0
    }

    /// Both width and height are non-zero
    pub fn has_both_dimensions(&self) -> bool {
        self.width_or_zero() != 0 && self.height_or_zero() != 0
    }

    /// Both area width and area height are non-zero
    pub fn has_area(&self) -> bool {
        self.area_width_or_zero() != 0 && self.area_height_or_zero() != 0
    }

    /// Top or left offset is positive
    pub fn has_offset(&self) -> bool {
        self.top_or_zero() > 0 || self.left_or_zero() > 0
    }

    /// Destination (bucket, object name) when both are non-empty.
    /// A partially specified destination means "do not persist".
    pub fn persistence_target(&self) -> Option<(&str, &str)> {
        let bucket = text(&self.bucket);
        let name = text(&self.name);
        if bucket.is_empty() || name.is_empty() {
            None
        } else {
            Some((bucket, name))
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Channels {
    List(Vec<u8>),
    Text(String),
}

/// Accepts either a list of channel values or a comma separated string
/// (`"255,0,0"`), which is how colours arrive in query strings.
fn deserialize_channels<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Channels> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(Channels::List(list)) => Ok(Some(list)),
        Some(Channels::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Channels::Text(s)) => s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<u8>()
                    .map_err(|_| serde::de::Error::custom(format!("invalid colour channel: {}", part)))
            })
            .collect::<Result<Vec<u8>, D::Error>>()
            .map(Some),
    }
}
