//! Canonical wire schema.
//!
//! The short keys (`f`, `n`, `g`, `t`, `ff`, `x`, `y`, `z`) keep share links
//! short. The constant sets below are the only definition of what the
//! encoder may emit and the validator may accept.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 600;

/// Upper bound on flowers per bouquet. A bouquet always has at least one.
pub const MAX_FLOWERS: usize = 6;

pub const MAX_NOTE_WORDS: usize = 50;

/// Character cap on note text after markup removal, counted in UTF-16 units.
pub const MAX_NOTE_CHARS: usize = 1000;

/// Fonts a note card may use.
pub const ALLOWED_FONTS: &[&str] = &["DM Sans"];

pub fn is_allowed_font(font: &str) -> bool {
    ALLOWED_FONTS.contains(&font)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tag {0:?}")]
pub struct UnknownTag(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowerType {
    Rose,
    Tulip,
    Sunflower,
    Lily,
    Daisy,
    Peony,
    Orchid,
    Carnation,
    Dahlia,
}

impl FlowerType {
    pub const ALL: [FlowerType; 9] = [
        FlowerType::Rose,
        FlowerType::Tulip,
        FlowerType::Sunflower,
        FlowerType::Lily,
        FlowerType::Daisy,
        FlowerType::Peony,
        FlowerType::Orchid,
        FlowerType::Carnation,
        FlowerType::Dahlia,
    ];

    /// Wire tag, e.g. `"sunflower"`.
    pub fn as_str(self) -> &'static str {
        match self {
            FlowerType::Rose => "rose",
            FlowerType::Tulip => "tulip",
            FlowerType::Sunflower => "sunflower",
            FlowerType::Lily => "lily",
            FlowerType::Daisy => "daisy",
            FlowerType::Peony => "peony",
            FlowerType::Orchid => "orchid",
            FlowerType::Carnation => "carnation",
            FlowerType::Dahlia => "dahlia",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }
}

impl fmt::Display for FlowerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlowerType {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| UnknownTag(s.to_string()))
    }
}

/// Background greenery behind the flowers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GreeneryType {
    #[default]
    None,
    Bush,
    Monstera,
    Sprigs,
}

impl GreeneryType {
    pub const ALL: [GreeneryType; 4] = [
        GreeneryType::None,
        GreeneryType::Bush,
        GreeneryType::Monstera,
        GreeneryType::Sprigs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GreeneryType::None => "none",
            GreeneryType::Bush => "bush",
            GreeneryType::Monstera => "monstera",
            GreeneryType::Sprigs => "sprigs",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == tag)
    }
}

impl fmt::Display for GreeneryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GreeneryType {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| UnknownTag(s.to_string()))
    }
}

/// Writes integral coordinates without a fractional part (`100`, not `100.0`).
fn compact_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    // 2^53: beyond this, f64 no longer represents every integer.
    const SAFE_INT: f64 = 9_007_199_254_740_992.0;
    if value.fract() == 0.0 && value.abs() < SAFE_INT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// One flower: `{t, x, y, z}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireFlower {
    pub t: FlowerType,
    #[serde(serialize_with = "compact_number")]
    pub x: f64,
    #[serde(serialize_with = "compact_number")]
    pub y: f64,
    pub z: u32,
}

/// The note card: `{t, ff, x, y}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireNote {
    pub t: String,
    pub ff: String,
    #[serde(serialize_with = "compact_number")]
    pub x: f64,
    #[serde(serialize_with = "compact_number")]
    pub y: f64,
}

/// Root payload: `{f, n, g}`. A missing note is written as an explicit `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireBouquet {
    pub f: Vec<WireFlower>,
    pub n: Option<WireNote>,
    pub g: GreeneryType,
}

impl WireBouquet {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
