//! Display metadata and layout constants for the flower catalog.

use crate::markup::word_count;
use crate::schema::{FlowerType, GreeneryType};

/// Rendered edge length of a flower on the canvas, in pixels.
pub const FLOWER_SIZE: u32 = 120;

/// Where a new note card lands: bottom centre, clear of the greenery.
pub const DEFAULT_NOTE_POSITION: (f64, f64) = (300.0, 480.0);

pub const NOTE_WIDTH: f64 = 200.0;
pub const NOTE_MAX_WIDTH: f64 = 280.0;

/// Note card width for `text`: grows with the square root of the word count,
/// capped at [`NOTE_MAX_WIDTH`].
pub fn note_width(text: &str) -> f64 {
    let extra = (word_count(text) as f64).sqrt() * 10.0;
    (NOTE_WIDTH + extra).min(NOTE_MAX_WIDTH)
}

impl FlowerType {
    pub fn display_name(self) -> &'static str {
        match self {
            FlowerType::Rose => "Rose",
            FlowerType::Tulip => "Tulip",
            FlowerType::Sunflower => "Sunflower",
            FlowerType::Lily => "Lily",
            FlowerType::Daisy => "Daisy",
            FlowerType::Peony => "Peony",
            FlowerType::Orchid => "Orchid",
            FlowerType::Carnation => "Carnation",
            FlowerType::Dahlia => "Dahlia",
        }
    }
}

impl GreeneryType {
    pub fn display_name(self) -> &'static str {
        match self {
            GreeneryType::None => "None",
            GreeneryType::Bush => "Bush",
            GreeneryType::Monstera => "Monstera",
            GreeneryType::Sprigs => "Sprigs",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_width_grows_then_caps() {
        assert_eq!(note_width(""), 200.0);
        assert_eq!(note_width("one two three four"), 220.0);
        assert_eq!(note_width(&"word ".repeat(100)), NOTE_MAX_WIDTH);
    }

    #[test]
    fn display_names_are_capitalised_tags() {
        for t in FlowerType::ALL {
            assert_eq!(t.display_name().to_lowercase(), t.as_str());
        }
        for g in GreeneryType::ALL {
            assert_eq!(g.display_name().to_lowercase(), g.as_str());
        }
    }
}
