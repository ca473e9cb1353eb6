//! In-memory bouquet values.
//!
//! These serialize with camelCase keys (`zIndex`, `fontFamily`,
//! `canvasWidth`, `createdAt`), the shape the builder and viewer exchange.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::IdGenerator;
use crate::schema::{FlowerType, GreeneryType, CANVAS_HEIGHT, CANVAS_WIDTH};

/// A flower placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedFlower {
    pub id: String,
    #[serde(rename = "type")]
    pub flower_type: FlowerType,
    pub x: f64,
    pub y: f64,
    /// Stacking order, 1 is the bottom layer.
    pub z_index: u32,
}

impl PlacedFlower {
    pub fn new(
        flower_type: FlowerType,
        x: f64,
        y: f64,
        z_index: u32,
        ids: &mut impl IdGenerator,
    ) -> Self {
        Self {
            id: ids.next_id(),
            flower_type,
            x,
            y,
            z_index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub text: String,
    pub font_family: String,
    pub x: f64,
    pub y: f64,
}

impl Note {
    pub fn new(text: impl Into<String>, font_family: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            font_family: font_family.into(),
            x,
            y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bouquet {
    pub id: String,
    pub flowers: Vec<PlacedFlower>,
    pub note: Option<Note>,
    pub greenery: GreeneryType,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub created_at: DateTime<Utc>,
}

impl Bouquet {
    /// Assembles a bouquet from trusted parts with a fresh id, the standard
    /// canvas, and the current time. Nothing is validated.
    pub fn new(
        flowers: Vec<PlacedFlower>,
        note: Option<Note>,
        greenery: GreeneryType,
        ids: &mut impl IdGenerator,
    ) -> Self {
        Self {
            id: ids.next_id(),
            flowers,
            note,
            greenery,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use serde_json::json;

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut ids = SequentialIds::new("id");
        let flower = PlacedFlower::new(FlowerType::Peony, 10.0, 20.0, 1, &mut ids);
        let value = serde_json::to_value(&flower).unwrap();
        assert_eq!(
            value,
            json!({"id": "id-1", "type": "peony", "x": 10.0, "y": 20.0, "zIndex": 1})
        );

        let bouquet = Bouquet::new(
            vec![flower],
            Some(Note::new("hi", "DM Sans", 1.0, 2.0)),
            GreeneryType::Sprigs,
            &mut ids,
        );
        let value = serde_json::to_value(&bouquet).unwrap();
        assert_eq!(value["id"], "id-2");
        assert_eq!(value["canvasWidth"], 800);
        assert_eq!(value["canvasHeight"], 600);
        assert_eq!(value["greenery"], "sprigs");
        assert_eq!(value["note"]["fontFamily"], "DM Sans");
        assert!(value["createdAt"].is_string());
    }

    #[test]
    fn deserializes_builder_json() {
        let bouquet: Bouquet = serde_json::from_value(json!({
            "id": "b1",
            "flowers": [{"id": "f1", "type": "dahlia", "x": 5, "y": 6, "zIndex": 1}],
            "note": null,
            "greenery": "none",
            "canvasWidth": 800,
            "canvasHeight": 600,
            "createdAt": "2024-02-14T09:30:00.000Z"
        }))
        .unwrap();
        assert_eq!(bouquet.flowers[0].flower_type, FlowerType::Dahlia);
        assert_eq!(bouquet.flowers[0].x, 5.0);
        assert!(bouquet.note.is_none());
    }
}
