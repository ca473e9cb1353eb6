//! Share payload to bouquet.
//!
//! Decoding runs four stages in order: decompress, parse, validate,
//! reconstruct. The first three may reject; reconstruction cannot fail. A
//! rejected payload never yields a partially built bouquet.

use bouquet_lz_string::decompress_with_limit;
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::DecodeOptions;
use crate::error::DecodeError;
use crate::ids::{IdGenerator, RandomIds};
use crate::markup::strip_markup;
use crate::model::{Bouquet, Note, PlacedFlower};
use crate::schema::{WireBouquet, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::validator::validate;

/// Reusable decoder holding limits and an id source.
///
/// Decoding is otherwise stateless: two calls never influence each other.
#[derive(Debug, Clone)]
pub struct Decoder<G = RandomIds> {
    options: DecodeOptions,
    ids: G,
}

impl Decoder<RandomIds> {
    pub fn new() -> Self {
        Self::with_ids(RandomIds)
    }
}

impl Default for Decoder<RandomIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> Decoder<G> {
    pub fn with_ids(ids: G) -> Self {
        Self {
            options: DecodeOptions::default(),
            ids,
        }
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decodes a payload, collapsing every failure to `None`.
    pub fn decode(&mut self, payload: &str) -> Option<Bouquet> {
        match self.try_decode(payload) {
            Ok(bouquet) => Some(bouquet),
            Err(err) => {
                debug!(stage = %err.stage(), error = %err, "rejected bouquet payload");
                None
            }
        }
    }

    /// Decodes a payload, reporting why it was rejected.
    pub fn try_decode(&mut self, payload: &str) -> Result<Bouquet, DecodeError> {
        let max = self.options.max_encoded_len;
        if payload.len() > max {
            return Err(DecodeError::InputTooLong {
                len: payload.len(),
                max,
            });
        }

        let text = decompress_with_limit(payload, self.options.max_decompressed_len)?;
        trace!(len = text.len(), "decompressed payload");

        let parsed: Value = serde_json::from_str(&text)?;
        let wire = validate(&parsed)?;
        trace!(flowers = wire.f.len(), note = wire.n.is_some(), "payload valid");

        Ok(self.reconstruct(wire))
    }

    fn reconstruct(&mut self, wire: WireBouquet) -> Bouquet {
        let id = self.ids.next_id();
        let flowers = wire
            .f
            .into_iter()
            .map(|f| PlacedFlower {
                id: self.ids.next_id(),
                flower_type: f.t,
                x: f.x,
                y: f.y,
                z_index: f.z,
            })
            .collect();
        let note = wire.n.map(|n| Note {
            text: strip_markup(&n.t),
            font_family: n.ff,
            x: n.x,
            y: n.y,
        });

        Bouquet {
            id,
            flowers,
            note,
            greenery: wire.g,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            created_at: Utc::now(),
        }
    }
}

/// Decodes a share payload with default limits and random ids.
///
/// Returns `None` for anything that is not a valid bouquet: corrupted or
/// truncated payloads, malformed JSON, and schema violations alike.
pub fn decode(payload: &str) -> Option<Bouquet> {
    Decoder::new().decode(payload)
}

/// Like [`decode`], but says which stage rejected the payload.
pub fn try_decode(payload: &str) -> Result<Bouquet, DecodeError> {
    Decoder::new().try_decode(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DecodeStage, SchemaError};
    use crate::ids::SequentialIds;
    use bouquet_lz_string::{compress, LzError};
    use serde_json::json;

    fn packed(value: Value) -> String {
        compress(&value.to_string())
    }

    #[test]
    fn stages_are_reported() {
        let err = try_decode("").unwrap_err();
        assert_eq!(err.stage(), DecodeStage::Decompress);

        let err = try_decode(&compress("{not json")).unwrap_err();
        assert_eq!(err.stage(), DecodeStage::Parse);

        let err = try_decode(&compress("\"just a string\"")).unwrap_err();
        assert!(matches!(err, DecodeError::Schema(SchemaError::RootNotObject)));
        assert_eq!(err.stage(), DecodeStage::Validate);
    }

    #[test]
    fn injected_ids_are_used_in_order() {
        let payload = packed(json!({
            "f": [
                {"t": "rose", "x": 1, "y": 2, "z": 2},
                {"t": "lily", "x": 3, "y": 4, "z": 1}
            ],
            "n": null,
            "g": "bush"
        }));
        let mut decoder = Decoder::with_ids(SequentialIds::new("id"));
        let bouquet = decoder.decode(&payload).unwrap();
        assert_eq!(bouquet.id, "id-1");
        assert_eq!(bouquet.flowers[0].id, "id-2");
        assert_eq!(bouquet.flowers[1].id, "id-3");
        assert_eq!(bouquet.flowers[0].z_index, 2);
    }

    #[test]
    fn oversized_input_is_rejected_before_decompression() {
        let options = DecodeOptions {
            max_encoded_len: 8,
            ..DecodeOptions::default()
        };
        let mut decoder = Decoder::new().with_options(options);
        let err = decoder.try_decode("AAAAAAAAAAAAAAAA").unwrap_err();
        assert!(matches!(err, DecodeError::InputTooLong { len: 16, max: 8 }));
    }

    #[test]
    fn decompressed_size_is_bounded() {
        let payload = packed(json!({
            "f": [{"t": "rose", "x": 1, "y": 2, "z": 1}],
            "n": null,
            "g": "bush",
            "pad": "x".repeat(10_000)
        }));
        let options = DecodeOptions {
            max_decompressed_len: 1_000,
            ..DecodeOptions::default()
        };
        let err = Decoder::new()
            .with_options(options)
            .try_decode(&payload)
            .unwrap_err();
        assert!(matches!(err, DecodeError::Decompress(_)));
        // Default limits accept the same padded payload.
        assert!(decode(&payload).is_some());
    }

    #[test]
    fn markup_padding_counts_against_the_decompressed_cap() {
        let padded = format!("<{}>hi", "x".repeat(70_000));
        let payload = packed(json!({
            "f": [{"t": "rose", "x": 1, "y": 2, "z": 1}],
            "n": {"t": padded, "ff": "DM Sans", "x": 10, "y": 10},
            "g": "none"
        }));
        assert!(payload.len() < DecodeOptions::DEFAULT_MAX_ENCODED_LEN);

        let err = try_decode(&payload).unwrap_err();
        assert!(matches!(err, DecodeError::Decompress(LzError::OutputLimit(_))));

        let options = DecodeOptions {
            max_decompressed_len: 128 * 1024,
            ..DecodeOptions::default()
        };
        let bouquet = Decoder::new()
            .with_options(options)
            .decode(&payload)
            .unwrap();
        assert_eq!(bouquet.note.unwrap().text, "hi");
    }
}
