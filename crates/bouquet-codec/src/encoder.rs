//! Bouquet to share payload.

use bouquet_lz_string::compress;
use tracing::trace;

use crate::model::Bouquet;
use crate::schema::{WireBouquet, WireFlower, WireNote};

/// Projects a bouquet onto the wire schema.
///
/// Drops `id`, `createdAt` and the canvas size, which the decoder
/// regenerates. Flower order is kept as given.
pub fn to_wire(bouquet: &Bouquet) -> WireBouquet {
    WireBouquet {
        f: bouquet
            .flowers
            .iter()
            .map(|flower| WireFlower {
                t: flower.flower_type,
                x: flower.x,
                y: flower.y,
                z: flower.z_index,
            })
            .collect(),
        n: bouquet.note.as_ref().map(|note| WireNote {
            t: note.text.clone(),
            ff: note.font_family.clone(),
            x: note.x,
            y: note.y,
        }),
        g: bouquet.greenery,
    }
}

/// Encodes a bouquet into a URL-safe payload for the `d` query parameter.
///
/// The input is trusted and not validated; whatever it holds is written out.
pub fn encode(bouquet: &Bouquet) -> String {
    let json = to_wire(bouquet).to_json();
    let payload = compress(&json);
    trace!(
        flowers = bouquet.flowers.len(),
        json_len = json.len(),
        payload_len = payload.len(),
        "encoded bouquet"
    );
    payload
}
