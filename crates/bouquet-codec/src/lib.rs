//! Share-link codec for bouquets.
//!
//! A bouquet travels inside a link as a compact JSON payload compressed into a
//! URL-safe string. [`encode`] produces that string from a trusted
//! [`Bouquet`]; [`decode`] turns an untrusted string back into a freshly
//! identified bouquet, or `None` when anything about it is off.
//!
//! ```
//! use bouquet_codec::{decode, encode, Bouquet, FlowerType, GreeneryType, Note, PlacedFlower, RandomIds};
//!
//! let mut ids = RandomIds;
//! let bouquet = Bouquet::new(
//!     vec![PlacedFlower::new(FlowerType::Rose, 100.0, 200.0, 1, &mut ids)],
//!     Some(Note::new("Happy birthday!", "DM Sans", 300.0, 480.0)),
//!     GreeneryType::Bush,
//!     &mut ids,
//! );
//!
//! let decoded = decode(&encode(&bouquet)).unwrap();
//! assert_eq!(decoded.flowers[0].flower_type, FlowerType::Rose);
//! assert_ne!(decoded.id, bouquet.id);
//! assert!(decode("garbage-not-compressed").is_none());
//! ```

pub mod catalog;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod ids;
pub mod markup;
pub mod model;
pub mod schema;
pub mod share;
pub mod validator;

pub use config::DecodeOptions;
pub use decoder::{decode, try_decode, Decoder};
pub use encoder::{encode, to_wire};
pub use error::{DecodeError, DecodeStage, SchemaError, ShareError};
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use model::{Bouquet, Note, PlacedFlower};
pub use schema::{
    FlowerType, GreeneryType, WireBouquet, WireFlower, WireNote, ALLOWED_FONTS, CANVAS_HEIGHT,
    CANVAS_WIDTH, MAX_FLOWERS, MAX_NOTE_CHARS, MAX_NOTE_WORDS,
};
pub use share::{decode_link, payload_from_link, share_link};
pub use validator::{is_valid, validate};
