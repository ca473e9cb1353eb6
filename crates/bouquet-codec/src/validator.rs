//! Strict validation of untrusted wire payloads.
//!
//! [`validate`] walks an arbitrary [`serde_json::Value`] and either returns
//! the typed [`WireBouquet`] it checked or the first [`SchemaError`] found.
//! Every field is looked up and type-checked before use. Unknown fields are
//! ignored so newer encoders can add keys without breaking older decoders.

use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::markup::{strip_markup, text_len, word_count};
use crate::schema::{
    is_allowed_font, FlowerType, GreeneryType, WireBouquet, WireFlower, WireNote, CANVAS_HEIGHT,
    CANVAS_WIDTH, MAX_FLOWERS, MAX_NOTE_CHARS, MAX_NOTE_WORDS,
};

const X_MAX: f64 = CANVAS_WIDTH as f64;
const Y_MAX: f64 = CANVAS_HEIGHT as f64;

/// Validates a parsed payload.
///
/// Flower and note coordinates are checked against the full canvas,
/// `[0, CANVAS_WIDTH] x [0, CANVAS_HEIGHT]`, so a flower may sit with its
/// origin on the far edge.
pub fn validate(value: &Value) -> Result<WireBouquet, SchemaError> {
    let root = value.as_object().ok_or(SchemaError::RootNotObject)?;

    let flowers = root
        .get("f")
        .and_then(Value::as_array)
        .ok_or(SchemaError::FlowersNotArray)?;
    // Bound the work before touching any element.
    if flowers.is_empty() || flowers.len() > MAX_FLOWERS {
        return Err(SchemaError::FlowerCount(flowers.len()));
    }

    let f = flowers
        .iter()
        .enumerate()
        .map(|(i, flower)| validate_flower(i, flower, flowers.len()))
        .collect::<Result<Vec<_>, _>>()?;
    check_unique_z(&f)?;

    let n = match root.get("n") {
        Some(Value::Null) => None,
        Some(Value::Object(note)) => Some(validate_note(note)?),
        _ => return Err(SchemaError::NotObject("n".into())),
    };

    let g = root
        .get("g")
        .and_then(Value::as_str)
        .and_then(GreeneryType::from_tag)
        .ok_or(SchemaError::UnknownGreenery)?;

    Ok(WireBouquet { f, n, g })
}

pub fn is_valid(value: &Value) -> bool {
    validate(value).is_ok()
}

fn validate_flower(index: usize, value: &Value, count: usize) -> Result<WireFlower, SchemaError> {
    let path = |key: &str| format!("f[{index}].{key}");
    let flower = value
        .as_object()
        .ok_or_else(|| SchemaError::NotObject(format!("f[{index}]")))?;

    let t = flower
        .get("t")
        .and_then(Value::as_str)
        .and_then(FlowerType::from_tag)
        .ok_or_else(|| SchemaError::UnknownFlowerType(path("t")))?;
    let x = number_in_range(flower, "x", 0.0, X_MAX, || path("x"))?;
    let y = number_in_range(flower, "y", 0.0, Y_MAX, || path("y"))?;
    let z = number_in_range(flower, "z", 1.0, count as f64, || path("z"))?;
    if z.fract() != 0.0 {
        return Err(SchemaError::NotInteger(path("z")));
    }

    Ok(WireFlower {
        t,
        x,
        y,
        // In [1, MAX_FLOWERS] after the checks above.
        z: z as u32,
    })
}

fn check_unique_z(flowers: &[WireFlower]) -> Result<(), SchemaError> {
    let mut seen = [false; MAX_FLOWERS];
    for (i, flower) in flowers.iter().enumerate() {
        let slot = (flower.z as usize)
            .checked_sub(1)
            .and_then(|at| seen.get_mut(at))
            .ok_or_else(|| SchemaError::NotInteger(format!("f[{i}].z")))?;
        if *slot {
            return Err(SchemaError::DuplicateZIndex(format!("f[{i}].z")));
        }
        *slot = true;
    }
    Ok(())
}

fn validate_note(note: &Map<String, Value>) -> Result<WireNote, SchemaError> {
    let t = note
        .get("t")
        .and_then(Value::as_str)
        .ok_or_else(|| SchemaError::NotString("n.t".into()))?;

    // Length and word caps are independent: a short text can still hide
    // thousands of tokens.
    let clean = strip_markup(t);
    let len = text_len(&clean);
    if len > MAX_NOTE_CHARS {
        return Err(SchemaError::NoteTooLong(len));
    }
    let words = word_count(&clean);
    if words > MAX_NOTE_WORDS {
        return Err(SchemaError::NoteTooManyWords(words));
    }

    let ff = note
        .get("ff")
        .and_then(Value::as_str)
        .ok_or_else(|| SchemaError::NotString("n.ff".into()))?;
    if !is_allowed_font(ff) {
        return Err(SchemaError::FontNotAllowed);
    }

    let x = number_in_range(note, "x", 0.0, X_MAX, || "n.x".into())?;
    let y = number_in_range(note, "y", 0.0, Y_MAX, || "n.y".into())?;

    Ok(WireNote {
        t: t.to_string(),
        ff: ff.to_string(),
        x,
        y,
    })
}

fn number_in_range(
    object: &Map<String, Value>,
    key: &str,
    min: f64,
    max: f64,
    path: impl FnOnce() -> String,
) -> Result<f64, SchemaError> {
    object
        .get(key)
        .and_then(Value::as_f64)
        .filter(|v| !v.is_nan() && *v >= min && *v <= max)
        .ok_or_else(|| SchemaError::OutOfRange {
            path: path(),
            min,
            max,
        })
}
