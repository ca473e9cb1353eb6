use std::fmt;

use bouquet_lz_string::LzError;
use thiserror::Error;

use crate::schema::{MAX_FLOWERS, MAX_NOTE_CHARS, MAX_NOTE_WORDS};

/// First check a payload failed. Paths name the offending field, e.g. `f[1].z`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("payload root must be an object")]
    RootNotObject,
    #[error("`f` must be an array")]
    FlowersNotArray,
    #[error("`f` must hold 1..={max} flowers, found {0}", max = MAX_FLOWERS)]
    FlowerCount(usize),
    #[error("`{0}` must be an object")]
    NotObject(String),
    #[error("`{0}` must be a string")]
    NotString(String),
    #[error("`{0}` is not a known flower type")]
    UnknownFlowerType(String),
    #[error("`{path}` must be a number in [{min}, {max}]")]
    OutOfRange { path: String, min: f64, max: f64 },
    #[error("`{0}` must be an integer")]
    NotInteger(String),
    #[error("`{0}` repeats a z-index")]
    DuplicateZIndex(String),
    #[error("note text is {0} characters long after markup removal, limit is {max}", max = MAX_NOTE_CHARS)]
    NoteTooLong(usize),
    #[error("note text has {0} words, limit is {max}", max = MAX_NOTE_WORDS)]
    NoteTooManyWords(usize),
    #[error("`n.ff` is not an allowed font")]
    FontNotAllowed,
    #[error("`g` is not a known greenery type")]
    UnknownGreenery,
}

/// Pipeline stage a decode failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStage {
    Decompress,
    Parse,
    Validate,
}

impl fmt::Display for DecodeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DecodeStage::Decompress => "decompress",
            DecodeStage::Parse => "parse",
            DecodeStage::Validate => "validate",
        })
    }
}

/// Why a payload was rejected. Callers of [`decode`](crate::decode) only see
/// `None`; this type exists for logs and tests.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload is {len} bytes, limit is {max}")]
    InputTooLong { len: usize, max: usize },
    #[error("decompression failed: {0}")]
    Decompress(#[from] LzError),
    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid bouquet: {0}")]
    Schema(#[from] SchemaError),
}

impl DecodeError {
    pub fn stage(&self) -> DecodeStage {
        match self {
            DecodeError::InputTooLong { .. } | DecodeError::Decompress(_) => {
                DecodeStage::Decompress
            }
            DecodeError::Parse(_) => DecodeStage::Parse,
            DecodeError::Schema(_) => DecodeStage::Validate,
        }
    }
}

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("invalid base URL: {0}")]
    InvalidBase(#[from] url::ParseError),
    #[error("base URL cannot carry a path")]
    CannotBeABase,
    #[error("base URL must not have a query or fragment")]
    BaseHasQuery,
}
