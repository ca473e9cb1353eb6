use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LzError {
    #[error("empty input")]
    Empty,
    #[error("invalid character {0:?} at byte {1}")]
    InvalidChar(char, usize),
    #[error("unexpected end of stream")]
    UnexpectedEnd,
    #[error("invalid code {0}")]
    InvalidCode(u32),
    #[error("decompressed data is not valid UTF-16")]
    InvalidUtf16,
    #[error("decompressed output exceeds {0} units")]
    OutputLimit(usize),
}
