//! Decoder limits.

/// Size guards applied before and during decompression.
///
/// Both limits bound the work spent on a hostile link before the validator
/// runs. The decompressed cap applies to the raw JSON, so a note padded with
/// markup that strips down to a short text can still be rejected here even
/// though the validator alone would accept it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Longest accepted encoded payload, in bytes.
    pub max_encoded_len: usize,
    /// Longest accepted decompressed JSON, in UTF-16 units.
    pub max_decompressed_len: usize,
}

impl DecodeOptions {
    pub const DEFAULT_MAX_ENCODED_LEN: usize = 32 * 1024;
    pub const DEFAULT_MAX_DECOMPRESSED_LEN: usize = 64 * 1024;
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_encoded_len: Self::DEFAULT_MAX_ENCODED_LEN,
            max_decompressed_len: Self::DEFAULT_MAX_DECOMPRESSED_LEN,
        }
    }
}
