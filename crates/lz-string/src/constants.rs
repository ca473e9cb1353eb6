/// URL-safe output alphabet. Neither `+` nor `-` needs escaping in a query value.
///
/// lz-string's table carries a 65th character, `$`, which the 6-bit encoder
/// never emits; it is rejected on input here.
pub const ALPHABET_URI: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+-";

/// Number of payload bits carried by each output character.
pub(crate) const BITS_PER_CHAR: u32 = 6;

/// Mask of the highest payload bit of an output character.
pub(crate) const RESET_VALUE: u32 = 1 << (BITS_PER_CHAR - 1);

/// Stream codes reserved by the format.
pub(crate) const CODE_CHAR8: u32 = 0;
pub(crate) const CODE_CHAR16: u32 = 1;
pub(crate) const CODE_END: u32 = 2;

/// Default cap on decompressed output, in UTF-16 code units.
pub const DEFAULT_MAX_OUTPUT: usize = 1 << 20;
