//! Decompression of [`ALPHABET_URI`](crate::ALPHABET_URI) payloads.

use crate::constants::{CODE_CHAR16, CODE_CHAR8, CODE_END, DEFAULT_MAX_OUTPUT, RESET_VALUE};
use crate::LzError;

/// Maps an input character to its 6-bit value.
///
/// A space reads as `+`: form decoding of a query string turns a raw `+` into
/// a space before the payload reaches us.
fn char_value(ch: char) -> Option<u8> {
    let value = match ch {
        'A'..='Z' => ch as u8 - b'A',
        'a'..='z' => ch as u8 - b'a' + 26,
        '0'..='9' => ch as u8 - b'0' + 52,
        '+' | ' ' => 62,
        '-' => 63,
        _ => return None,
    };
    Some(value)
}

struct BitReader {
    values: Vec<u8>,
    index: usize,
    val: u32,
    position: u32,
}

impl BitReader {
    fn new(input: &str) -> Result<Self, LzError> {
        let values = input
            .char_indices()
            .map(|(at, ch)| char_value(ch).ok_or(LzError::InvalidChar(ch, at)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            values,
            index: 0,
            val: 0,
            position: 0,
        })
    }

    /// Reads `num_bits` bits, least significant bit first.
    fn read(&mut self, num_bits: u32) -> Result<u32, LzError> {
        let mut bits = 0u32;
        for i in 0..num_bits {
            if self.position == 0 {
                let next = self.values.get(self.index).ok_or(LzError::UnexpectedEnd)?;
                self.val = u32::from(*next);
                self.index += 1;
                self.position = RESET_VALUE;
            }
            if self.val & self.position != 0 {
                bits |= 1 << i;
            }
            self.position >>= 1;
        }
        Ok(bits)
    }

    fn read_literal(&mut self, code: u32) -> Result<u16, LzError> {
        let width = if code == CODE_CHAR8 { 8 } else { 16 };
        // At most 16 bits were read.
        Ok(self.read(width)? as u16)
    }
}

fn check_len(len: usize, max_len: usize) -> Result<(), LzError> {
    if len > max_len {
        return Err(LzError::OutputLimit(max_len));
    }
    Ok(())
}

/// Decompresses a payload produced by [`compress`](crate::compress).
///
/// Output is capped at [`DEFAULT_MAX_OUTPUT`] UTF-16 units; see
/// [`decompress_with_limit`].
///
/// # Errors
///
/// Fails on empty input, characters outside the alphabet, truncated streams,
/// back-references to codes that do not exist yet, and results that are not
/// valid UTF-16. Trailing characters after the end marker are ignored.
pub fn decompress(input: &str) -> Result<String, LzError> {
    decompress_with_limit(input, DEFAULT_MAX_OUTPUT)
}

/// Like [`decompress`], failing with [`LzError::OutputLimit`] as soon as the
/// output grows past `max_len` UTF-16 units.
///
/// LZ back-references let a short payload expand quadratically, so callers
/// handling untrusted input should pick a limit matching what they expect.
pub fn decompress_with_limit(input: &str, max_len: usize) -> Result<String, LzError> {
    if input.is_empty() {
        return Err(LzError::Empty);
    }
    let mut reader = BitReader::new(input)?;

    // Codes 0..=2 are reserved; their slots stay empty.
    let mut dictionary: Vec<Vec<u16>> = vec![Vec::new(), Vec::new(), Vec::new()];
    let mut enlarge_in: u32 = 4;
    let mut num_bits: u32 = 3;

    let first = match reader.read(2)? {
        code @ (CODE_CHAR8 | CODE_CHAR16) => reader.read_literal(code)?,
        CODE_END => return Ok(String::new()),
        code => return Err(LzError::InvalidCode(code)),
    };
    let mut w = vec![first];
    dictionary.push(w.clone());
    let mut result = w.clone();
    check_len(result.len(), max_len)?;

    loop {
        let mut code = reader.read(num_bits)?;
        match code {
            CODE_CHAR8 | CODE_CHAR16 => {
                let unit = reader.read_literal(code)?;
                dictionary.push(vec![unit]);
                code = (dictionary.len() - 1) as u32;
                enlarge_in -= 1;
            }
            CODE_END => {
                return String::from_utf16(&result).map_err(|_| LzError::InvalidUtf16);
            }
            _ => {}
        }

        if enlarge_in == 0 {
            enlarge_in = 1 << num_bits;
            num_bits += 1;
        }

        let index = code as usize;
        let entry = match dictionary.get(index) {
            Some(entry) if !entry.is_empty() => entry.clone(),
            // The one code that may run ahead of the dictionary: w + w[0].
            None if index == dictionary.len() => {
                let mut entry = w.clone();
                entry.extend(w.first());
                entry
            }
            _ => return Err(LzError::InvalidCode(code)),
        };

        result.extend_from_slice(&entry);
        check_len(result.len(), max_len)?;

        let mut phrase = w;
        phrase.extend(entry.first());
        dictionary.push(phrase);
        enlarge_in -= 1;
        w = entry;

        if enlarge_in == 0 {
            enlarge_in = 1 << num_bits;
            num_bits += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress;

    #[test]
    fn end_marker_alone_is_empty_text() {
        assert_eq!(decompress("Q").unwrap(), "");
    }

    #[test]
    fn empty_input_fails() {
        assert_eq!(decompress(""), Err(LzError::Empty));
    }

    #[test]
    fn foreign_characters_fail() {
        assert_eq!(decompress("ab!c"), Err(LzError::InvalidChar('!', 2)));
        assert!(matches!(decompress("abc$"), Err(LzError::InvalidChar('$', 3))));
        assert!(matches!(decompress("ab€"), Err(LzError::InvalidChar('€', 2))));
    }

    #[test]
    fn space_reads_as_plus() {
        let text = "{\"g\":\"monstera\",\"n\":null,\"note\":\"~~~~ ~~~ >>> ???\"}";
        let packed = compress(text);
        let mangled = packed.replace('+', " ");
        assert_eq!(decompress(&mangled).unwrap(), text);
    }

    #[test]
    fn truncation_fails() {
        let packed = compress("the quick brown fox jumps over the lazy dog");
        let cut = &packed[..packed.len() / 2];
        assert!(decompress(cut).is_err());
    }

    #[test]
    fn output_limit_is_enforced() {
        let text = "a".repeat(500);
        let packed = compress(&text);
        assert_eq!(decompress_with_limit(&packed, 500).unwrap(), text);
        assert_eq!(
            decompress_with_limit(&packed, 499),
            Err(LzError::OutputLimit(499))
        );
    }

    #[test]
    fn reserved_first_code_fails() {
        // 'w' = 0b110000: the first two bits read are 1, 1 -> code 3.
        assert_eq!(decompress("w"), Err(LzError::InvalidCode(3)));
    }
}
