//! LZ compression into the URL-safe alphabet.

use std::collections::{HashMap, HashSet};

use crate::constants::{ALPHABET_URI, BITS_PER_CHAR, CODE_CHAR16, CODE_CHAR8, CODE_END};

/// Packs variable-width codes into 6-bit output characters.
struct BitWriter {
    table: &'static [u8],
    out: String,
    val: u32,
    position: u32,
}

impl BitWriter {
    fn new() -> Self {
        Self {
            table: ALPHABET_URI.as_bytes(),
            out: String::new(),
            val: 0,
            position: 0,
        }
    }

    /// Writes the low `num_bits` bits of `value`, least significant bit first.
    fn write(&mut self, num_bits: u32, mut value: u32) {
        for _ in 0..num_bits {
            self.val = (self.val << 1) | (value & 1);
            if self.position == BITS_PER_CHAR - 1 {
                self.position = 0;
                self.push_char();
                self.val = 0;
            } else {
                self.position += 1;
            }
            value >>= 1;
        }
    }

    fn push_char(&mut self) {
        // `val` never holds more than BITS_PER_CHAR bits.
        if let Some(&byte) = self.table.get(self.val as usize) {
            self.out.push(byte as char);
        }
    }

    /// Pads the pending character with zero bits and returns the output.
    fn finish(mut self) -> String {
        loop {
            self.val <<= 1;
            if self.position == BITS_PER_CHAR - 1 {
                self.push_char();
                break;
            }
            self.position += 1;
        }
        self.out
    }
}

struct Compressor {
    dictionary: HashMap<Vec<u16>, u32>,
    // Single units seen but not yet written out as literals.
    pending: HashSet<u16>,
    enlarge_in: u32,
    dict_size: u32,
    num_bits: u32,
    writer: BitWriter,
}

impl Compressor {
    fn new() -> Self {
        Self {
            dictionary: HashMap::new(),
            pending: HashSet::new(),
            enlarge_in: 2,
            dict_size: 3,
            num_bits: 2,
            writer: BitWriter::new(),
        }
    }

    fn tick(&mut self) {
        self.enlarge_in -= 1;
        if self.enlarge_in == 0 {
            self.enlarge_in = 1 << self.num_bits;
            self.num_bits += 1;
        }
    }

    fn add(&mut self, phrase: Vec<u16>) {
        self.dictionary.insert(phrase, self.dict_size);
        self.dict_size += 1;
    }

    fn emit_phrase(&mut self, w: &[u16]) {
        match w {
            [unit] if self.pending.remove(unit) => {
                let unit = u32::from(*unit);
                if unit < 256 {
                    self.writer.write(self.num_bits, CODE_CHAR8);
                    self.writer.write(8, unit);
                } else {
                    self.writer.write(self.num_bits, CODE_CHAR16);
                    self.writer.write(16, unit);
                }
                self.tick();
            }
            _ => {
                // Every phrase reaching this branch was added to the
                // dictionary before it could be matched.
                let code = self.dictionary.get(w).copied().unwrap_or_default();
                self.writer.write(self.num_bits, code);
            }
        }
        self.tick();
    }
}

/// Compresses `input` into a string over [`ALPHABET_URI`].
///
/// The output is byte-for-byte what lz-string's
/// `compressToEncodedURIComponent` produces for the same input, so payloads
/// interoperate with JavaScript clients.
///
/// # Example
///
/// ```
/// use bouquet_lz_string::{compress, decompress};
///
/// let packed = compress("hello hello hello");
/// assert_eq!(decompress(&packed).unwrap(), "hello hello hello");
/// assert_eq!(compress(""), "Q");
/// ```
pub fn compress(input: &str) -> String {
    let mut c = Compressor::new();
    let mut w: Vec<u16> = Vec::new();

    for unit in input.encode_utf16() {
        if !c.dictionary.contains_key(&[unit][..]) {
            c.add(vec![unit]);
            c.pending.insert(unit);
        }

        let mut wc = Vec::with_capacity(w.len() + 1);
        wc.extend_from_slice(&w);
        wc.push(unit);
        if c.dictionary.contains_key(&wc) {
            w = wc;
        } else {
            c.emit_phrase(&w);
            c.add(wc);
            w.clear();
            w.push(unit);
        }
    }

    if !w.is_empty() {
        c.emit_phrase(&w);
    }

    c.writer.write(c.num_bits, CODE_END);
    c.writer.finish()
}
