//! URL-safe LZ string compression.
//!
//! Implements the "encoded URI component" flavour of lz-string: text is
//! treated as UTF-16 code units, compressed with a growing LZW-style
//! dictionary, and packed six bits per output character into
//! [`ALPHABET_URI`]. Output can be dropped into a query parameter as is.
//!
//! ```
//! use bouquet_lz_string::{compress, decompress};
//!
//! let packed = compress("Für dich 🌹");
//! assert_eq!(decompress(&packed).unwrap(), "Für dich 🌹");
//! assert!(decompress("not a payload!").is_err());
//! ```

mod compress;
mod constants;
mod decompress;
mod error;

pub use compress::compress;
pub use constants::{ALPHABET_URI, DEFAULT_MAX_OUTPUT};
pub use decompress::{decompress, decompress_with_limit};
pub use error::LzError;
