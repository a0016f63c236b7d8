//! binsexpr-types: exact-width numeric value types
//!
//! The leaf payloads carried by binsexpr atoms:
//! - [`BinInt`]: an arbitrary-precision signed integer
//! - [`BinWord`]: an unsigned value of a declared bit width
//! - [`BinArray`]: an ordered sequence of same-width words
//!
//! All three compare by value (and width, where one exists) and render in
//! the canonical text form accepted by the binsexpr reader.

pub mod array;
pub mod int;
pub mod word;

pub use array::BinArray;
pub use int::BinInt;
pub use word::BinWord;

use thiserror::Error;

/// Errors raised when a numeric value does not fit its declared shape
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("value does not fit in {width} bits")]
    ValueOutOfRange { width: u32 },

    #[error("word width mismatch: expected {expected}, got {found}")]
    WidthMismatch { expected: u32, found: u32 },

    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Number of hex digits needed to show a `width`-bit value.
pub(crate) fn hex_digits(width: u32) -> usize {
    width.div_ceil(4) as usize
}
