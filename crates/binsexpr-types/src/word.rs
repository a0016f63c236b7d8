//! Fixed-width binary words

use std::fmt;

use num_bigint::{BigInt, BigUint, Sign};

use crate::{hex_digits, TypesError};

/// An unsigned value of a fixed bit width.
///
/// The value is always in `0..2^width`; the two's-complement reading is
/// available through [`BinWord::to_sint`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BinWord {
    width: u32,
    value: BigUint,
}

impl BinWord {
    /// Create a word, failing if `value` is negative or needs more than
    /// `width` bits.
    pub fn new(width: u32, value: impl Into<BigInt>) -> Result<Self, TypesError> {
        let value = value.into();
        match value.to_biguint() {
            Some(value) if value.bits() <= u64::from(width) => Ok(Self { width, value }),
            _ => Err(TypesError::ValueOutOfRange { width }),
        }
    }

    /// Create a word keeping only the low `width` bits of `value`.
    pub fn new_truncating(width: u32, value: impl Into<BigInt>) -> Self {
        let mask = (BigInt::from(1u8) << width) - 1u8;
        let value = value.into() & mask;
        Self {
            width,
            // Masking with a non-negative mask leaves a non-negative value.
            value: value.to_biguint().unwrap_or_default(),
        }
    }

    /// Create a word from a signed value, folding negatives into two's
    /// complement.
    ///
    /// Accepts `-2^width..2^width`: negative inputs must fit as signed or
    /// unsigned after adding `2^width`.
    pub fn from_signed(width: u32, value: &BigInt) -> Result<Self, TypesError> {
        if value.sign() != Sign::Minus {
            return Self::new(width, value.clone());
        }
        let magnitude = value.magnitude();
        let below = magnitude.clone() - 1u8;
        if below.bits() > u64::from(width) {
            return Err(TypesError::ValueOutOfRange { width });
        }
        let modulus = BigUint::from(1u8) << width;
        Ok(Self {
            width,
            value: modulus - magnitude,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// The unsigned value.
    pub fn to_uint(&self) -> &BigUint {
        &self.value
    }

    /// The two's-complement signed value.
    pub fn to_sint(&self) -> BigInt {
        let value = BigInt::from(self.value.clone());
        if self.width > 0 && self.value.bit(u64::from(self.width - 1)) {
            value - (BigInt::from(1u8) << self.width)
        } else {
            value
        }
    }

    /// Lowercase hex digits, zero-padded to the word width.
    pub(crate) fn padded_hex(&self) -> String {
        format!(
            "{:0>pad$}",
            self.value.to_str_radix(16),
            pad = hex_digits(self.width)
        )
    }
}

impl fmt::Display for BinWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'0x{}", self.width, self.padded_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_range() {
        assert!(BinWord::new(3, 7u32).is_ok());
        assert_eq!(
            BinWord::new(3, 8u32),
            Err(TypesError::ValueOutOfRange { width: 3 })
        );
        assert!(BinWord::new(3, -1).is_err());
        assert!(BinWord::new(0, 0u32).is_ok());
        assert!(BinWord::new(0, 1u32).is_err());
    }

    #[test]
    fn test_truncating() {
        assert_eq!(BinWord::new_truncating(12, -0x123), BinWord::new(12, 0xeddu32).unwrap());
        assert_eq!(BinWord::new_truncating(4, 0x1f), BinWord::new(4, 0xfu32).unwrap());
    }

    #[test]
    fn test_from_signed() {
        let w = |v: i64| BinWord::from_signed(3, &BigInt::from(v));
        assert_eq!(w(-5), Ok(BinWord::new(3, 3u32).unwrap()));
        assert_eq!(w(-8), Ok(BinWord::new(3, 0u32).unwrap()));
        assert_eq!(w(-9), Err(TypesError::ValueOutOfRange { width: 3 }));
        assert_eq!(w(7), Ok(BinWord::new(3, 7u32).unwrap()));
        assert_eq!(w(8), Err(TypesError::ValueOutOfRange { width: 3 }));
        assert_eq!(
            BinWord::from_signed(0, &BigInt::from(-1)),
            Ok(BinWord::new(0, 0u32).unwrap())
        );
    }

    #[test]
    fn test_to_sint() {
        assert_eq!(BinWord::new(8, 0xffu32).unwrap().to_sint(), BigInt::from(-1));
        assert_eq!(BinWord::new(8, 0x7fu32).unwrap().to_sint(), BigInt::from(127));
        assert_eq!(BinWord::new(0, 0u32).unwrap().to_sint(), BigInt::from(0));
    }

    #[test]
    fn test_display() {
        assert_eq!(BinWord::new(12, 0x123u32).unwrap().to_string(), "12'0x123");
        assert_eq!(BinWord::new(13, 0x12u32).unwrap().to_string(), "13'0x0012");
        assert_eq!(BinWord::new(0, 0u32).unwrap().to_string(), "0'0x0");
    }
}
