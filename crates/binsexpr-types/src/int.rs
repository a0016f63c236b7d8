//! Arbitrary-precision integers

use std::fmt;

use num_bigint::{BigInt, Sign};

use crate::BinWord;

/// An arbitrary-precision signed integer.
///
/// Conceptually an infinite two's-complement bit sequence: bits above the
/// magnitude are all 0 for non-negative values and all 1 for negative ones.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BinInt(BigInt);

impl BinInt {
    pub fn new(value: BigInt) -> Self {
        Self(value)
    }

    /// Parse an integer literal: optional `-`, then `0b`/`0o`/`0x` digits or
    /// plain decimal digits.
    ///
    /// Returns `None` when the digits are not valid for the radix.
    pub fn parse_literal(literal: &str) -> Option<Self> {
        let (negative, body) = match literal.strip_prefix('-') {
            Some(body) => (true, body),
            None => (false, literal),
        };
        let (radix, digits) = if let Some(d) = body.strip_prefix("0b") {
            (2, d)
        } else if let Some(d) = body.strip_prefix("0o") {
            (8, d)
        } else if let Some(d) = body.strip_prefix("0x") {
            (16, d)
        } else {
            (10, body)
        };
        Self::parse_digits(digits, radix).map(|v| if negative { -v } else { v })
    }

    /// Parse bare digits (with an optional leading `-`) in the given radix.
    pub fn parse_digits(digits: &str, radix: u32) -> Option<Self> {
        if digits.is_empty() {
            return None;
        }
        BigInt::parse_bytes(digits.as_bytes(), radix).map(Self)
    }

    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    pub fn into_bigint(self) -> BigInt {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    /// A value with the low `width` bits set.
    pub fn mask(width: u32) -> Self {
        Self((BigInt::from(1u8) << width) - 1u8)
    }

    /// Extract `width` bits starting at bit `pos`.
    pub fn extract(&self, pos: u32, width: u32) -> BinWord {
        BinWord::new_truncating(width, &self.0 >> pos)
    }

    /// `ceil(self / divisor)`.
    pub fn ceildiv(&self, divisor: &BinInt) -> BinInt {
        let neg = -&self.0;
        Self(-floor_div(&neg, &divisor.0))
    }
}

// BigInt division truncates toward zero.
fn floor_div(a: &BigInt, b: &BigInt) -> BigInt {
    let q = a / b;
    let r = a - &q * b;
    if r.sign() != Sign::NoSign && (r.sign() == Sign::Minus) != (b.sign() == Sign::Minus) {
        q - 1u8
    } else {
        q
    }
}

impl fmt::Display for BinInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Neg for BinInt {
    type Output = BinInt;

    fn neg(self) -> BinInt {
        BinInt(-self.0)
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for BinInt {
                fn from(value: $ty) -> Self {
                    Self(BigInt::from(value))
                }
            }
        )*
    };
}

impl_from_primitive!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, usize);

impl From<BigInt> for BinInt {
    fn from(value: BigInt) -> Self {
        Self(value)
    }
}

impl From<BinInt> for BigInt {
    fn from(value: BinInt) -> Self {
        value.0
    }
}
