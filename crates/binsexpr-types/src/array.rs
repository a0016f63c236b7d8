//! Arrays of equal-width binary words

use std::fmt;

use num_bigint::{BigInt, BigUint};

use crate::{BinWord, TypesError};

/// An ordered sequence of words sharing one bit width.
///
/// Element access yields [`BinWord`]s of the array width; assignment
/// requires a word of exactly that width.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BinArray {
    width: u32,
    items: Vec<BigUint>,
}

impl BinArray {
    /// An empty array.
    pub fn new(width: u32) -> Self {
        Self {
            width,
            items: Vec::new(),
        }
    }

    /// A zero-filled array of `len` words.
    pub fn zeroed(width: u32, len: usize) -> Self {
        Self {
            width,
            items: vec![BigUint::default(); len],
        }
    }

    pub fn from_words<I>(width: u32, words: I) -> Result<Self, TypesError>
    where
        I: IntoIterator<Item = BinWord>,
    {
        let mut array = Self::new(width);
        for word in words {
            array.push(word)?;
        }
        Ok(array)
    }

    /// Build from unsigned values, each of which must fit in `width` bits.
    pub fn from_values<I, V>(width: u32, values: I) -> Result<Self, TypesError>
    where
        I: IntoIterator<Item = V>,
        V: Into<BigInt>,
    {
        Self::from_words(
            width,
            values
                .into_iter()
                .map(|v| BinWord::new(width, v))
                .collect::<Result<Vec<_>, _>>()?,
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<BinWord> {
        self.items.get(index).map(|v| self.word(v))
    }

    pub fn set(&mut self, index: usize, word: BinWord) -> Result<(), TypesError> {
        self.check_width(&word)?;
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(TypesError::IndexOutOfRange { index, len })?;
        *slot = word.to_uint().clone();
        Ok(())
    }

    pub fn push(&mut self, word: BinWord) -> Result<(), TypesError> {
        self.check_width(&word)?;
        self.items.push(word.to_uint().clone());
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = BinWord> + '_ {
        self.items.iter().map(|v| self.word(v))
    }

    fn word(&self, value: &BigUint) -> BinWord {
        BinWord::new_truncating(self.width, BigInt::from(value.clone()))
    }

    fn check_width(&self, word: &BinWord) -> Result<(), TypesError> {
        if word.width() != self.width {
            return Err(TypesError::WidthMismatch {
                expected: self.width,
                found: word.width(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for BinArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'0x(", self.width)?;
        for (i, word) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&word.padded_hex())?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display() {
        let a = BinArray::from_values(13, [0x1234u32, 0x567]).unwrap();
        assert_eq!(a.to_string(), "13'0x(1234 0567)");
        assert_eq!(BinArray::from_values(0, [0u32, 0]).unwrap().to_string(), "0'0x(0 0)");
        assert_eq!(BinArray::new(123).to_string(), "123'0x()");
    }

    #[test]
    fn test_get_set() {
        let mut a = BinArray::zeroed(12, 2);
        a.set(1, BinWord::new(12, 0xabcu32).unwrap()).unwrap();
        assert_eq!(a.get(1), Some(BinWord::new(12, 0xabcu32).unwrap()));
        assert_eq!(a.get(0), Some(BinWord::new(12, 0u32).unwrap()));
        assert_eq!(a.get(2), None);
        assert_eq!(
            a.set(2, BinWord::new(12, 1u32).unwrap()),
            Err(TypesError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            a.set(0, BinWord::new(8, 1u32).unwrap()),
            Err(TypesError::WidthMismatch {
                expected: 12,
                found: 8
            })
        );
    }

    #[test]
    fn test_from_values_out_of_range() {
        assert_eq!(
            BinArray::from_values(6, [0x61u32, 0x62, 0x63]),
            Err(TypesError::ValueOutOfRange { width: 6 })
        );
    }

    #[test]
    fn test_equality_includes_width() {
        assert_ne!(BinArray::new(8), BinArray::new(9));
        assert_eq!(
            BinArray::from_values(5, [1u32, 2]).unwrap(),
            BinArray::from_words(
                5,
                [BinWord::new(5, 1u32).unwrap(), BinWord::new(5, 2u32).unwrap()]
            )
            .unwrap()
        );
    }
}
