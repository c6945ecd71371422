//! Finalized checksum values and their textual and binary renderings.
//!
//! A [`CrcValue`] is a `width`-bit pattern stored big-endian and right-aligned
//! in `ceil(width / 8)` bytes. Every parser truncates its input to the width,
//! so rendering a value and parsing it back with the same width always yields
//! the same value.

use crate::error::{CrcError, Result};
use crate::shards;
use crate::word::Word;
use bitvec::prelude::*;
use std::fmt;

/// Byte order for [`CrcValue::to_bytes`] and [`CrcValue::from_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

/// Letter case for hex output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Case {
    #[default]
    Upper,
    Lower,
}

/// A checksum (or CRC parameter) of exactly `width` bits.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CrcValue {
    width: usize,
    bytes: Vec<u8>,
}

/// Bytes needed to hold `width` bits.
#[inline]
fn byte_len(width: usize) -> usize {
    width.div_ceil(8)
}

impl CrcValue {
    /// The all-zero value of the given width.
    pub fn zero(width: usize) -> Self {
        Self {
            width,
            bytes: vec![0; byte_len(width)],
        }
    }

    /// Keeps the low `width` bits of a right-aligned big-endian byte string.
    fn from_be_truncating(raw: &[u8], width: usize) -> Self {
        let len = byte_len(width);
        let mut bytes = vec![0u8; len];
        let take = raw.len().min(len);
        bytes[len - take..].copy_from_slice(&raw[raw.len() - take..]);
        let mut value = Self { width, bytes };
        value.clear_excess();
        value
    }

    fn clear_excess(&mut self) {
        let excess = self.bytes.len() * 8 - self.width;
        if let Some(top) = self.bytes.first_mut() {
            *top &= 0xFF >> excess;
        }
    }

    /// Truncates `value` to `width` bits.
    pub fn from_u128(value: u128, width: usize) -> Self {
        Self::from_be_truncating(&value.to_be_bytes(), width)
    }

    /// Truncates a register word to `width` bits.
    pub fn from_word<W: Word>(word: W, width: usize) -> Self {
        Self::from_u128(word.widen(), width)
    }

    /// Truncates a right-aligned shard array to `width` bits.
    pub fn from_shards<W: Word>(words: &[W], width: usize) -> Self {
        let raw = shards::to_be_bytes(words, byte_len(width));
        Self::from_be_truncating(&raw, width)
    }

    /// The value as a single word; bits beyond `W::BITS` are dropped.
    pub fn to_word<W: Word>(&self) -> W {
        shards::from_be_bytes::<W>(&self.bytes, 1)[0]
    }

    /// The value as right-aligned shards, exactly enough to hold the width.
    pub fn to_shards<W: Word>(&self) -> Vec<W> {
        shards::from_be_bytes(&self.bytes, shards::shard_count::<W>(self.width))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of bytes the value occupies.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }

    /// Big-endian bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_bytes(&self, endian: Endian) -> Vec<u8> {
        let mut out = self.bytes.clone();
        if endian == Endian::Little {
            out.reverse();
        }
        out
    }

    /// Parses exactly `ceil(width / 8)` bytes; bits above the width are
    /// cleared.
    pub fn from_bytes(bytes: &[u8], endian: Endian, width: usize) -> Result<Self> {
        let expected = byte_len(width);
        if bytes.len() != expected {
            return Err(CrcError::ByteLength {
                expected,
                found: bytes.len(),
            });
        }
        let mut be = bytes.to_vec();
        if endian == Endian::Little {
            be.reverse();
        }
        Ok(Self::from_be_truncating(&be, width))
    }

    /// Hex digits, exactly `ceil(width / 4)` of them.
    pub fn to_hex(&self, case: Case) -> String {
        let full = match case {
            Case::Upper => hex::encode_upper(&self.bytes),
            Case::Lower => hex::encode(&self.bytes),
        };
        let digits = self.width.div_ceil(4);
        full[full.len() - digits..].to_string()
    }

    /// Parses hex digits with an optional `0x` prefix, keeping the low
    /// `width` bits.
    pub fn from_hex(text: &str, width: usize) -> Result<Self> {
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);
        let raw = if digits.len() % 2 == 1 {
            hex::decode(format!("0{digits}"))?
        } else {
            hex::decode(digits)?
        };
        Ok(Self::from_be_truncating(&raw, width))
    }

    /// `'0'`/`'1'` digits, exactly `width` of them, most significant first.
    pub fn to_binary(&self) -> String {
        let bits = self.bytes.view_bits::<Msb0>();
        bits[bits.len() - self.width..]
            .iter()
            .map(|bit| if *bit { '1' } else { '0' })
            .collect()
    }

    /// Parses `'0'`/`'1'` digits, keeping the low `width` bits.
    pub fn from_binary(text: &str, width: usize) -> Result<Self> {
        let mut digits = BitVec::<u8, Msb0>::with_capacity(text.len());
        for (index, found) in text.chars().enumerate() {
            match found {
                '0' => digits.push(false),
                '1' => digits.push(true),
                _ => return Err(CrcError::InvalidBinaryDigit { index, found }),
            }
        }

        let mut value = Self::zero(width);
        let take = digits.len().min(width);
        let target = value.bytes.view_bits_mut::<Msb0>();
        let start = target.len() - take;
        target[start..].copy_from_bitslice(&digits[digits.len() - take..]);
        Ok(value)
    }
}

macro_rules! narrowing {
    ($($name:ident => $t:ty),* $(,)?) => {
        impl CrcValue {
            $(
                #[doc = concat!("The value as a `", stringify!($t), "`, plus whether the width exceeded it and high bits were dropped.")]
                pub fn $name(&self) -> ($t, bool) {
                    (self.to_word::<$t>(), self.width > <$t>::BITS as usize)
                }
            )*
        }
    };
}

narrowing!(
    to_u8_overflowing => u8,
    to_u16_overflowing => u16,
    to_u32_overflowing => u32,
    to_u64_overflowing => u64,
);

impl CrcValue {
    /// The value as a `u128`, plus whether the width exceeded 128 bits.
    pub fn to_u128_overflowing(&self) -> (u128, bool) {
        let mut buf = [0u8; 16];
        let take = self.bytes.len().min(16);
        buf[16 - take..].copy_from_slice(&self.bytes[self.bytes.len() - take..]);
        (u128::from_be_bytes(buf), self.width > 128)
    }
}

impl fmt::Debug for CrcValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CrcValue({}: 0x{})", self.width, self.to_hex(Case::Upper))
    }
}

impl fmt::Display for CrcValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex(Case::Upper))
    }
}

impl fmt::UpperHex for CrcValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &self.to_hex(Case::Upper))
    }
}

impl fmt::LowerHex for CrcValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &self.to_hex(Case::Lower))
    }
}

impl fmt::Binary for CrcValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0b", &self.to_binary())
    }
}
