//! Native register words.
//!
//! Every engine is generic over a [`Word`]: the fixed-width engines keep their
//! whole register in one word, the sharded engine keeps an array of them.

use num_traits::{PrimInt, Unsigned};
use std::fmt::{Debug, LowerHex};

/// An unsigned machine integer usable as a CRC register or shard.
pub trait Word: PrimInt + Unsigned + Debug + LowerHex + Send + Sync + 'static {
    /// Number of bits in the word.
    const BITS: usize;

    /// Short label used in errors and logs, e.g. `"16-bit"`.
    const LABEL: &'static str;

    /// Widens a byte into the low bits of the word.
    fn from_byte(byte: u8) -> Self;

    /// The least significant byte.
    fn low_byte(self) -> u8;

    /// Reverses all `BITS` bits.
    fn reverse(self) -> Self;

    /// Keeps the low `BITS` bits of `value`.
    fn from_u128_truncating(value: u128) -> Self;

    /// Zero-extends the word to 128 bits.
    fn widen(self) -> u128;

    #[inline]
    fn top_bit(self) -> bool {
        self >> (Self::BITS - 1) != Self::zero()
    }

    #[inline]
    fn bottom_bit(self) -> bool {
        self & Self::one() != Self::zero()
    }

    /// Left shift that yields zero instead of overflowing when `n >= BITS`.
    #[inline]
    fn shl_or_zero(self, n: usize) -> Self {
        if n >= Self::BITS {
            Self::zero()
        } else {
            self << n
        }
    }

    /// Right shift that yields zero instead of overflowing when `n >= BITS`.
    #[inline]
    fn shr_or_zero(self, n: usize) -> Self {
        if n >= Self::BITS {
            Self::zero()
        } else {
            self >> n
        }
    }
}

macro_rules! impl_word {
    ($($t:ty => $label:literal),* $(,)?) => {
        $(
            impl Word for $t {
                const BITS: usize = <$t>::BITS as usize;
                const LABEL: &'static str = $label;

                #[inline]
                fn from_byte(byte: u8) -> Self {
                    byte as $t
                }

                #[inline]
                fn low_byte(self) -> u8 {
                    self as u8
                }

                #[inline]
                fn reverse(self) -> Self {
                    self.reverse_bits()
                }

                #[inline]
                fn from_u128_truncating(value: u128) -> Self {
                    value as $t
                }

                #[inline]
                fn widen(self) -> u128 {
                    self as u128
                }
            }
        )*
    };
}

impl_word!(u8 => "8-bit", u16 => "16-bit", u32 => "32-bit", u64 => "64-bit");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_and_labels() {
        assert_eq!(<u8 as Word>::BITS, 8);
        assert_eq!(<u64 as Word>::BITS, 64);
        assert_eq!(<u16 as Word>::LABEL, "16-bit");
    }

    #[test]
    fn test_edge_bits() {
        assert!(0x80u8.top_bit());
        assert!(!0x7Fu8.top_bit());
        assert!(0x8000_0000_0000_0001u64.bottom_bit());
        assert!(!0x0002u16.bottom_bit());
    }

    #[test]
    fn test_saturating_shifts() {
        assert_eq!(0xFFu8.shl_or_zero(8), 0);
        assert_eq!(0xFFu8.shr_or_zero(9), 0);
        assert_eq!(0x00FFu16.shl_or_zero(8), 0xFF00);
        assert_eq!(0xFF00u16.shr_or_zero(8), 0x00FF);
    }

    #[test]
    fn test_truncating_conversion() {
        assert_eq!(u16::from_u128_truncating(0x1_2345), 0x2345);
        assert_eq!(u8::from_byte(0xA5).reverse(), 0xA5);
        assert_eq!(0x01u32.reverse(), 0x8000_0000);
        assert_eq!(0xBEEFu16.low_byte(), 0xEF);
    }
}
