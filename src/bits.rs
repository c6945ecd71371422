//! Bit-reversal and truncation primitives shared by every engine.
//!
//! All functions treat a value as a `width`-bit pattern stored right-aligned in
//! a [`Word`]. Widths are always in `1..=W::BITS`; callers validate that once
//! at construction.

use crate::word::Word;

/// A word with the low `width` bits set.
#[inline]
pub fn mask<W: Word>(width: usize) -> W {
    debug_assert!(width > 0 && width <= W::BITS);
    W::max_value().shr_or_zero(W::BITS - width)
}

/// Clears every bit at or above `width`.
#[inline]
pub fn truncate<W: Word>(value: W, width: usize) -> W {
    value & mask(width)
}

/// Reverses the low `width` bits of `value`; higher bits are discarded.
#[inline]
pub fn reflect<W: Word>(value: W, width: usize) -> W {
    truncate(value, width).reverse() >> (W::BITS - width)
}

/// Number of unused high bits when a `width`-bit register sits in a `W`.
#[inline]
pub fn moves<W: Word>(width: usize) -> usize {
    W::BITS - width
}

/// Truncates a right-aligned parameter and places it where the register
/// expects it: left-aligned for MSB-first processing, reflected and
/// right-aligned for LSB-first processing.
#[inline]
pub fn align<W: Word>(value: W, width: usize, reflected: bool) -> W {
    if reflected {
        reflect(value, width)
    } else {
        truncate(value, width) << moves::<W>(width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(mask::<u8>(1), 0x01);
        assert_eq!(mask::<u8>(8), 0xFF);
        assert_eq!(mask::<u16>(12), 0x0FFF);
        assert_eq!(mask::<u64>(64), u64::MAX);
    }

    #[test]
    fn test_reflect_within_width() {
        // x^5 + x^2 + 1 reflected inside five bits
        assert_eq!(reflect(0x05u8, 5), 0x14);
        assert_eq!(reflect(0x1021u16, 16), 0x8408);
        assert_eq!(reflect(0x04C1_1DB7u32, 32), 0xEDB8_8320);
        assert_eq!(reflect(0xF0u8, 4), 0x00);
    }

    #[test]
    fn test_reflect_is_an_involution() {
        for width in 1..=16 {
            for v in [0x0000u16, 0x0001, 0x1234, 0xBEEF, 0xFFFF] {
                let t = truncate(v, width);
                assert_eq!(reflect(reflect(v, width), width), t);
            }
        }
    }

    #[test]
    fn test_align() {
        assert_eq!(align(0x05u8, 5, false), 0x28);
        assert_eq!(align(0x05u8, 5, true), 0x14);
        // bits above the width vanish in both orientations
        assert_eq!(align(0xE5u8, 5, false), 0x28);
        assert_eq!(align(0xE5u8, 5, true), 0x14);
        assert_eq!(align(0x1021u16, 16, false), 0x1021);
    }
}
