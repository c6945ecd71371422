//! Multi-word bit arithmetic.
//!
//! A shard array is a slice of [`Word`]s holding one long bit pattern, most
//! significant shard first. Shifts carry bits between neighbouring shards;
//! bits pushed past either end are dropped. Arrays are never empty: callers
//! size them with [`shard_count`].

use crate::bits;
use crate::word::Word;

/// Shards needed to hold `width` bits.
#[inline]
pub fn shard_count<W: Word>(width: usize) -> usize {
    width.div_ceil(W::BITS)
}

/// Unused high bits when `width` bits sit in [`shard_count`] shards.
#[inline]
pub fn moves<W: Word>(width: usize) -> usize {
    shard_count::<W>(width) * W::BITS - width
}

/// Shifts the whole array left by one bit and returns the bit shifted out of
/// the top.
pub fn shl1<W: Word>(shards: &mut [W]) -> bool {
    let mut carry = false;
    for word in shards.iter_mut().rev() {
        let out = word.top_bit();
        *word = *word << 1;
        if carry {
            *word = *word | W::one();
        }
        carry = out;
    }
    carry
}

/// Shifts the whole array right by one bit and returns the bit shifted out of
/// the bottom.
pub fn shr1<W: Word>(shards: &mut [W]) -> bool {
    let mut carry = false;
    for word in shards.iter_mut() {
        let out = word.bottom_bit();
        *word = *word >> 1;
        if carry {
            *word = *word | (W::one() << (W::BITS - 1));
        }
        carry = out;
    }
    carry
}

/// Shifts the whole array left by `n` bits.
pub fn shl<W: Word>(shards: &mut [W], n: usize) {
    let len = shards.len();
    let words = n / W::BITS;
    let bits = n % W::BITS;
    for i in 0..len {
        let src = i + words;
        let hi = shards.get(src).copied().unwrap_or_else(W::zero);
        let lo = shards.get(src + 1).copied().unwrap_or_else(W::zero);
        shards[i] = if bits == 0 {
            hi
        } else {
            (hi << bits) | (lo >> (W::BITS - bits))
        };
    }
}

/// Shifts the whole array right by `n` bits.
pub fn shr<W: Word>(shards: &mut [W], n: usize) {
    let words = n / W::BITS;
    let bits = n % W::BITS;
    for i in (0..shards.len()).rev() {
        let lo = i
            .checked_sub(words)
            .map_or_else(W::zero, |src| shards[src]);
        let hi = i
            .checked_sub(words + 1)
            .map_or_else(W::zero, |src| shards[src]);
        shards[i] = if bits == 0 {
            lo
        } else {
            (lo >> bits) | (hi << (W::BITS - bits))
        };
    }
}

/// `dst ^= src`, shard by shard.
#[inline]
pub fn xor_assign<W: Word>(dst: &mut [W], src: &[W]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d = *d ^ *s;
    }
}

/// Reverses the bit order of the whole array: shard order flips and every
/// shard is bit-reversed.
pub fn reverse<W: Word>(shards: &mut [W]) {
    shards.reverse();
    for word in shards.iter_mut() {
        *word = word.reverse();
    }
}

/// Clears every bit at or above `width`.
pub fn truncate<W: Word>(shards: &mut [W], width: usize) {
    let mut excess = (shards.len() * W::BITS).saturating_sub(width);
    for word in shards.iter_mut() {
        if excess == 0 {
            break;
        }
        if excess >= W::BITS {
            *word = W::zero();
            excess -= W::BITS;
        } else {
            *word = bits::truncate(*word, W::BITS - excess);
            excess = 0;
        }
    }
}

/// Reverses the low `width` bits; the result stays right-aligned.
pub fn reflect<W: Word>(shards: &mut [W], width: usize) {
    truncate(shards, width);
    reverse(shards);
    shr(shards, shards.len() * W::BITS - width);
}

/// Shard-wise counterpart of [`bits::align`].
pub fn align<W: Word>(shards: &mut [W], width: usize, reflected: bool) {
    if reflected {
        reflect(shards, width);
    } else {
        truncate(shards, width);
        shl(shards, shards.len() * W::BITS - width);
    }
}

/// Loads a right-aligned big-endian byte string into `count` shards. Bytes
/// that do not fit are dropped from the top.
pub fn from_be_bytes<W: Word>(bytes: &[u8], count: usize) -> Vec<W> {
    let mut shards = vec![W::zero(); count];
    if count == 0 {
        return shards;
    }
    for &byte in bytes {
        shl(&mut shards, 8);
        xor_low_byte(&mut shards, byte);
    }
    shards
}

/// Stores the low `len * 8` bits of the array as big-endian bytes.
pub fn to_be_bytes<W: Word>(shards: &[W], len: usize) -> Vec<u8> {
    let mut scratch = shards.to_vec();
    let mut out = vec![0u8; len];
    for slot in out.iter_mut().rev() {
        *slot = scratch.last().map_or(0, |w| w.low_byte());
        shr(&mut scratch, 8);
    }
    out
}

/// The most significant byte of the array.
#[inline]
pub fn top_byte<W: Word>(shards: &[W]) -> u8 {
    (shards[0] >> (W::BITS - 8)).low_byte()
}

/// The least significant byte of the array.
#[inline]
pub fn low_byte<W: Word>(shards: &[W]) -> u8 {
    shards[shards.len() - 1].low_byte()
}

#[inline]
pub fn xor_top_byte<W: Word>(shards: &mut [W], byte: u8) {
    shards[0] = shards[0] ^ (W::from_byte(byte) << (W::BITS - 8));
}

#[inline]
pub fn xor_low_byte<W: Word>(shards: &mut [W], byte: u8) {
    let last = shards.len() - 1;
    shards[last] = shards[last] ^ W::from_byte(byte);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn to_u128<W: Word>(shards: &[W]) -> u128 {
        shards
            .iter()
            .fold(0u128, |acc, w| (acc << W::BITS) | w.widen())
    }

    #[test]
    fn test_counts() {
        assert_eq!(shard_count::<u64>(64), 1);
        assert_eq!(shard_count::<u64>(65), 2);
        assert_eq!(shard_count::<u8>(82), 11);
        assert_eq!(moves::<u64>(82), 46);
        assert_eq!(moves::<u8>(82), 6);
    }

    #[test]
    fn test_shl1_carries_between_shards() {
        let mut s = [0x00u8, 0x80, 0x01];
        assert!(!shl1(&mut s));
        assert_eq!(s, [0x01, 0x00, 0x02]);

        let mut s = [0x80u8, 0x00];
        assert!(shl1(&mut s));
        assert_eq!(s, [0x00, 0x00]);
    }

    #[test]
    fn test_shr1_carries_between_shards() {
        let mut s = [0x01u8, 0x00, 0x03];
        assert!(shr1(&mut s));
        assert_eq!(s, [0x00, 0x80, 0x01]);
    }

    #[test]
    fn test_multi_bit_shifts_match_u128() {
        let value: u128 = 0x0123_4567_89AB_CDEF_FEDC_BA98_7654_3210;
        for n in [0usize, 1, 7, 8, 9, 15, 16, 31, 64, 100, 127] {
            let mut s = from_be_bytes::<u16>(&value.to_be_bytes(), 8);
            shl(&mut s, n);
            assert_eq!(to_u128(&s), value << n, "shl {n}");

            let mut s = from_be_bytes::<u16>(&value.to_be_bytes(), 8);
            shr(&mut s, n);
            assert_eq!(to_u128(&s), value >> n, "shr {n}");
        }
    }

    #[test]
    fn test_shift_by_whole_array_clears() {
        let mut s = [0xFFu32, 0xFF];
        shl(&mut s, 64);
        assert_eq!(s, [0, 0]);
        let mut s = [0xFFu32, 0xFF];
        shr(&mut s, 70);
        assert_eq!(s, [0, 0]);
    }

    #[test]
    fn test_reverse_is_full_width() {
        let value: u128 = 0x8000_0000_0000_0000_0000_0000_0000_0003;
        let mut s = from_be_bytes::<u32>(&value.to_be_bytes(), 4);
        reverse(&mut s);
        assert_eq!(to_u128(&s), value.reverse_bits());
    }

    #[test]
    fn test_truncate_and_reflect() {
        let mut s = [0xFFu8, 0xFF, 0xFF];
        truncate(&mut s, 10);
        assert_eq!(s, [0x00, 0x03, 0xFF]);

        // x^82 DARC polynomial reflected inside 82 bits
        let poly: u128 = 0x0308C_0111_0114_0144_0411;
        let mut s = from_be_bytes::<u64>(&poly.to_be_bytes(), 2);
        reflect(&mut s, 82);
        assert_eq!(to_u128(&s), poly.reverse_bits() >> (128 - 82));
    }

    #[test]
    fn test_align_left_and_reflected() {
        let mut s = from_be_bytes::<u8>(&[0x3F, 0xFF], 2);
        align(&mut s, 12, false);
        assert_eq!(s, [0xFF, 0xF0]);

        let mut s = from_be_bytes::<u8>(&[0x08, 0x01], 2);
        align(&mut s, 12, true);
        assert_eq!(s, [0x08, 0x01]);
    }

    #[test]
    fn test_byte_round_trip() {
        let bytes = [0x02u8, 0x34, 0x56, 0x78, 0x9A];
        let s = from_be_bytes::<u16>(&bytes, 3);
        assert_eq!(s, [0x0002, 0x3456, 0x789A]);
        assert_eq!(to_be_bytes(&s, 5), bytes);
        assert_eq!(top_byte(&s), 0x00);
        assert_eq!(low_byte(&s), 0x9A);
    }

    #[test]
    fn test_byte_xors() {
        let mut s = [0u16; 2];
        xor_top_byte(&mut s, 0xAB);
        xor_low_byte(&mut s, 0xCD);
        assert_eq!(s, [0xAB00, 0x00CD]);
    }

    fn low_bits(value: u128, width: usize) -> u128 {
        value & (!0u128 >> (128 - width))
    }

    proptest! {
        #[test]
        fn shifts_match_u128(value in any::<u128>(), n in 0usize..=140) {
            let mut s = from_be_bytes::<u16>(&value.to_be_bytes(), 8);
            shl(&mut s, n);
            prop_assert_eq!(to_u128(&s), value.checked_shl(n as u32).unwrap_or(0));

            let mut s = from_be_bytes::<u16>(&value.to_be_bytes(), 8);
            shr(&mut s, n);
            prop_assert_eq!(to_u128(&s), value.checked_shr(n as u32).unwrap_or(0));
        }

        #[test]
        fn single_shifts_report_the_evicted_bit(value in any::<u128>()) {
            let mut s = from_be_bytes::<u32>(&value.to_be_bytes(), 4);
            prop_assert_eq!(shl1(&mut s), value >> 127 == 1);
            prop_assert_eq!(to_u128(&s), value << 1);

            let mut s = from_be_bytes::<u32>(&value.to_be_bytes(), 4);
            prop_assert_eq!(shr1(&mut s), value & 1 == 1);
            prop_assert_eq!(to_u128(&s), value >> 1);
        }

        #[test]
        fn truncate_reflect_and_align_match_u128(value in any::<u128>(), width in 1usize..=128) {
            let count = shard_count::<u8>(width);
            let total = count * 8;
            let load = || from_be_bytes::<u8>(&value.to_be_bytes(), count);

            let mut s = load();
            truncate(&mut s, width);
            prop_assert_eq!(to_u128(&s), low_bits(value, width));

            let mut s = load();
            reflect(&mut s, width);
            prop_assert_eq!(to_u128(&s), low_bits(value, width).reverse_bits() >> (128 - width));

            let mut s = load();
            align(&mut s, width, false);
            prop_assert_eq!(to_u128(&s), low_bits(value, width) << (total - width));
        }

        #[test]
        fn byte_conversions_round_trip(bytes in proptest::collection::vec(any::<u8>(), 1..=24)) {
            let count = shard_count::<u64>(bytes.len() * 8);
            let s = from_be_bytes::<u64>(&bytes, count);
            prop_assert_eq!(to_be_bytes(&s, bytes.len()), bytes);
        }
    }
}
