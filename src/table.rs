//! Sarwate lookup tables.
//!
//! A table holds, for every byte value, the register contribution of feeding
//! that byte through eight shift/XOR rounds. Forward tables serve MSB-first
//! processing, reflected tables serve LSB-first processing.
//!
//! Tables depend only on the word type, shard count, width, polynomial and
//! orientation, so they are memoized process-wide: [`shared_word_table`] and
//! [`shared_shard_table`] build a table at most once and hand out
//! [`Arc`] handles to it afterwards. Cached tables are never evicted, so every
//! distinct parameter set keeps its table alive until the process exits.

use crate::bits;
use crate::error::{CrcError, Result};
use crate::params::CrcParams;
use crate::shards;
use crate::value::{Case, CrcValue};
use crate::word::Word;
use log::{debug, trace};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

/// Number of rows in every table, one per byte value.
pub const ROWS: usize = 256;

/// A 256-row lookup table whose rows are `shards` words wide.
#[derive(Clone, PartialEq, Eq)]
pub struct Table<W: Word> {
    width: usize,
    reflected: bool,
    /// Generator, truncated and right-aligned.
    poly: Box<[W]>,
    entries: Box<[W]>,
}

impl<W: Word> Table<W> {
    /// Builds a single-word table for a `width`-bit polynomial supplied
    /// right-aligned. Bits above `width` are ignored.
    pub fn for_word(width: usize, poly: W, reflected: bool) -> Result<Self> {
        check_word_width::<W>(width)?;
        Ok(Self::build_word(width, bits::truncate(poly, width), reflected))
    }

    /// Builds a multi-word table. `poly` is right-aligned and must be exactly
    /// as many shards as `width` needs.
    pub fn for_shards(width: usize, poly: &[W], reflected: bool) -> Result<Self> {
        check_shard_count::<W>(width, poly.len())?;
        let mut truncated = poly.to_vec();
        shards::truncate(&mut truncated, width);
        Ok(Self::build_shards(width, truncated, reflected))
    }

    fn build_word(width: usize, poly: W, reflected: bool) -> Self {
        let aligned = bits::align(poly, width, reflected);
        let entries = (0..ROWS)
            .map(|b| {
                let byte = b as u8;
                if reflected {
                    reflected_rounds(W::from_byte(byte), aligned)
                } else {
                    forward_rounds(W::from_byte(byte) << (W::BITS - 8), aligned)
                }
            })
            .collect();

        Self {
            width,
            reflected,
            poly: Box::new([poly]),
            entries,
        }
    }

    fn build_shards(width: usize, poly: Vec<W>, reflected: bool) -> Self {
        let count = poly.len();
        let mut aligned = poly.clone();
        shards::align(&mut aligned, width, reflected);

        let mut entries = Vec::with_capacity(ROWS * count);
        let mut row = vec![W::zero(); count];
        for b in 0..ROWS {
            row.fill(W::zero());
            if reflected {
                shards::xor_low_byte(&mut row, b as u8);
                reflected_shard_rounds(&mut row, &aligned);
            } else {
                shards::xor_top_byte(&mut row, b as u8);
                forward_shard_rounds(&mut row, &aligned);
            }
            entries.extend_from_slice(&row);
        }

        Self {
            width,
            reflected,
            poly: poly.into_boxed_slice(),
            entries: entries.into_boxed_slice(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_reflected(&self) -> bool {
        self.reflected
    }

    /// The polynomial the table was generated from.
    pub fn poly(&self) -> CrcValue {
        CrcValue::from_shards(&self.poly, self.width)
    }

    /// Words per row.
    pub fn shards(&self) -> usize {
        self.poly.len()
    }

    /// Checks that the table was generated for `params` with `shards` words
    /// per row.
    pub(crate) fn check_matches(&self, params: &CrcParams, shards: usize) -> Result<()> {
        if self.width != params.width()
            || self.reflected != params.refin()
            || self.shards() != shards
        {
            return Err(CrcError::TableMismatch {
                width: params.width(),
                reflected: params.refin(),
                table_width: self.width,
                table_reflected: self.reflected,
            });
        }
        let poly = self.poly();
        if poly != *params.poly() {
            return Err(CrcError::TablePolynomial {
                poly: params.poly().to_hex(Case::Lower),
                table_poly: poly.to_hex(Case::Lower),
            });
        }
        Ok(())
    }

    /// The row for byte `index`.
    #[inline]
    pub fn row(&self, index: u8) -> &[W] {
        let count = self.poly.len();
        let start = index as usize * count;
        &self.entries[start..start + count]
    }

    /// The first word of row `index`; the whole row for single-word tables.
    #[inline]
    pub fn word(&self, index: u8) -> W {
        self.entries[index as usize * self.poly.len()]
    }
}

impl<W: Word> fmt::Debug for Table<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("word", &W::LABEL)
            .field("width", &self.width)
            .field("reflected", &self.reflected)
            .field("poly", &self.poly())
            .field("shards", &self.shards())
            .finish_non_exhaustive()
    }
}

fn check_word_width<W: Word>(width: usize) -> Result<()> {
    if width == 0 {
        return Err(CrcError::InvalidWidth(width));
    }
    if width > W::BITS {
        return Err(CrcError::WidthExceedsCore {
            width,
            core: W::LABEL,
            capacity: W::BITS,
        });
    }
    Ok(())
}

fn check_shard_count<W: Word>(width: usize, found: usize) -> Result<()> {
    if width == 0 {
        return Err(CrcError::InvalidWidth(width));
    }
    let expected = shards::shard_count::<W>(width);
    if found != expected {
        return Err(CrcError::ShardCount {
            width,
            expected,
            found,
        });
    }
    Ok(())
}

/// Eight MSB-first shift/XOR rounds against a left-aligned polynomial.
#[inline]
pub(crate) fn forward_rounds<W: Word>(mut crc: W, poly: W) -> W {
    for _ in 0..8 {
        crc = if crc.top_bit() {
            (crc << 1) ^ poly
        } else {
            crc << 1
        };
    }
    crc
}

/// Eight LSB-first shift/XOR rounds against a reflected polynomial.
#[inline]
pub(crate) fn reflected_rounds<W: Word>(mut crc: W, poly: W) -> W {
    for _ in 0..8 {
        crc = if crc.bottom_bit() {
            (crc >> 1) ^ poly
        } else {
            crc >> 1
        };
    }
    crc
}

pub(crate) fn forward_shard_rounds<W: Word>(crc: &mut [W], poly: &[W]) {
    for _ in 0..8 {
        if shards::shl1(crc) {
            shards::xor_assign(crc, poly);
        }
    }
}

pub(crate) fn reflected_shard_rounds<W: Word>(crc: &mut [W], poly: &[W]) {
    for _ in 0..8 {
        if shards::shr1(crc) {
            shards::xor_assign(crc, poly);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TableKey {
    word: TypeId,
    shards: usize,
    width: usize,
    poly: Vec<u8>,
    reflected: bool,
}

/// One cache entry, filled by whichever caller gets there first.
type Slot = Arc<OnceLock<Arc<dyn Any + Send + Sync>>>;

static CACHE: OnceLock<Mutex<HashMap<TableKey, Slot>>> = OnceLock::new();

/// Returns the process-wide table for a single-word engine, building it on
/// first use. The table stays cached for the life of the process.
pub fn shared_word_table<W: Word>(
    width: usize,
    poly: W,
    reflected: bool,
) -> Result<Arc<Table<W>>> {
    check_word_width::<W>(width)?;
    let poly = bits::truncate(poly, width);
    let key = TableKey {
        word: TypeId::of::<W>(),
        shards: 1,
        width,
        poly: poly.widen().to_be_bytes().to_vec(),
        reflected,
    };
    Ok(memoize(key, || Table::build_word(width, poly, reflected)))
}

/// Returns the process-wide table for a sharded engine, building it on first
/// use. The table stays cached for the life of the process.
pub fn shared_shard_table<W: Word>(
    width: usize,
    poly: &[W],
    reflected: bool,
) -> Result<Arc<Table<W>>> {
    check_shard_count::<W>(width, poly.len())?;
    let mut truncated = poly.to_vec();
    shards::truncate(&mut truncated, width);
    let key = TableKey {
        word: TypeId::of::<W>(),
        shards: truncated.len(),
        width,
        poly: shards::to_be_bytes(&truncated, truncated.len() * W::BITS / 8),
        reflected,
    };
    Ok(memoize(key, || Table::build_shards(width, truncated, reflected)))
}

/// Number of distinct tables built so far in this process.
pub fn cached_tables() -> usize {
    CACHE.get().map_or(0, |cache| {
        cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|slot| slot.get().is_some())
            .count()
    })
}

fn memoize<W: Word>(key: TableKey, build: impl FnOnce() -> Table<W>) -> Arc<Table<W>> {
    let slot = {
        let cache = CACHE.get_or_init(Default::default);
        let mut tables = cache.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(tables.entry(key.clone()).or_default())
    };

    // The map lock is released here: only callers after this same table wait
    // on its slot while it is built.
    let mut built = false;
    let shared = slot.get_or_init(|| {
        built = true;
        debug!(
            "building {} table: width={} shards={} reflected={}",
            W::LABEL,
            key.width,
            key.shards,
            key.reflected
        );
        Arc::new(build()) as Arc<dyn Any + Send + Sync>
    });
    if !built {
        trace!("table cache hit: {key:?}");
    }

    Arc::clone(shared)
        .downcast::<Table<W>>()
        .unwrap_or_else(|_| unreachable!("cache keys carry the word type"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc32_reflected_table() {
        let table = Table::for_word(32, 0x04C1_1DB7u32, true).unwrap();
        assert_eq!(table.word(0), 0x0000_0000);
        assert_eq!(table.word(1), 0x7707_3096);
        assert_eq!(table.word(255), 0x2D02_EF8D);
    }

    #[test]
    fn test_crc16_forward_table() {
        let table = Table::for_word(16, 0x1021u16, false).unwrap();
        assert_eq!(table.word(0), 0x0000);
        assert_eq!(table.word(1), 0x1021);
        assert_eq!(table.word(2), 0x2042);
        assert_eq!(table.word(255), 0x1EF0);
    }

    #[test]
    fn test_crc8_forward_table() {
        let table = Table::for_word(8, 0x07u8, false).unwrap();
        assert_eq!(table.word(1), 0x07);
        assert_eq!(table.word(0x80), 0x89);
    }

    #[test]
    fn test_shard_table_matches_word_table() {
        for (width, poly, reflected) in [
            (16usize, 0x1021u64, false),
            (16, 0x8005, true),
            (12, 0x80F, false),
            (5, 0x05, true),
            (32, 0x04C1_1DB7, true),
        ] {
            let word = Table::for_word(width, poly as u32, reflected).unwrap();
            let count = shards::shard_count::<u8>(width);
            let poly_shards = shards::from_be_bytes::<u8>(&poly.to_be_bytes(), count);
            let sharded = Table::for_shards(width, &poly_shards, reflected).unwrap();
            assert_eq!(word.poly(), sharded.poly());
            let moves = shards::moves::<u8>(width);
            for b in 0..=255u8 {
                let mut expected = word.word(b);
                // the word table sits in 32 bits, the shard table in count * 8
                if !reflected {
                    expected >>= 32 - (width + moves);
                }
                let row = shards::to_be_bytes(sharded.row(b), 4);
                assert_eq!(
                    u32::from_be_bytes(row.try_into().unwrap()),
                    expected,
                    "width {width} byte {b}"
                );
            }
        }
    }

    #[test]
    fn test_table_remembers_truncated_poly() {
        let table = Table::for_word(12, 0xF80Fu16, false).unwrap();
        assert_eq!(table.poly(), CrcValue::from_u128(0x80F, 12));
        assert_eq!(table.shards(), 1);

        let poly = [0x0308Cu64, 0x0111_0114_0144_0411];
        let table = Table::for_shards(82, &poly, true).unwrap();
        assert_eq!(table.poly(), CrcValue::from_shards(&poly, 82));
        assert_eq!(table.shards(), 2);
    }

    #[test]
    fn test_bad_widths_are_errors() {
        assert_eq!(
            Table::for_word(17, 0x1021u16, false).unwrap_err(),
            CrcError::WidthExceedsCore {
                width: 17,
                core: "16-bit",
                capacity: 16
            }
        );
        assert_eq!(
            Table::for_word(0, 0x07u8, false).unwrap_err(),
            CrcError::InvalidWidth(0)
        );
        assert_eq!(
            Table::for_shards(82, &[1u64], true).unwrap_err(),
            CrcError::ShardCount {
                width: 82,
                expected: 2,
                found: 1
            }
        );
        assert!(Table::for_shards(8, &[0u8, 7], false).is_err());
        assert!(Table::<u64>::for_shards(0, &[], false).is_err());
        assert!(shared_word_table(0, 0x07u8, false).is_err());
        assert!(shared_word_table(33, 0x07u32, true).is_err());
        assert!(shared_shard_table::<u32>(70, &[], false).is_err());
    }

    #[test]
    fn test_shared_tables_are_memoized() {
        let a = shared_word_table(24, 0x86_4CFBu32, false).unwrap();
        let b = shared_word_table(24, 0xFF86_4CFBu32, false).unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        let c = shared_word_table(24, 0x86_4CFBu32, true).unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
        assert!(cached_tables() >= 2);
    }

    #[test]
    fn test_shared_tables_are_keyed_by_word() {
        let narrow = shared_word_table(8, 0x31u8, true).unwrap();
        let wide = shared_word_table(8, 0x31u16, true).unwrap();
        assert_eq!(narrow.word(7) as u16, wide.word(7));
    }

    #[test]
    fn test_concurrent_first_use_builds_once() {
        let poly = [0x1u8, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0x01, 0x23, 0x45, 0x67, 0x89];
        let tables: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| shared_shard_table(97, &poly, false).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        for table in &tables[1..] {
            assert!(Arc::ptr_eq(&tables[0], table));
        }
    }

    #[test]
    fn test_debug_omits_entries() {
        let table = Table::for_word(8, 0x07u8, false).unwrap();
        let text = format!("{table:?}");
        assert!(text.contains("8-bit"));
        assert!(!text.contains("entries"));
    }
}
