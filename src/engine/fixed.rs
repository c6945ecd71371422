//! Single-word CRC engines.
//!
//! `FixedEngine<W>` keeps the whole register in one native word, so it serves
//! every width from 1 up to `W::BITS`. Non-reflected algorithms keep the
//! register left-aligned and shift towards the top; reflected algorithms keep
//! it right-aligned and shift towards the bottom.

use crate::bits;
use crate::engine::Engine;
use crate::error::{CrcError, Result};
use crate::params::CrcParams;
use crate::table::{self, Table};
use crate::value::CrcValue;
use crate::word::Word;
use std::sync::Arc;

/// A CRC engine whose register fits in one `W`.
#[derive(Debug, Clone)]
pub struct FixedEngine<W: Word> {
    params: CrcParams,
    /// Aligned polynomial.
    poly: W,
    /// Aligned initial register.
    init: W,
    /// Right-aligned output mask.
    xorout: W,
    moves: usize,
    register: W,
    table: Option<Arc<Table<W>>>,
}

impl<W: Word> FixedEngine<W> {
    /// Builds an engine, optionally with the shared lookup table for these
    /// parameters.
    pub fn new(params: &CrcParams, with_table: bool) -> Result<Self> {
        let mut engine = Self::bitwise(params)?;
        if with_table {
            engine.table = Some(table::shared_word_table(
                engine.params.width(),
                engine.params.poly().to_word(),
                engine.params.refin(),
            )?);
        }
        Ok(engine)
    }

    /// Builds a table-driven engine around a table the caller already holds.
    pub fn with_table(params: &CrcParams, table: Arc<Table<W>>) -> Result<Self> {
        let mut engine = Self::bitwise(params)?;
        table.check_matches(params, 1)?;
        engine.table = Some(table);
        Ok(engine)
    }

    fn bitwise(params: &CrcParams) -> Result<Self> {
        let width = params.width();
        if width > W::BITS {
            return Err(CrcError::WidthExceedsCore {
                width,
                core: W::LABEL,
                capacity: W::BITS,
            });
        }

        let refin = params.refin();
        let init = bits::align(params.init().to_word(), width, refin);
        Ok(Self {
            params: params.clone(),
            poly: bits::align(params.poly().to_word(), width, refin),
            init,
            xorout: bits::truncate(params.xorout().to_word(), width),
            moves: bits::moves::<W>(width),
            register: init,
            table: None,
        })
    }

    pub fn is_table_driven(&self) -> bool {
        self.table.is_some()
    }

    pub fn table(&self) -> Option<&Arc<Table<W>>> {
        self.table.as_ref()
    }

    /// The raw register, in its internal alignment.
    pub fn register(&self) -> W {
        self.register
    }

    /// Like [`Engine::finalize`], but returns the native word.
    pub fn finalize_word(&mut self) -> W {
        let mut out = self.register;
        if self.params.refin() != self.params.refout() {
            out = out.reverse();
        }
        if !self.params.refout() {
            out = out >> self.moves;
        }
        self.register = self.init;
        out ^ self.xorout
    }

    #[inline]
    fn step_bitwise(&self, register: W, byte: u8) -> W {
        if self.params.refin() {
            table::reflected_rounds(register ^ W::from_byte(byte), self.poly)
        } else {
            table::forward_rounds(register ^ (W::from_byte(byte) << (W::BITS - 8)), self.poly)
        }
    }

    #[inline]
    fn step_table(table: &Table<W>, reflected: bool, register: W, byte: u8) -> W {
        if reflected {
            let index = register.low_byte() ^ byte;
            register.shr_or_zero(8) ^ table.word(index)
        } else {
            let index = (register >> (W::BITS - 8)).low_byte() ^ byte;
            register.shl_or_zero(8) ^ table.word(index)
        }
    }
}

impl<W: Word> Engine for FixedEngine<W> {
    fn params(&self) -> &CrcParams {
        &self.params
    }

    fn update_byte(&mut self, byte: u8) {
        self.register = match &self.table {
            Some(table) => Self::step_table(table, self.params.refin(), self.register, byte),
            None => self.step_bitwise(self.register, byte),
        };
    }

    fn update(&mut self, data: &[u8]) {
        let mut register = self.register;
        match &self.table {
            Some(table) => {
                let reflected = self.params.refin();
                for &byte in data {
                    register = Self::step_table(table, reflected, register, byte);
                }
            }
            None => {
                for &byte in data {
                    register = self.step_bitwise(register, byte);
                }
            }
        }
        self.register = register;
    }

    fn finalize(&mut self) -> CrcValue {
        CrcValue::from_word(self.finalize_word(), self.params.width())
    }

    fn reset(&mut self) {
        self.register = self.init;
    }
}
