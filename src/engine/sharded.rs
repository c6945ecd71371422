//! Multi-word CRC engine.
//!
//! When a register is wider than any native word it is split into shards, most
//! significant first. The arithmetic is the same as in the single-word engine;
//! every shift carries bits across shard boundaries and table rows are whole
//! shard arrays.

use crate::engine::Engine;
use crate::error::Result;
use crate::params::CrcParams;
use crate::shards;
use crate::table::{self, Table};
use crate::value::CrcValue;
use crate::word::Word;
use std::sync::Arc;

/// A CRC engine of any width whose register spans several `W` shards.
#[derive(Debug, Clone)]
pub struct ShardedEngine<W: Word> {
    params: CrcParams,
    poly: Vec<W>,
    init: Vec<W>,
    xorout: Vec<W>,
    moves: usize,
    register: Vec<W>,
    table: Option<Arc<Table<W>>>,
}

impl<W: Word> ShardedEngine<W> {
    pub fn new(params: &CrcParams, with_table: bool) -> Result<Self> {
        let mut engine = Self::bitwise(params);
        if with_table {
            engine.table = Some(table::shared_shard_table(
                params.width(),
                &params.poly().to_shards::<W>(),
                params.refin(),
            )?);
        }
        Ok(engine)
    }

    /// Builds a table-driven engine around a table the caller already holds.
    pub fn with_table(params: &CrcParams, table: Arc<Table<W>>) -> Result<Self> {
        let mut engine = Self::bitwise(params);
        table.check_matches(params, engine.register.len())?;
        engine.table = Some(table);
        Ok(engine)
    }

    fn bitwise(params: &CrcParams) -> Self {
        let width = params.width();
        let refin = params.refin();

        let mut poly = params.poly().to_shards::<W>();
        shards::align(&mut poly, width, refin);
        let mut init = params.init().to_shards::<W>();
        shards::align(&mut init, width, refin);
        let mut xorout = params.xorout().to_shards::<W>();
        shards::truncate(&mut xorout, width);

        Self {
            params: params.clone(),
            poly,
            register: init.clone(),
            init,
            xorout,
            moves: shards::moves::<W>(width),
            table: None,
        }
    }

    pub fn is_table_driven(&self) -> bool {
        self.table.is_some()
    }

    pub fn table(&self) -> Option<&Arc<Table<W>>> {
        self.table.as_ref()
    }

    /// The raw register shards, in their internal alignment.
    pub fn register(&self) -> &[W] {
        &self.register
    }

    /// Number of shards in the register.
    pub fn shard_count(&self) -> usize {
        self.register.len()
    }

    fn step_bitwise(&mut self, byte: u8) {
        if self.params.refin() {
            shards::xor_low_byte(&mut self.register, byte);
            table::reflected_shard_rounds(&mut self.register, &self.poly);
        } else {
            shards::xor_top_byte(&mut self.register, byte);
            table::forward_shard_rounds(&mut self.register, &self.poly);
        }
    }

    fn step_table(table: &Table<W>, reflected: bool, register: &mut [W], byte: u8) {
        if reflected {
            let index = shards::low_byte(register) ^ byte;
            shards::shr(register, 8);
            shards::xor_assign(register, table.row(index));
        } else {
            let index = shards::top_byte(register) ^ byte;
            shards::shl(register, 8);
            shards::xor_assign(register, table.row(index));
        }
    }
}

impl<W: Word> Engine for ShardedEngine<W> {
    fn params(&self) -> &CrcParams {
        &self.params
    }

    fn update_byte(&mut self, byte: u8) {
        match &self.table {
            Some(table) => {
                Self::step_table(table, self.params.refin(), &mut self.register, byte)
            }
            None => self.step_bitwise(byte),
        }
    }

    fn finalize(&mut self) -> CrcValue {
        let mut out = std::mem::replace(&mut self.register, self.init.clone());
        if self.params.refin() != self.params.refout() {
            shards::reverse(&mut out);
        }
        if !self.params.refout() {
            shards::shr(&mut out, self.moves);
        }
        shards::xor_assign(&mut out, &self.xorout);
        CrcValue::from_shards(&out, self.params.width())
    }

    fn reset(&mut self) {
        self.register.copy_from_slice(&self.init);
    }
}
