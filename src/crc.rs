//! The dispatching front end.
//!
//! [`Crc`] wraps whichever core fits the configured width behind the common
//! [`Engine`] contract. Use [`CrcBuilder`] to pick the core or switch between
//! table-driven and bitwise processing.
//!
//! # Examples
//!
//! ```
//! use crcwidth::{Crc, CrcParams, Engine};
//!
//! let params = CrcParams::new(32, 0x04C11DB7, 0xFFFFFFFF, 0xFFFFFFFF, true, true).unwrap();
//! let mut crc = Crc::new(&params).unwrap();
//! crc.update(b"123456789");
//! assert_eq!(crc.finalize().to_u32_overflowing(), (0xCBF43926, false));
//! ```

use crate::engine::{Engine, FixedEngine, ShardedEngine};
use crate::error::{CrcError, Result};
use crate::params::CrcParams;
use crate::value::CrcValue;
use log::debug;
use std::fmt;
use std::io;

/// Register cores an engine can run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Core {
    Bits8,
    Bits16,
    Bits32,
    Bits64,
    /// Any width, in 64-bit shards.
    MultiWord,
}

impl Core {
    /// Native cores, narrowest first.
    pub const NATIVE: [Core; 4] = [Core::Bits8, Core::Bits16, Core::Bits32, Core::Bits64];

    /// Widest register the core holds, `None` when unbounded.
    pub fn capacity(self) -> Option<usize> {
        match self {
            Core::Bits8 => Some(8),
            Core::Bits16 => Some(16),
            Core::Bits32 => Some(32),
            Core::Bits64 => Some(64),
            Core::MultiWord => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Core::Bits8 => "8-bit",
            Core::Bits16 => "16-bit",
            Core::Bits32 => "32-bit",
            Core::Bits64 => "64-bit",
            Core::MultiWord => "multi-word",
        }
    }

    /// The narrowest core that holds `width` bits.
    pub fn for_width(width: usize) -> Core {
        Core::NATIVE
            .into_iter()
            .find(|core| core.capacity().is_some_and(|cap| width <= cap))
            .unwrap_or(Core::MultiWord)
    }
}

impl fmt::Display for Core {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Configures and builds a [`Crc`].
#[derive(Debug, Clone)]
pub struct CrcBuilder {
    params: CrcParams,
    core: Option<Core>,
    table: bool,
}

impl CrcBuilder {
    /// Starts from table-driven processing on the narrowest fitting core.
    pub fn new(params: CrcParams) -> Self {
        Self {
            params,
            core: None,
            table: true,
        }
    }

    /// Forces a specific core.
    pub fn core(mut self, core: Core) -> Self {
        self.core = Some(core);
        self
    }

    /// Chooses between a lookup table (`true`) and bit-by-bit updates.
    pub fn table(mut self, on: bool) -> Self {
        self.table = on;
        self
    }

    pub fn build(self) -> Result<Crc> {
        let width = self.params.width();
        let core = self.core.unwrap_or_else(|| Core::for_width(width));
        if let Some(capacity) = core.capacity() {
            if width > capacity {
                return Err(CrcError::WidthExceedsCore {
                    width,
                    core: core.label(),
                    capacity,
                });
            }
        }

        debug!(
            "building {} on the {core} core (table: {})",
            self.params.name(),
            self.table
        );
        let params = &self.params;
        Ok(match core {
            Core::Bits8 => Crc::Bits8(FixedEngine::new(params, self.table)?),
            Core::Bits16 => Crc::Bits16(FixedEngine::new(params, self.table)?),
            Core::Bits32 => Crc::Bits32(FixedEngine::new(params, self.table)?),
            Core::Bits64 => Crc::Bits64(FixedEngine::new(params, self.table)?),
            Core::MultiWord => Crc::MultiWord(ShardedEngine::new(params, self.table)?),
        })
    }
}

/// A CRC engine on one of the available cores.
#[derive(Debug, Clone)]
pub enum Crc {
    Bits8(FixedEngine<u8>),
    Bits16(FixedEngine<u16>),
    Bits32(FixedEngine<u32>),
    Bits64(FixedEngine<u64>),
    MultiWord(ShardedEngine<u64>),
}

macro_rules! dispatch {
    ($self:expr, $engine:ident => $body:expr) => {
        match $self {
            Crc::Bits8($engine) => $body,
            Crc::Bits16($engine) => $body,
            Crc::Bits32($engine) => $body,
            Crc::Bits64($engine) => $body,
            Crc::MultiWord($engine) => $body,
        }
    };
}

impl Crc {
    /// A table-driven engine on the narrowest fitting core.
    pub fn new(params: &CrcParams) -> Result<Self> {
        CrcBuilder::new(params.clone()).build()
    }

    pub fn builder(params: &CrcParams) -> CrcBuilder {
        CrcBuilder::new(params.clone())
    }

    /// One-shot checksum of `data`.
    pub fn checksum_of(params: &CrcParams, data: &[u8]) -> Result<CrcValue> {
        let mut crc = Self::new(params)?;
        crc.update(data);
        Ok(crc.finalize())
    }

    pub fn core(&self) -> Core {
        match self {
            Crc::Bits8(_) => Core::Bits8,
            Crc::Bits16(_) => Core::Bits16,
            Crc::Bits32(_) => Core::Bits32,
            Crc::Bits64(_) => Core::Bits64,
            Crc::MultiWord(_) => Core::MultiWord,
        }
    }

    pub fn is_table_driven(&self) -> bool {
        dispatch!(self, e => e.is_table_driven())
    }
}

impl Engine for Crc {
    fn params(&self) -> &CrcParams {
        dispatch!(self, e => e.params())
    }

    fn update_byte(&mut self, byte: u8) {
        dispatch!(self, e => e.update_byte(byte))
    }

    fn update(&mut self, data: &[u8]) {
        dispatch!(self, e => e.update(data))
    }

    fn finalize(&mut self) -> CrcValue {
        dispatch!(self, e => e.finalize())
    }

    fn reset(&mut self) {
        dispatch!(self, e => e.reset())
    }
}

impl io::Write for Crc {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::CHECK_INPUT;

    fn params(width: usize, poly: u128, init: u128, xorout: u128, reflected: bool) -> CrcParams {
        CrcParams::new(width, poly, init, xorout, reflected, reflected).unwrap()
    }

    #[test]
    fn test_core_for_width() {
        assert_eq!(Core::for_width(1), Core::Bits8);
        assert_eq!(Core::for_width(8), Core::Bits8);
        assert_eq!(Core::for_width(9), Core::Bits16);
        assert_eq!(Core::for_width(24), Core::Bits32);
        assert_eq!(Core::for_width(64), Core::Bits64);
        assert_eq!(Core::for_width(65), Core::MultiWord);
        assert_eq!(Core::Bits16.to_string(), "16-bit");
        assert_eq!(Core::MultiWord.to_string(), "multi-word");
    }

    #[test]
    fn test_known_vectors_on_every_core() {
        let cases = [
            (params(8, 0x07, 0x00, 0x00, false), 0xF4u128),
            (params(16, 0x1021, 0xFFFF, 0x0000, false), 0x29B1),
            (params(32, 0x04C1_1DB7, 0xFFFF_FFFF, 0xFFFF_FFFF, true), 0xCBF4_3926),
            (params(5, 0x05, 0x1F, 0x1F, true), 0x19),
        ];
        for (params, check) in cases {
            let expected = CrcValue::from_u128(check, params.width());
            let auto = Crc::checksum_of(&params, CHECK_INPUT).unwrap();
            assert_eq!(auto, expected);

            let cores = Core::NATIVE
                .into_iter()
                .filter(|c| c.capacity().is_some_and(|cap| cap >= params.width()))
                .chain([Core::MultiWord]);
            for core in cores {
                for table in [true, false] {
                    let mut crc = Crc::builder(&params).core(core).table(table).build().unwrap();
                    assert_eq!(crc.core(), core);
                    assert_eq!(crc.is_table_driven(), table);
                    assert_eq!(crc.checksum(CHECK_INPUT), expected, "{core} table={table}");
                }
            }
        }
    }

    #[test]
    fn test_explicit_core_too_narrow() {
        let p = params(17, 0x1685B, 0, 0, false);
        assert_eq!(
            Crc::builder(&p).core(Core::Bits16).build().unwrap_err(),
            CrcError::WidthExceedsCore {
                width: 17,
                core: "16-bit",
                capacity: 16
            }
        );
        let p = params(82, 0x1, 0, 0, true);
        assert!(Crc::builder(&p).core(Core::Bits64).build().is_err());
        assert_eq!(Crc::new(&p).unwrap().core(), Core::MultiWord);
    }

    #[test]
    fn test_io_write() {
        use std::io::Write;

        let p = params(16, 0x8005, 0x0000, 0x0000, true);
        let mut crc = Crc::new(&p).unwrap();
        crc.write_all(b"1234").unwrap();
        crc.write_all(b"56789").unwrap();
        crc.flush().unwrap();
        assert_eq!(crc.finalize(), CrcValue::from_u128(0xBB3D, 16));

        let mut reader: &[u8] = CHECK_INPUT;
        io::copy(&mut reader, &mut crc).unwrap();
        assert_eq!(crc.finalize(), CrcValue::from_u128(0xBB3D, 16));
    }

    #[test]
    fn test_verify() {
        let p = params(16, 0x1021, 0x0000, 0x0000, false);
        let mut crc = Crc::new(&p).unwrap();
        assert!(crc.verify(CHECK_INPUT, &CrcValue::from_u128(0x31C3, 16)));
        assert!(!crc.verify(b"123456780", &CrcValue::from_u128(0x31C3, 16)));
        assert_eq!(crc.width(), 16);
    }
}
