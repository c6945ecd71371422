//! The engine contract shared by every CRC core.
//!
//! An engine moves between two states: *ready*, with the register holding the
//! initial value, and *accumulating*, after one or more bytes were consumed.
//! [`Engine::finalize`] reads the checksum out and returns to *ready*, so an
//! instance can be reused immediately.

use crate::error::{CrcError, Result};
use crate::params::CrcParams;
use crate::value::CrcValue;

pub mod fixed;
pub mod sharded;

pub use fixed::FixedEngine;
pub use sharded::ShardedEngine;

/// A CRC register with its update and output transforms.
pub trait Engine {
    /// The parameters the engine was built from.
    fn params(&self) -> &CrcParams;

    /// Consumes one byte.
    fn update_byte(&mut self, byte: u8);

    /// Consumes every byte of `data` in order.
    fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.update_byte(byte);
        }
    }

    /// Consumes `buf[offset..offset + length]`.
    ///
    /// Fails without consuming anything when the range does not lie inside
    /// `buf`.
    fn update_range(&mut self, buf: &[u8], offset: usize, length: usize) -> Result<()> {
        let end = offset
            .checked_add(length)
            .filter(|&end| end <= buf.len())
            .ok_or(CrcError::InvalidRange {
                offset,
                length,
                len: buf.len(),
            })?;
        self.update(&buf[offset..end]);
        Ok(())
    }

    /// Applies the output transform, resets the register and returns the
    /// checksum.
    fn finalize(&mut self) -> CrcValue;

    /// Restores the register to the initial value.
    fn reset(&mut self);

    /// Computes the checksum of `data` from a fresh register.
    fn checksum(&mut self, data: &[u8]) -> CrcValue {
        self.reset();
        self.update(data);
        self.finalize()
    }

    /// Checks `data` against an expected checksum.
    fn verify(&mut self, data: &[u8], expected: &CrcValue) -> bool {
        self.checksum(data) == *expected
    }

    fn width(&self) -> usize {
        self.params().width()
    }
}
