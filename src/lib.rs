//! Cyclic Redundancy Checks of any width.
//!
//! This crate computes CRCs under the Rocksoft parameter model (width,
//! polynomial, init, refin, refout, xorout) for every width from 1 bit up,
//! using:
//! - one generic single-word engine for registers of up to 8, 16, 32 or 64 bits
//! - a multi-word ("sharded") engine for anything wider
//! - Sarwate byte-at-a-time tables, forward and reflected, shared process-wide
//! - a bit-by-bit mode that produces identical results without a table
//!
//! Around the engines sit a catalogue of named algorithms and a value type
//! that renders checksums as integers, bytes, hex or binary text.
//!
//! **Note**: CRCs detect accidental corruption. They are not cryptographic
//! and offer no protection against deliberate tampering.
//!
//! # Examples
//!
//! ```
//! use crcwidth::{catalog, Case, Crc, CrcParams, Engine};
//!
//! // A named algorithm
//! let mut usb = catalog::lookup("CRC-5/USB").unwrap().builder().build().unwrap();
//! assert_eq!(usb.checksum(b"123456789").to_hex(Case::Upper), "19");
//!
//! // A custom one, wider than any native integer
//! let params = CrcParams::from_hex("CRC-82/DARC", 82, "0308c0111011401440411", "0", "0", true, true)
//!     .unwrap();
//! let value = Crc::checksum_of(&params, b"123456789").unwrap();
//! assert_eq!(value.to_hex(Case::Lower), "09ea83f625023801fd612");
//! ```

mod bits;
pub mod catalog;
pub mod crc;
pub mod engine;
pub mod error;
pub mod params;
mod shards;
pub mod table;
pub mod value;
pub mod word;

pub use catalog::Preset;
pub use crc::{Core, Crc, CrcBuilder};
pub use engine::{Engine, FixedEngine, ShardedEngine};
pub use error::{CrcError, Result};
pub use params::{CrcParams, CHECK_INPUT};
pub use table::Table;
pub use value::{Case, CrcValue, Endian};
pub use word::Word;
