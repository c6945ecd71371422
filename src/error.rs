//! Error types shared by every CRC engine and the value layer.

use thiserror::Error;

/// Errors raised while configuring an engine or parsing a checksum value.
///
/// Engines never fail once built: every variant here is a configuration or
/// usage error surfaced at the call that caused it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CrcError {
    /// A CRC must be at least one bit wide.
    #[error("invalid width {0}: a CRC must be at least one bit wide")]
    InvalidWidth(usize),

    /// The requested core cannot hold a register of this width.
    #[error("width {width} exceeds the {capacity}-bit capacity of the {core} core")]
    WidthExceedsCore {
        width: usize,
        core: &'static str,
        capacity: usize,
    },

    /// A bulk update range fell outside the supplied buffer.
    #[error("range {offset}+{length} is out of bounds for a buffer of {len} bytes")]
    InvalidRange {
        offset: usize,
        length: usize,
        len: usize,
    },

    /// A supplied lookup table was built for another width, orientation or
    /// shard count.
    #[error("table built for width {table_width} (reflected: {table_reflected}) cannot drive a width {width} engine (reflected: {reflected})")]
    TableMismatch {
        width: usize,
        reflected: bool,
        table_width: usize,
        table_reflected: bool,
    },

    /// A supplied table was built from a different polynomial.
    #[error("table built for polynomial 0x{table_poly} cannot drive an engine with polynomial 0x{poly}")]
    TablePolynomial { poly: String, table_poly: String },

    /// A shard array does not hold exactly the shards a width needs.
    #[error("width {width} needs {expected} shards, found {found}")]
    ShardCount {
        width: usize,
        expected: usize,
        found: usize,
    },

    /// Hex text could not be decoded.
    #[error("invalid hex value: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Binary text contained something other than `0` or `1`.
    #[error("invalid binary digit {found:?} at index {index}")]
    InvalidBinaryDigit { index: usize, found: char },

    /// A byte array did not have the length implied by the width.
    #[error("expected {expected} bytes, found {found}")]
    ByteLength { expected: usize, found: usize },

    /// No catalogue entry or alias carries this name.
    #[error("unknown CRC algorithm {0:?}")]
    UnknownAlgorithm(String),
}

/// Result type for CRC operations
pub type Result<T> = std::result::Result<T, CrcError>;
