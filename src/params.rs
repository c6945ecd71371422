//! CRC algorithm parameters.
//!
//! [`CrcParams`] follows the Rocksoft model used by the CRC catalogue: width,
//! polynomial (without the implicit top term), initial register value, input
//! and output reflection, and a final XOR mask. Values are given right-aligned
//! and unreflected; every bit above `width` is masked away on construction.

use crate::error::{CrcError, Result};
use crate::value::{Case, CrcValue};
use std::fmt;

/// The standard check input.
pub const CHECK_INPUT: &[u8] = b"123456789";

/// The immutable identity of a CRC algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrcParams {
    name: String,
    width: usize,
    poly: CrcValue,
    init: CrcValue,
    xorout: CrcValue,
    refin: bool,
    refout: bool,
    check: Option<CrcValue>,
}

impl CrcParams {
    /// Creates parameters from integers. Widths above 128 bits are allowed;
    /// the missing high bits are zero.
    pub fn new(
        width: usize,
        poly: u128,
        init: u128,
        xorout: u128,
        refin: bool,
        refout: bool,
    ) -> Result<Self> {
        Self::from_values(
            format!("CRC-{width}"),
            width,
            CrcValue::from_u128(poly, width),
            CrcValue::from_u128(init, width),
            CrcValue::from_u128(xorout, width),
            refin,
            refout,
        )
    }

    /// Creates parameters from hex strings, the canonical description of a
    /// catalogue entry. Digits beyond `width` bits are ignored.
    pub fn from_hex(
        name: &str,
        width: usize,
        poly: &str,
        init: &str,
        xorout: &str,
        refin: bool,
        refout: bool,
    ) -> Result<Self> {
        Self::from_values(
            name.to_string(),
            width,
            CrcValue::from_hex(poly, width)?,
            CrcValue::from_hex(init, width)?,
            CrcValue::from_hex(xorout, width)?,
            refin,
            refout,
        )
    }

    fn from_values(
        name: String,
        width: usize,
        poly: CrcValue,
        init: CrcValue,
        xorout: CrcValue,
        refin: bool,
        refout: bool,
    ) -> Result<Self> {
        if width == 0 {
            return Err(CrcError::InvalidWidth(width));
        }
        Ok(Self {
            name,
            width,
            poly,
            init,
            xorout,
            refin,
            refout,
            check: None,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attaches the expected checksum of [`CHECK_INPUT`].
    pub fn with_check(mut self, check: u128) -> Self {
        self.check = Some(CrcValue::from_u128(check, self.width));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn poly(&self) -> &CrcValue {
        &self.poly
    }

    pub fn init(&self) -> &CrcValue {
        &self.init
    }

    pub fn xorout(&self) -> &CrcValue {
        &self.xorout
    }

    pub fn refin(&self) -> bool {
        self.refin
    }

    pub fn refout(&self) -> bool {
        self.refout
    }

    pub fn check(&self) -> Option<&CrcValue> {
        self.check.as_ref()
    }
}

impl fmt::Display for CrcParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: width={} poly=0x{} init=0x{} refin={} refout={} xorout=0x{}",
            self.name,
            self.width,
            self.poly.to_hex(Case::Lower),
            self.init.to_hex(Case::Lower),
            self.refin,
            self.refout,
            self.xorout.to_hex(Case::Lower),
        )?;
        if let Some(check) = &self.check {
            write!(f, " check=0x{}", check.to_hex(Case::Lower))?;
        }
        Ok(())
    }
}
