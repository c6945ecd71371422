//! Named CRC algorithms.
//!
//! The catalogue is plain data: one [`Preset`] per algorithm, with parameters
//! taken from the `crc-catalog` crate (itself a transcription of the
//! [CRC RevEng catalogue](https://reveng.sourceforge.io/crc-catalogue/)).
//! Engines built from a preset share their lookup table with every other
//! engine of the same algorithm.
//!
//! # Examples
//!
//! ```
//! use crcwidth::{catalog, Engine};
//!
//! let preset = catalog::lookup("CRC-16/XMODEM").unwrap();
//! let mut crc = preset.builder().build().unwrap();
//! assert_eq!(crc.checksum(b"123456789").to_u16_overflowing(), (0x31C3, false));
//! ```

use crate::crc::CrcBuilder;
use crate::error::{CrcError, Result};
use crate::params::CrcParams;

/// A named catalogue algorithm. Values are right-aligned and unreflected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub width: usize,
    pub poly: u128,
    pub init: u128,
    pub refin: bool,
    pub refout: bool,
    pub xorout: u128,
    /// Checksum of `"123456789"`.
    pub check: u128,
    /// Register contents after processing a message followed by its own
    /// checksum, before the final XOR.
    pub residue: u128,
}

impl Preset {
    pub fn params(&self) -> CrcParams {
        CrcParams::new(
            self.width,
            self.poly,
            self.init,
            self.xorout,
            self.refin,
            self.refout,
        )
        .map(|params| params.with_name(self.name).with_check(self.check))
        .unwrap_or_else(|_| unreachable!("catalogue widths are non-zero"))
    }

    /// A table-driven builder on the narrowest fitting core.
    pub fn builder(&self) -> CrcBuilder {
        CrcBuilder::new(self.params())
    }
}

macro_rules! preset {
    ($name:literal, $alg:ident) => {
        Preset {
            name: $name,
            width: crc_catalog::$alg.width as usize,
            poly: crc_catalog::$alg.poly as u128,
            init: crc_catalog::$alg.init as u128,
            refin: crc_catalog::$alg.refin,
            refout: crc_catalog::$alg.refout,
            xorout: crc_catalog::$alg.xorout as u128,
            check: crc_catalog::$alg.check as u128,
            residue: crc_catalog::$alg.residue as u128,
        }
    };
}

/// Every catalogue algorithm, ordered by width.
pub static PRESETS: &[Preset] = &[
    preset!("CRC-3/GSM", CRC_3_GSM),
    preset!("CRC-3/ROHC", CRC_3_ROHC),
    preset!("CRC-4/G-704", CRC_4_G_704),
    preset!("CRC-4/INTERLAKEN", CRC_4_INTERLAKEN),
    preset!("CRC-5/EPC-C1G2", CRC_5_EPC_C1G2),
    preset!("CRC-5/G-704", CRC_5_G_704),
    preset!("CRC-5/USB", CRC_5_USB),
    preset!("CRC-6/CDMA2000-A", CRC_6_CDMA2000_A),
    preset!("CRC-6/CDMA2000-B", CRC_6_CDMA2000_B),
    preset!("CRC-6/DARC", CRC_6_DARC),
    preset!("CRC-6/G-704", CRC_6_G_704),
    preset!("CRC-6/GSM", CRC_6_GSM),
    preset!("CRC-7/MMC", CRC_7_MMC),
    preset!("CRC-7/ROHC", CRC_7_ROHC),
    preset!("CRC-7/UMTS", CRC_7_UMTS),
    preset!("CRC-8/AUTOSAR", CRC_8_AUTOSAR),
    preset!("CRC-8/BLUETOOTH", CRC_8_BLUETOOTH),
    preset!("CRC-8/CDMA2000", CRC_8_CDMA2000),
    preset!("CRC-8/DARC", CRC_8_DARC),
    preset!("CRC-8/DVB-S2", CRC_8_DVB_S2),
    preset!("CRC-8/GSM-A", CRC_8_GSM_A),
    preset!("CRC-8/GSM-B", CRC_8_GSM_B),
    preset!("CRC-8/I-432-1", CRC_8_I_432_1),
    preset!("CRC-8/I-CODE", CRC_8_I_CODE),
    preset!("CRC-8/LTE", CRC_8_LTE),
    preset!("CRC-8/MAXIM-DOW", CRC_8_MAXIM_DOW),
    preset!("CRC-8/MIFARE-MAD", CRC_8_MIFARE_MAD),
    preset!("CRC-8/NRSC-5", CRC_8_NRSC_5),
    preset!("CRC-8/OPENSAFETY", CRC_8_OPENSAFETY),
    preset!("CRC-8/ROHC", CRC_8_ROHC),
    preset!("CRC-8/SAE-J1850", CRC_8_SAE_J1850),
    preset!("CRC-8/SMBUS", CRC_8_SMBUS),
    preset!("CRC-8/TECH-3250", CRC_8_TECH_3250),
    preset!("CRC-8/WCDMA", CRC_8_WCDMA),
    preset!("CRC-10/ATM", CRC_10_ATM),
    preset!("CRC-10/CDMA2000", CRC_10_CDMA2000),
    preset!("CRC-10/GSM", CRC_10_GSM),
    preset!("CRC-11/FLEXRAY", CRC_11_FLEXRAY),
    preset!("CRC-11/UMTS", CRC_11_UMTS),
    preset!("CRC-12/CDMA2000", CRC_12_CDMA2000),
    preset!("CRC-12/DECT", CRC_12_DECT),
    preset!("CRC-12/GSM", CRC_12_GSM),
    preset!("CRC-12/UMTS", CRC_12_UMTS),
    preset!("CRC-13/BBC", CRC_13_BBC),
    preset!("CRC-14/DARC", CRC_14_DARC),
    preset!("CRC-14/GSM", CRC_14_GSM),
    preset!("CRC-15/CAN", CRC_15_CAN),
    preset!("CRC-15/MPT1327", CRC_15_MPT1327),
    preset!("CRC-16/ARC", CRC_16_ARC),
    preset!("CRC-16/CDMA2000", CRC_16_CDMA2000),
    preset!("CRC-16/CMS", CRC_16_CMS),
    preset!("CRC-16/DDS-110", CRC_16_DDS_110),
    preset!("CRC-16/DECT-R", CRC_16_DECT_R),
    preset!("CRC-16/DECT-X", CRC_16_DECT_X),
    preset!("CRC-16/DNP", CRC_16_DNP),
    preset!("CRC-16/EN-13757", CRC_16_EN_13757),
    preset!("CRC-16/GENIBUS", CRC_16_GENIBUS),
    preset!("CRC-16/GSM", CRC_16_GSM),
    preset!("CRC-16/IBM-3740", CRC_16_IBM_3740),
    preset!("CRC-16/IBM-SDLC", CRC_16_IBM_SDLC),
    preset!("CRC-16/ISO-IEC-14443-3-A", CRC_16_ISO_IEC_14443_3_A),
    preset!("CRC-16/KERMIT", CRC_16_KERMIT),
    preset!("CRC-16/LJ1200", CRC_16_LJ1200),
    preset!("CRC-16/MAXIM-DOW", CRC_16_MAXIM_DOW),
    preset!("CRC-16/MCRF4XX", CRC_16_MCRF4XX),
    preset!("CRC-16/MODBUS", CRC_16_MODBUS),
    preset!("CRC-16/NRSC-5", CRC_16_NRSC_5),
    preset!("CRC-16/OPENSAFETY-A", CRC_16_OPENSAFETY_A),
    preset!("CRC-16/OPENSAFETY-B", CRC_16_OPENSAFETY_B),
    preset!("CRC-16/PROFIBUS", CRC_16_PROFIBUS),
    preset!("CRC-16/RIELLO", CRC_16_RIELLO),
    preset!("CRC-16/SPI-FUJITSU", CRC_16_SPI_FUJITSU),
    preset!("CRC-16/T10-DIF", CRC_16_T10_DIF),
    preset!("CRC-16/TELEDISK", CRC_16_TELEDISK),
    preset!("CRC-16/TMS37157", CRC_16_TMS37157),
    preset!("CRC-16/UMTS", CRC_16_UMTS),
    preset!("CRC-16/USB", CRC_16_USB),
    preset!("CRC-16/XMODEM", CRC_16_XMODEM),
    preset!("CRC-17/CAN-FD", CRC_17_CAN_FD),
    preset!("CRC-21/CAN-FD", CRC_21_CAN_FD),
    preset!("CRC-24/BLE", CRC_24_BLE),
    preset!("CRC-24/FLEXRAY-A", CRC_24_FLEXRAY_A),
    preset!("CRC-24/FLEXRAY-B", CRC_24_FLEXRAY_B),
    preset!("CRC-24/INTERLAKEN", CRC_24_INTERLAKEN),
    preset!("CRC-24/LTE-A", CRC_24_LTE_A),
    preset!("CRC-24/LTE-B", CRC_24_LTE_B),
    preset!("CRC-24/OPENPGP", CRC_24_OPENPGP),
    preset!("CRC-24/OS-9", CRC_24_OS_9),
    preset!("CRC-30/CDMA", CRC_30_CDMA),
    preset!("CRC-31/PHILIPS", CRC_31_PHILIPS),
    preset!("CRC-32/AIXM", CRC_32_AIXM),
    preset!("CRC-32/AUTOSAR", CRC_32_AUTOSAR),
    preset!("CRC-32/BASE91-D", CRC_32_BASE91_D),
    preset!("CRC-32/BZIP2", CRC_32_BZIP2),
    preset!("CRC-32/CD-ROM-EDC", CRC_32_CD_ROM_EDC),
    preset!("CRC-32/CKSUM", CRC_32_CKSUM),
    preset!("CRC-32/ISCSI", CRC_32_ISCSI),
    preset!("CRC-32/ISO-HDLC", CRC_32_ISO_HDLC),
    preset!("CRC-32/JAMCRC", CRC_32_JAMCRC),
    preset!("CRC-32/MPEG-2", CRC_32_MPEG_2),
    preset!("CRC-32/XFER", CRC_32_XFER),
    preset!("CRC-40/GSM", CRC_40_GSM),
    preset!("CRC-64/ECMA-182", CRC_64_ECMA_182),
    preset!("CRC-64/GO-ISO", CRC_64_GO_ISO),
    preset!("CRC-64/WE", CRC_64_WE),
    preset!("CRC-64/XZ", CRC_64_XZ),
    preset!("CRC-82/DARC", CRC_82_DARC),
];

/// Common alternative names, mapped to their catalogue entries.
pub static ALIASES: &[(&str, &str)] = &[
    ("CRC-8", "CRC-8/SMBUS"),
    ("CRC-8/ITU", "CRC-8/I-432-1"),
    ("CRC-8/MAXIM", "CRC-8/MAXIM-DOW"),
    ("CRC-16", "CRC-16/ARC"),
    ("CRC-16/CCITT-FALSE", "CRC-16/IBM-3740"),
    ("CRC-16/AUTOSAR", "CRC-16/IBM-3740"),
    ("CRC-16/X-25", "CRC-16/IBM-SDLC"),
    ("CRC-16/BUYPASS", "CRC-16/UMTS"),
    ("CRC-16/CCITT", "CRC-16/KERMIT"),
    ("CRC-24", "CRC-24/OPENPGP"),
    ("CRC-32", "CRC-32/ISO-HDLC"),
    ("CRC-32C", "CRC-32/ISCSI"),
    ("CRC-32/POSIX", "CRC-32/CKSUM"),
    ("CRC-64", "CRC-64/ECMA-182"),
];

/// Folds case and drops separators so `crc16_xmodem` matches `CRC-16/XMODEM`.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | '/' | ' '))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Finds a preset by catalogue name or alias.
pub fn find(name: &str) -> Option<&'static Preset> {
    let key = normalize(name);
    let by_name = |wanted: &str| PRESETS.iter().find(|p| normalize(p.name) == wanted);
    by_name(&key).or_else(|| {
        ALIASES
            .iter()
            .find(|(alias, _)| normalize(alias) == key)
            .and_then(|(_, target)| by_name(&normalize(target)))
    })
}

/// Like [`find`], but reports unknown names as an error.
pub fn lookup(name: &str) -> Result<&'static Preset> {
    find(name).ok_or_else(|| CrcError::UnknownAlgorithm(name.to_string()))
}
