//! Account addresses: raw (`workchain:hex`) and user-friendly base64 forms.
//!
//! The user-friendly form packs 36 bytes (tag, workchain, 32-byte account
//! hash, CRC16/XMODEM checksum) into 48 base64 characters. Both the
//! URL-safe and the standard base64 alphabets are accepted on input; output
//! always uses the URL-safe alphabet without padding.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Tag byte for a bounceable address.
const TAG_BOUNCEABLE: u8 = 0x11;
/// Tag byte for a non-bounceable address.
const TAG_NON_BOUNCEABLE: u8 = 0x51;
/// Flag bit marking a testnet-only address.
const FLAG_TESTNET: u8 = 0x80;

/// Errors arising from address parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("invalid address length")]
    BadLength,

    #[error("invalid base64 encoding")]
    BadEncoding,

    #[error("checksum mismatch")]
    BadChecksum,

    #[error("unknown address tag: {0:#04x}")]
    UnknownTag(u8),

    #[error("invalid workchain: {0}")]
    BadWorkchain(String),

    #[error("invalid account hash: {0}")]
    BadHash(String),

    #[error("not a valid raw or user-friendly address")]
    Unrecognized,
}

/// An account address: workchain plus 32-byte account hash.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    pub workchain: i8,
    pub hash: [u8; 32],
}

impl Address {
    pub fn new(workchain: i8, hash: [u8; 32]) -> Self {
        Self { workchain, hash }
    }

    /// Parse the raw form, e.g. `0:3f5c...` (64 hex digits).
    pub fn from_raw(s: &str) -> Result<Self, AddressError> {
        let (wc, hex_part) = s.split_once(':').ok_or(AddressError::Unrecognized)?;
        let workchain = wc
            .parse::<i8>()
            .map_err(|e| AddressError::BadWorkchain(e.to_string()))?;
        if hex_part.len() != 64 {
            return Err(AddressError::BadLength);
        }
        let bytes = hex::decode(hex_part).map_err(|e| AddressError::BadHash(e.to_string()))?;
        let hash: [u8; 32] = bytes.try_into().map_err(|_| AddressError::BadLength)?;
        Ok(Self { workchain, hash })
    }

    /// Parse the user-friendly 48-character base64 form, verifying the
    /// CRC16 checksum and the tag byte.
    pub fn from_friendly(s: &str) -> Result<Self, AddressError> {
        if s.len() != 48 {
            return Err(AddressError::BadLength);
        }
        let bytes = URL_SAFE_NO_PAD
            .decode(s)
            .or_else(|_| STANDARD_NO_PAD.decode(s))
            .map_err(|_| AddressError::BadEncoding)?;
        if bytes.len() != 36 {
            return Err(AddressError::BadLength);
        }

        let expected = u16::from_be_bytes([bytes[34], bytes[35]]);
        if crc16_xmodem(&bytes[..34]) != expected {
            return Err(AddressError::BadChecksum);
        }

        let tag = bytes[0] & !FLAG_TESTNET;
        if tag != TAG_BOUNCEABLE && tag != TAG_NON_BOUNCEABLE {
            return Err(AddressError::UnknownTag(bytes[0]));
        }

        let workchain = bytes[1] as i8;
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&bytes[2..34]);
        Ok(Self { workchain, hash })
    }

    /// Parse either form: user-friendly first, then raw.
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        Self::from_friendly(s).or_else(|_| Self::from_raw(s))
    }

    /// Render the raw `workchain:hex` form.
    pub fn to_raw(&self) -> String {
        format!("{}:{}", self.workchain, hex::encode(self.hash))
    }

    /// Render the user-friendly base64 form (URL-safe alphabet, no padding).
    pub fn to_friendly(&self, bounceable: bool, testnet: bool) -> String {
        let mut tag = if bounceable {
            TAG_BOUNCEABLE
        } else {
            TAG_NON_BOUNCEABLE
        };
        if testnet {
            tag |= FLAG_TESTNET;
        }
        let mut bytes = Vec::with_capacity(36);
        bytes.push(tag);
        bytes.push(self.workchain as u8);
        bytes.extend_from_slice(&self.hash);
        let crc = crc16_xmodem(&bytes);
        bytes.extend_from_slice(&crc.to_be_bytes());
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_raw())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// CRC16/XMODEM: polynomial 0x1021, initial value 0.
fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Address {
        Address::new(0, [0xAB; 32])
    }

    #[test]
    fn raw_roundtrip() {
        let addr = sample();
        let parsed = Address::from_raw(&addr.to_raw()).unwrap();
        assert_eq!(parsed, addr);
    }

    #[test]
    fn raw_masterchain_workchain() {
        let raw = format!("-1:{}", hex::encode([0x07u8; 32]));
        let addr = Address::from_raw(&raw).unwrap();
        assert_eq!(addr.workchain, -1);
    }

    #[test]
    fn friendly_roundtrip_all_flag_combinations() {
        let addr = sample();
        for bounceable in [true, false] {
            for testnet in [true, false] {
                let friendly = addr.to_friendly(bounceable, testnet);
                assert_eq!(friendly.len(), 48);
                let parsed = Address::from_friendly(&friendly).unwrap();
                assert_eq!(parsed, addr);
            }
        }
    }

    #[test]
    fn parse_accepts_both_forms() {
        let addr = sample();
        assert_eq!(Address::parse(&addr.to_raw()).unwrap(), addr);
        assert_eq!(Address::parse(&addr.to_friendly(true, false)).unwrap(), addr);
    }

    #[test]
    fn corrupted_checksum_rejected() {
        let addr = sample();
        let mut friendly = addr.to_friendly(true, false).into_bytes();
        // Flip a character in the hash region; the checksum no longer matches.
        friendly[10] = if friendly[10] == b'A' { b'B' } else { b'A' };
        let s = String::from_utf8(friendly).unwrap();
        assert!(matches!(
            Address::from_friendly(&s),
            Err(AddressError::BadChecksum) | Err(AddressError::BadEncoding)
        ));
    }

    #[test]
    fn truncated_friendly_rejected() {
        let addr = sample();
        let friendly = addr.to_friendly(true, false);
        let result = Address::from_friendly(&friendly[..20]);
        assert_eq!(result, Err(AddressError::BadLength));
    }

    #[test]
    fn garbage_is_unrecognized() {
        assert!(Address::parse("EQD4FP...short").is_err());
        assert!(Address::parse("not an address").is_err());
        assert!(Address::parse("").is_err());
    }

    #[test]
    fn crc16_known_vector() {
        // CRC16/XMODEM of "123456789" is 0x31C3.
        assert_eq!(crc16_xmodem(b"123456789"), 0x31C3);
    }
}
