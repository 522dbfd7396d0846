//! Core types for Glyphmark watermarks

use crate::constants::{PAYLOAD_BITS, PAYLOAD_BYTES, PAYLOAD_HEX_DIGITS, PAYLOAD_MAX};
use crate::error::WatermarkError;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// A 40-bit watermark value
///
/// The value is kept in the low 40 bits of a `u64`; the upper bits are
/// always zero. Bits are ordered most significant first wherever a bit
/// sequence is produced or consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Payload(u64);

impl Payload {
    /// Create a payload from an integer, rejecting values wider than 40 bits
    pub fn new(value: u64) -> Result<Self, WatermarkError> {
        if value > PAYLOAD_MAX {
            return Err(WatermarkError::InvalidPayload(format!(
                "value {:#x} does not fit in {} bits",
                value, PAYLOAD_BITS
            )));
        }
        Ok(Self(value))
    }

    /// Create a payload from its 5-byte big-endian form
    pub fn from_bytes(bytes: [u8; PAYLOAD_BYTES]) -> Self {
        let value = bytes
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
        Self(value)
    }

    /// Create a payload from a byte slice of exactly 5 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, WatermarkError> {
        let array: [u8; PAYLOAD_BYTES] = bytes.try_into().map_err(|_| {
            WatermarkError::InvalidPayload(format!(
                "expected {} bytes, got {}",
                PAYLOAD_BYTES,
                bytes.len()
            ))
        })?;
        Ok(Self::from_bytes(array))
    }

    /// Parse a payload from hex
    ///
    /// Accepts up to 10 hex digits with an optional `0x` prefix. Shorter
    /// strings are treated as having leading zeros.
    pub fn from_hex(hex: &str) -> Result<Self, WatermarkError> {
        let digits = hex
            .strip_prefix("0x")
            .or_else(|| hex.strip_prefix("0X"))
            .unwrap_or(hex);

        if digits.is_empty()
            || digits.len() > PAYLOAD_HEX_DIGITS
            || !digits.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(WatermarkError::InvalidPayload(format!(
                "expected 1 to {} hex digits, got {:?}",
                PAYLOAD_HEX_DIGITS, hex
            )));
        }

        let value = u64::from_str_radix(digits, 16)
            .map_err(|e| WatermarkError::InvalidPayload(format!("{:?}: {}", hex, e)))?;
        Self::new(value)
    }

    /// Raw integer value
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// 5-byte big-endian form
    pub fn to_bytes(&self) -> [u8; PAYLOAD_BYTES] {
        let mut out = [0u8; PAYLOAD_BYTES];
        out.copy_from_slice(&self.0.to_be_bytes()[8 - PAYLOAD_BYTES..]);
        out
    }

    /// Canonical 10-digit lowercase hex form
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// The 40 payload bits, most significant first
    pub fn bits(&self) -> [bool; PAYLOAD_BITS] {
        let mut out = [false; PAYLOAD_BITS];
        for (i, bit) in out.iter_mut().enumerate() {
            *bit = (self.0 >> (PAYLOAD_BITS - 1 - i)) & 1 == 1;
        }
        out
    }

    /// Rebuild a payload from 40 bits, most significant first
    pub fn from_bits(bits: &[bool]) -> Result<Self, WatermarkError> {
        if bits.len() != PAYLOAD_BITS {
            return Err(WatermarkError::InvalidPayload(format!(
                "expected {} bits, got {}",
                PAYLOAD_BITS,
                bits.len()
            )));
        }
        let value = bits
            .iter()
            .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit));
        Ok(Self(value))
    }

    /// Check whether the marker is the only run of marker length under every rotation
    ///
    /// A payload whose first or last bit is set extends the marker run, so a
    /// rotated buffer can expose a run start that is not the frame start.
    pub fn has_unambiguous_marker(&self) -> bool {
        let first = (self.0 >> (PAYLOAD_BITS - 1)) & 1;
        let last = self.0 & 1;
        first == 0 && last == 0
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.to_bytes() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl FromStr for Payload {
    type Err = WatermarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<u64> for Payload {
    type Error = WatermarkError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Payload> for u64 {
    fn from(payload: Payload) -> Self {
        payload.0
    }
}

impl From<[u8; PAYLOAD_BYTES]> for Payload {
    fn from(bytes: [u8; PAYLOAD_BYTES]) -> Self {
        Self::from_bytes(bytes)
    }
}

/// Transform a hex string into the string of its bits
///
/// Every hex digit expands to exactly four binary digits, so leading zeros
/// are preserved.
pub fn hex_to_bin(hex: &str) -> Result<String, WatermarkError> {
    let mut out = String::with_capacity(hex.len() * 4);
    for c in hex.chars() {
        let nibble = c.to_digit(16).ok_or_else(|| {
            WatermarkError::InvalidPayload(format!("{:?} is not a hex digit", c))
        })?;
        for shift in (0..4).rev() {
            out.push(if (nibble >> shift) & 1 == 1 { '1' } else { '0' });
        }
    }
    Ok(out)
}

/// Render a bit slice as a string of `0` and `1`
pub fn bits_to_string(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}

/// Parse a string of `0` and `1` into bits
pub fn bits_from_str(s: &str) -> Result<Vec<bool>, WatermarkError> {
    s.chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => Err(WatermarkError::InvalidPayload(format!(
                "{:?} is not a binary digit",
                other
            ))),
        })
        .collect()
}
