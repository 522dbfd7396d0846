//! Watermark extraction
//!
//! Extraction walks the document, turns every confusable code point back
//! into its bit (or 3-bit group) and stops as soon as a full frame's worth of
//! bits has been collected. The collected bits are then handed to the
//! marker locator, which undoes whatever rotation the document imposed.

use crate::constants::FRAME_BITS;
use crate::error::WatermarkError;
use crate::locator::locate_payload;
use crate::symbols::{classify, glyph_bits};
use crate::types::Payload;
use alloc::vec::Vec;

#[cfg(feature = "std")]
use std::io::{self, BufRead, BufReader};
#[cfg(feature = "std")]
use std::path::Path;

#[cfg(feature = "logging")]
use tracing::debug;

/// Bits recovered from a document, capped at one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bits: Vec<bool>,
}

impl BitBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self {
            bits: Vec::with_capacity(FRAME_BITS + 2),
        }
    }

    /// Decode one code point into the buffer
    ///
    /// Returns `true` once the buffer holds a full frame; further input is
    /// ignored. A whitespace group that straddles the cap is cut at the cap.
    pub fn push_char(&mut self, c: char) -> bool {
        if self.is_full() {
            return true;
        }
        glyph_bits(classify(c), &mut self.bits);
        self.bits.truncate(FRAME_BITS);
        self.is_full()
    }

    /// Whether a full frame has been collected
    pub fn is_full(&self) -> bool {
        self.bits.len() >= FRAME_BITS
    }

    /// Number of bits collected
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether nothing has been collected
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Collected bits
    pub fn as_bits(&self) -> &[bool] {
        &self.bits
    }

    /// Consume the buffer and return its bits
    pub fn into_bits(self) -> Vec<bool> {
        self.bits
    }

    /// Check the buffer length and locate the payload in it
    pub fn resolve(&self) -> Result<Payload, WatermarkError> {
        if self.bits.len() < FRAME_BITS {
            return Err(WatermarkError::FrameLength {
                expected: FRAME_BITS,
                actual: self.bits.len(),
            });
        }
        locate_payload(&self.bits)
    }
}

/// Collect up to one frame of bits from a sequence of code points
///
/// The iterator is not drained past the point where the frame is full.
pub fn scan_chars<I>(chars: I) -> BitBuffer
where
    I: IntoIterator<Item = char>,
{
    let mut buffer = BitBuffer::new();
    for c in chars {
        if buffer.push_char(c) {
            break;
        }
    }
    buffer
}

/// Extract the payload from a string
pub fn extract_str(text: &str) -> Result<Payload, WatermarkError> {
    scan_chars(text.chars()).resolve()
}

/// Extract the payload from a UTF-8 stream
///
/// Lines are pulled until a full frame has been read, so a large document
/// is only read as far as necessary. Bytes that are not valid UTF-8 are an
/// `InvalidData` error only when they are reached before the frame is full.
#[cfg(feature = "std")]
pub fn extract_reader<R>(mut reader: R) -> Result<Payload, WatermarkError>
where
    R: BufRead,
{
    let mut buffer = BitBuffer::new();
    let mut raw = Vec::new();
    let mut lines_read = 0usize;

    while !buffer.is_full() {
        raw.clear();
        if reader.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        lines_read += 1;

        let (text, invalid) = match core::str::from_utf8(&raw) {
            Ok(text) => (text, false),
            Err(e) => (
                core::str::from_utf8(&raw[..e.valid_up_to()]).unwrap_or_default(),
                true,
            ),
        };
        for c in text.chars() {
            if buffer.push_char(c) {
                break;
            }
        }

        if invalid && !buffer.is_full() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "stream did not contain valid UTF-8",
            )
            .into());
        }
    }

    #[cfg(feature = "logging")]
    debug!(
        "Collected {} of {} frame bits after {} lines",
        buffer.len(),
        FRAME_BITS,
        lines_read
    );
    #[cfg(not(feature = "logging"))]
    let _ = lines_read;

    let payload = buffer.resolve()?;

    #[cfg(feature = "logging")]
    debug!("Recovered payload {}", payload);

    Ok(payload)
}

/// Extract the payload from the file at `source`
#[cfg(feature = "std")]
pub fn extract_file(source: &Path) -> Result<Payload, WatermarkError> {
    #[cfg(feature = "logging")]
    debug!("Extracting watermark from {}", source.display());

    let file = std::fs::File::open(source)?;
    extract_reader(BufReader::new(file))
}
