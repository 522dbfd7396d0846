//! Embedding capacity of a document

use crate::constants::{FRAME_BITS, LETTER_BITS, WHITESPACE_GROUP_BITS};
use crate::symbols::{classify, Glyph};

#[cfg(feature = "std")]
use crate::error::WatermarkError;
#[cfg(feature = "std")]
use std::io::BufRead;

/// How many frame bits a document can carry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Capacity {
    /// Code points inspected
    pub code_points: usize,

    /// Letter and punctuation positions (1 bit each)
    pub letter_slots: usize,

    /// Whitespace positions (3 bits each)
    pub whitespace_slots: usize,
}

impl Capacity {
    /// Account for one code point
    pub fn push(&mut self, c: char) {
        self.code_points += 1;
        match classify(c) {
            Glyph::Base(_) | Glyph::Alternate(_) => self.letter_slots += 1,
            Glyph::Whitespace(_) => self.whitespace_slots += 1,
            Glyph::Opaque => {}
        }
    }

    /// Total frame bits the document carries
    pub fn bits(&self) -> usize {
        self.letter_slots * LETTER_BITS + self.whitespace_slots * WHITESPACE_GROUP_BITS
    }

    /// Complete frame repetitions that fit
    pub fn frames(&self) -> usize {
        self.bits() / FRAME_BITS
    }

    /// Whether at least one complete frame fits
    pub fn can_hold_frame(&self) -> bool {
        self.bits() >= FRAME_BITS
    }
}

/// Measure the capacity of a string
pub fn capacity(text: &str) -> Capacity {
    let mut cap = Capacity::default();
    text.chars().for_each(|c| cap.push(c));
    cap
}

/// Measure the capacity of a UTF-8 stream
#[cfg(feature = "std")]
pub fn capacity_reader<R: BufRead>(mut reader: R) -> Result<Capacity, WatermarkError> {
    let mut cap = Capacity::default();
    let mut line = alloc::string::String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        line.chars().for_each(|c| cap.push(c));
    }
    Ok(cap)
}
