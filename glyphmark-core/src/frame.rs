//! Bit frame construction
//!
//! A frame is the marker (41 one-bits) followed by the 40 payload bits. It is
//! read as a circular buffer: positions wrap modulo [`FRAME_BITS`].

use crate::constants::{FRAME_BITS, MARKER_BITS, WHITESPACE_GROUP_BITS};
use crate::types::Payload;

/// The 81-bit circular frame for one payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitFrame {
    bits: [bool; FRAME_BITS],
}

impl BitFrame {
    /// Build the frame: marker bits first, then the payload in order
    pub fn build(payload: Payload) -> Self {
        let mut bits = [true; FRAME_BITS];
        bits[MARKER_BITS..].copy_from_slice(&payload.bits());
        Self { bits }
    }

    /// Bit at a circular position
    pub fn bit(&self, pos: usize) -> bool {
        self.bits[pos % FRAME_BITS]
    }

    /// Three consecutive bits starting at a circular position, as a group
    pub fn group(&self, pos: usize) -> u8 {
        (0..WHITESPACE_GROUP_BITS).fold(0u8, |acc, i| (acc << 1) | u8::from(self.bit(pos + i)))
    }

    /// All 81 bits
    pub fn as_bits(&self) -> &[bool; FRAME_BITS] {
        &self.bits
    }

    /// Frame length in bits
    pub const fn len(&self) -> usize {
        FRAME_BITS
    }

    /// Frames are never empty
    pub const fn is_empty(&self) -> bool {
        false
    }
}

/// Build the frame for a payload
pub fn build_frame(payload: Payload) -> BitFrame {
    BitFrame::build(payload)
}
