//! Marker locator
//!
//! A document can be cut anywhere, so the first bit extracted is not
//! necessarily the first bit of the frame. The extracted 81 bits are,
//! however, always some rotation of the frame. Treating them as a ring, the
//! locator looks for the run of 41 one-bits and reads the 40 bits after it.
//!
//! One modular rule covers every placement of the marker:
//!
//! ```text
//! start      ||||||||----------
//! interior   ----||||||||------
//! wrapped    ||||----------||||
//! end        ----------||||||||
//! ```

use crate::constants::{FRAME_BITS, MARKER_BITS, PAYLOAD_BITS};
use crate::error::WatermarkError;
use crate::types::Payload;
use alloc::vec::Vec;

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// Offset of the first marker run in a circular frame buffer
///
/// Offsets are tried in increasing order; the first `s` for which
/// `bits[s..s + 41]` (mod 81) is all ones wins.
pub fn find_marker(bits: &[bool]) -> Option<usize> {
    if bits.len() != FRAME_BITS {
        return None;
    }
    (0..FRAME_BITS).find(|&s| (0..MARKER_BITS).all(|k| bits[(s + k) % FRAME_BITS]))
}

/// Rotate a circular frame buffer so the marker is dropped and the payload
/// bits come out in order
pub fn rotate_to_payload(bits: &[bool]) -> Result<Vec<bool>, WatermarkError> {
    if bits.len() != FRAME_BITS {
        return Err(WatermarkError::FrameLength {
            expected: FRAME_BITS,
            actual: bits.len(),
        });
    }

    let start = match find_marker(bits) {
        Some(start) => start,
        None => {
            #[cfg(feature = "logging")]
            warn!("No run of {} marker bits in extracted frame", MARKER_BITS);
            return Err(WatermarkError::MarkerNotFound);
        }
    };

    #[cfg(feature = "logging")]
    debug!("Marker found at circular offset {}", start);

    let payload_start = start + MARKER_BITS;
    Ok((0..PAYLOAD_BITS)
        .map(|i| bits[(payload_start + i) % FRAME_BITS])
        .collect())
}

/// Locate the payload in a circular frame buffer
pub fn locate_payload(bits: &[bool]) -> Result<Payload, WatermarkError> {
    let payload_bits = rotate_to_payload(bits)?;
    Payload::from_bits(&payload_bits)
}
