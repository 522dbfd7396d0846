//! Constants and limits for the Glyphmark bit frame

/// Number of one-bits that open every frame
///
/// Must be `PAYLOAD_BITS + 1` so that no payload on its own can contain a
/// run as long as the marker.
pub const MARKER_BITS: usize = PAYLOAD_BITS + 1;

/// Width of the embedded watermark in bits
pub const PAYLOAD_BITS: usize = 40;

/// Width of the embedded watermark in bytes
pub const PAYLOAD_BYTES: usize = PAYLOAD_BITS / 8;

/// Number of hex digits in the canonical payload form
pub const PAYLOAD_HEX_DIGITS: usize = PAYLOAD_BITS / 4;

/// Largest representable payload value
pub const PAYLOAD_MAX: u64 = (1 << PAYLOAD_BITS) - 1;

/// Total frame length: marker followed by payload (81 bits)
pub const FRAME_BITS: usize = MARKER_BITS + PAYLOAD_BITS;

/// Bits carried by one whitespace substitution
pub const WHITESPACE_GROUP_BITS: usize = 3;

/// Number of distinct whitespace code points (one per 3-bit group)
pub const WHITESPACE_VARIANTS: usize = 1 << WHITESPACE_GROUP_BITS;

/// Bits carried by one letter or punctuation substitution
pub const LETTER_BITS: usize = 1;

/// Suffix appended to the file stem when no destination path is given
pub const WATERMARKED_SUFFIX: &str = "-watermarked";
