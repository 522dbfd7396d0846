//! Error types for Glyphmark operations

use alloc::string::String;

/// Errors that can occur while embedding or extracting a watermark
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatermarkError {
    /// The circular search found no run of marker bits
    #[cfg_attr(feature = "std", error("No watermark found"))]
    MarkerNotFound,

    /// The bit buffer does not have the length of a full frame
    #[cfg_attr(
        feature = "std",
        error("Watermark length was {actual} but should have been {expected}")
    )]
    FrameLength {
        /// The number of bits a complete frame has.
        expected: usize,
        /// The number of bits actually collected.
        actual: usize,
    },

    /// Payload value or text representation is not a valid 40-bit watermark
    #[cfg_attr(feature = "std", error("Invalid payload: {0}"))]
    InvalidPayload(String),

    /// Payload bits would merge with the marker under some rotation
    #[cfg_attr(
        feature = "std",
        error("Payload {0} starts or ends with a one-bit and cannot be located unambiguously")
    )]
    AmbiguousMarker(String),

    /// Argon2 rejected the derivation inputs or parameters
    #[cfg_attr(feature = "std", error("Key derivation failed: {0}"))]
    KeyDerivation(String),

    /// IO error during read/write
    #[cfg(feature = "std")]
    #[cfg_attr(feature = "std", error("IO error: {message}"))]
    Io {
        /// Kind reported by the underlying reader or writer.
        kind: std::io::ErrorKind,
        /// Rendered message of the original error.
        message: String,
    },
}

#[cfg(feature = "std")]
impl From<std::io::Error> for WatermarkError {
    fn from(err: std::io::Error) -> Self {
        WatermarkError::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for WatermarkError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            WatermarkError::MarkerNotFound => f.write_str("No watermark found"),
            WatermarkError::FrameLength { expected, actual } => write!(
                f,
                "Watermark length was {} but should have been {}",
                actual, expected
            ),
            WatermarkError::InvalidPayload(msg) => write!(f, "Invalid payload: {}", msg),
            WatermarkError::AmbiguousMarker(hex) => write!(
                f,
                "Payload {} starts or ends with a one-bit and cannot be located unambiguously",
                hex
            ),
            WatermarkError::KeyDerivation(msg) => write!(f, "Key derivation failed: {}", msg),
        }
    }
}
