//! # Glyphmark Core
//!
//! Invisible text watermarking by substitution of visually confusable Unicode characters.
//!
//! A 40-bit payload is prefixed with a 41-bit marker of ones and written, bit by bit and
//! repeatedly, into the letters, punctuation and spaces of a document. Extraction needs no
//! side channel: the marker tells the decoder where the frame starts.
//!
//! ## Modules
//!
//! - `constants`: Frame geometry
//! - `types`: Core types (Payload) and bit/hex helpers
//! - `symbols`: Confusable character and whitespace tables
//! - `frame`: Circular bit frame construction
//! - `encoder`: Streaming embedding
//! - `decoder`: Streaming extraction
//! - `locator`: Marker search and payload rotation
//! - `capacity`: Embedding capacity of a document
//! - `derive`: Argon2id payload derivation

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod capacity;
pub mod constants;
pub mod decoder;
#[cfg(feature = "derive")]
pub mod derive;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod locator;
pub mod symbols;
pub mod types;

// Re-export commonly used types
pub use encoder::{EmbedOptions, EmbedStats, Embedder};
pub use error::WatermarkError;
pub use types::Payload;

#[cfg(feature = "std")]
pub use decoder::extract_file;
#[cfg(feature = "std")]
pub use encoder::embed_file;

/// Result type alias for Glyphmark operations
pub type Result<T> = core::result::Result<T, WatermarkError>;
