//! Fuzzing entry points for glyphmark-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_extract

use glyphmark_core::Payload;

pub fn fuzz_extract(data: &[u8]) {
    use glyphmark_core::decoder::extract_str;

    // Arbitrary text must never panic the decoder
    let text = String::from_utf8_lossy(data);
    let _ = extract_str(&text);
}

pub fn fuzz_locate(data: &[u8]) {
    use glyphmark_core::locator::locate_payload;

    // Any bit ring, of any length, is either located or rejected
    let bits: Vec<bool> = data.iter().map(|b| b & 1 == 1).collect();
    let _ = locate_payload(&bits);
}

pub fn fuzz_round_trip(data: &[u8]) {
    use glyphmark_core::{capacity::capacity, decoder::extract_str, encoder::embed_str};

    if data.len() < 5 {
        return;
    }
    let payload = match Payload::from_slice(&data[..5]) {
        Ok(payload) => payload,
        Err(_) => return,
    };
    let text = String::from_utf8_lossy(&data[5..]);
    let marked = embed_str(&text, payload);

    assert_eq!(marked.chars().count(), text.chars().count());
    if capacity(&text).can_hold_frame() {
        assert_eq!(extract_str(&marked).ok(), Some(payload));
    }
}
