//! Fixed test vectors for the Glyphmark frame format
//!
//! Each vector pins one observable behavior: bit layout, marker placement
//! inside the extracted ring, or the exact code points produced by the
//! encoder for a known payload.

use glyphmark_core::{
    constants::{FRAME_BITS, MARKER_BITS},
    decoder::scan_chars,
    encoder::embed_str,
    frame::build_frame,
    locator::{locate_payload, rotate_to_payload},
    symbols::WHITESPACE,
    types::{bits_from_str, bits_to_string, hex_to_bin},
    Payload, WatermarkError,
};

fn repeat(bit: char, n: usize) -> String {
    std::iter::repeat(bit).take(n).collect()
}

#[test]
fn vector_hex_to_bin() {
    assert_eq!(hex_to_bin("ff00ff").unwrap(), "111111110000000011111111");
    assert_eq!(
        hex_to_bin("00deadbeef").unwrap(),
        "0000000011011110101011011011111011101111"
    );
}

#[test]
fn vector_frame_layout() {
    let frame = build_frame(Payload::from_hex("00deadbeef").unwrap());
    let expected = format!(
        "{}{}",
        repeat('1', MARKER_BITS),
        "0000000011011110101011011011111011101111"
    );
    assert_eq!(bits_to_string(frame.as_bits()), expected);
}

#[test]
fn vector_marker_at_start() {
    let ring = bits_from_str(&format!("{}{}", repeat('1', 41), repeat('0', 40))).unwrap();
    assert_eq!(bits_to_string(&rotate_to_payload(&ring).unwrap()), repeat('0', 40));
}

#[test]
fn vector_marker_centered() {
    let ring = bits_from_str(&format!(
        "{}{}{}",
        repeat('0', 20),
        repeat('1', 41),
        repeat('0', 20)
    ))
    .unwrap();
    assert_eq!(bits_to_string(&rotate_to_payload(&ring).unwrap()), repeat('0', 40));
}

#[test]
fn vector_marker_wrapped() {
    let ring = bits_from_str(&format!(
        "{}{}{}",
        repeat('1', 20),
        repeat('0', 40),
        repeat('1', 21)
    ))
    .unwrap();
    assert_eq!(bits_to_string(&rotate_to_payload(&ring).unwrap()), repeat('0', 40));
}

#[test]
fn vector_marker_at_end() {
    let ring = bits_from_str(&format!("{}{}", repeat('0', 40), repeat('1', 41))).unwrap();
    assert_eq!(bits_to_string(&rotate_to_payload(&ring).unwrap()), repeat('0', 40));
}

#[test]
fn vector_marker_too_short() {
    // 80 bits total: rejected on length before any search
    let ring = bits_from_str(&format!("{}{}", repeat('1', 40), repeat('0', 40))).unwrap();
    assert_eq!(
        locate_payload(&ring),
        Err(WatermarkError::FrameLength {
            expected: FRAME_BITS,
            actual: 80
        })
    );

    // 81 bits with only 40 ones: full search fails
    let ring = bits_from_str(&format!("{}{}", repeat('1', 40), repeat('0', 41))).unwrap();
    assert_eq!(locate_payload(&ring), Err(WatermarkError::MarkerNotFound));
}

#[test]
fn vector_payload_between_rotated_markers() {
    // Payload 0x5555555554 placed in the middle of a split marker
    let payload = Payload::from_hex("5555555554").unwrap();
    let ring = bits_from_str(&format!(
        "{}{}{}",
        repeat('1', 10),
        hex_to_bin(&payload.to_hex()).unwrap(),
        repeat('1', 31)
    ))
    .unwrap();
    assert_eq!(locate_payload(&ring).unwrap(), payload);
}

#[test]
fn vector_known_embedding() {
    // 41 marker bits force the alternate form; the payload 0x8000000000
    // then gives one more alternate followed by base forms.
    let payload = Payload::from_hex("8000000000").unwrap();
    let text = repeat('x', 44);
    let out: Vec<char> = embed_str(&text, payload).chars().collect();

    assert!(out[..42].iter().all(|&c| c == '\u{2179}'));
    assert_eq!(out[42], 'x');
    assert_eq!(out[43], 'x');
}

#[test]
fn vector_known_whitespace_embedding() {
    // 27 spaces consume exactly one frame
    let payload = Payload::from_hex("0000000007").unwrap();
    let text = repeat(' ', 27);
    let out: Vec<char> = embed_str(&text, payload).chars().collect();

    // Group 13 reads bits 39, 40 (marker) and 41 (payload msb = 0)
    assert_eq!(out[13], WHITESPACE[0b110]);
    // Last group reads the three least significant payload bits
    assert_eq!(out[26], WHITESPACE[0b111]);
    assert_eq!(out[25], WHITESPACE[0b000]);

    let scanned = scan_chars(out.iter().copied());
    assert_eq!(scanned.len(), FRAME_BITS);
    assert_eq!(scanned.resolve().unwrap(), payload);
}
