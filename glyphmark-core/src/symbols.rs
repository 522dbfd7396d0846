//! Confusable symbol table
//!
//! Every code point a document can contain falls into exactly one class:
//!
//! - a **base** form of a confusable pair (carries bit `0`)
//! - the **alternate** form of the same pair (carries bit `1`)
//! - one of eight **whitespace** variants (carries a 3-bit group)
//! - **opaque**, which is never touched
//!
//! Each alternate is Unicode-compatibility-equivalent to its base, so NFKD of
//! a watermarked document equals NFKD of the original.

use crate::constants::{WHITESPACE_GROUP_BITS, WHITESPACE_VARIANTS};

/// Letter and punctuation pairs as `(base, alternate)`
///
/// Lowercase `j` (U+0458) and the hyphen (U+2010) are left out: neither
/// alternate normalizes back to its base.
pub const CONFUSABLE_PAIRS: [(char, char); 14] = [
    ('\u{003b}', '\u{037e}'), // ; greek question mark
    ('\u{0043}', '\u{216d}'), // C roman numeral one hundred
    ('\u{0044}', '\u{216e}'), // D roman numeral five hundred
    ('\u{004b}', '\u{212a}'), // K kelvin sign
    ('\u{004c}', '\u{216c}'), // L roman numeral fifty
    ('\u{004d}', '\u{216f}'), // M roman numeral one thousand
    ('\u{0056}', '\u{2164}'), // V roman numeral five
    ('\u{0058}', '\u{2169}'), // X roman numeral ten
    ('\u{0063}', '\u{217d}'), // c small roman numeral one hundred
    ('\u{0064}', '\u{217e}'), // d small roman numeral five hundred
    ('\u{0069}', '\u{2170}'), // i small roman numeral one
    ('\u{006c}', '\u{217c}'), // l small roman numeral fifty
    ('\u{0076}', '\u{2174}'), // v small roman numeral five
    ('\u{0078}', '\u{2179}'), // x small roman numeral ten
];

/// Whitespace variants indexed by the 3-bit group they encode
pub const WHITESPACE: [char; WHITESPACE_VARIANTS] = [
    '\u{0020}', // 000 space
    '\u{2000}', // 001 en quad
    '\u{2004}', // 010 three-per-em space
    '\u{2005}', // 011 four-per-em space
    '\u{2008}', // 100 punctuation space
    '\u{2009}', // 101 thin space
    '\u{202f}', // 110 narrow no-break space
    '\u{205f}', // 111 medium mathematical space
];

/// Classification of a single code point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// Base form of the pair at this index in [`CONFUSABLE_PAIRS`]
    Base(usize),
    /// Alternate form of the pair at this index in [`CONFUSABLE_PAIRS`]
    Alternate(usize),
    /// Whitespace variant carrying this 3-bit group
    Whitespace(u8),
    /// Anything else
    Opaque,
}

impl Glyph {
    /// Number of frame bits this glyph consumes when embedding
    pub const fn bit_width(&self) -> usize {
        match self {
            Glyph::Base(_) | Glyph::Alternate(_) => crate::constants::LETTER_BITS,
            Glyph::Whitespace(_) => WHITESPACE_GROUP_BITS,
            Glyph::Opaque => 0,
        }
    }

    /// Whether this glyph is part of the embedding channel
    pub const fn is_confusable(&self) -> bool {
        !matches!(self, Glyph::Opaque)
    }
}

/// Classify a code point
pub fn classify(c: char) -> Glyph {
    if let Some(code) = WHITESPACE.iter().position(|&w| w == c) {
        return Glyph::Whitespace(code as u8);
    }
    for (idx, &(base, alternate)) in CONFUSABLE_PAIRS.iter().enumerate() {
        if c == base {
            return Glyph::Base(idx);
        }
        if c == alternate {
            return Glyph::Alternate(idx);
        }
    }
    Glyph::Opaque
}

/// Letter form encoding `bit` for the pair at `idx`
pub fn letter_for(idx: usize, bit: bool) -> char {
    let (base, alternate) = CONFUSABLE_PAIRS[idx];
    if bit {
        alternate
    } else {
        base
    }
}

/// Whitespace variant encoding a 3-bit group
pub fn whitespace_for(group: u8) -> char {
    WHITESPACE[usize::from(group) & (WHITESPACE_VARIANTS - 1)]
}

/// Push the bits carried by `glyph`, most significant first
pub fn glyph_bits(glyph: Glyph, out: &mut alloc::vec::Vec<bool>) {
    match glyph {
        Glyph::Base(_) => out.push(false),
        Glyph::Alternate(_) => out.push(true),
        Glyph::Whitespace(group) => {
            for shift in (0..WHITESPACE_GROUP_BITS).rev() {
                out.push((group >> shift) & 1 == 1);
            }
        }
        Glyph::Opaque => {}
    }
}
