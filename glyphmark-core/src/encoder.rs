//! Watermark embedding
//!
//! The encoder is a pull-based transform over code points. Each confusable
//! code point consumes the next bit (letters) or the next three bits
//! (whitespace) of the circular frame; everything else passes through and
//! leaves the pointer where it is. Output length in code points always
//! equals input length.

use crate::constants::FRAME_BITS;
#[cfg(feature = "std")]
use crate::constants::WATERMARKED_SUFFIX;
use crate::error::WatermarkError;
use crate::frame::BitFrame;
use crate::symbols::{classify, letter_for, whitespace_for, Glyph};
use crate::types::Payload;
use alloc::string::String;

#[cfg(feature = "std")]
use std::io::{BufRead, BufReader, BufWriter, Write};
#[cfg(feature = "std")]
use std::path::{Path, PathBuf};

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// Counters collected while embedding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmbedStats {
    /// Code points read (and written)
    pub code_points: usize,

    /// Letter or punctuation positions used
    pub letter_substitutions: usize,

    /// Whitespace positions used
    pub whitespace_substitutions: usize,

    /// Frame bits written, counting repetitions
    pub bits_written: usize,
}

impl EmbedStats {
    /// Number of complete frames the document carries
    pub fn frames_embedded(&self) -> usize {
        self.bits_written / FRAME_BITS
    }

    /// Code points that were actually changed or re-encoded
    pub fn substitutions(&self) -> usize {
        self.letter_substitutions + self.whitespace_substitutions
    }
}

/// Options controlling embedding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmbedOptions {
    /// Refuse payloads whose marker could be misplaced in a truncated document
    pub strict: bool,
}

impl EmbedOptions {
    /// Options with strict marker checking enabled
    pub const fn strict() -> Self {
        Self { strict: true }
    }

    /// Validate a payload against these options
    pub fn check(&self, payload: Payload) -> Result<(), WatermarkError> {
        if payload.has_unambiguous_marker() {
            return Ok(());
        }
        if self.strict {
            return Err(WatermarkError::AmbiguousMarker(payload.to_hex()));
        }

        #[cfg(feature = "logging")]
        warn!(
            "Payload {} touches the marker; extraction from truncated copies may misplace it",
            payload
        );

        Ok(())
    }
}

/// Iterator adapter that embeds a frame into a stream of code points
///
/// The pointer survives across calls to [`Iterator::next`], so the adapter
/// can be fed a whole document or, through [`Embedder::feed`], one chunk at
/// a time.
#[derive(Debug, Clone)]
pub struct Embedder<I> {
    source: I,
    frame: BitFrame,
    pointer: usize,
    stats: EmbedStats,
}

impl<I> Embedder<I>
where
    I: Iterator<Item = char>,
{
    /// Create a new embedder over `source` with the pointer at zero
    pub fn new(source: I, payload: Payload) -> Self {
        Self {
            source,
            frame: BitFrame::build(payload),
            pointer: 0,
            stats: EmbedStats::default(),
        }
    }

    /// Current position in the frame
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Counters so far
    pub fn stats(&self) -> EmbedStats {
        self.stats
    }

    /// Swap in the next chunk of input, keeping pointer and counters
    pub fn feed<J>(self, source: J) -> Embedder<J>
    where
        J: Iterator<Item = char>,
    {
        Embedder {
            source,
            frame: self.frame,
            pointer: self.pointer,
            stats: self.stats,
        }
    }

    fn substitute(&mut self, c: char) -> char {
        let glyph = classify(c);
        let out = match glyph {
            Glyph::Whitespace(_) => {
                self.stats.whitespace_substitutions += 1;
                whitespace_for(self.frame.group(self.pointer))
            }
            Glyph::Base(idx) | Glyph::Alternate(idx) => {
                self.stats.letter_substitutions += 1;
                letter_for(idx, self.frame.bit(self.pointer))
            }
            Glyph::Opaque => c,
        };

        let width = glyph.bit_width();
        self.pointer = (self.pointer + width) % FRAME_BITS;
        self.stats.bits_written += width;
        out
    }
}

impl<I> Iterator for Embedder<I>
where
    I: Iterator<Item = char>,
{
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let c = self.source.next()?;
        self.stats.code_points += 1;
        Some(self.substitute(c))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

/// Embed a payload into a string
pub fn embed_str(text: &str, payload: Payload) -> String {
    Embedder::new(text.chars(), payload).collect()
}

/// Embed a payload into a string, returning the counters as well
pub fn embed_str_with_stats(text: &str, payload: Payload) -> (String, EmbedStats) {
    let mut embedder = Embedder::new(text.chars(), payload);
    let out: String = embedder.by_ref().collect();
    (out, embedder.stats())
}

/// Stream a UTF-8 document from `reader` to `writer`, embedding the payload
///
/// Input is pulled one line at a time; the frame pointer carries over from
/// line to line. Invalid UTF-8 surfaces as an `Io` error of kind
/// `InvalidData`.
#[cfg(feature = "std")]
pub fn embed_reader<R, W>(
    reader: R,
    writer: W,
    payload: Payload,
    options: EmbedOptions,
) -> Result<EmbedStats, WatermarkError>
where
    R: BufRead,
    W: Write,
{
    options.check(payload)?;
    stream_embed(reader, writer, payload)
}

#[cfg(feature = "std")]
fn stream_embed<R, W>(
    mut reader: R,
    mut writer: W,
    payload: Payload,
) -> Result<EmbedStats, WatermarkError>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    let mut out = String::new();
    let mut embedder = Embedder::new("".chars(), payload);

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }

        let mut chunk = embedder.feed(line.chars());
        out.clear();
        out.extend(chunk.by_ref());
        writer.write_all(out.as_bytes())?;
        embedder = chunk.feed("".chars());
    }
    writer.flush()?;

    let stats = embedder.stats();

    #[cfg(feature = "logging")]
    {
        debug!(
            "Embedded {} bits into {} code points ({} letters, {} whitespace)",
            stats.bits_written,
            stats.code_points,
            stats.letter_substitutions,
            stats.whitespace_substitutions
        );
        if stats.frames_embedded() == 0 {
            warn!(
                "Document carries only {} of {} frame bits; the watermark cannot be extracted",
                stats.bits_written, FRAME_BITS
            );
        }
    }

    Ok(stats)
}

/// Default destination for a watermarked copy of `source`
///
/// `notes.txt` becomes `notes-watermarked.txt` in the same directory; a
/// source without an extension just gets the suffix.
#[cfg(feature = "std")]
pub fn default_destination(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match source.extension() {
        Some(ext) => format!("{}{}.{}", stem, WATERMARKED_SUFFIX, ext.to_string_lossy()),
        None => format!("{}{}", stem, WATERMARKED_SUFFIX),
    };
    source.with_file_name(name)
}

/// Embed a payload into the file at `source`
///
/// Writes to `dest`, or to [`default_destination`] when `dest` is `None`,
/// creating or truncating it. Returns the path written. A `dest` that
/// resolves to `source` is refused with an `InvalidInput` error and the
/// source is left untouched.
#[cfg(feature = "std")]
pub fn embed_file(
    source: &Path,
    payload: Payload,
    dest: Option<&Path>,
) -> Result<PathBuf, WatermarkError> {
    embed_file_with_options(source, payload, dest, EmbedOptions::default()).map(|(path, _)| path)
}

/// Embed a payload into a file with explicit options, returning the counters
#[cfg(feature = "std")]
pub fn embed_file_with_options(
    source: &Path,
    payload: Payload,
    dest: Option<&Path>,
    options: EmbedOptions,
) -> Result<(PathBuf, EmbedStats), WatermarkError> {
    let dest = dest
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_destination(source));

    #[cfg(feature = "logging")]
    debug!("Embedding {} from {} into {}", payload, source.display(), dest.display());

    options.check(payload)?;

    let reader = BufReader::new(std::fs::File::open(source)?);
    if let Ok(resolved) = dest.canonicalize() {
        if resolved == source.canonicalize()? {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("destination {} is the source document", dest.display()),
            )
            .into());
        }
    }
    let writer = BufWriter::new(std::fs::File::create(&dest)?);
    let stats = stream_embed(reader, writer, payload)?;

    Ok((dest, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::WHITESPACE;

    #[test]
    fn test_opaque_text_unchanged() {
        let payload = Payload::from_hex("0123456789").unwrap();
        let text = "aaa bbb\nzzz";
        let (out, stats) = embed_str_with_stats("aaabbb\nzzz", payload);
        assert_eq!(out, "aaabbb\nzzz");
        assert_eq!(stats.bits_written, 0);

        // a space is confusable, so this one is re-encoded
        let out = embed_str(text, payload);
        assert_eq!(out.chars().count(), text.chars().count());
    }

    #[test]
    fn test_marker_bits_select_alternates() {
        // The first 41 letter slots all fall on marker bits
        let payload = Payload::new(0).unwrap();
        let out = embed_str("cccc", payload);
        assert_eq!(out, "\u{217d}\u{217d}\u{217d}\u{217d}");
    }

    #[test]
    fn test_alternate_input_reencoded_as_base() {
        let payload = Payload::new(0).unwrap();
        let text: String = core::iter::repeat('\u{2170}').take(42).collect();
        let out: Vec<char> = embed_str(&text, payload).chars().collect();
        assert!(out[..41].iter().all(|&c| c == '\u{2170}'));
        assert_eq!(out[41], 'i');
    }

    #[test]
    fn test_whitespace_reads_three_bits() {
        let payload = Payload::new(0).unwrap();
        let text: String = core::iter::repeat(' ').take(15).collect();
        let out: Vec<char> = embed_str(&text, payload).chars().collect();
        // 13 groups of 111 cover positions 0..=38, then 39,40,41 -> 110
        assert!(out[..13].iter().all(|&c| c == WHITESPACE[0b111]));
        assert_eq!(out[13], WHITESPACE[0b110]);
        assert_eq!(out[14], WHITESPACE[0b000]);
    }

    #[test]
    fn test_pointer_wraps() {
        let payload = Payload::new(0).unwrap();
        let text: String = core::iter::repeat('x').take(83).collect();
        let mut embedder = Embedder::new(text.chars(), payload);
        let out: String = embedder.by_ref().collect();
        assert_eq!(embedder.pointer(), 2);
        assert_eq!(embedder.stats().frames_embedded(), 1);
        let chars: Vec<char> = out.chars().collect();
        assert_eq!(chars[81], '\u{2179}');
        assert_eq!(chars[80], 'x');
    }

    #[test]
    fn test_feed_keeps_pointer() {
        let payload = Payload::from_hex("00000000ff").unwrap();
        let whole = embed_str("lLlL lLlL\nxXxX vVvV", payload);

        let mut first = Embedder::new("lLlL lLlL\n".chars(), payload);
        let mut out: String = first.by_ref().collect();
        let mut second = first.feed("xXxX vVvV".chars());
        out.extend(second.by_ref());

        assert_eq!(out, whole);
        assert_eq!(second.stats().code_points, 19);
    }

    #[test]
    fn test_strict_rejects_ambiguous_payload() {
        let ambiguous = Payload::from_hex("8000000000").unwrap();
        assert!(matches!(
            EmbedOptions::strict().check(ambiguous),
            Err(WatermarkError::AmbiguousMarker(_))
        ));
        assert!(EmbedOptions::default().check(ambiguous).is_ok());
    }

    #[test]
    fn test_default_destination() {
        assert_eq!(
            default_destination(Path::new("/tmp/story.txt")),
            PathBuf::from("/tmp/story-watermarked.txt")
        );
        assert_eq!(
            default_destination(Path::new("README")),
            PathBuf::from("README-watermarked")
        );
    }

    #[test]
    fn test_embed_reader_matches_embed_str() {
        let payload = Payload::from_hex("1234567890").unwrap();
        let text = "Lorem ipsum dolor sit amet,\nconsetetur sadipscing elitr;\nVIXI DeCiMVs\n";
        let mut out = Vec::new();
        let stats =
            embed_reader(text.as_bytes(), &mut out, payload, EmbedOptions::default()).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), embed_str(text, payload));
        assert_eq!(stats.code_points, text.chars().count());
    }

    #[test]
    fn test_embed_reader_rejects_invalid_utf8() {
        let payload = Payload::new(0).unwrap();
        let bytes: &[u8] = &[b'c', 0xff, 0xfe, b'\n'];
        let err = embed_reader(bytes, Vec::<u8>::new(), payload, EmbedOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            WatermarkError::Io {
                kind: std::io::ErrorKind::InvalidData,
                ..
            }
        ));
    }
}
