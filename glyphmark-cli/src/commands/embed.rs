use anyhow::{Context, Result};
use glyphmark_core::{
    encoder::{embed_file_with_options, EmbedOptions, EmbedStats},
    Payload,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// Embed `payload_hex` into `input`, returning the destination and counters
pub fn run(
    input: &str,
    payload_hex: &str,
    output: Option<&str>,
    strict: bool,
) -> Result<(PathBuf, EmbedStats)> {
    let payload: Payload = payload_hex
        .parse()
        .with_context(|| format!("Invalid watermark: {}", payload_hex))?;

    let options = EmbedOptions { strict };
    let (dest, stats) =
        embed_file_with_options(Path::new(input), payload, output.map(Path::new), options)
            .with_context(|| format!("Failed to watermark {}", input))?;

    Ok((dest, stats))
}

pub fn execute(input: &str, payload_hex: &str, output: Option<&str>, strict: bool) -> Result<()> {
    info!("Embedding watermark {} into {}", payload_hex, input);

    let (dest, stats) = run(input, payload_hex, output, strict)?;

    println!("\n=== Embed Results ===");
    println!("Code points:       {}", stats.code_points);
    println!("Letter slots:      {}", stats.letter_substitutions);
    println!("Whitespace slots:  {}", stats.whitespace_substitutions);
    println!("Bits written:      {}", stats.bits_written);
    println!("Frames embedded:   {}", stats.frames_embedded());
    println!();

    info!("Watermarked document written to: {}", dest.display());

    Ok(())
}
