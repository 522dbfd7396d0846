//! Example demonstrating embedding and extraction of a text watermark

use glyphmark_core::{
    capacity::capacity,
    derive::{derive_payload, DerivationParams, PayloadSource},
    encoder::embed_str_with_stats,
    decoder::extract_str,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Glyphmark Basic Embedding Example\n");

    let text = "Lorem ipsum dolor sit amet, consetetur sadipscing elitr, sed diam nonumy \
                eirmod tempor invidunt ut labore et dolore magna aliquyam erat, sed diam \
                voluptua. At vero eos et accusam et justo duo dolores et ea rebum.";

    // Derive a payload from creator and license
    let payload = derive_payload(
        &PayloadSource::CreatorIdAndLicense {
            blob: text.as_bytes(),
            creator_id: b"creator-0001",
            license: b"CC-BY-4.0",
        },
        &DerivationParams::light(),
    )?;
    println!("Payload:        {}", payload);

    let cap = capacity(text);
    println!("Capacity:       {} bits ({} full frames)", cap.bits(), cap.frames());

    let (marked, stats) = embed_str_with_stats(text, payload);
    println!("Substitutions:  {}", stats.substitutions());
    println!("Original bytes: {}", text.len());
    println!("Marked bytes:   {}", marked.len());
    println!("\n{}\n", marked);

    let recovered = extract_str(&marked)?;
    println!("Recovered:      {}", recovered);
    assert_eq!(recovered, payload);

    Ok(())
}
