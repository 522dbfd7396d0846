use crate::OutputFormat;
use anyhow::{Context, Result};
use colored::*;
use glyphmark_core::{
    capacity::{capacity_reader, Capacity},
    constants::FRAME_BITS,
};
use tracing::info;

pub fn run(input: &str) -> Result<Capacity> {
    let reader = super::open_input(input)?;
    capacity_reader(reader).with_context(|| format!("Failed to inspect {}", input))
}

pub fn execute(input: &str, format: OutputFormat) -> Result<()> {
    info!("Inspecting capacity of: {}", input);

    let cap = run(input)?;

    if format == OutputFormat::Json {
        let json = serde_json::to_string_pretty(&cap)
            .with_context(|| "Failed to serialize capacity report")?;
        println!("{}", json);
        return Ok(());
    }

    println!("\n=== Capacity ===");
    println!("Code points:       {}", cap.code_points);
    println!("Letter slots:      {}", cap.letter_slots);
    println!("Whitespace slots:  {}", cap.whitespace_slots);
    println!("Capacity:          {} bits", cap.bits());
    println!("Full frames:       {}", cap.frames());
    println!();

    if cap.can_hold_frame() {
        println!("{} Document can carry a watermark", "✓".green());
    } else {
        println!(
            "{} Document too short: {} of {} bits",
            "✗".red(),
            cap.bits(),
            FRAME_BITS
        );
    }

    Ok(())
}
