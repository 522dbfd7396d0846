use crate::OutputFormat;
use anyhow::{Context, Result};
use colored::*;
use glyphmark_core::decoder::extract_reader;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractReport {
    pub source: String,
    pub watermark: String,
}

pub fn run(input: &str) -> Result<ExtractReport> {
    let reader = super::open_input(input)?;
    let payload = extract_reader(reader)
        .with_context(|| format!("Failed to extract watermark from {}", input))?;

    Ok(ExtractReport {
        source: input.to_string(),
        watermark: payload.to_hex(),
    })
}

pub fn execute(input: &str, format: OutputFormat) -> Result<()> {
    info!("Extracting watermark from: {}", input);

    let report = match run(input) {
        Ok(report) => report,
        Err(e) => {
            if format == OutputFormat::Text {
                println!("{} No watermark recovered", "✗".red());
            }
            return Err(e);
        }
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .with_context(|| "Failed to serialize extraction report")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("{} Watermark: {}", "✓".green(), report.watermark);
        }
    }

    Ok(())
}
