use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};

pub mod contract;
pub mod derive;
pub mod embed;
pub mod extract;
pub mod inspect;

/// Open a file for buffered reading, or stdin for `-`
pub(crate) fn open_input(input: &str) -> Result<Box<dyn BufRead>> {
    if input == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file =
        File::open(input).with_context(|| format!("Failed to read input file: {}", input))?;
    Ok(Box::new(BufReader::new(file)))
}
