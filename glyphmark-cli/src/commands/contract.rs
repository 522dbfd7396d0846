use anyhow::{bail, Context, Result};
use glyphmark_core::derive::{derive_contract_id, ContractSource, DerivationParams};
use std::fs;
use tracing::info;

/// Where the contract id's salt comes from on the command line
#[derive(Debug, Clone)]
pub enum WatermarkInput {
    /// Hex-encoded watermark hash
    Hex(String),
    /// Creator identifier and path to the license text
    CreatorAndLicense {
        creator_id: String,
        license_path: String,
    },
}

/// Derive the contract id of the blob at `blob_path`
pub fn run(
    blob_path: &str,
    watermark: &WatermarkInput,
    params: &DerivationParams,
) -> Result<Vec<u8>> {
    let blob =
        fs::read(blob_path).with_context(|| format!("Failed to read blob file: {}", blob_path))?;

    let id = match watermark {
        WatermarkInput::Hex(watermark_hex) => {
            let watermark = hex::decode(watermark_hex)
                .with_context(|| format!("Watermark is not valid hex: {}", watermark_hex))?;
            derive_contract_id(
                &ContractSource::Watermark {
                    blob: &blob,
                    watermark: &watermark,
                },
                params,
            )
        }
        WatermarkInput::CreatorAndLicense {
            creator_id,
            license_path,
        } => {
            let license = fs::read(license_path)
                .with_context(|| format!("Failed to read license file: {}", license_path))?;
            derive_contract_id(
                &ContractSource::CreatorIdAndLicense {
                    blob: &blob,
                    creator_id: creator_id.as_bytes(),
                    license: &license,
                },
                params,
            )
        }
    }
    .with_context(|| "Failed to derive contract id")?;

    Ok(id)
}

pub fn execute(
    blob_path: &str,
    watermark_hex: Option<&str>,
    creator_id: Option<&str>,
    license_path: Option<&str>,
    params: DerivationParams,
) -> Result<()> {
    let watermark = match (watermark_hex, creator_id, license_path) {
        (Some(hex), None, None) => WatermarkInput::Hex(hex.to_string()),
        (None, Some(creator_id), Some(license_path)) => WatermarkInput::CreatorAndLicense {
            creator_id: creator_id.to_string(),
            license_path: license_path.to_string(),
        },
        _ => bail!("Pass either --watermark, or both --creator-id and --license"),
    };

    info!("Deriving contract id for {}", blob_path);

    let id = run(blob_path, &watermark, &params)?;
    println!("{}", hex::encode(id));

    Ok(())
}
