use anyhow::{bail, Context, Result};
use glyphmark_core::{
    derive::{derive_payload, DerivationParams, PayloadSource},
    Payload,
};
use std::fs;
use tracing::info;

/// Where the derivation salt comes from on the command line
#[derive(Debug, Clone)]
pub enum SaltInput {
    /// Hex-encoded salt
    Hex(String),
    /// Creator identifier and path to the license text
    CreatorAndLicense {
        creator_id: String,
        license_path: String,
    },
}

pub fn run(blob_path: &str, salt: &SaltInput, params: &DerivationParams) -> Result<Payload> {
    let blob =
        fs::read(blob_path).with_context(|| format!("Failed to read blob file: {}", blob_path))?;

    let payload = match salt {
        SaltInput::Hex(salt_hex) => {
            let salt = hex::decode(salt_hex)
                .with_context(|| format!("Salt is not valid hex: {}", salt_hex))?;
            derive_payload(
                &PayloadSource::SaltGiven {
                    blob: &blob,
                    salt: &salt,
                },
                params,
            )
        }
        SaltInput::CreatorAndLicense {
            creator_id,
            license_path,
        } => {
            let license = fs::read(license_path)
                .with_context(|| format!("Failed to read license file: {}", license_path))?;
            derive_payload(
                &PayloadSource::CreatorIdAndLicense {
                    blob: &blob,
                    creator_id: creator_id.as_bytes(),
                    license: &license,
                },
                params,
            )
        }
    }
    .with_context(|| "Failed to derive watermark")?;

    Ok(payload)
}

pub fn execute(
    blob_path: &str,
    salt_hex: Option<&str>,
    creator_id: Option<&str>,
    license_path: Option<&str>,
    params: DerivationParams,
) -> Result<()> {
    let salt = match (salt_hex, creator_id, license_path) {
        (Some(hex), None, None) => SaltInput::Hex(hex.to_string()),
        (None, Some(creator_id), Some(license_path)) => SaltInput::CreatorAndLicense {
            creator_id: creator_id.to_string(),
            license_path: license_path.to_string(),
        },
        _ => bail!("Pass either --salt, or both --creator-id and --license"),
    };

    info!(
        "Deriving watermark from {} (memory {} KiB, {} passes, {} lanes)",
        blob_path, params.memory_kib, params.iterations, params.parallelism
    );

    let payload = run(blob_path, &salt, &params)?;
    println!("{}", payload);

    Ok(())
}
