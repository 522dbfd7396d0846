//! Payload derivation with Argon2id
//!
//! A watermark is a 5-byte Argon2id hash of the content blob. The salt is
//! either given directly or itself derived from a creator identifier and a
//! license text:
//!
//! ```text
//! salt    = argon2id(password = license, salt = creator_id, len = 128)
//! payload = argon2id(password = blob,    salt = salt,       len = 5)
//! ```
//!
//! A contract id binds a blob to a creator's watermark hash instead:
//!
//! ```text
//! watermark   = argon2id(password = license, salt = creator_id, len = 64)
//! contract_id = argon2id(password = blob,    salt = watermark,  len = 128)
//! ```

use crate::constants::PAYLOAD_BYTES;
use crate::error::WatermarkError;
use crate::types::Payload;
use alloc::format;
use alloc::vec;
use alloc::vec::Vec;
use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};

#[cfg(feature = "logging")]
use tracing::debug;

/// Length of the intermediate creator/license salt in bytes
pub const CREATOR_SALT_LEN: usize = 128;

/// Length of the creator/license watermark hash in bytes
pub const CREATOR_HASH_LEN: usize = 64;

/// Length of a contract id in bytes
pub const CONTRACT_ID_LEN: usize = 128;

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivationParams {
    /// Memory cost in KiB
    pub memory_kib: u32,

    /// Number of passes
    pub iterations: u32,

    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl DerivationParams {
    /// Create a new parameter set
    pub const fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        Self {
            memory_kib,
            iterations,
            parallelism,
        }
    }

    /// Cheap parameters for tests and demos; not for production watermarks
    pub const fn light() -> Self {
        Self::new(256, 1, 1)
    }

    fn hasher(&self, output_len: usize) -> Result<Argon2<'static>, WatermarkError> {
        let params = Params::new(
            self.memory_kib,
            self.iterations,
            self.parallelism,
            Some(output_len),
        )
        .map_err(|e| WatermarkError::KeyDerivation(format!("{}", e)))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for DerivationParams {
    /// 64 MiB, 3 passes, 4 lanes
    fn default() -> Self {
        Self::new(65536, 3, 4)
    }
}

/// Where the payload salt comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadSource<'a> {
    /// Hash `blob` with an explicit salt
    SaltGiven {
        /// Content being watermarked
        blob: &'a [u8],
        /// Salt, at least 8 bytes
        salt: &'a [u8],
    },
    /// Derive the salt from creator and license first, then hash `blob`
    CreatorIdAndLicense {
        /// Content being watermarked
        blob: &'a [u8],
        /// Identifier of the creator, at least 8 bytes
        creator_id: &'a [u8],
        /// License text the content is published under
        license: &'a [u8],
    },
}

fn hash_into(
    params: &DerivationParams,
    password: &[u8],
    salt: &[u8],
    out: &mut [u8],
) -> Result<(), WatermarkError> {
    params
        .hasher(out.len())?
        .hash_password_into(password, salt, out)
        .map_err(|e| WatermarkError::KeyDerivation(format!("{}", e)))
}

/// Derive the 128-byte salt from a creator identifier and a license
pub fn creator_license_salt(
    creator_id: &[u8],
    license: &[u8],
    params: &DerivationParams,
) -> Result<Vec<u8>, WatermarkError> {
    let mut salt = vec![0u8; CREATOR_SALT_LEN];
    hash_into(params, license, creator_id, &mut salt)?;
    Ok(salt)
}

/// Hash a license under a creator identifier into the 64-byte watermark hash
pub fn creator_license_hash(
    creator_id: &[u8],
    license: &[u8],
    params: &DerivationParams,
) -> Result<Vec<u8>, WatermarkError> {
    let mut hash = vec![0u8; CREATOR_HASH_LEN];
    hash_into(params, license, creator_id, &mut hash)?;
    Ok(hash)
}

/// Where a contract id's salt comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractSource<'a> {
    /// Hash `blob` with a precomputed watermark hash as salt
    Watermark {
        /// Content under contract
        blob: &'a [u8],
        /// Watermark hash, at least 8 bytes
        watermark: &'a [u8],
    },
    /// Compute the watermark hash from creator and license first
    CreatorIdAndLicense {
        /// Content under contract
        blob: &'a [u8],
        /// Identifier of the creator, at least 8 bytes
        creator_id: &'a [u8],
        /// License text the content is published under
        license: &'a [u8],
    },
}

/// Derive the 128-byte contract id of a blob
pub fn derive_contract_id(
    source: &ContractSource<'_>,
    params: &DerivationParams,
) -> Result<Vec<u8>, WatermarkError> {
    let mut id = vec![0u8; CONTRACT_ID_LEN];
    match source {
        ContractSource::Watermark { blob, watermark } => {
            hash_into(params, blob, watermark, &mut id)?;
        }
        ContractSource::CreatorIdAndLicense {
            blob,
            creator_id,
            license,
        } => {
            let watermark = creator_license_hash(creator_id, license, params)?;
            hash_into(params, blob, &watermark, &mut id)?;
        }
    }

    #[cfg(feature = "logging")]
    debug!("Derived {} byte contract id", id.len());

    Ok(id)
}

/// Derive the 40-bit payload
pub fn derive_payload(
    source: &PayloadSource<'_>,
    params: &DerivationParams,
) -> Result<Payload, WatermarkError> {
    let mut out = [0u8; PAYLOAD_BYTES];
    match source {
        PayloadSource::SaltGiven { blob, salt } => {
            #[cfg(feature = "logging")]
            debug!("Deriving payload from {} byte blob with given salt", blob.len());

            hash_into(params, blob, salt, &mut out)?;
        }
        PayloadSource::CreatorIdAndLicense {
            blob,
            creator_id,
            license,
        } => {
            #[cfg(feature = "logging")]
            debug!(
                "Deriving payload from {} byte blob with creator/license salt",
                blob.len()
            );

            let salt = creator_license_salt(creator_id, license, params)?;
            hash_into(params, blob, &salt, &mut out)?;
        }
    }
    Ok(Payload::from_bytes(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: DerivationParams = DerivationParams::light();

    #[test]
    fn test_salt_is_deterministic() {
        let a = creator_license_salt(b"creator-0001", b"GPL 3.0", &PARAMS).unwrap();
        let b = creator_license_salt(b"creator-0001", b"GPL 3.0", &PARAMS).unwrap();
        assert_eq!(a.len(), CREATOR_SALT_LEN);
        assert_eq!(a, b);

        let c = creator_license_salt(b"creator-0002", b"GPL 3.0", &PARAMS).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_payload_is_deterministic() {
        let source = PayloadSource::SaltGiven {
            blob: b"Some Info",
            salt: b"Some Salt",
        };
        let first = derive_payload(&source, &PARAMS).unwrap();
        let second = derive_payload(&source, &PARAMS).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_creator_variant_matches_manual_salt() {
        let salt = creator_license_salt(b"creator-0001", b"CC-BY-4.0", &PARAMS).unwrap();
        let via_salt = derive_payload(
            &PayloadSource::SaltGiven {
                blob: b"chapter one",
                salt: &salt,
            },
            &PARAMS,
        )
        .unwrap();
        let via_creator = derive_payload(
            &PayloadSource::CreatorIdAndLicense {
                blob: b"chapter one",
                creator_id: b"creator-0001",
                license: b"CC-BY-4.0",
            },
            &PARAMS,
        )
        .unwrap();
        assert_eq!(via_salt, via_creator);
    }

    #[test]
    fn test_creator_hash_length() {
        let hash = creator_license_hash(b"creator-0001", b"GPL 3.0", &PARAMS).unwrap();
        assert_eq!(hash.len(), CREATOR_HASH_LEN);
        assert_eq!(
            hash,
            creator_license_hash(b"creator-0001", b"GPL 3.0", &PARAMS).unwrap()
        );
    }

    #[test]
    fn test_contract_id_variants_agree() {
        let watermark = creator_license_hash(b"creator-0001", b"CC-BY-4.0", &PARAMS).unwrap();
        let via_watermark = derive_contract_id(
            &ContractSource::Watermark {
                blob: b"chapter one",
                watermark: &watermark,
            },
            &PARAMS,
        )
        .unwrap();
        let via_creator = derive_contract_id(
            &ContractSource::CreatorIdAndLicense {
                blob: b"chapter one",
                creator_id: b"creator-0001",
                license: b"CC-BY-4.0",
            },
            &PARAMS,
        )
        .unwrap();

        assert_eq!(via_watermark.len(), CONTRACT_ID_LEN);
        assert_eq!(via_watermark, via_creator);
    }

    #[test]
    fn test_contract_id_depends_on_blob() {
        let watermark = [7u8; CREATOR_HASH_LEN];
        let a = derive_contract_id(
            &ContractSource::Watermark {
                blob: b"chapter one",
                watermark: &watermark,
            },
            &PARAMS,
        )
        .unwrap();
        let b = derive_contract_id(
            &ContractSource::Watermark {
                blob: b"chapter two",
                watermark: &watermark,
            },
            &PARAMS,
        )
        .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_contract_id_short_watermark_rejected() {
        let source = ContractSource::Watermark {
            blob: b"blob",
            watermark: b"short",
        };
        assert!(matches!(
            derive_contract_id(&source, &PARAMS),
            Err(WatermarkError::KeyDerivation(_))
        ));
    }

    #[test]
    fn test_short_salt_rejected() {
        let source = PayloadSource::SaltGiven {
            blob: b"blob",
            salt: b"short",
        };
        assert!(matches!(
            derive_payload(&source, &PARAMS),
            Err(WatermarkError::KeyDerivation(_))
        ));
    }

    #[test]
    fn test_bad_params_rejected() {
        let params = DerivationParams::new(1, 1, 4);
        let source = PayloadSource::SaltGiven {
            blob: b"blob",
            salt: b"long enough salt",
        };
        assert!(matches!(
            derive_payload(&source, &params),
            Err(WatermarkError::KeyDerivation(_))
        ));
    }
}
