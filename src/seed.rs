//! Shareable seed tokens. A token packs the full parameter set and the random seed into
//! one URL-safe string, so the same drawing can be regenerated anywhere.
//!
//! Format: the [`SeedRecord`] serialized as compact RON, then base64 (URL-safe alphabet,
//! no padding).

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use siphasher::sip::SipHasher24;
use std::hash::Hasher;
use uuid::Uuid;

use crate::errors::SeedDecodeError;
use crate::params::RenderParams;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeedRecord {
    pub params: RenderParams,
    #[serde(rename = "randomSeed")]
    pub seed: String,
}

/// A fresh random seed string.
pub fn mint_seed() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Packs `params` and `seed` into a token. A new seed is minted when none is given.
pub fn encode(params: &RenderParams, seed: Option<&str>) -> Result<String, ron::Error> {
    let record = SeedRecord {
        params: params.clone(),
        seed: seed.map(str::to_string).unwrap_or_else(mint_seed),
    };
    let text = ron::to_string(&record)?;
    Ok(URL_SAFE_NO_PAD.encode(text.as_bytes()))
}

/// Unpacks a token. Either every field is present, well typed and in range, or nothing
/// is returned.
pub fn decode(token: &str) -> Result<SeedRecord, SeedDecodeError> {
    let bytes = URL_SAFE_NO_PAD.decode(token.trim())?;
    let text = String::from_utf8(bytes)?;
    let record: SeedRecord = ron::from_str(&text)?;
    if record.seed.is_empty() {
        return Err(SeedDecodeError::EmptySeed);
    }
    record.params.validate()?;
    Ok(record)
}

/// SipHash-2-4 with the fixed zero key. The raw bytes are fed without a length prefix,
/// so the value does not depend on the platform's `usize`.
fn hash_seed(seed: &str) -> u64 {
    let mut hasher = SipHasher24::new();
    hasher.write(seed.as_bytes());
    hasher.finish()
}

/// The random stream for a seed string. Equal strings give equal streams.
pub fn seeded_rng(seed: &str) -> StdRng {
    StdRng::seed_from_u64(hash_seed(seed))
}
