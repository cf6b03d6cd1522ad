//! Master seed resolution
//!
//! Priority: a `seed` query parameter, then the configured seed, then a
//! non-deterministic seed.

use std::time::{SystemTime, UNIX_EPOCH};

use levelgen_noise::MAX_INT32;

/// Where the master seed came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedSource {
    Query(u32),
    Config(u32),
    Entropy(u32),
}

impl SeedSource {
    pub fn seed(self) -> u32 {
        match self {
            SeedSource::Query(seed) | SeedSource::Config(seed) | SeedSource::Entropy(seed) => seed,
        }
    }

    pub fn is_deterministic(self) -> bool {
        !matches!(self, SeedSource::Entropy(_))
    }
}

/// Seeds wider than 32 bits keep their low bits, so negative seeds wrap.
pub fn seed_from_i64(value: i64) -> u32 {
    value as u32
}

/// Read `seed` from a URL-style query string (`?level=2&seed=42`).
///
/// An unparsable value is logged and ignored.
pub fn seed_from_query(query: &str) -> Option<u32> {
    let query = query.trim().trim_start_matches('?');
    let raw = query
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .filter(|(key, _)| *key == "seed")
        .map(|(_, value)| value.trim())
        .last()?;
    match raw.parse::<i64>() {
        Ok(value) => Some(seed_from_i64(value)),
        Err(_) => {
            tracing::warn!(value = raw, "ignoring unparsable seed parameter");
            None
        }
    }
}

/// A 31-bit seed from OS entropy, or from the wall clock if that fails
pub fn nondeterministic_seed() -> u32 {
    let mut bytes = [0u8; 4];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => u32::from_le_bytes(bytes) & MAX_INT32,
        Err(e) => {
            tracing::debug!(error = %e, "entropy unavailable, seeding from clock");
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or_default();
            (nanos as u32 ^ (nanos >> 32) as u32) & MAX_INT32
        }
    }
}

pub fn resolve_seed(query: Option<&str>, config_seed: Option<i64>) -> SeedSource {
    if let Some(seed) = query.and_then(seed_from_query) {
        return SeedSource::Query(seed);
    }
    if let Some(seed) = config_seed {
        return SeedSource::Config(seed_from_i64(seed));
    }
    SeedSource::Entropy(nondeterministic_seed())
}
