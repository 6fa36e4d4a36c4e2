//! Deterministic seeding.
//!
//! Two seed sources, both derived with BLAKE3 so they are stable across
//! processes, platforms and releases:
//! - `symbol_seed` keys the synthetic generator on the symbol alone, so the same
//!   symbol and date range always reproduce the same fallback series.
//! - `RngHierarchy` expands one master seed into per-(symbol, stream) sub-seeds
//!   for the forecast models' noise terms.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seed for the synthetic generator: first four bytes (little-endian) of
/// `blake3(symbol)`, i.e. the hash reduced to the range `0..2^32`.
pub fn symbol_seed(symbol: &str) -> u32 {
    let hash = blake3::hash(symbol.as_bytes());
    let bytes = hash.as_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Seeded `StdRng` for a symbol's synthetic series.
pub fn symbol_rng(symbol: &str) -> StdRng {
    StdRng::seed_from_u64(u64::from(symbol_seed(symbol)))
}

/// Deterministic RNG hierarchy.
///
/// Sub-seeds depend only on the master seed and the `(symbol, stream)` pair,
/// never on the order in which they are requested.
#[derive(Debug, Clone)]
pub struct RngHierarchy {
    master_seed: u64,
}

impl RngHierarchy {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// Hierarchy with a master seed drawn from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn sub_seed(&self, symbol: &str, stream: &str) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(symbol.as_bytes());
        // Separator so ("AB", "C") and ("A", "BC") differ.
        hasher.update(&[0]);
        hasher.update(stream.as_bytes());
        let hash = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }

    pub fn rng_for(&self, symbol: &str, stream: &str) -> StdRng {
        StdRng::seed_from_u64(self.sub_seed(symbol, stream))
    }
}
