//! Seed Derivation and Fingerprinting
//!
//! Provides deterministic SHA-256 hashing for:
//! - Turning seed strings into 64-bit PRNG seeds
//! - Fingerprinting generated puzzles for logging and regression checks

use sha2::{Sha256, Digest};

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher with a domain separator.
///
/// Order of updates is critical for determinism.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for a generated puzzle.
    pub fn for_puzzle() -> Self {
        Self::new(b"NEWYAWKR_PUZZLE_V1")
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an f64 value (IEEE-754 bits, little-endian).
    #[inline]
    pub fn update_f64(&mut self, value: f64) {
        self.hasher.update(value.to_bits().to_le_bytes());
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Compute hash with domain separator.
pub fn hash_with_domain(domain: &[u8], data: &[u8]) -> StateHash {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    hasher.finalize().into()
}

/// Derive a 64-bit seed from a seed string.
///
/// Takes the first 8 bytes (little-endian) of
/// `SHA-256(domain || seed)`.
pub fn derive_seed(domain: &[u8], seed: &str) -> u64 {
    let hash = hash_with_domain(domain, seed.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash[..8]);
    u64::from_le_bytes(bytes)
}

// =============================================================================
// TESTS
// =============================================================================
