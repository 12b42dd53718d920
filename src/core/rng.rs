//! Deterministic Random Number Generator
//!
//! Uses Xorshift128+ seeded through SplitMix64. String seeds are hashed with
//! SHA-256 first, so the same seed string produces the identical stream of
//! draws on every platform and every run.

use super::hash::derive_seed;

/// Domain separator for string-seeded generators.
pub const SEED_DOMAIN: &[u8] = b"NEWYAWKR_SEED_V1";

/// 2^-53, the spacing of the floats produced by [`DeterministicRng::next_f64`].
const F64_UNIT: f64 = 1.0 / (1u64 << 53) as f64;

/// Deterministic PRNG using Xorshift128+ algorithm.
///
/// # Determinism Guarantee
///
/// Given the same seed, this RNG will produce the exact same sequence
/// of random numbers on any platform (x86, ARM, WASM).
///
/// # Example
///
/// ```
/// use newyawkr::core::rng::DeterministicRng;
///
/// let mut a = DeterministicRng::seeded("newyawkr-2024-01-01");
/// let mut b = DeterministicRng::seeded("newyawkr-2024-01-01");
/// assert_eq!(a.next_f64(), b.next_f64());
/// ```
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    state: [u64; 2],
}

impl DeterministicRng {
    /// Create a new RNG from a 64-bit seed.
    ///
    /// Uses SplitMix64 to initialize the internal state, ensuring
    /// good distribution even from weak seeds.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let state0 = splitmix64(&mut s);
        let state1 = splitmix64(&mut s);

        // Ensure state is never all zeros
        let state = if state0 == 0 && state1 == 0 {
            [1, 1]
        } else {
            [state0, state1]
        };

        Self { state }
    }

    /// Create an RNG from a seed string.
    ///
    /// The string is hashed (SHA-256 with [`SEED_DOMAIN`]) down to a 64-bit
    /// seed. Identical strings always agree; different strings are
    /// practically independent.
    pub fn seeded(seed: &str) -> Self {
        Self::new(derive_seed(SEED_DOMAIN, seed))
    }

    /// Generate the next 64-bit random value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state[1] = s1.rotate_left(37);

        result
    }

    /// Generate a float in [0, 1).
    ///
    /// Uses the upper 53 bits so every representable value is exact.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * F64_UNIT
    }

    /// Pick an index in [0, len) as `floor(next_f64() * len)`.
    ///
    /// Returns 0 for an empty range without consuming a draw.
    #[inline]
    pub fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let idx = (self.next_f64() * len as f64).floor() as usize;
        idx.min(len - 1)
    }

    /// Shuffle a slice in place using Fisher-Yates algorithm.
    ///
    /// Walks from the last index down to 1, swapping `i` with
    /// `floor(next_f64() * (i + 1))`.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        let len = slice.len();
        for i in (1..len).rev() {
            let j = self.next_index(i + 1);
            slice.swap(i, j);
        }
    }
}

/// SplitMix64 for seed initialization.
/// Produces well-distributed values from sequential seeds.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rng_determinism() {
        // Same seed must produce same sequence
        let mut rng1 = DeterministicRng::new(12345);
        let mut rng2 = DeterministicRng::new(12345);

        for _ in 0..1000 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = DeterministicRng::seeded("newyawkr-2024-01-01");
        let mut rng2 = DeterministicRng::seeded("newyawkr-2024-01-02");

        // Very unlikely to match
        assert_ne!(rng1.next_u64(), rng2.next_u64());
    }

    #[test]
    fn test_rng_known_values() {
        // These values must never change!
        // If they do, every published daily puzzle changes with them.
        let mut rng = DeterministicRng::new(42);
        assert_eq!(rng.next_u64(), 16629283624882167704);
        assert_eq!(rng.next_u64(), 1420492921613871959);
        assert_eq!(rng.next_u64(), 9768315062676884790);
    }

    #[test]
    fn test_next_f64_unit_interval() {
        let mut rng = DeterministicRng::seeded("unit");
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_next_index() {
        let mut rng = DeterministicRng::new(1234);

        for _ in 0..1000 {
            assert!(rng.next_index(5) < 5);
        }

        // Edge cases
        assert_eq!(rng.next_index(0), 0);
        assert_eq!(rng.next_index(1), 0);
    }

    #[test]
    fn test_shuffle_determinism() {
        let mut rng1 = DeterministicRng::seeded("shuffle");
        let mut rng2 = DeterministicRng::seeded("shuffle");

        let mut arr1 = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        let mut arr2 = arr1;

        rng1.shuffle(&mut arr1);
        rng2.shuffle(&mut arr2);

        assert_eq!(arr1, arr2);

        let mut sorted = arr1;
        sorted.sort();
        assert_eq!(sorted, [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    }

    proptest! {
        #[test]
        fn test_same_seed_same_draws(seed in ".*") {
            let mut a = DeterministicRng::seeded(&seed);
            let mut b = DeterministicRng::seeded(&seed);
            for _ in 0..64 {
                prop_assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
            }
        }
    }
}
