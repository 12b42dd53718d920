//! Core deterministic primitives.
//!
//! Seeded randomness, seed hashing, coordinates and time sources. The RNG and
//! hashing are bit-for-bit reproducible across platforms.

pub mod rng;
pub mod hash;
pub mod geo;
pub mod clock;

// Re-export core types
pub use rng::DeterministicRng;
pub use hash::{StateHash, StateHasher, derive_seed};
pub use geo::{LatLng, haversine_m};
pub use clock::{Clock, SystemClock, FixedClock, today_string};
