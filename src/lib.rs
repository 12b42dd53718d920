//! # NewYawkr
//!
//! Core of a daily New York City geography guessing game: seeded puzzle
//! generation, distance scoring, the round state machine and date-scoped
//! progress persistence.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        NEWYAWKR                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── rng.rs      - Seeded Xorshift128+ PRNG                  │
//! │  ├── hash.rs     - Seed derivation and fingerprints          │
//! │  ├── geo.rs      - Coordinates and haversine distance        │
//! │  └── clock.rs    - Calendar date and wall clock              │
//! │                                                              │
//! │  game/           - Game logic (deterministic)                │
//! │  ├── region.rs   - Borough polygons                          │
//! │  ├── sampler.rs  - Point-in-region sampling                  │
//! │  ├── puzzle.rs   - Daily and endless targets                 │
//! │  ├── scoring.rs  - Distance to points                        │
//! │  ├── state.rs    - Locations, guesses, sessions              │
//! │  └── session.rs  - Round state machine                       │
//! │                                                              │
//! │  imagery/        - Coverage lookups (async)                  │
//! │  hard_mode.rs    - Per-round time limit (async)              │
//! │  persist/        - Progress storage                          │
//! │  config.rs       - Runtime tunables                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! Puzzle generation depends only on the seed string:
//! - All randomness from a SHA-256 seeded Xorshift128+
//! - Regions are sampled in a fixed order with one shared generator
//! - No HashMap iteration anywhere in generation
//!
//! The same date yields the same 12 locations in the same order on every
//! platform.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod game;
pub mod hard_mode;
pub mod imagery;
pub mod persist;

// Re-export commonly used types
pub use crate::config::{GameConfig, StoreConfig};
pub use crate::core::rng::DeterministicRng;
pub use crate::core::clock::{Clock, SystemClock};
pub use crate::game::puzzle::daily_puzzle;
pub use crate::game::region::Region;
pub use crate::game::session::GameSession;
pub use crate::game::state::{Guess, Location, Session};
pub use crate::persist::progress::ProgressStore;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
