//! Game Logic Module
//!
//! Puzzle generation, scoring and the session state machine. Everything here
//! is deterministic given a seed string and a [`Clock`](crate::core::Clock).
//!
//! ## Module Structure
//!
//! - `region`: Borough boundaries and point-in-polygon tests
//! - `sampler`: Rejection sampling of targets inside a region
//! - `puzzle`: Daily puzzle and endless target generation
//! - `scoring`: Distance and points
//! - `state`: Locations, guesses, sessions, persisted progress
//! - `session`: Round phase state machine

pub mod region;
pub mod sampler;
pub mod puzzle;
pub mod scoring;
pub mod state;
pub mod session;

// Re-export key types
pub use region::{Region, BoundingBox, point_in_polygon};
pub use sampler::sample_location;
pub use puzzle::{daily_puzzle, daily_seed, endless_location, SeedMinter};
pub use scoring::{distance, score, format_distance, format_score, MAX_SCORE};
pub use state::{DailyProgress, GameMode, Guess, Location, Session, DAILY_ROUNDS};
pub use session::{GameSession, LookupOutcome, LookupTicket, RoundPhase, SessionError};
