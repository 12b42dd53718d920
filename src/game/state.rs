//! Game State Definitions
//!
//! Locations, guesses and the live session record. Field names on the wire
//! follow the persisted progress layout.

use serde::{Serialize, Deserialize};

use crate::core::geo::LatLng;
use crate::core::hash::{StateHash, StateHasher};
use crate::game::region::Region;
use crate::game::scoring::{MAX_SCORE, TIMEOUT_DISTANCE_METERS};

/// Rounds in a daily puzzle.
pub const DAILY_ROUNDS: usize = 12;

// =============================================================================
// LOCATION
// =============================================================================

/// A target location.
///
/// `lat`/`lng` may be snapped to the true panorama position after sampling;
/// `region` never changes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
    /// Borough the point was sampled in
    pub region: Region,
}

impl Location {
    /// Create a location.
    pub const fn new(lat: f64, lng: f64, region: Region) -> Self {
        Self { lat, lng, region }
    }

    /// Coordinate part.
    #[inline]
    pub fn coord(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

// =============================================================================
// GUESS
// =============================================================================

/// One resolved round.
///
/// `guess_coord` and `distance_m` are `None` only for a timed-out round,
/// which always scores 0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Guess {
    /// Target as scored (after any coordinate snapping)
    #[serde(rename = "location")]
    pub target: Location,

    /// Player's coordinate, `None` on timeout
    #[serde(rename = "guess")]
    pub guess_coord: Option<LatLng>,

    /// Great-circle distance in meters, `None` on timeout
    #[serde(rename = "distance")]
    pub distance_m: Option<f64>,

    /// Points awarded
    pub score: u32,
}

impl Guess {
    /// A round that ran out of time.
    pub fn timed_out(target: Location) -> Self {
        Self {
            target,
            guess_coord: None,
            distance_m: None,
            score: 0,
        }
    }

    /// Did this round time out?
    pub fn is_timeout(&self) -> bool {
        self.guess_coord.is_none()
    }

    /// Distance for aggregates; timeouts count as very far.
    pub fn effective_distance(&self) -> f64 {
        self.distance_m.unwrap_or(TIMEOUT_DISTANCE_METERS)
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// Game mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Date-keyed 12 round puzzle
    Daily,
    /// Open-ended independently seeded rounds
    Endless,
}

/// Live session record.
///
/// Invariant: `guesses.len() == current_round`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Daily or endless
    pub mode: GameMode,

    /// Target per round; endless sessions keep one unplayed target ready
    pub targets: Vec<Location>,

    /// 0-based index of the round being played
    pub current_round: usize,

    /// One entry per resolved round
    pub guesses: Vec<Guess>,

    /// Sum of the guess scores
    pub total_score: u32,

    /// Set once a daily session resolves its last round
    pub complete: bool,
}

impl Session {
    /// A fresh session at round 0.
    pub fn new(mode: GameMode, targets: Vec<Location>) -> Self {
        Self {
            mode,
            targets,
            current_round: 0,
            guesses: Vec::new(),
            total_score: 0,
            complete: false,
        }
    }

    /// Target for the round being played.
    pub fn current_target(&self) -> Option<&Location> {
        self.targets.get(self.current_round)
    }

    /// Number of resolved rounds.
    pub fn rounds_played(&self) -> usize {
        self.guesses.len()
    }

    /// Best total achievable over the rounds played so far.
    pub fn max_possible_score(&self) -> u32 {
        self.guesses.len() as u32 * MAX_SCORE
    }

    /// Largest distance over resolved rounds, timeouts counting as very far.
    pub fn worst_distance(&self) -> Option<f64> {
        self.guesses
            .iter()
            .map(Guess::effective_distance)
            .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |a| a.max(d))))
    }

    /// Resolved rounds whose target lies in `region`, in play order.
    pub fn guesses_for_region(&self, region: Region) -> impl Iterator<Item = &Guess> {
        self.guesses.iter().filter(move |g| g.target.region == region)
    }

    /// Hash of the targets, for regression checks and logs.
    pub fn targets_fingerprint(&self) -> StateHash {
        fingerprint(&self.targets)
    }
}

// =============================================================================
// DAILY PROGRESS
// =============================================================================

/// Persisted snapshot of a daily session, stamped with its calendar date.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyProgress {
    /// `YYYY-MM-DD` the snapshot belongs to
    pub date: String,
    /// Rounds resolved when the snapshot was taken
    pub rounds_played: usize,
    /// Resolved rounds in play order
    pub guesses: Vec<Guess>,
    /// Points so far
    pub total_score: u32,
    /// All 12 rounds resolved
    #[serde(alias = "isComplete")]
    pub complete: bool,
}

impl DailyProgress {
    /// Snapshot a live session for `date`.
    pub fn from_session(date: impl Into<String>, session: &Session) -> Self {
        Self {
            date: date.into(),
            rounds_played: session.current_round,
            guesses: session.guesses.clone(),
            total_score: session.total_score,
            complete: session.complete,
        }
    }
}

/// Hash an ordered list of locations.
pub fn fingerprint(locations: &[Location]) -> StateHash {
    let mut hasher = StateHasher::for_puzzle();
    hasher.update_u32(locations.len() as u32);
    for loc in locations {
        hasher.update_f64(loc.lat);
        hasher.update_f64(loc.lng);
        hasher.update_u8(loc.region as u8);
    }
    hasher.finalize()
}

// =============================================================================
// TESTS
// =============================================================================
