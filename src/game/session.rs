//! Game Session State Machine
//!
//! Owns the live [`Session`] plus the round-local state around it: the
//! staged guess, the seed minters for endless and regenerated targets, and
//! the target generation used to discard stale coverage lookups.
//!
//! ```text
//! AwaitingGuess(n) --confirm--> RoundResolved(n) --next_round--> AwaitingGuess(n+1)
//!                                      |
//!                                      +-- daily round 12 --> Complete
//! ```

use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::core::clock::{Clock, today_string};
use crate::core::geo::LatLng;
use crate::core::rng::DeterministicRng;
use crate::game::puzzle::{daily_puzzle, endless_location, SeedMinter};
use crate::game::region::Region;
use crate::game::sampler::sample_location;
use crate::game::scoring::{distance, score};
use crate::game::state::{DailyProgress, GameMode, Guess, Location, Session, DAILY_ROUNDS};

/// Where the session is in its round loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Waiting for the player to guess round `round` (0-based).
    AwaitingGuess {
        /// Round being played.
        round: usize,
    },
    /// Round `round` was just scored; the result is on screen.
    RoundResolved {
        /// Round that was scored.
        round: usize,
    },
    /// Daily session finished.
    Complete,
}

/// Session errors.
///
/// Timeouts are not errors; these only report calls the current phase can't
/// accept.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// No session has been started.
    #[error("No active session")]
    NoSession,

    /// The round isn't accepting guesses.
    #[error("Round not accepting guesses")]
    RoundNotActive,

    /// The session already finished.
    #[error("Session already complete")]
    SessionComplete,

    /// Nothing to advance to yet.
    #[error("Round not resolved")]
    RoundNotResolved,
}

/// Handle for one coverage lookup, tied to the target it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket {
    /// Target generation at issue time.
    pub generation: u64,
    /// Round at issue time.
    pub round: usize,
}

/// What applying a coverage result did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LookupOutcome {
    /// Target snapped to the panorama position.
    Snapped(Location),
    /// No coverage near the target; caller decides whether to regenerate.
    NoCoverage,
    /// The ticket's target is no longer current; result discarded.
    Stale,
}

/// The live game.
///
/// A single owned value; every mutating operation goes through `&mut self`.
#[derive(Debug, Clone)]
pub struct GameSession {
    session: Option<Session>,
    staged_guess: Option<LatLng>,
    resolved: bool,
    endless_regions: Vec<Region>,
    endless_seeds: SeedMinter,
    regenerate_seeds: SeedMinter,
    generation: u64,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Create an idle handle with no session.
    pub fn new() -> Self {
        Self {
            session: None,
            staged_guess: None,
            resolved: false,
            endless_regions: Vec::new(),
            endless_seeds: SeedMinter::endless(),
            regenerate_seeds: SeedMinter::regenerate(),
            generation: 0,
        }
    }

    /// The live session, if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Current phase, `None` when idle.
    pub fn phase(&self) -> Option<RoundPhase> {
        let session = self.session.as_ref()?;
        Some(if session.complete {
            RoundPhase::Complete
        } else if self.resolved {
            RoundPhase::RoundResolved { round: session.current_round - 1 }
        } else {
            RoundPhase::AwaitingGuess { round: session.current_round }
        })
    }

    /// Staged but unconfirmed guess.
    pub fn staged_guess(&self) -> Option<LatLng> {
        self.staged_guess
    }

    /// Target generation; changes whenever the current target is replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start today's daily puzzle, optionally resuming a saved snapshot.
    ///
    /// Snapshots from another date are ignored.
    pub fn start_daily(&mut self, clock: &impl Clock, progress: Option<&DailyProgress>) -> &Session {
        let today = today_string(clock);
        let mut session = Session::new(GameMode::Daily, daily_puzzle(&today));

        match progress {
            Some(p) if p.date == today => {
                let mut guesses = p.guesses.clone();
                guesses.truncate(DAILY_ROUNDS);
                if guesses.len() != p.rounds_played {
                    warn!(
                        "Progress for {} records {} rounds but {} guesses; resuming from guesses",
                        today, p.rounds_played, guesses.len()
                    );
                }
                let total_score: u32 = guesses.iter().map(|g| g.score).sum();
                if total_score != p.total_score {
                    warn!(
                        "Progress for {} records total {} but guesses sum to {}; using the sum",
                        today, p.total_score, total_score
                    );
                }
                session.current_round = guesses.len();
                session.guesses = guesses;
                session.total_score = total_score;
                session.complete = p.complete || session.current_round >= DAILY_ROUNDS;
                info!("Resumed daily {} at round {}", today, session.current_round);
            }
            Some(p) => {
                warn!("Ignoring progress for {} while starting {}", p.date, today);
            }
            None => {
                info!("Started daily {}", today);
            }
        }

        self.install(session)
    }

    /// Start an endless session over `regions` (empty means all regions).
    pub fn start_endless(&mut self, clock: &impl Clock, regions: &[Region]) -> &Session {
        self.endless_regions = regions.to_vec();
        let first = endless_location(regions, &self.endless_seeds, clock);
        info!("Started endless session over {} regions", regions.len());
        self.install(Session::new(GameMode::Endless, vec![first]))
    }

    fn install(&mut self, session: Session) -> &Session {
        self.staged_guess = None;
        self.resolved = false;
        self.generation += 1;
        self.session.insert(session)
    }

    /// Stage a guess for the current round. Replaces any earlier stage.
    pub fn record_guess(&mut self, lat: f64, lng: f64) -> Result<(), SessionError> {
        match self.phase() {
            None => Err(SessionError::NoSession),
            Some(RoundPhase::Complete) => Err(SessionError::SessionComplete),
            Some(RoundPhase::RoundResolved { .. }) => Err(SessionError::RoundNotActive),
            Some(RoundPhase::AwaitingGuess { .. }) => {
                self.staged_guess = Some(LatLng::new(lat, lng));
                Ok(())
            }
        }
    }

    /// Score the current round.
    ///
    /// Without a staged guess the round times out: no coordinate, no
    /// distance, 0 points, and the round still advances. Endless sessions
    /// append the next target (from `endless_regions`, or the regions the
    /// session started with).
    pub fn confirm(
        &mut self,
        clock: &impl Clock,
        endless_regions: Option<&[Region]>,
    ) -> Result<&Guess, SessionError> {
        match self.phase() {
            None => return Err(SessionError::NoSession),
            Some(RoundPhase::Complete) => return Err(SessionError::SessionComplete),
            Some(RoundPhase::RoundResolved { .. }) => return Err(SessionError::RoundNotActive),
            Some(RoundPhase::AwaitingGuess { .. }) => {}
        }

        let staged = self.staged_guess.take();
        let session = self.session.as_mut().ok_or(SessionError::NoSession)?;
        let target = *session.current_target().ok_or(SessionError::RoundNotActive)?;

        let guess = match staged {
            Some(coord) => {
                let d = distance(target.lat, target.lng, coord.lat, coord.lng);
                Guess {
                    target,
                    guess_coord: Some(coord),
                    distance_m: Some(d),
                    score: score(d),
                }
            }
            None => {
                info!("Round {} timed out", session.current_round);
                Guess::timed_out(target)
            }
        };

        debug!(
            "Round {} scored {} ({:?} m)",
            session.current_round, guess.score, guess.distance_m
        );

        session.total_score += guess.score;
        session.guesses.push(guess);
        session.current_round += 1;

        match session.mode {
            GameMode::Daily => {
                session.complete = session.current_round >= DAILY_ROUNDS;
            }
            GameMode::Endless => {
                let regions = endless_regions.unwrap_or(self.endless_regions.as_slice());
                let next = endless_location(regions, &self.endless_seeds, clock);
                session.targets.push(next);
            }
        }

        self.resolved = true;
        self.generation += 1;

        session.guesses.last().ok_or(SessionError::NoSession)
    }

    /// Leave the result screen and start the next round.
    pub fn next_round(&mut self) -> Result<RoundPhase, SessionError> {
        match self.phase() {
            None => Err(SessionError::NoSession),
            Some(RoundPhase::Complete) => Ok(RoundPhase::Complete),
            Some(RoundPhase::AwaitingGuess { .. }) => Err(SessionError::RoundNotResolved),
            Some(RoundPhase::RoundResolved { round }) => {
                self.resolved = false;
                self.staged_guess = None;
                Ok(RoundPhase::AwaitingGuess { round: round + 1 })
            }
        }
    }

    /// Overwrite the current target's coordinates, keeping its region.
    ///
    /// Must happen before `confirm` for the round so scoring uses them.
    pub fn correct_current_location_coords(&mut self, lat: f64, lng: f64) -> Result<Location, SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NoSession)?;
        let round = session.current_round;
        let target = session.targets.get_mut(round).ok_or(SessionError::SessionComplete)?;
        target.lat = lat;
        target.lng = lng;
        debug!("Round {} target snapped to ({:.6}, {:.6})", round, lat, lng);
        Ok(*target)
    }

    /// Replace the current target with a fresh point in the same region.
    ///
    /// Round index and recorded guesses are untouched.
    pub fn regenerate_current_location(&mut self, clock: &impl Clock) -> Result<Location, SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NoSession)?;
        let round = session.current_round;
        let target = session.targets.get_mut(round).ok_or(SessionError::SessionComplete)?;

        let seed = self.regenerate_seeds.mint(clock);
        let mut rng = DeterministicRng::seeded(&seed);
        let replacement = sample_location(target.region, &mut rng);

        info!(
            "Round {} regenerated in {}: ({:.6}, {:.6}) -> ({:.6}, {:.6})",
            round, target.region, target.lat, target.lng, replacement.lat, replacement.lng
        );
        *target = replacement;
        self.generation += 1;
        Ok(replacement)
    }

    /// Drop the live session.
    pub fn reset(&mut self) {
        self.session = None;
        self.staged_guess = None;
        self.resolved = false;
        self.endless_regions.clear();
        self.generation += 1;
    }

    /// Issue a ticket for a coverage lookup of the current target.
    ///
    /// Returns the ticket and the coordinates to look up.
    pub fn begin_coverage_lookup(&self) -> Option<(LookupTicket, Location)> {
        let session = self.session.as_ref()?;
        let target = *session.current_target()?;
        let ticket = LookupTicket {
            generation: self.generation,
            round: session.current_round,
        };
        Some((ticket, target))
    }

    /// Apply a finished coverage lookup.
    ///
    /// `found` is the panorama position, or `None` when nothing is nearby.
    /// Results for a target that has since been replaced are discarded.
    pub fn apply_coverage(&mut self, ticket: LookupTicket, found: Option<LatLng>) -> LookupOutcome {
        let current = self
            .session
            .as_ref()
            .map(|s| (self.generation, s.current_round));
        if current != Some((ticket.generation, ticket.round)) {
            debug!(
                "Discarding stale coverage result for round {} (generation {})",
                ticket.round, ticket.generation
            );
            return LookupOutcome::Stale;
        }

        match found {
            Some(coord) => match self.correct_current_location_coords(coord.lat, coord.lng) {
                Ok(location) => LookupOutcome::Snapped(location),
                Err(_) => LookupOutcome::Stale,
            },
            None => LookupOutcome::NoCoverage,
        }
    }

    /// Whether the surrounding loop should show the final screen.
    ///
    /// Daily sessions end when complete; endless sessions after
    /// `endless_round_limit` confirmed rounds.
    pub fn should_finish(&self, config: &GameConfig) -> bool {
        match &self.session {
            None => false,
            Some(s) => match s.mode {
                GameMode::Daily => s.complete,
                GameMode::Endless => s.current_round >= config.endless_round_limit,
            },
        }
    }

    /// Snapshot for the progress store; only daily sessions are persisted.
    pub fn progress_snapshot(&self, clock: &impl Clock) -> Option<DailyProgress> {
        self.session
            .as_ref()
            .filter(|s| s.mode == GameMode::Daily)
            .map(|s| DailyProgress::from_session(today_string(clock), s))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::game::scoring::MAX_SCORE;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 1_704_067_200_000)
    }

    fn play_round(game: &mut GameSession, clock: &FixedClock) -> Guess {
        let target = *game.session().unwrap().current_target().unwrap();
        game.record_guess(target.lat, target.lng).unwrap();
        let guess = game.confirm(clock, None).unwrap().clone();
        game.next_round().unwrap();
        guess
    }

    #[test]
    fn test_daily_twelve_rounds_complete() {
        let clock = clock();
        let mut game = GameSession::new();
        game.start_daily(&clock, None);
        assert_eq!(game.phase(), Some(RoundPhase::AwaitingGuess { round: 0 }));

        for _ in 0..DAILY_ROUNDS {
            let guess = play_round(&mut game, &clock);
            assert_eq!(guess.score, MAX_SCORE);
        }

        let session = game.session().unwrap();
        assert!(session.complete);
        assert_eq!(session.guesses.len(), DAILY_ROUNDS);
        assert_eq!(session.current_round, DAILY_ROUNDS);
        assert_eq!(session.total_score, DAILY_ROUNDS as u32 * MAX_SCORE);
        assert_eq!(game.phase(), Some(RoundPhase::Complete));
        assert_eq!(game.confirm(&clock, None).unwrap_err(), SessionError::SessionComplete);
    }

    #[test]
    fn test_daily_targets_match_puzzle() {
        let clock = clock();
        let mut game = GameSession::new();
        let session = game.start_daily(&clock, None);
        assert_eq!(session.targets, daily_puzzle("2024-01-01"));
    }

    #[test]
    fn test_confirm_without_guess_times_out() {
        let clock = clock();
        let mut game = GameSession::new();
        game.start_daily(&clock, None);

        let guess = game.confirm(&clock, None).unwrap().clone();
        assert!(guess.guess_coord.is_none());
        assert!(guess.distance_m.is_none());
        assert_eq!(guess.score, 0);

        let session = game.session().unwrap();
        assert_eq!(session.current_round, 1);
        assert_eq!(session.guesses.len(), 1);
        assert_eq!(session.total_score, 0);
    }

    #[test]
    fn test_second_confirm_rejected() {
        let clock = clock();
        let mut game = GameSession::new();
        game.start_daily(&clock, None);
        game.confirm(&clock, None).unwrap();

        // A late timer firing after the player confirmed must not score twice
        assert_eq!(game.confirm(&clock, None).unwrap_err(), SessionError::RoundNotActive);
        assert_eq!(game.session().unwrap().current_round, 1);
    }

    #[test]
    fn test_staged_guess_is_replaced_and_cleared() {
        let clock = clock();
        let mut game = GameSession::new();
        game.start_daily(&clock, None);
        let target = *game.session().unwrap().current_target().unwrap();

        game.record_guess(0.0, 0.0).unwrap();
        game.record_guess(target.lat, target.lng).unwrap();
        let guess = game.confirm(&clock, None).unwrap().clone();
        assert_eq!(guess.score, MAX_SCORE);
        assert_eq!(guess.distance_m, Some(0.0));
        assert_eq!(game.staged_guess(), None);

        assert_eq!(game.record_guess(1.0, 1.0), Err(SessionError::RoundNotActive));
        game.next_round().unwrap();
        game.record_guess(1.0, 1.0).unwrap();
    }

    #[test]
    fn test_operations_without_session() {
        let clock = clock();
        let mut game = GameSession::new();
        assert_eq!(game.phase(), None);
        assert_eq!(game.record_guess(1.0, 1.0), Err(SessionError::NoSession));
        assert_eq!(game.confirm(&clock, None).unwrap_err(), SessionError::NoSession);
        assert_eq!(game.next_round(), Err(SessionError::NoSession));
        assert!(game.begin_coverage_lookup().is_none());
        assert_eq!(
            game.correct_current_location_coords(1.0, 1.0),
            Err(SessionError::NoSession)
        );
    }

    #[test]
    fn test_next_round_requires_resolution() {
        let clock = clock();
        let mut game = GameSession::new();
        game.start_daily(&clock, None);
        assert_eq!(game.next_round(), Err(SessionError::RoundNotResolved));
    }

    #[test]
    fn test_correction_used_for_scoring() {
        let clock = clock();
        let mut game = GameSession::new();
        game.start_daily(&clock, None);
        let original = *game.session().unwrap().current_target().unwrap();

        let snapped = game
            .correct_current_location_coords(original.lat + 0.001, original.lng)
            .unwrap();
        assert_eq!(snapped.region, original.region);

        game.record_guess(snapped.lat, snapped.lng).unwrap();
        let guess = game.confirm(&clock, None).unwrap();
        assert_eq!(guess.score, MAX_SCORE);
        assert_eq!(guess.target, snapped);
    }

    #[test]
    fn test_regenerate_keeps_region_and_round() {
        let clock = clock();
        let mut game = GameSession::new();
        game.start_daily(&clock, None);
        play_round(&mut game, &clock);

        let before = *game.session().unwrap().current_target().unwrap();
        let generation = game.generation();
        let replacement = game.regenerate_current_location(&clock).unwrap();

        let session = game.session().unwrap();
        assert_eq!(replacement.region, before.region);
        assert_ne!((replacement.lat, replacement.lng), (before.lat, before.lng));
        assert!(replacement.region.contains(replacement.lat, replacement.lng));
        assert_eq!(session.current_round, 1);
        assert_eq!(session.guesses.len(), 1);
        assert_eq!(session.targets[1], replacement);
        assert!(game.generation() > generation);
    }

    #[test]
    fn test_regenerate_mints_new_seed_each_time() {
        let clock = clock();
        let mut game = GameSession::new();
        game.start_daily(&clock, None);
        let a = game.regenerate_current_location(&clock).unwrap();
        let b = game.regenerate_current_location(&clock).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_resume_daily_progress() {
        let clock = clock();
        let mut first = GameSession::new();
        first.start_daily(&clock, None);
        for _ in 0..5 {
            play_round(&mut first, &clock);
        }
        let progress = first.progress_snapshot(&clock).unwrap();
        assert_eq!(progress.rounds_played, 5);

        let mut resumed = GameSession::new();
        let session = resumed.start_daily(&clock, Some(&progress));
        assert_eq!(session.current_round, 5);
        assert_eq!(session.guesses, progress.guesses);
        assert_eq!(session.total_score, 5 * MAX_SCORE);
        assert!(!session.complete);
        assert_eq!(resumed.phase(), Some(RoundPhase::AwaitingGuess { round: 5 }));
    }

    #[test]
    fn test_resume_derives_round_from_guesses() {
        let clock = clock();
        let target = daily_puzzle("2024-01-01")[0];
        let progress = DailyProgress {
            date: "2024-01-01".to_string(),
            rounds_played: 7,
            guesses: vec![Guess::timed_out(target); 3],
            total_score: 0,
            complete: false,
        };

        let mut game = GameSession::new();
        let session = game.start_daily(&clock, Some(&progress));
        assert_eq!(session.current_round, 3);
        assert_eq!(session.guesses.len(), session.current_round);
    }

    #[test]
    fn test_resume_truncates_extra_guesses_and_rescores() {
        let clock = clock();
        let puzzle = daily_puzzle("2024-01-01");
        let exact = |target: Location| Guess {
            target,
            guess_coord: Some(target.coord()),
            distance_m: Some(0.0),
            score: MAX_SCORE,
        };
        let mut guesses: Vec<Guess> = puzzle.iter().copied().map(exact).collect();
        guesses.push(exact(puzzle[0]));
        guesses.push(exact(puzzle[1]));
        let progress = DailyProgress {
            date: "2024-01-01".to_string(),
            rounds_played: 14,
            guesses,
            total_score: 14 * MAX_SCORE,
            complete: false,
        };

        let mut game = GameSession::new();
        let session = game.start_daily(&clock, Some(&progress));
        assert_eq!(session.guesses.len(), DAILY_ROUNDS);
        assert_eq!(session.current_round, DAILY_ROUNDS);
        assert_eq!(session.total_score, DAILY_ROUNDS as u32 * MAX_SCORE);
        assert!(session.complete);
        assert_eq!(game.phase(), Some(RoundPhase::Complete));
    }

    #[test]
    fn test_resume_complete_progress() {
        let clock = clock();
        let target = daily_puzzle("2024-01-01")[0];
        let progress = DailyProgress {
            date: "2024-01-01".to_string(),
            rounds_played: 12,
            guesses: vec![Guess::timed_out(target); 12],
            total_score: 0,
            complete: true,
        };

        let mut game = GameSession::new();
        game.start_daily(&clock, Some(&progress));
        assert_eq!(game.phase(), Some(RoundPhase::Complete));
        assert!(game.should_finish(&GameConfig::default()));
    }

    #[test]
    fn test_resume_ignores_other_date() {
        let clock = clock();
        let progress = DailyProgress {
            date: "2023-12-31".to_string(),
            rounds_played: 1,
            guesses: vec![Guess::timed_out(daily_puzzle("2023-12-31")[0])],
            total_score: 0,
            complete: false,
        };

        let mut game = GameSession::new();
        let session = game.start_daily(&clock, Some(&progress));
        assert_eq!(session.current_round, 0);
        assert!(session.guesses.is_empty());
    }

    #[test]
    fn test_endless_keeps_next_target_ready() {
        let clock = clock();
        let mut game = GameSession::new();
        let session = game.start_endless(&clock, &[Region::Queens]);
        assert_eq!(session.targets.len(), 1);

        for round in 1..=15 {
            let guess = play_round(&mut game, &clock);
            assert_eq!(guess.target.region, Region::Queens);
            let session = game.session().unwrap();
            assert_eq!(session.current_round, round);
            assert_eq!(session.targets.len(), round + 1);
            assert!(!session.complete);
        }
    }

    #[test]
    fn test_endless_confirm_without_guess_advances() {
        let clock = clock();
        let mut game = GameSession::new();
        game.start_endless(&clock, &[Region::Bronx]);
        let first = *game.session().unwrap().current_target().unwrap();

        let guess = game.confirm(&clock, None).unwrap().clone();
        assert!(guess.is_timeout());
        assert_eq!(guess.target, first);

        let session = game.session().unwrap();
        assert_eq!(session.current_round, 1);
        assert_eq!(session.total_score, 0);
        assert_eq!(session.targets.len(), 2);
        assert_eq!(session.targets[1].region, Region::Bronx);
        assert_eq!(game.phase(), Some(RoundPhase::RoundResolved { round: 0 }));

        let next = session.targets[1];
        game.next_round().unwrap();
        assert_eq!(game.session().unwrap().current_target(), Some(&next));
    }

    #[test]
    fn test_concurrent_sessions_get_distinct_targets() {
        // Same frozen millisecond for both handles
        let clock = clock();
        let mut a = GameSession::new();
        let mut b = GameSession::new();
        let first_a = *a.start_endless(&clock, &Region::ALL).current_target().unwrap();
        let first_b = *b.start_endless(&clock, &Region::ALL).current_target().unwrap();
        assert_ne!(first_a, first_b);

        a.start_daily(&clock, None);
        b.start_daily(&clock, None);
        let regen_a = a.regenerate_current_location(&clock).unwrap();
        let regen_b = b.regenerate_current_location(&clock).unwrap();
        assert_ne!(regen_a, regen_b);
    }

    #[test]
    fn test_endless_region_override() {
        let clock = clock();
        let mut game = GameSession::new();
        game.start_endless(&clock, &[Region::Queens]);
        game.confirm(&clock, Some(&[Region::StatenIsland][..])).unwrap();
        let session = game.session().unwrap();
        assert_eq!(session.targets[1].region, Region::StatenIsland);
    }

    #[test]
    fn test_endless_should_finish_after_limit() {
        let clock = clock();
        let config = GameConfig::default();
        let mut game = GameSession::new();
        game.start_endless(&clock, &Region::ALL);

        for _ in 0..config.endless_round_limit - 1 {
            play_round(&mut game, &clock);
            assert!(!game.should_finish(&config));
        }
        play_round(&mut game, &clock);
        assert!(game.should_finish(&config));
        assert!(game.progress_snapshot(&clock).is_none());
    }

    #[test]
    fn test_reset() {
        let clock = clock();
        let mut game = GameSession::new();
        game.start_endless(&clock, &Region::ALL);
        game.record_guess(40.7, -73.9).unwrap();
        game.reset();
        assert!(game.session().is_none());
        assert!(game.staged_guess().is_none());
        assert_eq!(game.phase(), None);
    }

    #[test]
    fn test_coverage_snaps_current_target() {
        let clock = clock();
        let mut game = GameSession::new();
        game.start_daily(&clock, None);

        let (ticket, target) = game.begin_coverage_lookup().unwrap();
        let panorama = LatLng::new(target.lat + 0.0002, target.lng - 0.0003);
        match game.apply_coverage(ticket, Some(panorama)) {
            LookupOutcome::Snapped(loc) => {
                assert_eq!(loc.coord(), panorama);
                assert_eq!(loc.region, target.region);
            }
            other => panic!("unexpected {other:?}"),
        }

        let (ticket, _) = game.begin_coverage_lookup().unwrap();
        assert_eq!(game.apply_coverage(ticket, None), LookupOutcome::NoCoverage);
    }

    #[test]
    fn test_stale_coverage_discarded_after_regenerate() {
        let clock = clock();
        let mut game = GameSession::new();
        game.start_daily(&clock, None);

        let (stale, _) = game.begin_coverage_lookup().unwrap();
        let replacement = game.regenerate_current_location(&clock).unwrap();

        assert_eq!(game.apply_coverage(stale, Some(LatLng::new(0.0, 0.0))), LookupOutcome::Stale);
        assert_eq!(*game.session().unwrap().current_target().unwrap(), replacement);
    }

    #[test]
    fn test_stale_coverage_discarded_after_confirm() {
        let clock = clock();
        let mut game = GameSession::new();
        game.start_daily(&clock, None);

        let (stale, _) = game.begin_coverage_lookup().unwrap();
        game.confirm(&clock, None).unwrap();
        game.next_round().unwrap();
        let next_target = *game.session().unwrap().current_target().unwrap();

        assert_eq!(game.apply_coverage(stale, Some(LatLng::new(0.0, 0.0))), LookupOutcome::Stale);
        assert_eq!(*game.session().unwrap().current_target().unwrap(), next_target);
    }
}
