//! Hard Mode Round Timer
//!
//! In hard mode each round has a time limit. The player's pin arrives as a
//! future; if it doesn't resolve before the limit the round is confirmed
//! with whatever guess is staged (a timeout when nothing is). Either way the
//! round is confirmed exactly once.

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info};

use crate::core::clock::Clock;
use crate::core::geo::LatLng;
use crate::game::session::{GameSession, RoundPhase, SessionError};
use crate::game::state::Guess;

/// A round played against the clock.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedRound {
    /// The scored round.
    pub guess: Guess,
    /// The limit ran out before the player confirmed.
    pub expired: bool,
}

/// Wait up to `limit` for the player's pin, then confirm the round.
///
/// A pin arriving in time replaces any staged guess. On expiry the staged
/// guess, if any, is scored as-is.
pub async fn play_timed_round<F>(
    game: &mut GameSession,
    clock: &impl Clock,
    limit: Duration,
    pin: F,
) -> Result<TimedRound, SessionError>
where
    F: Future<Output = LatLng>,
{
    let round = match game.phase() {
        None => return Err(SessionError::NoSession),
        Some(RoundPhase::Complete) => return Err(SessionError::SessionComplete),
        Some(RoundPhase::RoundResolved { .. }) => return Err(SessionError::RoundNotActive),
        Some(RoundPhase::AwaitingGuess { round }) => round,
    };

    let expired = match timeout(limit, pin).await {
        Ok(coord) => {
            debug!("Round {} pinned at ({:.6}, {:.6})", round, coord.lat, coord.lng);
            game.record_guess(coord.lat, coord.lng)?;
            false
        }
        Err(_) => {
            info!("Round {} ran out of time after {}s", round, limit.as_secs());
            true
        }
    };

    let guess = game.confirm(clock, None)?.clone();
    Ok(TimedRound { guess, expired })
}
