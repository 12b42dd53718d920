//! Imagery Coverage
//!
//! A sampled target is only playable if street-level imagery exists near it.
//! The lookup itself lives outside the core behind [`CoverageProvider`]; this
//! module drives it against a [`GameSession`]: snap the target to the
//! panorama on success, regenerate and retry on a miss, give up after
//! `max_coverage_retries` regenerations.

use std::future::Future;

use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::GameConfig;
use crate::core::clock::Clock;
use crate::core::geo::LatLng;
use crate::game::region::Region;
use crate::game::session::{GameSession, LookupOutcome, LookupTicket, SessionError};
use crate::game::state::Location;

/// Coverage lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoverageError {
    /// Provider couldn't be reached.
    #[error("Coverage provider unavailable: {0}")]
    Unavailable(String),

    /// Lookup didn't finish in time.
    #[error("Coverage lookup timed out")]
    TimedOut,
}

/// Finds the nearest panorama to a point.
pub trait CoverageProvider {
    /// Nearest panorama within `radius_m` of `at`, or `None` if there is none.
    fn find_coverage(
        &self,
        at: LatLng,
        radius_m: f64,
    ) -> impl Future<Output = Result<Option<LatLng>, CoverageError>>;
}

/// Result of resolving the current round's target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolveOutcome {
    /// Target snapped to a panorama and ready to play.
    Ready(Location),
    /// Every regeneration came back without coverage.
    GaveUp {
        /// Lookups issued.
        attempts: u32,
    },
}

/// Run one lookup without holding the session.
///
/// The returned ticket goes back to [`GameSession::apply_coverage`], which
/// discards it if the target changed in the meantime. Errors and timeouts
/// are reported as no coverage.
pub async fn lookup<P: CoverageProvider>(
    provider: &P,
    ticket: LookupTicket,
    target: Location,
    config: &GameConfig,
) -> (LookupTicket, Option<LatLng>) {
    let result = timeout(
        config.coverage_timeout,
        provider.find_coverage(target.coord(), config.coverage_radius_m),
    )
    .await
    .unwrap_or(Err(CoverageError::TimedOut));

    match result {
        Ok(found) => (ticket, found),
        Err(e) => {
            warn!("Coverage lookup for round {} failed: {}", ticket.round, e);
            (ticket, None)
        }
    }
}

/// Resolve coverage for the current target, regenerating on misses.
pub async fn resolve_coverage<P: CoverageProvider>(
    game: &mut GameSession,
    provider: &P,
    config: &GameConfig,
    clock: &impl Clock,
) -> Result<ResolveOutcome, SessionError> {
    let mut attempts = 0u32;
    let mut regenerations = 0u32;

    loop {
        let (ticket, target) = game
            .begin_coverage_lookup()
            .ok_or(if game.session().is_some() {
                SessionError::SessionComplete
            } else {
                SessionError::NoSession
            })?;

        attempts += 1;
        let (ticket, found) = lookup(provider, ticket, target, config).await;

        match game.apply_coverage(ticket, found) {
            LookupOutcome::Snapped(location) => {
                debug!("Round {} ready after {} lookup(s)", ticket.round, attempts);
                return Ok(ResolveOutcome::Ready(location));
            }
            LookupOutcome::Stale => continue,
            LookupOutcome::NoCoverage => {
                if regenerations >= config.max_coverage_retries {
                    warn!(
                        "No coverage for round {} after {} regenerations",
                        ticket.round, regenerations
                    );
                    return Ok(ResolveOutcome::GaveUp { attempts });
                }
                regenerations += 1;
                game.regenerate_current_location(clock)?;
            }
        }
    }
}

/// Offline provider: any point inside a region boundary has coverage at
/// exactly that point.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundaryCoverage;

impl CoverageProvider for BoundaryCoverage {
    async fn find_coverage(&self, at: LatLng, _radius_m: f64) -> Result<Option<LatLng>, CoverageError> {
        let covered = Region::ALL.iter().any(|r| r.contains(at.lat, at.lng));
        if covered {
            debug!("Coverage at ({:.6}, {:.6})", at.lat, at.lng);
        }
        Ok(covered.then_some(at))
    }
}

// =============================================================================
// TESTS
// =============================================================================
