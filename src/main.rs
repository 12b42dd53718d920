//! NewYawkr
//!
//! Plays today's daily puzzle end to end against the offline coverage
//! provider under the hard-mode round timer, persisting progress as it goes,
//! then checks that regenerating the puzzle reproduces it exactly.

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use newyawkr::{
    VERSION,
    config::{GameConfig, StoreConfig},
    core::clock::{today_string, Clock, SystemClock},
    game::{
        puzzle::{daily_puzzle, daily_seed},
        scoring::{format_distance, format_score},
        session::{GameSession, RoundPhase},
        state::{fingerprint, DAILY_ROUNDS},
    },
    hard_mode::play_timed_round,
    imagery::{resolve_coverage, BoundaryCoverage, ResolveOutcome},
    persist::progress::ProgressStore,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("NewYawkr v{}", VERSION);

    let game_config = GameConfig::from_env().context("loading game config")?;
    let store_config = StoreConfig::from_env().context("loading store config")?;
    let clock = SystemClock;

    demo_daily(&clock, &game_config, &store_config).await?;
    verify_determinism(&today_string(&clock))
}

/// Play the remaining rounds of today's puzzle, guessing each round's
/// region centroid.
async fn demo_daily(clock: &SystemClock, config: &GameConfig, store_config: &StoreConfig) -> Result<()> {
    let date = today_string(clock);
    info!("=== Daily Puzzle {} ===", date);
    info!("Seed: {}", daily_seed(&date));
    info!("Hard mode limit: {}s per round", config.hard_mode_time_limit.as_secs());

    let mut store = ProgressStore::from_config(store_config, clock);
    let saved = store.load();
    if let Some(p) = &saved {
        info!("Resuming at round {} with {} points", p.rounds_played, p.total_score);
    }

    let mut game = GameSession::new();
    game.start_daily(clock, saved.as_ref());

    while !game.should_finish(config) {
        // Write the previous round's save once its quiet period is over
        store.poll();

        let round = game.session().map_or(0, |s| s.current_round) + 1;
        let result = match resolve_coverage(&mut game, &BoundaryCoverage, config, clock).await? {
            ResolveOutcome::Ready(target) => {
                let pin = std::future::ready(target.region.centroid());
                play_timed_round(&mut game, clock, config.hard_mode_time_limit, pin).await?.guess
            }
            ResolveOutcome::GaveUp { attempts } => {
                warn!("No playable target after {} lookups, timing out round", attempts);
                game.confirm(clock, None)?.clone()
            }
        };
        info!(
            "Round {:>2}/{} [{}]: {} off, {} points",
            round,
            DAILY_ROUNDS,
            result.target.region.label(),
            result.distance_m.map_or_else(|| "timeout".to_string(), format_distance),
            format_score(result.score)
        );

        if let Some(snapshot) = game.progress_snapshot(clock) {
            store.save(snapshot.rounds_played, &snapshot.guesses, snapshot.total_score, snapshot.complete);
        }

        if game.next_round()? == RoundPhase::Complete {
            break;
        }
    }

    let session = game.session().context("session vanished")?;
    info!("=== Results ===");
    info!(
        "Total: {} / {}",
        format_score(session.total_score),
        format_score(session.max_possible_score())
    );
    if let Some(worst) = session.worst_distance() {
        info!("Worst miss: {}", format_distance(worst));
    }

    store.flush();
    info!("Progress saved at {}", clock.now_millis());
    Ok(())
}

fn verify_determinism(date: &str) -> Result<()> {
    info!("=== Verifying Determinism ===");
    let first = fingerprint(&daily_puzzle(date));
    let second = fingerprint(&daily_puzzle(date));

    info!("Puzzle Hash: {}", hex::encode(first));
    info!("Replay Hash: {}", hex::encode(second));

    if first != second {
        bail!("DETERMINISM FAILURE: hashes differ for {}", date);
    }
    info!("DETERMINISM VERIFIED: Hashes match!");
    Ok(())
}
