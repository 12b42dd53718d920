//! Puzzle Sequencing
//!
//! Daily puzzles are a pure function of the date string: one generator
//! seeded from `newyawkr-<date>` samples 3 points per daily region in region
//! order, then Fisher-Yates shuffles the 12 locations with further draws
//! from the same generator. Endless locations use a freshly minted seed per
//! call and carry no cross-call determinism.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::core::clock::Clock;
use crate::core::rng::DeterministicRng;
use crate::game::region::Region;
use crate::game::sampler::sample_location;
use crate::game::state::Location;

/// Prefix for daily puzzle seeds.
pub const DAILY_SEED_PREFIX: &str = "newyawkr";

/// Locations sampled per daily region.
pub const LOCATIONS_PER_REGION: usize = 3;

/// Seed string for a date (`YYYY-MM-DD`).
pub fn daily_seed(date: &str) -> String {
    format!("{DAILY_SEED_PREFIX}-{date}")
}

/// The 12 target locations for a date, in play order.
pub fn daily_puzzle(date: &str) -> Vec<Location> {
    let mut rng = DeterministicRng::seeded(&daily_seed(date));
    let mut locations = Vec::with_capacity(Region::DAILY.len() * LOCATIONS_PER_REGION);

    for region in Region::DAILY {
        for _ in 0..LOCATIONS_PER_REGION {
            locations.push(sample_location(region, &mut rng));
        }
    }

    // Shuffle so regions aren't grouped
    rng.shuffle(&mut locations);

    debug!("Generated daily puzzle for {}: {} locations", date, locations.len());
    locations
}

static ENDLESS_SEEDS: AtomicU64 = AtomicU64::new(0);
static REGENERATE_SEEDS: AtomicU64 = AtomicU64::new(0);

/// Mints unique seed strings from wall time and a process-wide counter.
///
/// Every minter with the same prefix shares one counter, so two mints in
/// the same millisecond differ even across sessions.
#[derive(Clone, Copy, Debug)]
pub struct SeedMinter {
    prefix: &'static str,
    counter: &'static AtomicU64,
}

impl SeedMinter {
    /// Seeds for endless rounds.
    pub const fn endless() -> Self {
        Self { prefix: "endless", counter: &ENDLESS_SEEDS }
    }

    /// Seeds for replacing a location without coverage.
    pub const fn regenerate() -> Self {
        Self { prefix: "regenerate", counter: &REGENERATE_SEEDS }
    }

    /// Next seed: `<prefix>-<millis>-<counter>`.
    pub fn mint(&self, clock: &impl Clock) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}-{}", self.prefix, clock.now_millis(), n)
    }
}

/// One endless-mode location from an explicit seed.
///
/// The first draw picks the region (`floor(r * len)`), later draws sample
/// inside it. An empty `regions` list means every region.
pub fn endless_location_from_seed(regions: &[Region], seed: &str) -> Location {
    let regions = if regions.is_empty() { &Region::ALL[..] } else { regions };
    let mut rng = DeterministicRng::seeded(seed);
    let region = regions[rng.next_index(regions.len())];
    sample_location(region, &mut rng)
}

/// One endless-mode location with a freshly minted seed.
pub fn endless_location(
    regions: &[Region],
    minter: &SeedMinter,
    clock: &impl Clock,
) -> Location {
    let seed = minter.mint(clock);
    endless_location_from_seed(regions, &seed)
}

// =============================================================================
// TESTS
// =============================================================================
