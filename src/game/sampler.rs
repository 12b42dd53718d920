//! Location Sampling
//!
//! Rejection sampling of uniformly distributed points inside a region.
//! The draw order (lat then lng, per attempt) and the attempt cap are part of
//! the daily puzzle contract: changing either changes every puzzle.

use tracing::warn;

use crate::core::geo::LatLng;
use crate::core::rng::DeterministicRng;
use crate::game::region::{BoundingBox, Region, point_in_polygon, vertex_centroid};
use crate::game::state::Location;

/// Attempts before falling back to the vertex centroid.
pub const MAX_SAMPLE_ATTEMPTS: u32 = 1000;

/// Draw a point inside `region`.
///
/// Always returns a location: if no point lands inside within
/// [`MAX_SAMPLE_ATTEMPTS`], the boundary's vertex centroid is returned as is.
pub fn sample_location(region: Region, rng: &mut DeterministicRng) -> Location {
    sample_in_polygon(region, region.boundary(), rng)
}

/// Draw a point inside an arbitrary boundary, tagged with `region`.
///
/// Each attempt consumes exactly two draws: latitude, then longitude.
pub fn sample_in_polygon(
    region: Region,
    boundary: &[LatLng],
    rng: &mut DeterministicRng,
) -> Location {
    let bounds = BoundingBox::of(boundary);

    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let lat = bounds.min_lat + rng.next_f64() * (bounds.max_lat - bounds.min_lat);
        let lng = bounds.min_lng + rng.next_f64() * (bounds.max_lng - bounds.min_lng);

        if point_in_polygon(lat, lng, boundary) {
            return Location::new(lat, lng, region);
        }
    }

    let centroid = vertex_centroid(boundary);
    warn!(
        "No point found in {} after {} attempts, using centroid ({:.6}, {:.6})",
        region, MAX_SAMPLE_ATTEMPTS, centroid.lat, centroid.lng
    );
    Location::new(centroid.lat, centroid.lng, region)
}
