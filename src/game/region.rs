//! City Regions
//!
//! The five boroughs, their traced boundary polygons, and the geometry used
//! to sample inside them: bounding boxes, even-odd containment, centroids.
//! Boundaries are compile-time constants and never change at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};

use crate::core::geo::LatLng;

/// One of the five named city subdivisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Region {
    /// New York County.
    Manhattan = 0,
    /// Kings County.
    Brooklyn = 1,
    /// Queens County.
    Queens = 2,
    /// Bronx County.
    Bronx = 3,
    /// The outer region; excluded from daily puzzles.
    StatenIsland = 4,
}

impl Region {
    /// Every region, in canonical order.
    pub const ALL: [Region; 5] = [
        Region::Manhattan,
        Region::Brooklyn,
        Region::Queens,
        Region::Bronx,
        Region::StatenIsland,
    ];

    /// Regions used by the daily puzzle, in sampling order.
    ///
    /// This order is part of the daily seed contract.
    pub const DAILY: [Region; 4] = [
        Region::Manhattan,
        Region::Brooklyn,
        Region::Queens,
        Region::Bronx,
    ];

    /// Boundary polygon as `(lat, lng)` vertices.
    pub fn boundary(self) -> &'static [LatLng] {
        match self {
            Region::Manhattan => MANHATTAN_BOUNDARY,
            Region::Brooklyn => BROOKLYN_BOUNDARY,
            Region::Queens => QUEENS_BOUNDARY,
            Region::Bronx => BRONX_BOUNDARY,
            Region::StatenIsland => STATEN_ISLAND_BOUNDARY,
        }
    }

    /// Bounding box of the boundary.
    pub fn bounding_box(self) -> BoundingBox {
        BoundingBox::of(self.boundary())
    }

    /// Even-odd containment test against the boundary.
    pub fn contains(self, lat: f64, lng: f64) -> bool {
        point_in_polygon(lat, lng, self.boundary())
    }

    /// Arithmetic mean of the boundary vertices.
    pub fn centroid(self) -> LatLng {
        vertex_centroid(self.boundary())
    }

    /// Stable snake_case identifier (matches the serialized form).
    pub fn id(self) -> &'static str {
        match self {
            Region::Manhattan => "manhattan",
            Region::Brooklyn => "brooklyn",
            Region::Queens => "queens",
            Region::Bronx => "bronx",
            Region::StatenIsland => "staten_island",
        }
    }

    /// Human readable name.
    pub fn name(self) -> &'static str {
        match self {
            Region::Manhattan => "Manhattan",
            Region::Brooklyn => "Brooklyn",
            Region::Queens => "Queens",
            Region::Bronx => "The Bronx",
            Region::StatenIsland => "Staten Island",
        }
    }

    /// Three-letter label for compact result grids.
    pub fn label(self) -> &'static str {
        match self {
            Region::Manhattan => "MAN",
            Region::Brooklyn => "BRK",
            Region::Queens => "QNS",
            Region::Bronx => "BRX",
            Region::StatenIsland => "SI",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognised region identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown region: {0}")]
pub struct UnknownRegion(pub String);

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.id() == s)
            .ok_or_else(|| UnknownRegion(s.to_string()))
    }
}

// =============================================================================
// GEOMETRY
// =============================================================================

/// Axis-aligned latitude/longitude bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Southern edge.
    pub min_lat: f64,
    /// Northern edge.
    pub max_lat: f64,
    /// Western edge.
    pub min_lng: f64,
    /// Eastern edge.
    pub max_lng: f64,
}

impl BoundingBox {
    /// Min/max reduction over a vertex list.
    pub fn of(vertices: &[LatLng]) -> Self {
        vertices.iter().fold(
            BoundingBox {
                min_lat: f64::INFINITY,
                max_lat: f64::NEG_INFINITY,
                min_lng: f64::INFINITY,
                max_lng: f64::NEG_INFINITY,
            },
            |b, p| BoundingBox {
                min_lat: b.min_lat.min(p.lat),
                max_lat: b.max_lat.max(p.lat),
                min_lng: b.min_lng.min(p.lng),
                max_lng: b.max_lng.max(p.lng),
            },
        )
    }

    /// Inclusive containment.
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lng >= self.min_lng && lng <= self.max_lng
    }
}

/// Even-odd ray casting towards increasing longitude.
///
/// Points exactly on an edge may land on either side.
pub fn point_in_polygon(lat: f64, lng: f64, polygon: &[LatLng]) -> bool {
    let mut inside = false;
    let mut j = match polygon.len() {
        0 => return false,
        n => n - 1,
    };
    for (i, vi) in polygon.iter().enumerate() {
        let vj = polygon[j];
        let (yi, xi) = (vi.lat, vi.lng);
        let (yj, xj) = (vj.lat, vj.lng);

        if (yi > lat) != (yj > lat) && lng < (xj - xi) * (lat - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Mean of all vertex latitudes and longitudes.
pub fn vertex_centroid(polygon: &[LatLng]) -> LatLng {
    let n = polygon.len() as f64;
    let lat = polygon.iter().fold(0.0, |sum, p| sum + p.lat) / n;
    let lng = polygon.iter().fold(0.0, |sum, p| sum + p.lng) / n;
    LatLng::new(lat, lng)
}

// =============================================================================
// BOUNDARY DATA
// =============================================================================
// Traced from official borough lines, (lat, lng) order.

const MANHATTAN_BOUNDARY: &[LatLng] = &[
    LatLng::new(40.68126433858643, -74.0291517567261),
    LatLng::new(40.76149713162689, -74.01029837708306),
    LatLng::new(40.87864424060163, -73.92723757376679),
    LatLng::new(40.87240746885964, -73.90781521796612),
    LatLng::new(40.836275044173334, -73.93213736923651),
    LatLng::new(40.807000325663154, -73.93282979929154),
    LatLng::new(40.80960958473422, -73.9342233763734),
    LatLng::new(40.806477652330976, -73.93282926503568),
    LatLng::new(40.79546675057071, -73.91140708962105),
    LatLng::new(40.7808201182952, -73.93011959754004),
    LatLng::new(40.77821465669549, -73.93909586153207),
    LatLng::new(40.771929716083044, -73.93634626673534),
    LatLng::new(40.771933065673096, -73.93841285710289),
    LatLng::new(40.73845164565836, -73.96540154779102),
    LatLng::new(40.73531264440969, -73.96816775356079),
    LatLng::new(40.70864842394448, -73.97375303941509),
    LatLng::new(40.7096926327299, -73.97305989754712),
    LatLng::new(40.70460573396007, -74.00046585504396),
    LatLng::new(40.68715237163914, -74.0100793764405),
];

const BROOKLYN_BOUNDARY: &[LatLng] = &[
    LatLng::new(40.73629386897676, -73.96444230590834),
    LatLng::new(40.740634030826925, -73.95802580359617),
    LatLng::new(40.73671183072771, -73.94005673037316),
    LatLng::new(40.731358453815425, -73.93749275164627),
    LatLng::new(40.72892269601986, -73.92979131085069),
    LatLng::new(40.68316356477681, -73.897149089712),
    LatLng::new(40.693858436821436, -73.86887013699231),
    LatLng::new(40.64519449519324, -73.85284500542429),
    LatLng::new(40.62426791765585, -73.88814732333088),
    LatLng::new(40.57751653986169, -73.8734816946647),
    LatLng::new(40.56858318096941, -74.00890802249643),
    LatLng::new(40.625401945100826, -74.05112935901697),
    LatLng::new(40.66293339266549, -74.01846336291977),
    LatLng::new(40.68020899154909, -74.02044337137328),
];

const QUEENS_BOUNDARY: &[LatLng] = &[
    LatLng::new(40.73862099476879, -73.96910413124213),
    LatLng::new(40.770419420374125, -73.9414112108164),
    LatLng::new(40.78011889869474, -73.93573007235709),
    LatLng::new(40.77954149502072, -73.92717660653416),
    LatLng::new(40.791981443282545, -73.91012824783112),
    LatLng::new(40.78333245534953, -73.87455781239036),
    LatLng::new(40.7979123742779, -73.85676458969195),
    LatLng::new(40.80003799689737, -73.77919009530689),
    LatLng::new(40.75354920142421, -73.70116726796496),
    LatLng::new(40.751935330811484, -73.69974315594015),
    LatLng::new(40.72986499517277, -73.69766392509482),
    LatLng::new(40.7239811702012, -73.72824472475571),
    LatLng::new(40.596900853721, -73.73482065264014),
    LatLng::new(40.53607200309264, -73.94324422179844),
    LatLng::new(40.55599589386053, -73.9532001939263),
    LatLng::new(40.59272332046096, -73.84615472839401),
    LatLng::new(40.6955247474601, -73.8717315901404),
    LatLng::new(40.68417623489565, -73.89582891222894),
    LatLng::new(40.72834785379519, -73.9300173909308),
    LatLng::new(40.729959112167016, -73.93783755625022),
    LatLng::new(40.73642022673035, -73.94282669274806),
    LatLng::new(40.74022234336197, -73.95780201616941),
];

const BRONX_BOUNDARY: &[LatLng] = &[
    LatLng::new(40.91447105119144, -73.9130607825868),
    LatLng::new(40.901088933509044, -73.85969071239772),
    LatLng::new(40.90712757030269, -73.85328114297972),
    LatLng::new(40.904386633175825, -73.84085957793967),
    LatLng::new(40.89439239027338, -73.83845632445005),
    LatLng::new(40.88045904133593, -73.78063942323618),
    LatLng::new(40.881064651833306, -73.77903275722456),
    LatLng::new(40.8398061546862, -73.7778967292317),
    LatLng::new(40.84011059421668, -73.77909966092358),
    LatLng::new(40.80371416241037, -73.78716885661343),
    LatLng::new(40.802551320177955, -73.85649789962453),
    LatLng::new(40.78284056242357, -73.87334286097185),
    LatLng::new(40.798917255377035, -73.92221673488268),
    LatLng::new(40.808923708164365, -73.93464291181544),
    LatLng::new(40.83469903837089, -73.93424982908125),
    LatLng::new(40.835605737466395, -73.93464869981773),
    LatLng::new(40.87140083691761, -73.91020540602685),
    LatLng::new(40.878398708898644, -73.9286652653061),
];

const STATEN_ISLAND_BOUNDARY: &[LatLng] = &[
    LatLng::new(40.64626394680467, -74.1775395310462),
    LatLng::new(40.64296956509763, -74.12596268428277),
    LatLng::new(40.650791816041654, -74.07269398030843),
    LatLng::new(40.62451181921219, -74.06964714338302),
    LatLng::new(40.600487919053485, -74.05062154882371),
    LatLng::new(40.60015949511812, -74.0510555502427),
    LatLng::new(40.527857179329665, -74.13473971115262),
    LatLng::new(40.49236994086907, -74.2514890246737),
    LatLng::new(40.50944558677322, -74.25714438040123),
    LatLng::new(40.52294403815129, -74.24461452095309),
    LatLng::new(40.54595712500419, -74.24895404240392),
    LatLng::new(40.557145803393496, -74.22473072265875),
    LatLng::new(40.55910964528681, -74.21477279465734),
    LatLng::new(40.59364997898164, -74.20525432225011),
    LatLng::new(40.59792510281852, -74.20092339980931),
    LatLng::new(40.632046642841516, -74.20090735998758),
];

// =============================================================================
// TESTS
// =============================================================================
