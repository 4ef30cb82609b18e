use garn_rs::collision::SpatialIndex;
use garn_rs::entities::{Fabric, Individual, Piece};
use garn_rs::geometry::boolean::overlaps;
use garn_rs::geometry::geo_traits::Shape;

/// Penalty per piece whose bounding box leaves the fabric.
pub const BOUNDS_PENALTY: f64 = 1e5;
/// Penalty per pair of overlapping pieces. Must dominate any feasible number
/// of bounds violations so that non-overlapping layouts always rank higher.
pub const OVERLAP_PENALTY: f64 = 1e9;

/// Outcome of evaluating one individual.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitnessReport {
    /// Sum of placed piece areas minus penalties. Unbounded below.
    pub score: f64,
    /// Sum of placed piece areas, before penalties
    pub used_area: f64,
    pub placed: usize,
    pub out_of_bounds: usize,
    pub overlapping_pairs: usize,
}

impl FitnessReport {
    pub fn is_valid(&self) -> bool {
        self.out_of_bounds == 0 && self.overlapping_pairs == 0
    }
}

/// Scores a layout: utilized area minus penalties for boundary violations
/// and pairwise overlaps. Pair candidates are pruned through a bounding-box
/// index before the exact intersection tests.
pub fn evaluate(individual: &Individual, pieces: &[Piece], fabric: &Fabric) -> FitnessReport {
    let placed = individual.placed_polygons(pieces);

    let mut used_area = 0.0;
    let mut out_of_bounds = 0;
    for (_, poly) in &placed {
        used_area += poly.area();
        if !fabric.contains(&poly.bbox) {
            out_of_bounds += 1;
        }
    }

    let index = SpatialIndex::build(
        placed
            .iter()
            .enumerate()
            .map(|(slot, (_, poly))| (slot, poly.bbox)),
    );
    let mut overlapping_pairs = 0;
    for (slot, (_, poly)) in placed.iter().enumerate() {
        for candidate in index.query(&poly.bbox) {
            if candidate > slot && overlaps(poly, &placed[candidate].1) {
                overlapping_pairs += 1;
            }
        }
    }

    let score = used_area
        - out_of_bounds as f64 * BOUNDS_PENALTY
        - overlapping_pairs as f64 * OVERLAP_PENALTY;
    FitnessReport {
        score,
        used_area,
        placed: placed.len(),
        out_of_bounds,
        overlapping_pairs,
    }
}
