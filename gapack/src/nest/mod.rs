//! NFP-lite heuristic nester: a greedy one-pass placer over the same piece
//! set as the genetic pipeline, usable standalone or as a comparison
//! baseline. The no-fit polygon is approximated by a discretized candidate
//! search: a coarse grid over the fabric plus positions snapped to the
//! vertices of already-placed pieces.

mod candidates;

use garn_rs::collision::SpatialIndex;
use garn_rs::entities::{Fabric, Individual, Piece, Placement};
use garn_rs::geometry::GEOM_TOL;
use garn_rs::geometry::Transformation;
use garn_rs::geometry::boolean::overlaps;
use garn_rs::geometry::geo_traits::TransformableFrom;
use garn_rs::geometry::primitives::SPolygon;
use log::{debug, info};
use ordered_float::NotNan;
use std::cmp::Reverse;

use crate::config::NestConfig;
use candidates::{candidate_offsets, score};

/// Result of a heuristic nesting run.
#[derive(Clone, Debug)]
pub struct NestResult {
    pub individual: Individual,
    /// Committed polygons in placement order, paired with their piece ids
    pub placed: Vec<(usize, SPolygon)>,
    /// Ids of pieces no valid position was found for
    pub failed: Vec<usize>,
}

/// Greedy nester: pieces are processed once, largest area first; each is
/// committed at its best-scoring valid candidate position, with a dense
/// first-fit scan as fallback when no candidate survives.
pub struct HeuristicNester<'a> {
    pieces: &'a [Piece],
    fabric: Fabric,
    config: NestConfig,
    committed: Vec<(usize, SPolygon)>,
    index: SpatialIndex,
}

impl<'a> HeuristicNester<'a> {
    pub fn new(pieces: &'a [Piece], fabric: Fabric, config: NestConfig) -> Self {
        Self {
            pieces,
            fabric,
            config,
            committed: Vec::new(),
            index: SpatialIndex::empty(),
        }
    }

    pub fn solve(&mut self) -> NestResult {
        let mut order: Vec<usize> = (0..self.pieces.len()).collect();
        order.sort_by_key(|&id| {
            Reverse(NotNan::new(self.pieces[id].shape.area).expect("piece area is NaN"))
        });

        let mut individual = Individual::unplaced(self.pieces.len());
        let mut failed = Vec::new();

        for id in order {
            match self.place_piece(id) {
                Some(placement) => {
                    let poly = self.pieces[id].place(&placement);
                    individual.genes[id] = Some(placement);
                    self.commit(id, poly);
                }
                None => {
                    debug!("[NEST] no position for piece {}", self.pieces[id].name);
                    failed.push(id);
                }
            }
        }

        info!(
            "[NEST] placed {} of {} piece(s)",
            self.committed.len(),
            self.pieces.len()
        );

        NestResult {
            individual,
            placed: self.committed.clone(),
            failed,
        }
    }

    /// Best-scoring valid candidate over all orientations, falling back to a
    /// brute-force scan when the candidate generators come up empty.
    fn place_piece(&self, id: usize) -> Option<Placement> {
        let piece = &self.pieces[id];
        let mut best: Option<(Placement, f64)> = None;

        for &rotation in &piece.rotations {
            let oriented = Placement::new(0.0, 0.0, rotation).apply(&piece.shape);
            let mut buffer = oriented.clone();

            for (dx, dy) in candidate_offsets(&oriented.bbox, &self.fabric, &self.committed) {
                let translation = Transformation::from_translation((dx, dy));
                buffer.transform_from(&oriented, &translation);
                if !self.fabric.contains(&buffer.bbox) {
                    continue;
                }
                if self.collides(&buffer) {
                    continue;
                }
                let candidate_score = score(&buffer, &self.fabric, &self.committed);
                if best.is_none_or(|(_, best_score)| candidate_score > best_score) {
                    best = Some((Placement::new(dx, dy, rotation), candidate_score));
                }
            }
        }

        match best {
            Some((placement, _)) => Some(placement),
            None => self.brute_force(piece),
        }
    }

    fn collides(&self, candidate: &SPolygon) -> bool {
        self.index
            .query(&candidate.bbox)
            .any(|slot| overlaps(candidate, &self.committed[slot].1))
    }

    /// Dense fixed-step scan over the whole fabric, accepting the first
    /// valid position per orientation. Unscored.
    fn brute_force(&self, piece: &Piece) -> Option<Placement> {
        let step = self.config.brute_step;
        for &rotation in &piece.rotations {
            let oriented = Placement::new(0.0, 0.0, rotation).apply(&piece.shape);
            let mut buffer = oriented.clone();
            let (width, height) = (oriented.bbox.width(), oriented.bbox.height());

            let mut y = 0.0;
            while y + height <= self.fabric.height + GEOM_TOL {
                let mut x = 0.0;
                while x + width <= self.fabric.width + GEOM_TOL {
                    let (dx, dy) = (x - oriented.bbox.x_min, y - oriented.bbox.y_min);
                    let translation = Transformation::from_translation((dx, dy));
                    buffer.transform_from(&oriented, &translation);
                    if !self.collides(&buffer) {
                        return Some(Placement::new(dx, dy, rotation));
                    }
                    x += step;
                }
                y += step;
            }
        }
        None
    }

    /// Appends the placed polygon and rebuilds the index over the full
    /// committed set.
    fn commit(&mut self, id: usize, poly: SPolygon) {
        self.committed.push((id, poly));
        self.index = SpatialIndex::build(
            self.committed
                .iter()
                .enumerate()
                .map(|(slot, (_, poly))| (slot, poly.bbox)),
        );
    }
}
