use garn_rs::entities::Placement;
use garn_rs::io::ext_repr::ExtPlacedPiece;
use serde::Serialize;

use crate::config::{GAConfig, NestConfig};

/// Solution document of the genetic pipeline.
#[derive(Serialize, Clone, Debug)]
pub struct GAOutput {
    pub config: GAConfig,
    /// Placement per piece, aligned to the expanded piece order
    pub placements: Vec<Option<Placement>>,
    pub piece_names: Vec<String>,
    /// Fitness score of the best individual
    pub fitness: f64,
    /// Sum of placed piece areas
    pub used_area: f64,
    pub placed: usize,
    pub expected: usize,
    /// Best fitness per generation
    pub history: Vec<f64>,
    /// Winning compaction strategy label
    pub compaction_strategy: String,
    pub compacted_bbox_area: f64,
    /// Final compacted polygons, as exported
    pub pieces: Vec<ExtPlacedPiece>,
}

/// Solution document of the heuristic nester.
#[derive(Serialize, Clone, Debug)]
pub struct NestOutput {
    pub config: NestConfig,
    /// Placement per piece, aligned to the expanded piece order
    pub placements: Vec<Option<Placement>>,
    pub piece_names: Vec<String>,
    pub placed: usize,
    pub expected: usize,
    /// Ids of pieces no valid position was found for
    pub failed: Vec<usize>,
    pub pieces: Vec<ExtPlacedPiece>,
}
