use serde::{Deserialize, Serialize};

/// Configuration for the genetic optimizer and its compaction post-pass.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct GAConfig {
    /// Number of individuals per generation
    pub pop_size: usize,
    /// Fixed number of generations, the sole termination criterion
    pub generations: usize,
    /// Independent per-gene probability of perturbing x, y and rotation
    pub mutation_rate: f64,
    /// Mutation offsets are drawn uniformly from [-perturb_range, perturb_range]
    pub perturb_range: f64,
    /// Tournament size for parent selection
    pub tournament_size: usize,
    /// Gap the seed packers leave between pieces
    pub seed_margin: f64,
    /// Gap the scanline compactor leaves between pieces
    pub compact_margin: f64,
    /// Seed for the PRNG. If undefined, the run is non-deterministic using entropy
    pub prng_seed: Option<u64>,
}

impl Default for GAConfig {
    fn default() -> Self {
        Self {
            pop_size: 50,
            generations: 70,
            mutation_rate: 0.1,
            perturb_range: 20.0,
            tournament_size: 3,
            seed_margin: 10.0,
            compact_margin: 7.0,
            prng_seed: Some(0),
        }
    }
}

/// Configuration for the heuristic nester.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct NestConfig {
    /// Step of the exhaustive fallback scan over the fabric
    pub brute_step: f64,
}

impl Default for NestConfig {
    fn default() -> Self {
        Self { brute_step: 5.0 }
    }
}
