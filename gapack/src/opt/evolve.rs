use garn_rs::entities::{Individual, Instance, Piece};
use log::{debug, info, warn};
use ordered_float::NotNan;
use rand::Rng;
use rand::prelude::{IndexedRandom, SmallRng};

use crate::config::GAConfig;
use crate::opt::fitness::{self, FitnessReport};
use crate::opt::repair::repair;
use crate::opt::seed::best_axis_pack;

/// Result of a full evolutionary run.
#[derive(Clone, Debug)]
pub struct EvolveReport {
    /// Best individual seen across the entire run, regardless of whether it
    /// is still a member of the final population
    pub best: Individual,
    pub best_fitness: FitnessReport,
    /// Best fitness per generation
    pub history: Vec<f64>,
    /// Best (individual, score) per generation
    pub generation_bests: Vec<(Individual, f64)>,
}

impl EvolveReport {
    pub fn succeeded(&self) -> bool {
        self.best.placed_count() > 0
    }
}

/// Generational genetic optimizer over piece placements.
///
/// The population is seeded with identical copies of the greedy axis pack;
/// diversity emerges from crossover and mutation. Selection is tournament
/// based, replacement is fully generational, and every candidate passes
/// through repair before it can enter the population.
pub struct Evolver {
    pub instance: Instance,
    pub config: GAConfig,
    /// SmallRng is a fast, non-cryptographic PRNG <https://rust-random.github.io/book/guide-rngs.html>
    pub rng: SmallRng,
}

impl Evolver {
    pub fn new(instance: Instance, config: GAConfig, rng: SmallRng) -> Self {
        assert!(config.pop_size > 0);
        assert!(config.tournament_size > 0);
        Self {
            instance,
            config,
            rng,
        }
    }

    pub fn solve(&mut self) -> EvolveReport {
        let pieces = &self.instance.pieces;
        let fabric = self.instance.fabric;
        let config = self.config;

        let Some(seed) = best_axis_pack(pieces, &fabric, config.seed_margin) else {
            warn!("[GA] neither seed packer produced a feasible layout, reporting failure");
            let best = Individual::unplaced(pieces.len());
            let best_fitness = fitness::evaluate(&best, pieces, &fabric);
            return EvolveReport {
                best,
                best_fitness,
                history: vec![],
                generation_bests: vec![],
            };
        };
        info!("[SEED] initial layout places {} piece(s)", seed.placed_count());

        let mut population = vec![seed; config.pop_size];
        let mut scored: Vec<FitnessReport> = population
            .iter()
            .map(|individual| fitness::evaluate(individual, pieces, &fabric))
            .collect();

        let seed_best = best_index(&scored);
        let mut best = population[seed_best].clone();
        let mut best_fitness = scored[seed_best];

        let mut history = Vec::with_capacity(config.generations);
        let mut generation_bests = Vec::with_capacity(config.generations);

        for generation in 0..config.generations {
            let mut offspring = Vec::with_capacity(config.pop_size);
            for _ in 0..config.pop_size {
                let parent_1 =
                    tournament(&population, &scored, config.tournament_size, &mut self.rng);
                let parent_2 =
                    tournament(&population, &scored, config.tournament_size, &mut self.rng);
                let mut child = uniform_crossover(parent_1, parent_2, &mut self.rng);
                mutate(&mut child, pieces, &config, &mut self.rng);
                repair(&mut child, pieces, &fabric);
                if child.placed_count() > 0 {
                    offspring.push(child);
                }
            }

            match offspring.is_empty() {
                true => debug!("[GA] generation {}: no viable offspring, population reused", generation + 1),
                false => {
                    //cycle the viable offspring to restore the fixed population size
                    let viable = offspring.len();
                    for k in viable..config.pop_size {
                        offspring.push(offspring[k % viable].clone());
                    }
                    population = offspring;
                    scored = population
                        .iter()
                        .map(|individual| fitness::evaluate(individual, pieces, &fabric))
                        .collect();
                }
            }

            let gen_best = best_index(&scored);
            let gen_score = scored[gen_best].score;
            if gen_score > best_fitness.score {
                best = population[gen_best].clone();
                best_fitness = scored[gen_best];
            }
            history.push(gen_score);
            generation_bests.push((population[gen_best].clone(), gen_score));
            info!("[GA] generation {}: best fitness {:.2}", generation + 1, gen_score);
        }

        info!(
            "[GA] finished: best fitness {:.2}, {}/{} piece(s) placed",
            best_fitness.score,
            best.placed_count(),
            pieces.len()
        );

        EvolveReport {
            best,
            best_fitness,
            history,
            generation_bests,
        }
    }
}

fn best_index(scored: &[FitnessReport]) -> usize {
    scored
        .iter()
        .enumerate()
        .max_by_key(|(_, report)| NotNan::new(report.score).expect("fitness is NaN"))
        .map(|(i, _)| i)
        .expect("population is empty")
}

/// Tournament selection with replacement: the highest-fitness sample wins.
fn tournament<'a>(
    population: &'a [Individual],
    scored: &[FitnessReport],
    size: usize,
    rng: &mut SmallRng,
) -> &'a Individual {
    let mut winner = rng.random_range(0..population.len());
    for _ in 1..size {
        let challenger = rng.random_range(0..population.len());
        if scored[challenger].score > scored[winner].score {
            winner = challenger;
        }
    }
    &population[winner]
}

/// Uniform crossover: each gene is taken wholesale from either parent with
/// equal probability.
fn uniform_crossover(a: &Individual, b: &Individual, rng: &mut SmallRng) -> Individual {
    let genes = a
        .genes
        .iter()
        .zip(&b.genes)
        .map(|(gene_a, gene_b)| match rng.random_bool(0.5) {
            true => *gene_a,
            false => *gene_b,
        })
        .collect();
    Individual { genes }
}

/// Perturbs set genes in place: x and y independently by uniform noise, the
/// rotation by a fresh draw from the piece's rotation set.
fn mutate(individual: &mut Individual, pieces: &[Piece], config: &GAConfig, rng: &mut SmallRng) {
    for (id, gene) in individual.genes.iter_mut().enumerate() {
        let Some(placement) = gene.as_mut() else {
            continue;
        };
        if rng.random_bool(config.mutation_rate) {
            placement.x += rng.random_range(-config.perturb_range..=config.perturb_range);
        }
        if rng.random_bool(config.mutation_rate) {
            placement.y += rng.random_range(-config.perturb_range..=config.perturb_range);
        }
        if rng.random_bool(config.mutation_rate) {
            if let Some(rotation) = pieces[id].rotations.choose(rng) {
                placement.rotation = *rotation;
            }
        }
    }
}
