//! Genetic Path Order Optimization
//!
//! Permutation GA that reorders the interior of a waypoint sequence to
//! trade total path length against turning smoothness. The first and last
//! waypoints are fixed anchors.
//!
//! # Features
//!
//! - Ordered crossover (OX) over element identity
//! - Swap mutation and tournament selection
//! - Best-ever elitism across generations
//! - Optional seed for reproducible runs
//!
//! # Example
//!
//! ```rust
//! use plaster_core::Waypoint;
//! use plaster_planner::algorithms::genetic::{GeneticConfig, GeneticOptimizer};
//!
//! let optimizer = GeneticOptimizer::new(GeneticConfig {
//!     seed: Some(7),
//!     ..GeneticConfig::default()
//! });
//!
//! let path = vec![
//!     Waypoint::new(0.0, 0.0),
//!     Waypoint::new(2.0, 2.0),
//!     Waypoint::new(1.0, 1.0),
//!     Waypoint::new(3.0, 3.0),
//! ];
//! let optimized = optimizer.optimize(&path);
//! assert_eq!(optimized.first(), path.first());
//! assert_eq!(optimized.last(), path.last());
//! ```

use crate::algorithms::geometry;
use nalgebra::Vector2;
use plaster_core::surface::Waypoint;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use std::f64::consts::PI;

/// Segment vectors shorter than this carry no turn angle
const MIN_SEGMENT_LENGTH: f64 = 1e-6;

/// GA tunables
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneticConfig {
    /// Individuals per generation
    pub population_size: usize,
    /// Evolution rounds
    pub generations: usize,
    /// Per-child probability of a swap mutation
    pub mutation_rate: f64,
    /// Per-child probability of OX crossover (otherwise the parent is
    /// cloned)
    pub crossover_rate: f64,
    /// Selection pool size per tournament
    pub tournament_size: usize,
    /// RNG seed; unseeded runs draw from entropy
    pub seed: Option<u64>,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 30,
            mutation_rate: 0.1,
            crossover_rate: 0.8,
            tournament_size: 3,
            seed: None,
        }
    }
}

/// Genetic waypoint order optimizer
pub struct GeneticOptimizer {
    config: GeneticConfig,
}

/// An individual: a permutation of interior waypoint indices
///
/// Permuting indices rather than coordinates keeps coordinate-equal
/// waypoints distinguishable through crossover; coordinate deduplication
/// happens only at the input and output boundaries.
type Individual = Vec<usize>;

impl GeneticOptimizer {
    /// Create an optimizer with the given configuration
    pub fn new(config: GeneticConfig) -> Self {
        Self { config }
    }

    /// Reorder the interior of a waypoint sequence
    ///
    /// Inputs with two or fewer distinct waypoints are returned unchanged.
    /// The output is deduplicated at 1 mm precision.
    pub fn optimize(&self, waypoints: &[Waypoint]) -> Vec<Waypoint> {
        if waypoints.len() <= 2 {
            return waypoints.to_vec();
        }

        // Coverage paths stitched with A* segments may revisit cells
        let waypoints = dedupe_waypoints(waypoints);
        if waypoints.len() <= 2 {
            return waypoints;
        }

        let start = waypoints[0];
        let end = waypoints[waypoints.len() - 1];
        let interior = &waypoints[1..waypoints.len() - 1];
        if interior.len() <= 1 {
            return waypoints;
        }

        let mut rng = match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let population_size = self.config.population_size.max(2);
        let mut population = self.initial_population(interior.len(), population_size, &mut rng);

        let mut best_fitness = f64::NEG_INFINITY;
        let mut best: Individual = (0..interior.len()).collect();

        for _ in 0..self.config.generations {
            let fitness_scores: Vec<f64> = population
                .iter()
                .map(|individual| self.fitness(individual, interior, start, end))
                .collect();

            let leader = argmax(&fitness_scores);
            if fitness_scores[leader] > best_fitness {
                best_fitness = fitness_scores[leader];
                best = population[leader].clone();
            }

            let mating_pool = self.selection(&population, &fitness_scores, &mut rng);

            let mut next_generation = Vec::with_capacity(population_size);
            next_generation.push(best.clone());

            while next_generation.len() < population_size {
                let parent1 = &mating_pool[rng.gen_range(0..mating_pool.len())];
                let parent2 = &mating_pool[rng.gen_range(0..mating_pool.len())];

                let mut child = if rng.gen::<f64>() < self.config.crossover_rate {
                    ordered_crossover(parent1, parent2, &mut rng)
                } else {
                    parent1.clone()
                };

                if rng.gen::<f64>() < self.config.mutation_rate {
                    swap_mutation(&mut child, &mut rng);
                }

                next_generation.push(child);
            }

            population = next_generation;
        }

        let mut optimized = Vec::with_capacity(interior.len() + 2);
        optimized.push(start);
        optimized.extend(best.iter().map(|&index| interior[index]));
        optimized.push(end);

        dedupe_waypoints(&optimized)
    }

    /// Identity ordering in slot 0, uniform shuffles elsewhere
    ///
    /// Pinning the identity guarantees the result never scores below the
    /// input ordering.
    fn initial_population(
        &self,
        interior_len: usize,
        population_size: usize,
        rng: &mut ChaCha8Rng,
    ) -> Vec<Individual> {
        let mut population = Vec::with_capacity(population_size);
        population.push((0..interior_len).collect());

        for _ in 1..population_size {
            let mut individual: Individual = (0..interior_len).collect();
            individual.shuffle(rng);
            population.push(individual);
        }

        population
    }

    fn fitness(
        &self,
        individual: &[usize],
        interior: &[Waypoint],
        start: Waypoint,
        end: Waypoint,
    ) -> f64 {
        let mut full_path = Vec::with_capacity(individual.len() + 2);
        full_path.push(start);
        full_path.extend(individual.iter().map(|&index| interior[index]));
        full_path.push(end);

        path_fitness(&full_path)
    }

    /// Tournament selection of `population/2` parents
    fn selection(
        &self,
        population: &[Individual],
        fitness_scores: &[f64],
        rng: &mut ChaCha8Rng,
    ) -> Vec<Individual> {
        let tournament_size = self.config.tournament_size.clamp(1, population.len());
        let mut selected = Vec::with_capacity(population.len() / 2);

        for _ in 0..population.len() / 2 {
            let contenders = rand::seq::index::sample(rng, population.len(), tournament_size);

            let mut winner = contenders.index(0);
            for contender in contenders.iter().skip(1) {
                if fitness_scores[contender] > fitness_scores[winner] {
                    winner = contender;
                }
            }

            selected.push(population[winner].clone());
        }

        selected
    }
}

/// Fitness of a full path: `10000 / length + 5000 * smoothness`
///
/// Returns 0 for zero-length paths. Higher is better.
pub fn path_fitness(path: &[Waypoint]) -> f64 {
    let distance = geometry::path_length(path);
    if distance == 0.0 {
        return 0.0;
    }

    let max_turn = (path.len() as f64 - 2.0).max(1.0) * PI;
    let smoothness = (1.0 - total_turn_angle(path) / max_turn).max(0.0);

    10000.0 / distance + smoothness * 5000.0
}

/// Sum of turn angles along a path in radians
///
/// Each interior point contributes the angle between its incoming and
/// outgoing segment vectors; zero-length segments contribute nothing.
pub fn total_turn_angle(path: &[Waypoint]) -> f64 {
    if path.len() < 3 {
        return 0.0;
    }

    let mut total = 0.0;
    for window in path.windows(3) {
        let v1 = Vector2::new(window[1].x - window[0].x, window[1].y - window[0].y);
        let v2 = Vector2::new(window[2].x - window[1].x, window[2].y - window[1].y);

        let norm1 = v1.norm();
        let norm2 = v2.norm();
        if norm1 > MIN_SEGMENT_LENGTH && norm2 > MIN_SEGMENT_LENGTH {
            let cos_angle = (v1.dot(&v2) / (norm1 * norm2)).clamp(-1.0, 1.0);
            total += cos_angle.acos();
        }
    }

    total
}

/// Remove waypoints whose coordinates repeat at 1 mm precision, keeping
/// the first occurrence
pub fn dedupe_waypoints(waypoints: &[Waypoint]) -> Vec<Waypoint> {
    let mut seen = HashSet::new();
    waypoints
        .iter()
        .filter(|waypoint| seen.insert(waypoint.rounded_key()))
        .copied()
        .collect()
}

/// Ordered crossover (OX)
///
/// Copies `parent1[a..b]` in place, then fills the remaining slots from
/// `parent2` rotated to start at `b`, skipping indices already present.
fn ordered_crossover(parent1: &[usize], parent2: &[usize], rng: &mut ChaCha8Rng) -> Individual {
    let size = parent1.len();
    if size <= 2 {
        return parent1.to_vec();
    }

    let point1 = rng.gen_range(0..=size - 2);
    let point2 = rng.gen_range(point1 + 1..=size);

    // Every slot is written exactly once: size - (b - a) elements of
    // parent2 survive the membership filter
    let mut child = vec![0; size];
    let mut present = vec![false; size];

    child[point1..point2].copy_from_slice(&parent1[point1..point2]);
    for &index in &parent1[point1..point2] {
        present[index] = true;
    }

    let mut slot = point2 % size;
    for offset in 0..size {
        let index = parent2[(point2 + offset) % size];
        if !present[index] {
            child[slot] = index;
            present[index] = true;
            slot = (slot + 1) % size;
        }
    }

    child
}

/// Swap two uniformly chosen positions
fn swap_mutation(individual: &mut Individual, rng: &mut ChaCha8Rng) {
    if individual.len() <= 1 {
        return;
    }
    let positions = rand::seq::index::sample(rng, individual.len(), 2);
    individual.swap(positions.index(0), positions.index(1));
}

/// Index of the first maximal score
fn argmax(scores: &[f64]) -> usize {
    let mut leader = 0;
    for (index, score) in scores.iter().enumerate().skip(1) {
        if *score > scores[leader] {
            leader = index;
        }
    }
    leader
}
