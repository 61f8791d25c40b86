//! Genome representation for the lander GA
//!
//! A genome is an ordered list of `(action, duration)` genes. Decoding
//! expands each gene into `duration` ticks of its action, so the order of
//! genes is the order in which the pilot acts.
//!
//! Any gene list decodes to a valid, bounded action stream, which keeps
//! crossover and mutation free of repair steps.

use crate::types::Action;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gene {
    pub action: Action,
    /// Ticks the action is held, at least 1
    pub duration: u32,
}

impl Gene {
    pub fn new(action: Action, duration: u32) -> Self {
        Self { action, duration }
    }

    /// Uniform action, uniform duration in `[1, max_duration]`
    pub fn random<R: Rng>(max_duration: u32, rng: &mut R) -> Self {
        let action = Action::ALL[rng.gen_range(0..Action::ALL.len())];
        let duration = rng.gen_range(1..=max_duration.max(1));
        Self { action, duration }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub genes: Vec<Gene>,
    pub fitness: f64,
}

impl Genome {
    pub fn new(genes: Vec<Gene>) -> Self {
        Self { genes, fitness: 0.0 }
    }

    pub fn random<R: Rng>(length: usize, max_duration: u32, rng: &mut R) -> Self {
        Self::new((0..length).map(|_| Gene::random(max_duration, rng)).collect())
    }

    /// Ticks the decoded action stream lasts
    pub fn total_ticks(&self) -> usize {
        self.genes.iter().map(|g| g.duration as usize).sum()
    }
}

/// Ascending order by fitness, NaN sorted as the lowest
pub fn by_fitness(a: &Genome, b: &Genome) -> std::cmp::Ordering {
    sanitize(a.fitness).total_cmp(&sanitize(b.fitness))
}

fn sanitize(fitness: f64) -> f64 {
    if fitness.is_nan() {
        f64::NEG_INFINITY
    } else {
        fitness
    }
}
