use crate::engines::generation::genome::{by_fitness, Genome};
use serde::{Deserialize, Serialize};

/// Per-generation summary for display
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub best_fitness: f64,
    pub average_fitness: f64,
    pub worst_fitness: f64,
    pub total_fitness: f64,
    pub fittest_index: usize,
}

impl GenerationStats {
    /// Ties for best keep the lowest index
    pub fn compute(generation: usize, population: &[Genome]) -> Self {
        let fittest = population
            .iter()
            .enumerate()
            .max_by(|(ia, a), (ib, b)| by_fitness(a, b).then(ib.cmp(ia)));
        let worst = population.iter().min_by(|a, b| by_fitness(a, b));

        let (fittest_index, best, worst) = match (fittest, worst) {
            (Some((idx, best)), Some(worst)) => (idx, best.fitness, worst.fitness),
            _ => {
                return Self {
                    generation,
                    ..Self::default()
                }
            }
        };

        let total: f64 = population.iter().map(|g| g.fitness).sum();

        Self {
            generation,
            best_fitness: best,
            average_fitness: total / population.len() as f64,
            worst_fitness: worst,
            total_fitness: total,
            fittest_index,
        }
    }
}
