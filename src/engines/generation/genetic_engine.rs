use crate::config::{ConfigSection, EvolutionConfig};
use crate::engines::generation::{
    genome::Genome,
    operators::{crossover, mutate, random_population, roulette_selection},
    stats::GenerationStats,
};
use crate::error::LanderError;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Owns the population and the single random stream that drives gene
/// generation, selection, crossover and mutation.
pub struct GeneticEngine {
    config: EvolutionConfig,
    population: Vec<Genome>,
    generation: usize,
    last_stats: Option<GenerationStats>,
    rng: StdRng,
}

impl GeneticEngine {
    pub fn new(config: EvolutionConfig) -> Result<Self, LanderError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let population = random_population(
            config.population_size,
            config.chromosome_length,
            config.max_gene_duration,
            &mut rng,
        );

        Ok(Self {
            config,
            population,
            generation: 0,
            last_stats: None,
            rng,
        })
    }

    /// Current, not yet scored population
    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn last_stats(&self) -> Option<&GenerationStats> {
        self.last_stats.as_ref()
    }

    /// Start over with a fresh random population. The random stream carries on.
    pub fn reset(&mut self) {
        self.population = random_population(
            self.config.population_size,
            self.config.chromosome_length,
            self.config.max_gene_duration,
            &mut self.rng,
        );
        self.generation = 0;
        self.last_stats = None;
    }

    /// Score the current population with `fitness` (one value per genome, in order) and evolve it
    pub fn epoch_with_fitness(&mut self, fitness: &[f64]) -> Result<GenerationStats, LanderError> {
        if fitness.len() != self.population.len() {
            return Err(LanderError::Evolution(format!(
                "Expected {} fitness values, got {}",
                self.population.len(),
                fitness.len()
            )));
        }

        let scored = self
            .population
            .iter()
            .zip(fitness)
            .map(|(genome, &fitness)| Genome {
                genes: genome.genes.clone(),
                fitness,
            })
            .collect();
        self.epoch(scored)
    }

    /// Run one generation: compute statistics over `scored`, then replace
    /// the population with its offspring. Returns the statistics of `scored`.
    pub fn epoch(&mut self, mut scored: Vec<Genome>) -> Result<GenerationStats, LanderError> {
        self.check_shape(&scored)?;

        for (idx, genome) in scored.iter_mut().enumerate() {
            if !genome.fitness.is_finite() || genome.fitness < 0.0 {
                log::warn!(
                    "Genome {} has invalid fitness {}, clamping to 0",
                    idx,
                    genome.fitness
                );
                genome.fitness = 0.0;
            }
        }

        let stats = GenerationStats::compute(self.generation, &scored);
        log::debug!(
            "Generation {}: best {:.3} (genome {}), avg {:.3}, worst {:.3}",
            stats.generation,
            stats.best_fitness,
            stats.fittest_index,
            stats.average_fitness,
            stats.worst_fitness
        );

        self.population = self.breed(&scored, &stats);
        self.generation += 1;
        self.last_stats = Some(stats);

        Ok(stats)
    }

    fn check_shape(&self, scored: &[Genome]) -> Result<(), LanderError> {
        if scored.len() != self.config.population_size {
            return Err(LanderError::Evolution(format!(
                "Population size changed from {} to {}",
                self.config.population_size,
                scored.len()
            )));
        }
        if let Some(idx) = scored
            .iter()
            .position(|g| g.genes.len() != self.config.chromosome_length)
        {
            return Err(LanderError::Evolution(format!(
                "Genome {} has {} genes, expected {}",
                idx,
                scored[idx].genes.len(),
                self.config.chromosome_length
            )));
        }
        Ok(())
    }

    fn breed(&mut self, scored: &[Genome], stats: &GenerationStats) -> Vec<Genome> {
        let size = self.config.population_size;
        let mut next_generation = Vec::with_capacity(size);

        // Elitism: the fittest genome survives unchanged
        let elite = &scored[stats.fittest_index];
        for _ in 0..self.config.elite_copies.min(size) {
            next_generation.push(Genome::new(elite.genes.clone()));
        }

        while next_generation.len() < size {
            let mum = roulette_selection(scored, stats.total_fitness, &mut self.rng);
            let dad = roulette_selection(scored, stats.total_fitness, &mut self.rng);

            let (mut baby1, mut baby2) = crossover(
                &scored[mum].genes,
                &scored[dad].genes,
                self.config.crossover_rate,
                self.config.swap_rate,
                &mut self.rng,
            );

            mutate(&mut baby1, self.config.mutation_rate, self.config.max_gene_duration, &mut self.rng);
            mutate(&mut baby2, self.config.mutation_rate, self.config.max_gene_duration, &mut self.rng);

            next_generation.push(Genome::new(baby1));
            if next_generation.len() < size {
                next_generation.push(Genome::new(baby2));
            }
        }

        next_generation
    }
}
