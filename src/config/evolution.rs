use super::traits::{check_rate, ConfigManifest, ConfigSection, FieldManifest};
use crate::error::LanderError;
use serde::{Deserialize, Serialize};

/// Longest a single gene may hold its action, in ticks
pub const MAX_GENE_DURATION: u32 = 600;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub chromosome_length: usize,
    pub max_gene_duration: u32,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    /// Per-gene swap probability used once crossover fires
    pub swap_rate: f64,
    /// How many unchanged copies of the fittest genome enter the next generation
    pub elite_copies: usize,
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            chromosome_length: 30,
            max_gene_duration: 30,
            crossover_rate: 0.7,
            mutation_rate: 0.01,
            swap_rate: 0.5,
            elite_copies: 1,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), LanderError> {
        if self.population_size == 0 {
            return Err(LanderError::Configuration(
                "Population size must be greater than 0".to_string(),
            ));
        }
        if self.chromosome_length == 0 {
            return Err(LanderError::Configuration(
                "Chromosome length must be greater than 0".to_string(),
            ));
        }
        if self.max_gene_duration == 0 || self.max_gene_duration > MAX_GENE_DURATION {
            return Err(LanderError::Configuration(format!(
                "Max gene duration must be between 1 and {}",
                MAX_GENE_DURATION
            )));
        }
        if self.elite_copies == 0 {
            return Err(LanderError::Configuration(
                "At least one elite copy is required to keep the best genome".to_string(),
            ));
        }
        check_rate("Crossover rate", self.crossover_rate)?;
        check_rate("Mutation rate", self.mutation_rate)?;
        check_rate("Swap rate", self.swap_rate)?;
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Evolution".to_string(),
            fields: vec![
                FieldManifest::number(
                    "population_size",
                    serde_json::json!(100),
                    Some(1.0),
                    Some(10000.0),
                    "Number of landers per generation",
                ),
                FieldManifest::number(
                    "chromosome_length",
                    serde_json::json!(30),
                    Some(1.0),
                    Some(1000.0),
                    "Genes per genome",
                ),
                FieldManifest::number(
                    "max_gene_duration",
                    serde_json::json!(30),
                    Some(1.0),
                    Some(MAX_GENE_DURATION as f64),
                    "Upper bound on ticks a single gene lasts",
                ),
                FieldManifest::number(
                    "crossover_rate",
                    serde_json::json!(0.7),
                    Some(0.0),
                    Some(1.0),
                    "Probability that a parent pair is recombined",
                ),
                FieldManifest::number(
                    "mutation_rate",
                    serde_json::json!(0.01),
                    Some(0.0),
                    Some(1.0),
                    "Per-gene probability of replacement by a random gene",
                ),
                FieldManifest::number(
                    "swap_rate",
                    serde_json::json!(0.5),
                    Some(0.0),
                    Some(1.0),
                    "Per-gene swap probability during crossover",
                ),
                FieldManifest::number(
                    "elite_copies",
                    serde_json::json!(1),
                    Some(1.0),
                    None,
                    "Copies of the fittest genome carried forward",
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EvolutionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_rates_and_sizes() {
        let mut config = EvolutionConfig::default();
        config.mutation_rate = 1.5;
        assert!(config.validate().is_err());

        let mut config = EvolutionConfig::default();
        config.crossover_rate = -0.1;
        assert!(config.validate().is_err());

        let mut config = EvolutionConfig::default();
        config.population_size = 0;
        assert!(config.validate().is_err());

        let mut config = EvolutionConfig::default();
        config.chromosome_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_elite_copies() {
        let mut config = EvolutionConfig::default();
        config.elite_copies = 0;
        assert!(matches!(config.validate(), Err(LanderError::Configuration(_))));

        config.elite_copies = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_gene_duration_is_bounded() {
        let mut config = EvolutionConfig::default();
        config.max_gene_duration = MAX_GENE_DURATION;
        assert!(config.validate().is_ok());

        config.max_gene_duration = MAX_GENE_DURATION + 1;
        assert!(config.validate().is_err());

        config.max_gene_duration = 0;
        assert!(config.validate().is_err());
    }
}
