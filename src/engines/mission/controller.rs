use crate::config::AppConfig;
use crate::engines::generation::{
    genetic_engine::GeneticEngine, genome::Genome, progress::ProgressCallback,
    stats::GenerationStats,
};
use crate::engines::simulation::{Evaluation, LanderSimulator, Trajectory};
use crate::error::LanderError;
use crate::types::{LandingPad, Outcome, Pose, Vector2D};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Keeps pad placement off the GA's random stream
const PAD_STREAM_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// What happened in one evaluated generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub stats: GenerationStats,
    pub landed: usize,
    pub crashed: usize,
    pub timed_out: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub generations: usize,
    pub success: bool,
    pub last_report: Option<GenerationReport>,
}

/// Drives the GA against the lander simulation: evaluate every genome,
/// hand the scores to the engine, repeat.
pub struct MissionController {
    config: AppConfig,
    engine: GeneticEngine,
    simulator: LanderSimulator,
    pad: LandingPad,
    pad_rng: StdRng,
    last_scored: Vec<Genome>,
    success: bool,
}

impl MissionController {
    pub fn new(config: AppConfig) -> Result<Self, LanderError> {
        config.validate()?;

        let engine = GeneticEngine::new(config.evolution.clone())?;
        let simulator = LanderSimulator::new(config.physics.clone(), config.scoring.clone());
        let pad_rng = match config.evolution.seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ PAD_STREAM_SALT),
            None => StdRng::from_entropy(),
        };

        let mut controller = Self {
            pad: LandingPad::new(config.mission.pad_position, config.mission.pad_half_width),
            config,
            engine,
            simulator,
            pad_rng,
            last_scored: Vec::new(),
            success: false,
        };
        controller.place_pad();
        Ok(controller)
    }

    pub fn pad(&self) -> &LandingPad {
        &self.pad
    }

    pub fn start_pose(&self) -> Pose {
        self.config.mission.start_pose()
    }

    pub fn engine(&self) -> &GeneticEngine {
        &self.engine
    }

    pub fn simulator(&self) -> &LanderSimulator {
        &self.simulator
    }

    pub fn generation(&self) -> usize {
        self.engine.generation()
    }

    /// True once any lander has touched down safely in this run
    pub fn success(&self) -> bool {
        self.success
    }

    /// Fly every genome of the current population. Results are in population order.
    pub fn evaluate_population(&self) -> Vec<Evaluation> {
        let start = self.start_pose();
        let pad = self.pad;
        let simulator = &self.simulator;
        let population = self.engine.population();

        if self.config.mission.parallel_evaluation {
            population
                .par_iter()
                .map(|genome| simulator.evaluate(&genome.genes, start, &pad))
                .collect()
        } else {
            population
                .iter()
                .map(|genome| simulator.evaluate(&genome.genes, start, &pad))
                .collect()
        }
    }

    /// Evaluate the current generation, then evolve the next one
    pub fn step<C: ProgressCallback + ?Sized>(
        &mut self,
        callback: &mut C,
    ) -> Result<GenerationReport, LanderError> {
        callback.on_generation_start(self.engine.generation());

        let evaluations = self.evaluate_population();
        let total = evaluations.len();

        let mut landed = 0;
        let mut crashed = 0;
        let mut timed_out = 0;
        for (idx, evaluation) in evaluations.iter().enumerate() {
            match evaluation.outcome {
                Outcome::Landed => landed += 1,
                Outcome::Crashed => crashed += 1,
                Outcome::TimedOut => timed_out += 1,
            }
            callback.on_lander_evaluated(idx + 1, total, evaluation.outcome);
        }

        let scored: Vec<Genome> = self
            .engine
            .population()
            .iter()
            .zip(&evaluations)
            .map(|(genome, evaluation)| Genome {
                genes: genome.genes.clone(),
                fitness: evaluation.fitness,
            })
            .collect();

        if landed > 0 && !self.success {
            log::info!(
                "Successful landing in generation {} ({} of {} landers)",
                self.engine.generation() + 1,
                landed,
                total
            );
            self.success = true;
        }

        let stats = self.engine.epoch(scored.clone())?;
        self.last_scored = scored;

        callback.on_generation_complete(&stats, landed);

        Ok(GenerationReport {
            stats,
            landed,
            crashed,
            timed_out,
        })
    }

    /// Step up to `generations` times, stopping early after a landing when configured to
    pub fn run<C: ProgressCallback>(
        &mut self,
        generations: usize,
        mut callback: C,
    ) -> Result<RunSummary, LanderError> {
        let mut summary = RunSummary {
            generations: 0,
            success: self.success,
            last_report: None,
        };

        for _ in 0..generations {
            let report = self.step(&mut callback)?;
            summary.generations += 1;
            summary.last_report = Some(report);

            if self.success && self.config.mission.stop_on_landing {
                break;
            }
        }

        summary.success = self.success;
        Ok(summary)
    }

    /// Fresh population, fresh pad position when randomised
    pub fn new_run(&mut self) {
        self.engine.reset();
        self.last_scored.clear();
        self.success = false;
        self.place_pad();
        log::info!(
            "New run: pad at ({:.1}, {:.1})",
            self.pad.position.x,
            self.pad.position.y
        );
    }

    /// Tick-by-tick flight of the fittest genome from the last evaluated generation
    pub fn replay_fittest(&self) -> Option<Trajectory> {
        let stats = self.engine.last_stats()?;
        let genome = self.last_scored.get(stats.fittest_index)?;
        Some(
            self.simulator
                .simulate_with_trace(&genome.genes, self.start_pose(), &self.pad),
        )
    }

    fn place_pad(&mut self) {
        let mission = &self.config.mission;
        if !mission.randomize_pad {
            return;
        }

        let width = self.config.physics.world_width;
        let (low, high) = (mission.pad_margin, width - mission.pad_margin);
        let x = if low < high {
            self.pad_rng.gen_range(low..=high)
        } else {
            width / 2.0
        };
        self.pad.position = Vector2D::new(x, mission.pad_position.y);
    }
}
