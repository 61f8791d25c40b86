//! Evolves action sequences that fly a 2D lunar lander onto a landing pad.
//!
//! [`engines::simulation`] holds the deterministic lander physics and fitness,
//! [`engines::generation`] the genetic algorithm, and [`engines::mission`]
//! the loop that ties the two together.

pub mod config;
pub mod engines;
pub mod error;
pub mod types;

pub use config::{AppConfig, ConfigManager};
pub use engines::generation::{GenerationStats, Gene, Genome, GeneticEngine};
pub use engines::mission::{GenerationReport, MissionController, RunSummary};
pub use engines::simulation::{Evaluation, LanderSimulator, Trajectory};
pub use error::{LanderError, Result};
pub use types::{Action, LandingPad, Outcome, Pose, Vector2D};
