pub mod genome;
pub mod operators;
pub mod stats;
pub mod genetic_engine;
pub mod progress;

pub use genome::{Gene, Genome};
pub use stats::GenerationStats;
pub use genetic_engine::GeneticEngine;
pub use progress::{ChannelProgressCallback, ConsoleProgressCallback, ProgressCallback, ProgressMessage};
