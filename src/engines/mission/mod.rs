pub mod controller;

pub use controller::{GenerationReport, MissionController, RunSummary};
