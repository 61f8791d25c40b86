pub mod decoder;
pub mod geometry;
pub mod lander;
pub mod scoring;

pub use decoder::decode;
pub use lander::{Evaluation, LanderSimulator, LanderState, Snapshot, Trajectory};
