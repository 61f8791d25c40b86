pub mod generation;
pub mod mission;
pub mod simulation;
