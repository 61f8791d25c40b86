pub mod traits;
pub mod evolution;
pub mod physics;
pub mod mission;
pub mod scoring;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::EvolutionConfig;
pub use physics::PhysicsConfig;
pub use mission::MissionConfig;
pub use scoring::ScoringConfig;
pub use traits::ConfigSection;
