use super::traits::{check_non_negative, check_positive, ConfigManifest, ConfigSection, FieldManifest};
use crate::error::LanderError;
use serde::{Deserialize, Serialize};

/// Physical constants and landing tolerances. Velocities are in metres per
/// second, positions in world units (`scaling_factor` units per metre).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f64,
    pub thrust: f64,
    pub mass: f64,
    pub rotation_per_second: f64,
    pub ticks_per_second: f64,
    pub scaling_factor: f64,
    pub ship_scale: f64,
    pub world_width: f64,
    pub world_height: f64,
    pub rotation_tolerance: f64,
    pub max_landing_horizontal_speed: f64,
    pub max_landing_vertical_speed: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -1.63,
            thrust: 350.0,
            mass: 100.0,
            rotation_per_second: 3.0,
            ticks_per_second: 60.0,
            scaling_factor: 60.0,
            ship_scale: 5.0,
            world_width: 400.0,
            world_height: 400.0,
            rotation_tolerance: std::f64::consts::PI / 16.0,
            max_landing_horizontal_speed: 0.5,
            max_landing_vertical_speed: 1.0,
        }
    }
}

impl PhysicsConfig {
    /// Fixed timestep in seconds
    pub fn dt(&self) -> f64 {
        1.0 / self.ticks_per_second
    }
}

impl ConfigSection for PhysicsConfig {
    fn section_name() -> &'static str {
        "physics"
    }

    fn validate(&self) -> Result<(), LanderError> {
        if !self.gravity.is_finite() || self.gravity > 0.0 {
            return Err(LanderError::Configuration(format!(
                "Gravity must pull downwards (<= 0), got {}",
                self.gravity
            )));
        }
        check_non_negative("Thrust", self.thrust)?;
        check_positive("Mass", self.mass)?;
        check_non_negative("Rotation per second", self.rotation_per_second)?;
        check_positive("Ticks per second", self.ticks_per_second)?;
        check_positive("Scaling factor", self.scaling_factor)?;
        check_positive("Ship scale", self.ship_scale)?;
        check_positive("World width", self.world_width)?;
        check_positive("World height", self.world_height)?;
        check_positive("Rotation tolerance", self.rotation_tolerance)?;
        check_positive("Max landing horizontal speed", self.max_landing_horizontal_speed)?;
        check_positive("Max landing vertical speed", self.max_landing_vertical_speed)?;
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        let defaults = PhysicsConfig::default();
        ConfigManifest {
            section: "Physics".to_string(),
            fields: vec![
                FieldManifest::number(
                    "gravity",
                    serde_json::json!(defaults.gravity),
                    None,
                    Some(0.0),
                    "Vertical acceleration in m/s^2 (negative pulls down)",
                ),
                FieldManifest::number(
                    "thrust",
                    serde_json::json!(defaults.thrust),
                    Some(0.0),
                    None,
                    "Engine force applied along the heading",
                ),
                FieldManifest::number(
                    "mass",
                    serde_json::json!(defaults.mass),
                    Some(0.0),
                    None,
                    "Ship mass",
                ),
                FieldManifest::number(
                    "rotation_per_second",
                    serde_json::json!(defaults.rotation_per_second),
                    Some(0.0),
                    None,
                    "Angular rate in radians per second while rotating",
                ),
                FieldManifest::number(
                    "ticks_per_second",
                    serde_json::json!(defaults.ticks_per_second),
                    Some(1.0),
                    None,
                    "Simulation ticks per second",
                ),
                FieldManifest::number(
                    "ship_scale",
                    serde_json::json!(defaults.ship_scale),
                    Some(0.0),
                    None,
                    "Scale applied to the ship outline",
                ),
                FieldManifest::number(
                    "rotation_tolerance",
                    serde_json::json!(defaults.rotation_tolerance),
                    Some(0.0),
                    Some(std::f64::consts::PI),
                    "Largest tilt in radians accepted at touchdown",
                ),
                FieldManifest::number(
                    "max_landing_horizontal_speed",
                    serde_json::json!(defaults.max_landing_horizontal_speed),
                    Some(0.0),
                    None,
                    "Largest horizontal speed accepted at touchdown",
                ),
                FieldManifest::number(
                    "max_landing_vertical_speed",
                    serde_json::json!(defaults.max_landing_vertical_speed),
                    Some(0.0),
                    None,
                    "Largest vertical speed accepted at touchdown",
                ),
            ],
        }
    }
}
