use super::traits::{check_non_negative, check_positive, ConfigManifest, ConfigSection, FieldManifest};
use crate::error::LanderError;
use crate::types::{Pose, Vector2D};
use serde::{Deserialize, Serialize};

/// Where the lander starts, where the pad sits, and how a run is driven
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    pub start_rotation: f64,
    pub pad_half_width: f64,
    /// Place the pad at a random x on every new run
    pub randomize_pad: bool,
    /// Keep random pads this far from the world edges
    pub pad_margin: f64,
    pub parallel_evaluation: bool,
    pub stop_on_landing: bool,
    // tables last so the struct serializes to TOML
    pub start_position: Vector2D,
    pub pad_position: Vector2D,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            start_rotation: std::f64::consts::PI,
            pad_half_width: 30.0,
            randomize_pad: false,
            pad_margin: 50.0,
            parallel_evaluation: false,
            stop_on_landing: true,
            start_position: Vector2D::new(200.0, 350.0),
            pad_position: Vector2D::new(200.0, 50.0),
        }
    }
}

impl MissionConfig {
    pub fn start_pose(&self) -> Pose {
        Pose::new(self.start_position, self.start_rotation)
    }
}

impl ConfigSection for MissionConfig {
    fn section_name() -> &'static str {
        "mission"
    }

    fn validate(&self) -> Result<(), LanderError> {
        let finite = [
            self.start_position.x,
            self.start_position.y,
            self.start_rotation,
            self.pad_position.x,
            self.pad_position.y,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(LanderError::Configuration(
                "Start pose and pad position must be finite".to_string(),
            ));
        }
        check_positive("Pad half width", self.pad_half_width)?;
        check_non_negative("Pad margin", self.pad_margin)?;
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Mission".to_string(),
            fields: vec![
                FieldManifest::number(
                    "start_rotation",
                    serde_json::json!(std::f64::consts::PI),
                    Some(-std::f64::consts::PI),
                    Some(std::f64::consts::PI),
                    "Initial heading in radians (0 is upright)",
                ),
                FieldManifest::number(
                    "pad_half_width",
                    serde_json::json!(30.0),
                    Some(0.0),
                    None,
                    "Half the horizontal extent of the landing pad",
                ),
                FieldManifest::flag(
                    "randomize_pad",
                    false,
                    "Move the pad to a random x on each new run",
                ),
                FieldManifest::flag(
                    "parallel_evaluation",
                    false,
                    "Simulate landers on all cores",
                ),
                FieldManifest::flag(
                    "stop_on_landing",
                    true,
                    "Stop evolving once any lander touches down safely",
                ),
            ],
        }
    }
}
