use super::traits::{check_non_negative, ConfigManifest, ConfigSection, FieldManifest};
use crate::error::LanderError;
use serde::{Deserialize, Serialize};

/// Fitness weights. Only the ordering of the bands matters:
/// every landing outscores every crash, every crash outscores every timeout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub landing_base: f64,
    pub landing_speed_weight: f64,
    pub landing_rotation_weight: f64,
    pub crash_base: f64,
    pub crash_proximity_weight: f64,
    pub crash_speed_weight: f64,
    pub crash_rotation_weight: f64,
    pub timeout_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            landing_base: 1000.0,
            landing_speed_weight: 500.0,
            landing_rotation_weight: 500.0,
            crash_base: 100.0,
            crash_proximity_weight: 400.0,
            crash_speed_weight: 100.0,
            crash_rotation_weight: 100.0,
            timeout_weight: 100.0,
        }
    }
}

impl ScoringConfig {
    /// Upper bound of the crash band
    pub fn crash_ceiling(&self) -> f64 {
        self.crash_base
            + self.crash_proximity_weight
            + self.crash_speed_weight
            + self.crash_rotation_weight
    }
}

impl ConfigSection for ScoringConfig {
    fn section_name() -> &'static str {
        "scoring"
    }

    fn validate(&self) -> Result<(), LanderError> {
        check_non_negative("Landing base", self.landing_base)?;
        check_non_negative("Landing speed weight", self.landing_speed_weight)?;
        check_non_negative("Landing rotation weight", self.landing_rotation_weight)?;
        check_non_negative("Crash base", self.crash_base)?;
        check_non_negative("Crash proximity weight", self.crash_proximity_weight)?;
        check_non_negative("Crash speed weight", self.crash_speed_weight)?;
        check_non_negative("Crash rotation weight", self.crash_rotation_weight)?;
        check_non_negative("Timeout weight", self.timeout_weight)?;

        if self.crash_base < self.timeout_weight {
            return Err(LanderError::Configuration(format!(
                "Crash base ({}) must be at least the timeout weight ({})",
                self.crash_base, self.timeout_weight
            )));
        }
        if self.landing_base < self.crash_ceiling() {
            return Err(LanderError::Configuration(format!(
                "Landing base ({}) must be at least the crash ceiling ({})",
                self.landing_base,
                self.crash_ceiling()
            )));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        let defaults = ScoringConfig::default();
        let weight = |name: &str, value: f64, description: &str| {
            FieldManifest::number(name, serde_json::json!(value), Some(0.0), None, description)
        };
        ConfigManifest {
            section: "Scoring".to_string(),
            fields: vec![
                weight("landing_base", defaults.landing_base, "Floor of the landing band"),
                weight(
                    "landing_speed_weight",
                    defaults.landing_speed_weight,
                    "Bonus for touching down slowly",
                ),
                weight(
                    "landing_rotation_weight",
                    defaults.landing_rotation_weight,
                    "Bonus for touching down upright",
                ),
                weight("crash_base", defaults.crash_base, "Floor of the crash band"),
                weight(
                    "crash_proximity_weight",
                    defaults.crash_proximity_weight,
                    "Reward for crashing near the pad",
                ),
                weight(
                    "crash_speed_weight",
                    defaults.crash_speed_weight,
                    "Reward for a slow impact",
                ),
                weight(
                    "crash_rotation_weight",
                    defaults.crash_rotation_weight,
                    "Reward for an upright impact",
                ),
                weight(
                    "timeout_weight",
                    defaults.timeout_weight,
                    "Ceiling of the band for runs that never touch down",
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bands_do_not_overlap() {
        let scoring = ScoringConfig::default();
        assert!(scoring.validate().is_ok());
        assert!(scoring.landing_base >= scoring.crash_ceiling());
    }

    #[test]
    fn test_overlapping_bands_rejected() {
        let mut scoring = ScoringConfig::default();
        scoring.landing_base = 200.0;
        assert!(scoring.validate().is_err());

        let mut scoring = ScoringConfig::default();
        scoring.timeout_weight = 500.0;
        assert!(scoring.validate().is_err());
    }
}
