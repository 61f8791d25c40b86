use crate::error::LanderError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), LanderError>;
    fn to_manifest(&self) -> ConfigManifest;
}

/// Configuration manifest for UI generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigManifest {
    pub section: String,
    pub fields: Vec<FieldManifest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldManifest {
    pub name: String,
    pub field_type: String,
    pub default: serde_json::Value,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub description: String,
}

impl FieldManifest {
    pub fn number(
        name: &str,
        default: serde_json::Value,
        min: Option<f64>,
        max: Option<f64>,
        description: &str,
    ) -> Self {
        let field_type = if default.is_u64() || default.is_i64() {
            "integer"
        } else {
            "float"
        };
        Self {
            name: name.to_string(),
            field_type: field_type.to_string(),
            default,
            min,
            max,
            description: description.to_string(),
        }
    }

    pub fn flag(name: &str, default: bool, description: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type: "bool".to_string(),
            default: serde_json::json!(default),
            min: None,
            max: None,
            description: description.to_string(),
        }
    }
}

/// Shared check for probabilities in [0, 1]
pub(crate) fn check_rate(name: &str, value: f64) -> Result<(), LanderError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(LanderError::Configuration(format!(
            "{} must be between 0 and 1, got {}",
            name, value
        )));
    }
    Ok(())
}

pub(crate) fn check_positive(name: &str, value: f64) -> Result<(), LanderError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(LanderError::Configuration(format!(
            "{} must be a positive number, got {}",
            name, value
        )));
    }
    Ok(())
}

pub(crate) fn check_non_negative(name: &str, value: f64) -> Result<(), LanderError> {
    if !value.is_finite() || value < 0.0 {
        return Err(LanderError::Configuration(format!(
            "{} must not be negative, got {}",
            name, value
        )));
    }
    Ok(())
}
