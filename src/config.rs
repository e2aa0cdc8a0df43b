//! TOML load files describing a rifle, its ammunition and the conditions.
//!
//! ```toml
//! drag_model = "G7"
//! velocity = 2700.0
//! weight = 175.0
//! zero_range = 200.0
//!
//! [wind]
//! speed = 10.0
//! angle = 90.0
//!
//! [[coefficients]]
//! bc = 0.243
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::atmosphere::Atmosphere;
use crate::ballistic_coefficient::CoefficientSet;
use crate::cli_api::{BallisticInputs, WindConditions};
use crate::error::BallisticsError;
use crate::DragModel;

/// Contents of a load file. Everything except the muzzle velocity and the
/// coefficients has a default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadConfig {
    #[serde(default = "default_drag_model")]
    pub drag_model: DragModel,
    pub velocity: f64,
    #[serde(default = "default_sight_height")]
    pub sight_height: f64,
    #[serde(default)]
    pub weight: f64,
    #[serde(default = "default_zero_range")]
    pub zero_range: f64,
    #[serde(default)]
    pub y_intercept: f64,
    #[serde(default)]
    pub los_angle: f64,
    #[serde(default = "default_max_range")]
    pub max_range: usize,
    #[serde(default)]
    pub wind: WindConditions,
    #[serde(default)]
    pub atmosphere: Atmosphere,
    pub coefficients: CoefficientSet,
}

fn default_drag_model() -> DragModel {
    DragModel::G1
}

fn default_sight_height() -> f64 {
    1.5
}

fn default_zero_range() -> f64 {
    100.0
}

fn default_max_range() -> usize {
    1000
}

impl LoadConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, BallisticsError> {
        Ok(toml::from_str(contents)?)
    }

    /// Validated shot description
    pub fn into_inputs(self) -> Result<BallisticInputs, BallisticsError> {
        let inputs = BallisticInputs::from(self);
        inputs.validate()?;
        Ok(inputs)
    }
}

impl From<LoadConfig> for BallisticInputs {
    fn from(config: LoadConfig) -> Self {
        BallisticInputs {
            drag_model: config.drag_model,
            velocity: config.velocity,
            sight_height: config.sight_height,
            weight: config.weight,
            zero_range: config.zero_range,
            y_intercept: config.y_intercept,
            los_angle: config.los_angle,
            coefficients: config.coefficients,
            max_range: config.max_range,
            wind: config.wind,
            atmosphere: config.atmosphere,
        }
    }
}

/// Read a load file from disk
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<LoadConfig, BallisticsError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let config = LoadConfig::from_toml_str(&contents)?;
    debug!(path = %path.display(), drag_model = %config.drag_model, "loaded load file");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FULL: &str = r#"
        drag_model = "G7"
        velocity = 2700.0
        sight_height = 2.0
        weight = 175.0
        zero_range = 200.0
        y_intercept = 1.0
        los_angle = -5.0
        max_range = 800

        [wind]
        speed = 10.0
        angle = 90.0

        [atmosphere]
        altitude = 5000.0
        temperature = 40.0

        [[coefficients]]
        bc = 0.243
        min_velocity = 2000.0

        [[coefficients]]
        bc = 0.230
        max_velocity = 2000.0
    "#;

    #[test]
    fn test_full_load_file() {
        let config = LoadConfig::from_toml_str(FULL).unwrap();
        assert_eq!(config.drag_model, DragModel::G7);
        assert_eq!(config.max_range, 800);
        assert_eq!(config.wind, WindConditions { speed: 10.0, angle: 90.0 });
        assert_eq!(config.atmosphere.altitude, 5000.0);
        // unspecified atmosphere fields stay standard
        assert_eq!(config.atmosphere.pressure, Atmosphere::standard().pressure);
        assert_eq!(config.coefficients.len(), 2);

        let first = config.coefficients.iter().next().unwrap();
        assert_eq!((first.bc, first.min_velocity, first.max_velocity), (0.243, 2000.0, 0.0));

        let inputs = config.into_inputs().unwrap();
        assert_eq!(inputs.los_angle, -5.0);
        assert_eq!(inputs.y_intercept, 1.0);
    }

    #[test]
    fn test_minimal_load_file_uses_defaults() {
        let config = LoadConfig::from_toml_str(
            r#"
            velocity = 2600.0
            [[coefficients]]
            bc = 0.495
            "#,
        )
        .unwrap();

        assert_eq!(config.drag_model, DragModel::G1);
        assert_eq!(config.sight_height, 1.5);
        assert_eq!(config.zero_range, 100.0);
        assert_eq!(config.max_range, 1000);
        assert_eq!(config.wind, WindConditions::default());
        assert_eq!(config.atmosphere, Atmosphere::standard());
        assert!(config.coefficients.iter().next().unwrap().is_catch_all());
    }

    #[test]
    fn test_rejects_malformed_files() {
        let unknown_model = "drag_model = \"G9\"\nvelocity = 2600.0\ncoefficients = []";
        assert!(matches!(LoadConfig::from_toml_str(unknown_model), Err(BallisticsError::Toml(_))));

        let typo = "velocty = 2600.0\ncoefficients = []";
        assert!(LoadConfig::from_toml_str(typo).is_err());

        let no_velocity = "[[coefficients]]\nbc = 0.5";
        assert!(LoadConfig::from_toml_str(no_velocity).is_err());
    }

    #[test]
    fn test_into_inputs_validates() {
        let empty = LoadConfig::from_toml_str("velocity = 2600.0\ncoefficients = []").unwrap();
        assert!(matches!(empty.into_inputs(), Err(BallisticsError::NoCoefficients)));

        let negative = LoadConfig::from_toml_str("velocity = -1.0\n[[coefficients]]\nbc = 0.5").unwrap();
        assert!(matches!(negative.into_inputs(), Err(BallisticsError::InvalidInput(_))));
    }

    #[test]
    fn test_load_config_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(FULL.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.velocity, 2700.0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(dir.path().join("missing.toml"));
        assert!(matches!(result, Err(BallisticsError::Io(_))));
    }
}
