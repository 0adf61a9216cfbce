use crate::game_logic::{
    BACKWARD_ACCEL, DRIFT_SLIDE_STEP, DRIFT_TURN_STEP, FORWARD_ACCEL, INERTIA_DECAY, MARK_SPEED,
    MAX_BACKWARDS_SPEED, MAX_DRIFT_ANGLE, MAX_SPEED, MIN_DRIFT_SPEED, RELAX_STEP, STOP_THRESHOLD,
};
use bevy::asset::io::file::FileAssetReader;
use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const TUNING_FILE: &str = "tuning.json";

/// Tuning file inside the asset folder, resolved against the same root the
/// asset server uses so the working directory does not matter.
pub fn tuning_path() -> PathBuf {
    FileAssetReader::get_base_path().join("assets").join(TUNING_FILE)
}

/// Handling constants for the car. Speeds are track pixels per tick,
/// angles are radians.
#[derive(Resource, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CarTuning {
    pub max_speed: f32,
    pub max_backwards_speed: f32,
    pub min_drift_speed: f32,
    pub forward_accel: f32,
    pub backward_accel: f32,
    pub inertia_decay: f32,
    pub stop_threshold: f32,
    pub drift_turn_step: f32,
    pub drift_slide_step: f32,
    pub max_drift_angle: f32,
    pub relax_step: f32,
    pub mark_speed: f32,
}

impl Default for CarTuning {
    fn default() -> Self {
        Self {
            max_speed: MAX_SPEED,
            max_backwards_speed: MAX_BACKWARDS_SPEED,
            min_drift_speed: MIN_DRIFT_SPEED,
            forward_accel: FORWARD_ACCEL,
            backward_accel: BACKWARD_ACCEL,
            inertia_decay: INERTIA_DECAY,
            stop_threshold: STOP_THRESHOLD,
            drift_turn_step: DRIFT_TURN_STEP,
            drift_slide_step: DRIFT_SLIDE_STEP,
            max_drift_angle: MAX_DRIFT_ANGLE,
            relax_step: RELAX_STEP,
            mark_speed: MARK_SPEED,
        }
    }
}

impl CarTuning {
    pub fn from_json(text: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let tuning: CarTuning = serde_json::from_str(text)?;
        tuning.validate()?;
        Ok(tuning)
    }

    fn validate(&self) -> Result<(), String> {
        if self.max_backwards_speed > 0.0 || self.max_speed < 0.0 {
            return Err(format!(
                "speed limits must straddle zero, got [{}, {}]",
                self.max_backwards_speed, self.max_speed
            ));
        }

        // steps, thresholds and angles are magnitudes
        let magnitudes = [
            ("min_drift_speed", self.min_drift_speed),
            ("forward_accel", self.forward_accel),
            ("backward_accel", self.backward_accel),
            ("inertia_decay", self.inertia_decay),
            ("stop_threshold", self.stop_threshold),
            ("drift_turn_step", self.drift_turn_step),
            ("drift_slide_step", self.drift_slide_step),
            ("max_drift_angle", self.max_drift_angle),
            ("relax_step", self.relax_step),
            ("mark_speed", self.mark_speed),
        ];
        for (name, value) in magnitudes {
            if !(value >= 0.0) {
                return Err(format!("{} must be zero or positive, got {}", name, value));
            }
        }
        Ok(())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// Reads the tuning file if there is one, otherwise the stock handling.
pub fn load_tuning(path: &Path) -> CarTuning {
    if !path.exists() {
        info!("No tuning file at {}, using default handling", path.display());
        return CarTuning::default();
    }

    match CarTuning::from_file(path) {
        Ok(tuning) => {
            info!("Loaded car tuning from {}", path.display());
            tuning
        }
        Err(e) => {
            warn!("Failed to load tuning from {}: {}", path.display(), e);
            CarTuning::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = CarTuning::from_json(r#"{ "max_speed": 10.0 }"#).unwrap();
        assert_eq!(tuning.max_speed, 10.0);
        assert_eq!(tuning.forward_accel, FORWARD_ACCEL);
        assert_eq!(tuning.max_drift_angle, MAX_DRIFT_ANGLE);
    }

    #[test]
    fn test_rejects_inverted_limits() {
        let result = CarTuning::from_json(r#"{ "max_backwards_speed": 2.0 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(CarTuning::from_json("{ max_speed: ").is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let tuning = load_tuning(Path::new("does/not/exist/tuning.json"));
        assert_eq!(tuning, CarTuning::default());
    }

    #[test]
    fn test_rejects_negative_magnitudes() {
        for field in [
            "forward_accel",
            "backward_accel",
            "inertia_decay",
            "stop_threshold",
            "drift_slide_step",
            "max_drift_angle",
            "relax_step",
        ] {
            let json = format!(r#"{{ "{}": -0.1 }}"#, field);
            assert!(CarTuning::from_json(&json).is_err(), "{} accepted", field);
        }
    }

    #[test]
    fn test_stock_values_are_valid() {
        assert!(CarTuning::default().validate().is_ok());
    }

    #[test]
    fn test_tuning_path_is_under_asset_root() {
        let path = tuning_path();
        assert!(path.is_absolute());
        assert!(path.ends_with("assets/tuning.json"));
    }

    #[test]
    fn test_shipped_tuning_file_loads() {
        let tuning = CarTuning::from_file(tuning_path()).unwrap();
        assert_eq!(tuning.max_speed, MAX_SPEED);
        assert_eq!(tuning.max_backwards_speed, MAX_BACKWARDS_SPEED);
    }
}
