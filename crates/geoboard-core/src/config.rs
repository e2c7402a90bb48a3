//! Engine tuning constants and the configuration struct that carries them.

use crate::error::{BoardError, BoardResult};
use serde::{Deserialize, Serialize};

/// Distance (world units) within which the pen snaps to an instrument edge.
pub const SNAP_THRESHOLD: f64 = 20.0;
/// Radius around a widget pivot that counts as a hit.
pub const WIDGET_HIT_RADIUS: f64 = 100.0;
/// Half-opening of the compass legs at the tips.
pub const COMPASS_SPREAD: f64 = 40.0;
/// Degrees of rotation per unit of vertical pointer travel during a rotate drag.
pub const ROTATE_SENSITIVITY: f64 = 0.5;
/// Degrees per wheel tick.
pub const WHEEL_ROTATION_STEP: f64 = 5.0;
/// Strokes with a point closer than this to the eraser are removed.
pub const ERASER_RADIUS: f64 = 20.0;
/// Background grid pitch.
pub const GRID_PITCH: f64 = 50.0;
/// Ruler minor tick pitch. Every fifth tick is a major tick.
pub const RULER_TICK_PITCH: f64 = 10.0;

/// Tunable constants for the interaction engine and renderer.
///
/// Every field defaults to the matching named constant, so a partial JSON
/// document only overrides what it mentions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub snap_threshold: f64,
    pub hit_radius: f64,
    pub compass_spread: f64,
    pub rotate_sensitivity: f64,
    pub wheel_step: f64,
    pub eraser_radius: f64,
    pub grid_pitch: f64,
    pub ruler_tick_pitch: f64,
    /// Largest box a freshly inserted image is scaled down to fit.
    pub image_max_width: f64,
    pub image_max_height: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            snap_threshold: SNAP_THRESHOLD,
            hit_radius: WIDGET_HIT_RADIUS,
            compass_spread: COMPASS_SPREAD,
            rotate_sensitivity: ROTATE_SENSITIVITY,
            wheel_step: WHEEL_ROTATION_STEP,
            eraser_radius: ERASER_RADIUS,
            grid_pitch: GRID_PITCH,
            ruler_tick_pitch: RULER_TICK_PITCH,
            image_max_width: 600.0,
            image_max_height: 400.0,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> BoardResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| BoardError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn validate(&self) -> BoardResult<()> {
        let positive = [
            ("snap_threshold", self.snap_threshold),
            ("hit_radius", self.hit_radius),
            ("compass_spread", self.compass_spread),
            ("eraser_radius", self.eraser_radius),
            ("grid_pitch", self.grid_pitch),
            ("ruler_tick_pitch", self.ruler_tick_pitch),
            ("image_max_width", self.image_max_width),
            ("image_max_height", self.image_max_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(BoardError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.snap_threshold, SNAP_THRESHOLD);
        assert_eq!(config.hit_radius, WIDGET_HIT_RADIUS);
        assert_eq!(config.compass_spread, COMPASS_SPREAD);
        assert_eq!(config.rotate_sensitivity, ROTATE_SENSITIVITY);
        assert_eq!(config.wheel_step, WHEEL_ROTATION_STEP);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{ "snap_threshold": 12.5 }"#).unwrap();
        assert_eq!(config.snap_threshold, 12.5);
        assert_eq!(config.eraser_radius, ERASER_RADIUS);
        assert_eq!(config.grid_pitch, GRID_PITCH);
    }

    #[test]
    fn test_rejects_non_positive_values() {
        let err = EngineConfig::from_json(r#"{ "grid_pitch": 0 }"#).unwrap_err();
        assert!(matches!(err, BoardError::Config(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(EngineConfig::from_json("{ nope").is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let config = EngineConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(EngineConfig::from_json(&json).unwrap(), config);
    }
}
