//! Game balance values
//!
//! Everything that shapes difficulty lives here so it can be tweaked from a
//! JSON file without a rebuild. Fixed rules (level count, obstacles per
//! level, reward) stay in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_ITEMS_PER_LEVEL;
use crate::error::GameError;

/// Data-driven balance knobs. Missing fields take their default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player physics (per tick) ===
    /// Downward velocity added each airborne tick
    pub gravity: f32,
    /// Initial vertical velocity of a jump (negative = up)
    pub jump_velocity: f32,

    // === Scrolling ===
    /// Scroll speed at level 1 (pixels per tick)
    pub base_scroll_speed: f32,
    /// Extra scroll speed per level above 1
    pub scroll_speed_per_level: f32,

    // === Obstacle layout ===
    /// X position of the first obstacle
    pub first_obstacle_x: f32,
    /// Gap between consecutive obstacles at level 1
    pub obstacle_spacing: f32,
    /// Spacing lost per level above 1
    pub obstacle_spacing_step: f32,
    /// Spacing never drops below this
    pub min_obstacle_spacing: f32,

    // === Item layout ===
    /// Items at level 0 (level N spawns `base_items + N`, capped)
    pub base_items: u32,
    /// X position of the first item
    pub first_item_x: f32,
    /// Gap between consecutive items before jitter
    pub item_spacing: f32,
    /// Max horizontal jitter either way
    pub item_x_jitter: f32,
    /// Height of an item's bottom edge above the ground line before jitter
    pub item_base_height: f32,
    /// Max vertical jitter either way
    pub item_y_jitter: f32,
    /// Lowest allowed item height above the ground line
    pub item_min_height: f32,
    /// Highest allowed item height above the ground line
    pub item_max_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.8,
            jump_velocity: -15.0,

            base_scroll_speed: 4.0,
            scroll_speed_per_level: 0.3,

            first_obstacle_x: 600.0,
            obstacle_spacing: 420.0,
            obstacle_spacing_step: 18.0,
            min_obstacle_spacing: 260.0,

            base_items: 4,
            first_item_x: 500.0,
            item_spacing: 180.0,
            item_x_jitter: 30.0,
            item_base_height: 60.0,
            item_y_jitter: 40.0,
            item_min_height: 10.0,
            item_max_height: 150.0,
        }
    }
}

impl Tuning {
    /// Per-tick scroll speed for a level (grows linearly)
    pub fn scroll_speed(&self, level: u32) -> f32 {
        self.base_scroll_speed + level.saturating_sub(1) as f32 * self.scroll_speed_per_level
    }

    /// Obstacle spacing for a level (shrinks linearly, floored)
    pub fn obstacle_spacing(&self, level: u32) -> f32 {
        let shrink = level.saturating_sub(1) as f32 * self.obstacle_spacing_step;
        (self.obstacle_spacing - shrink).max(self.min_obstacle_spacing)
    }

    /// Item count for a level (grows linearly, capped)
    pub fn item_count(&self, level: u32) -> u32 {
        (self.base_items + level).min(MAX_ITEMS_PER_LEVEL)
    }

    /// Parse tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Self = serde_json::from_str(json).map_err(|e| GameError::Corrupt {
            what: "tuning",
            reason: e.to_string(),
        })?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        let fields = [
            ("gravity", self.gravity),
            ("jump_velocity", self.jump_velocity),
            ("base_scroll_speed", self.base_scroll_speed),
            ("scroll_speed_per_level", self.scroll_speed_per_level),
            ("first_obstacle_x", self.first_obstacle_x),
            ("obstacle_spacing", self.obstacle_spacing),
            ("obstacle_spacing_step", self.obstacle_spacing_step),
            ("min_obstacle_spacing", self.min_obstacle_spacing),
            ("first_item_x", self.first_item_x),
            ("item_spacing", self.item_spacing),
            ("item_x_jitter", self.item_x_jitter),
            ("item_base_height", self.item_base_height),
            ("item_y_jitter", self.item_y_jitter),
            ("item_min_height", self.item_min_height),
            ("item_max_height", self.item_max_height),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(format!("{} is not finite", name)));
        }

        // Player must land again
        if self.gravity <= 0.0 {
            return Err(invalid(format!("gravity {} must be positive", self.gravity)));
        }
        if self.jump_velocity >= 0.0 {
            return Err(invalid(format!(
                "jump_velocity {} must be negative (up)",
                self.jump_velocity
            )));
        }
        // Entities must keep moving left
        if self.base_scroll_speed <= 0.0 || self.scroll_speed_per_level < 0.0 {
            return Err(invalid(format!(
                "scroll speed {} + {}/level must be positive and non-decreasing",
                self.base_scroll_speed, self.scroll_speed_per_level
            )));
        }
        if self.min_obstacle_spacing <= 0.0 || self.obstacle_spacing_step < 0.0 {
            return Err(invalid(format!(
                "obstacle spacing floor {} / step {} out of range",
                self.min_obstacle_spacing, self.obstacle_spacing_step
            )));
        }
        if self.item_x_jitter < 0.0 || self.item_y_jitter < 0.0 {
            return Err(invalid("item jitter must not be negative".to_string()));
        }
        if self.item_min_height < 0.0 || self.item_min_height > self.item_max_height {
            return Err(invalid(format!(
                "item height band [{}, {}] is empty or below ground",
                self.item_min_height, self.item_max_height
            )));
        }
        Ok(())
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No tuning file at {} ({}), using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

fn invalid(reason: String) -> GameError {
    GameError::Corrupt {
        what: "tuning",
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_speed_grows_with_level() {
        let tuning = Tuning::default();
        assert!((tuning.scroll_speed(1) - 4.0).abs() < 1e-6);
        assert!(tuning.scroll_speed(10) > tuning.scroll_speed(9));
    }

    #[test]
    fn test_obstacle_spacing_floors() {
        let tuning = Tuning::default();
        assert!((tuning.obstacle_spacing(1) - 420.0).abs() < 1e-6);
        assert!((tuning.obstacle_spacing(2) - 402.0).abs() < 1e-6);
        assert!((tuning.obstacle_spacing(10) - 260.0).abs() < 1e-6);
        assert!((tuning.obstacle_spacing(50) - 260.0).abs() < 1e-6);
    }

    #[test]
    fn test_item_count_caps() {
        let tuning = Tuning::default();
        assert_eq!(tuning.item_count(1), 5);
        assert_eq!(tuning.item_count(8), 12);
        assert_eq!(tuning.item_count(10), 12);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 1.0 }"#).unwrap();
        assert!((tuning.gravity - 1.0).abs() < 1e-6);
        assert!((tuning.jump_velocity - Tuning::default().jump_velocity).abs() < 1e-6);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Tuning::from_json("{ gravity: ").is_err());
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let bad = [
            r#"{ "gravity": 0.0 }"#,
            r#"{ "gravity": -0.5 }"#,
            r#"{ "jump_velocity": 0.0 }"#,
            r#"{ "jump_velocity": 12.0 }"#,
            r#"{ "base_scroll_speed": 0.0 }"#,
            r#"{ "scroll_speed_per_level": -0.1 }"#,
            r#"{ "min_obstacle_spacing": 0.0 }"#,
            r#"{ "obstacle_spacing_step": -5.0 }"#,
            r#"{ "item_x_jitter": -1.0 }"#,
            r#"{ "item_y_jitter": -1.0 }"#,
            r#"{ "item_min_height": -1.0 }"#,
            r#"{ "item_min_height": 200.0, "item_max_height": 100.0 }"#,
        ];
        for json in bad {
            assert!(
                matches!(Tuning::from_json(json), Err(GameError::Corrupt { what: "tuning", .. })),
                "accepted {}",
                json
            );
        }
    }

    #[test]
    fn test_non_finite_value_rejected() {
        let tuning = Tuning {
            item_spacing: f32::NAN,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_err());
        let tuning = Tuning {
            gravity: f32::INFINITY,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuning.json");
        std::fs::write(&path, r#"{ "item_min_height": 200.0, "item_max_height": 100.0 }"#)
            .unwrap();
        assert_eq!(Tuning::load_from(&path), Tuning::default());

        std::fs::write(&path, r#"{ "gravity": 1.2 }"#).unwrap();
        assert!((Tuning::load_from(&path).gravity - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let tuning = Tuning::load_from(dir.path().join("nope.json"));
        assert_eq!(tuning, Tuning::default());
    }
}
