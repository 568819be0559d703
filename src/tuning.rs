//! Data-driven game balance
//!
//! Every number the simulation depends on lives here so a run can be
//! re-balanced from a JSON file without rebuilding. Missing fields fall back
//! to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::persistence::{self, PersistError};

/// Inconsistent balance values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuningError {
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("{lanes} lanes of width {lane_width} do not fit in a zone of size {zone_size}")]
    LanesOverflowZone {
        lanes: i32,
        lane_width: f32,
        zone_size: f32,
    },
    #[error("{field}: min {min} is greater than max {max}")]
    EmptyRange {
        field: &'static str,
        min: u32,
        max: u32,
    },
    #[error("lane_respawn_x ({respawn}) must be at least lane_wrap_x ({wrap})")]
    RespawnInsideWrap { wrap: f32, respawn: f32 },
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub zone_size: f32,
    pub lanes: i32,
    pub lane_width: f32,
    pub lane_wrap_x: f32,
    pub lane_respawn_x: f32,
    pub bridge_half_width: f32,

    // === Spawning ===
    pub spawn_interval: f32,
    pub cars_per_wave_min: u32,
    pub cars_per_wave_max: u32,
    /// Zones ahead of the player a wave targets (inclusive range)
    pub spawn_ahead_min: u32,
    pub spawn_ahead_max: u32,
    pub despawn_distance: f32,
    pub heart_lookahead_zones: i32,
    /// Car base speed, plus a whole-number bonus in `0..car_speed_jitter`
    pub car_base_speed: f32,
    pub car_speed_jitter: u32,

    // === Player ===
    pub starting_hearts: u32,
    pub move_speed: f32,
    pub boost_multiplier: f32,
    pub boost_duration: f32,
    pub jump_height: f32,
    pub gravity: f32,

    // === Collision ===
    pub collision_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            zone_size: ZONE_SIZE,
            lanes: LANES,
            lane_width: LANE_WIDTH,
            lane_wrap_x: LANE_WRAP_X,
            lane_respawn_x: LANE_RESPAWN_X,
            bridge_half_width: BRIDGE_HALF_WIDTH,

            spawn_interval: SPAWN_INTERVAL,
            cars_per_wave_min: 2,
            cars_per_wave_max: 3,
            spawn_ahead_min: 2,
            spawn_ahead_max: 4,
            despawn_distance: DESPAWN_DISTANCE,
            heart_lookahead_zones: HEART_LOOKAHEAD_ZONES,
            car_base_speed: 10.0,
            car_speed_jitter: 4,

            starting_hearts: 1,
            move_speed: 8.0,
            boost_multiplier: 2.0,
            boost_duration: 5.0,
            jump_height: 2.0,
            gravity: -15.0,

            collision_margin: COLLISION_MARGIN,
        }
    }
}

impl Tuning {
    /// Cars allowed in a single road zone
    pub fn zone_car_cap(&self) -> usize {
        (2 * self.lanes.max(0)) as usize
    }

    /// Lowest lane index (lanes span `[-lanes/2, lanes/2)`)
    pub fn min_lane(&self) -> i32 {
        -self.lanes / 2
    }

    /// One past the highest lane index
    pub fn max_lane(&self) -> i32 {
        self.min_lane() + self.lanes
    }

    /// Z offset of a lane's centre line from its zone centre
    pub fn lane_offset(&self, lane: i32) -> f32 {
        let from_edge = (lane - self.min_lane()) as f32 + 0.5;
        from_edge * self.lane_width - self.lanes as f32 * self.lane_width / 2.0
    }

    /// Launch velocity that peaks at `jump_height`
    pub fn jump_velocity(&self) -> f32 {
        (2.0 * -self.gravity * self.jump_height).sqrt()
    }

    /// Check that the values describe a playable world
    pub fn validate(&self) -> Result<(), TuningError> {
        let positives = [
            ("zone_size", self.zone_size),
            ("lane_width", self.lane_width),
            ("lane_wrap_x", self.lane_wrap_x),
            ("spawn_interval", self.spawn_interval),
            ("despawn_distance", self.despawn_distance),
            ("car_base_speed", self.car_base_speed),
            ("move_speed", self.move_speed),
            ("boost_multiplier", self.boost_multiplier),
            ("jump_height", self.jump_height),
            ("gravity (negated)", -self.gravity),
        ];
        for (field, value) in positives {
            if value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }
        let non_negatives = [
            ("heart_lookahead_zones", self.heart_lookahead_zones as f32),
            ("boost_duration", self.boost_duration),
            ("collision_margin", self.collision_margin),
        ];
        for (field, value) in non_negatives {
            if value < 0.0 {
                return Err(TuningError::Negative { field, value });
            }
        }
        if self.lanes <= 0 {
            return Err(TuningError::NotPositive {
                field: "lanes",
                value: self.lanes as f32,
            });
        }
        if self.lanes as f32 * self.lane_width > self.zone_size {
            return Err(TuningError::LanesOverflowZone {
                lanes: self.lanes,
                lane_width: self.lane_width,
                zone_size: self.zone_size,
            });
        }
        if self.cars_per_wave_min > self.cars_per_wave_max {
            return Err(TuningError::EmptyRange {
                field: "cars_per_wave",
                min: self.cars_per_wave_min,
                max: self.cars_per_wave_max,
            });
        }
        if self.spawn_ahead_min > self.spawn_ahead_max {
            return Err(TuningError::EmptyRange {
                field: "spawn_ahead",
                min: self.spawn_ahead_min,
                max: self.spawn_ahead_max,
            });
        }
        if self.lane_respawn_x < self.lane_wrap_x {
            return Err(TuningError::RespawnInsideWrap {
                wrap: self.lane_wrap_x,
                respawn: self.lane_respawn_x,
            });
        }
        Ok(())
    }

    /// Load tuning from a JSON file and validate it
    pub fn load(path: &Path) -> Result<Self, PersistError> {
        let tuning: Self = persistence::load_json(path)?;
        tuning.validate()?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load tuning, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(tuning) => tuning,
            Err(PersistError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No tuning file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert_eq!(tuning.validate(), Ok(()));
        assert_eq!(tuning.zone_car_cap(), 8);
        assert_eq!(tuning.min_lane(), -2);
        assert_eq!(tuning.max_lane(), 2);
    }

    #[test]
    fn test_lane_offsets_are_centered() {
        let tuning = Tuning::default();
        assert_eq!(tuning.lane_offset(-2), -4.5);
        assert_eq!(tuning.lane_offset(1), 4.5);

        let odd = Tuning {
            lanes: 5,
            ..Default::default()
        };
        assert_eq!(odd.lane_offset(-2), -6.0);
        assert_eq!(odd.lane_offset(0), 0.0);
        assert_eq!(odd.lane_offset(2), 6.0);
    }

    #[test]
    fn test_jump_velocity_reaches_height() {
        let tuning = Tuning::default();
        let v = tuning.jump_velocity();
        // v^2 / (2g) == height
        let peak = v * v / (2.0 * -tuning.gravity);
        assert!((peak - tuning.jump_height).abs() < 1e-4);
    }

    #[test]
    fn test_rejects_lanes_wider_than_zone() {
        let tuning = Tuning {
            lanes: 8,
            lane_width: 3.0,
            zone_size: 15.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::LanesOverflowZone { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_ranges_and_bad_values() {
        let tuning = Tuning {
            cars_per_wave_min: 4,
            cars_per_wave_max: 3,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::EmptyRange { .. })));

        let tuning = Tuning {
            zone_size: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NotPositive { field: "zone_size", .. })
        ));

        let tuning = Tuning {
            gravity: 9.8,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_stalled_cars_and_negative_windows() {
        let tuning = Tuning {
            car_base_speed: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NotPositive { field: "car_base_speed", .. })
        ));

        let tuning = Tuning {
            heart_lookahead_zones: -1,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Negative { field: "heart_lookahead_zones", .. })
        ));

        let tuning = Tuning {
            boost_duration: -0.5,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Negative { field: "boost_duration", .. })
        ));

        // Zero is allowed where only negatives are rejected
        let tuning = Tuning {
            heart_lookahead_zones: 0,
            boost_duration: 0.0,
            collision_margin: 0.0,
            ..Default::default()
        };
        assert_eq!(tuning.validate(), Ok(()));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "starting_hearts": 3 }"#).unwrap();
        assert_eq!(tuning.starting_hearts, 3);
        assert_eq!(tuning.zone_size, ZONE_SIZE);
    }

    #[test]
    fn test_load_or_default_handles_missing_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert_eq!(Tuning::load_or_default(&missing), Tuning::default());

        let invalid = dir.path().join("tuning.json");
        std::fs::write(&invalid, r#"{ "lanes": 0 }"#).unwrap();
        assert!(matches!(
            Tuning::load(&invalid),
            Err(PersistError::Tuning(TuningError::NotPositive { .. }))
        ));
        assert_eq!(Tuning::load_or_default(&invalid), Tuning::default());
    }
}
