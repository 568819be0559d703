//! Turtle Crossing - An endless road-crossing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (zones, spawning, collisions, game state)
//! - `renderer`: Frame hand-off to the external rendering collaborator
//! - `audio`: Sound effect / music triggers for the external audio backend
//! - `platform`: Input edge detection
//! - `persistence`: JSON load/save for settings, tuning and high scores
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Length of one zone along the forward (Z) axis
    pub const ZONE_SIZE: f32 = 15.0;
    /// Lanes per road zone
    pub const LANES: i32 = 4;
    pub const LANE_WIDTH: f32 = 3.0;

    /// Forward distance between car spawn waves
    pub const SPAWN_INTERVAL: f32 = 10.0;
    /// Cars further than this behind the player are removed
    pub const DESPAWN_DISTANCE: f32 = 60.0;
    /// Grass zones ahead of the player that get a heart
    pub const HEART_LOOKAHEAD_ZONES: i32 = 12;

    /// Cars moving past this |x| wrap around
    pub const LANE_WRAP_X: f32 = 40.0;
    /// Where a wrapped car re-enters (beyond the wrap edge for spacing)
    pub const LANE_RESPAWN_X: f32 = 50.0;

    /// Half-width of the walkable bridge across water zones
    pub const BRIDGE_HALF_WIDTH: f32 = 2.0;
    /// Extra slack added around cars when testing hits
    pub const COLLISION_MARGIN: f32 = 0.25;

    /// Player feet height when grounded
    pub const GROUND_Y: f32 = 0.5;
    pub const HEART_HEIGHT: f32 = 1.0;
    pub const CAR_Y: f32 = 0.3;

    /// Forward units per score point
    pub const SCORE_UNIT: f32 = 2.0;
}

/// Project a world position onto the X-Z ground plane
#[inline]
pub fn ground_plane(pos: Vec3) -> Vec2 {
    Vec2::new(pos.x, pos.z)
}

/// Forward distance for a Z coordinate (forward is -Z)
#[inline]
pub fn forward_distance(z: f32) -> f32 {
    -z
}
