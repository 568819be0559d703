//! Zone classification along the forward axis
//!
//! The world is cut into fixed-length zones that cycle grass → water → road.
//! Zones are never stored; they are recomputed from positions on demand, so
//! every caller (spawning, collision, rendering, autopilot) must go through
//! [`classify`] to agree on where a zone starts and what it is.

use serde::{Deserialize, Serialize};

/// Terrain category of a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    Grass,
    Water,
    Road,
}

/// Phase order; index 0 is grass so the run starts on safe ground
const PHASE: [ZoneKind; 3] = [ZoneKind::Grass, ZoneKind::Water, ZoneKind::Road];

impl ZoneKind {
    /// Kind of the zone with the given index
    #[inline]
    pub fn of_index(index: i32) -> Self {
        PHASE[index.rem_euclid(3) as usize]
    }
}

/// A classified zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Zone {
    pub index: i32,
    pub kind: ZoneKind,
}

/// Index of the zone containing forward coordinate `z`
#[inline]
pub fn zone_index(z: f32, zone_size: f32) -> i32 {
    (-z / zone_size).floor() as i32
}

/// Classify a forward coordinate into its zone
#[inline]
pub fn classify(z: f32, zone_size: f32) -> Zone {
    let index = zone_index(z, zone_size);
    Zone {
        index,
        kind: ZoneKind::of_index(index),
    }
}

/// Z range `(near, far)` covered by a zone; `far < near` since forward is -Z
pub fn zone_bounds(index: i32, zone_size: f32) -> (f32, f32) {
    let near = -(index as f32) * zone_size;
    (near, near - zone_size)
}

/// Z coordinate of a zone's midpoint
#[inline]
pub fn zone_center_z(index: i32, zone_size: f32) -> f32 {
    -(index as f32 + 0.5) * zone_size
}

/// First zone index `>= start` of the given kind
pub fn next_zone_of_kind(start: i32, kind: ZoneKind) -> i32 {
    (start..start + 3)
        .find(|&i| ZoneKind::of_index(i) == kind)
        .unwrap_or(start)
}
