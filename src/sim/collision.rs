//! Collision detection on the ground plane
//!
//! Everything collides as axis-aligned rectangles on X-Z; height is ignored,
//! so jumping never clears a car. Hazards get an extra margin so near misses
//! still register as hits.

use glam::{Vec2, Vec3};

use super::state::{Car, Heart, Player};
use super::zone::{ZoneKind, classify};
use crate::ground_plane;

/// Axis-aligned rectangle on the X-Z plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2 {
    /// Centre (x, z)
    pub center: Vec2,
    /// Half-extents (x, z)
    pub half: Vec2,
}

impl Aabb2 {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    /// Box for an entity whose visual is `scale` units wide, centred on `pos`
    pub fn from_scale(pos: Vec3, scale: Vec3) -> Self {
        Self {
            center: ground_plane(pos),
            half: Vec2::new(scale.x, scale.z) / 2.0,
        }
    }

    /// Strict overlap with `other` grown by `margin` on every side.
    ///
    /// Boxes that exactly touch do not overlap unless `margin > 0`.
    pub fn overlaps(&self, other: &Aabb2, margin: f32) -> bool {
        let delta = (self.center - other.center).abs();
        let reach = self.half + other.half + Vec2::splat(margin);
        delta.x < reach.x && delta.y < reach.y
    }
}

/// Does the player touch this car (car box grown by `margin`)?
#[inline]
pub fn player_hits_car(player: &Player, car: &Car, margin: f32) -> bool {
    car.bounds().overlaps(&player.bounds(), margin)
}

/// Does the player touch this heart? Pickups use no margin.
#[inline]
pub fn player_touches_heart(player: &Player, heart: &Heart) -> bool {
    heart.bounds().overlaps(&player.bounds(), 0.0)
}

/// Is the player standing in water off the bridge?
///
/// Airborne players are safe; only a grounded player sinks.
pub fn player_in_open_water(player: &Player, zone_size: f32, bridge_half_width: f32) -> bool {
    !player.is_airborne()
        && classify(player.pos.z, zone_size).kind == ZoneKind::Water
        && player.pos.x.abs() > bridge_half_width
}

/// Index of the first car (in list order) the player is touching
pub fn first_car_hit(player: &Player, cars: &[Car], margin: f32) -> Option<usize> {
    cars.iter().position(|car| player_hits_car(player, car, margin))
}
