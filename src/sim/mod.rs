//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod zone;

pub use collision::{Aabb2, first_car_hit, player_hits_car, player_in_open_water, player_touches_heart};
pub use state::{
    Car, DeathCause, GameEvent, GameState, Heart, JumpState, LifeState, MeshKind,
    ModelAvailability, Player, Visual,
};
pub use tick::{TickInput, tick, update_progress};
pub use zone::{Zone, ZoneKind, classify, zone_center_z, zone_index};
