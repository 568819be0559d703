//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically:
//! input → player → cars → spawning → collisions → score.

use glam::Vec2;

use super::collision::{first_car_hit, player_in_open_water, player_touches_heart};
use super::spawn;
use super::state::{DeathCause, GameEvent, GameState, LifeState};
use super::zone::{ZoneKind, classify};
use crate::consts::SCORE_UNIT;
use crate::forward_distance;

/// Autopilot steers back to x = 0 once it drifts further than this
pub const AUTOPILOT_CENTER_SLACK: f32 = 0.25;
/// Autopilot waits if a car reaches its column within this many seconds
pub const AUTOPILOT_REACTION_TIME: f32 = 0.6;
/// Share of the zone the autopilot looks ahead for water
pub const AUTOPILOT_WATER_LOOKAHEAD: f32 = 0.1;
/// Share of the bridge half-width the autopilot treats as safe
pub const AUTOPILOT_BRIDGE_FRACTION: f32 = 0.5;

/// Input commands for a single tick (deterministic)
///
/// Directions are held state; `jump`, `boost` and `restart` are one-shot
/// edges that the platform layer clears after they have been consumed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub boost: bool,
    pub restart: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

impl TickInput {
    /// Planar movement direction (x, z); forward is -Z. Not normalized.
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.forward {
            dir.y -= 1.0;
        }
        if self.back {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Dead is terminal; only a restart gets out of it
    if state.is_dead() {
        if input.restart || input.idle_mode {
            state.reset();
        }
        return;
    }

    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input);
    }
    let input = &input;

    state.time_ticks += 1;

    // Player kinematics
    if input.jump && state.player.jump(&state.tuning) {
        state.events.push(GameEvent::Jumped);
    }
    if input.boost {
        state.player.activate_boost(&state.tuning);
        state.events.push(GameEvent::BoostActivated);
        log::debug!("Speed boost activated ({}s)", state.tuning.boost_duration);
    }
    state.player.advance(input.direction(), dt, &state.tuning);

    // Traffic keeps looping along its lanes
    let (wrap_x, respawn_x) = (state.tuning.lane_wrap_x, state.tuning.lane_respawn_x);
    for car in &mut state.cars {
        car.advance(dt, wrap_x, respawn_x);
    }

    state.distance_travelled = state
        .distance_travelled
        .max(forward_distance(state.player.pos.z));

    spawn::update(state);

    resolve_collisions(state);

    if !state.is_dead() {
        update_progress(state);
    }

    // Ensure deterministic ordering
    state.normalize_order();

    log::trace!(
        "tick {} pos=({:.2}, {:.2}, {:.2}) hearts={} cars={} score={}",
        state.time_ticks,
        state.player.pos.x,
        state.player.pos.y,
        state.player.pos.z,
        state.player.hearts,
        state.cars.len(),
        state.score
    );
}

/// Apply car hits, drowning and heart pickups
pub fn resolve_collisions(state: &mut GameState) {
    let margin = state.tuning.collision_margin;

    // Each car can only hit once: it is removed with the heart it costs
    while let Some(index) = first_car_hit(&state.player, &state.cars, margin) {
        if state.player.hearts == 0 {
            kill(state, DeathCause::RunOver);
            return;
        }
        let car = state.cars.remove(index);
        state.player.hearts -= 1;
        log::info!(
            "Hit by car {} - {} heart(s) left",
            car.id,
            state.player.hearts
        );
        state.events.push(GameEvent::CarHit {
            hearts_left: state.player.hearts,
        });
    }

    if player_in_open_water(
        &state.player,
        state.tuning.zone_size,
        state.tuning.bridge_half_width,
    ) {
        kill(state, DeathCause::Drowned);
        return;
    }

    let player = &state.player;
    let mut collected = 0u32;
    state.hearts.retain(|heart| {
        let touching = player_touches_heart(player, heart);
        if touching {
            collected += 1;
        }
        !touching
    });
    for _ in 0..collected {
        state.player.hearts += 1;
        state.events.push(GameEvent::HeartCollected {
            hearts: state.player.hearts,
        });
        log::info!("Heart collected - {} heart(s)", state.player.hearts);
    }
}

fn kill(state: &mut GameState, cause: DeathCause) {
    state.life = LifeState::Dead { cause };
    state.events.push(GameEvent::Died {
        cause,
        score: state.score,
    });
    log::info!("Game over ({:?}) - final score {}", cause, state.score);
}

/// Raise the score to the furthest forward progress, never lowering it
pub fn update_progress(state: &mut GameState) {
    let candidate = (forward_distance(state.player.pos.z) / SCORE_UNIT).floor();
    if candidate > 0.0 && candidate as u64 > state.score {
        state.score = candidate as u64;
    }
}

/// Demo AI: walk forward along the bridge line, waiting for gaps in traffic
fn autopilot(state: &GameState, input: &mut TickInput) {
    let player = &state.player;
    let tuning = &state.tuning;

    input.back = false;
    input.restart = false;

    // Hearts and bridges both sit on x = 0
    input.left = player.pos.x > AUTOPILOT_CENTER_SLACK;
    input.right = player.pos.x < -AUTOPILOT_CENTER_SLACK;

    // Wait at the curb if a car is about to cross the stripe just ahead
    let player_half = player.bounds().half;
    let danger = state.cars.iter().any(|car| {
        let bounds = car.bounds();
        let reach_z = bounds.half.y + player_half.y + tuning.collision_margin;
        let ahead = player.pos.z - car.pos.z;
        if car.vel_x == 0.0 || ahead <= 0.0 || ahead > reach_z + tuning.lane_width {
            return false;
        }
        let gap = (car.pos.x - player.pos.x) * -car.vel_x.signum();
        let reach_x = bounds.half.x + player_half.x + tuning.collision_margin;
        let time_to_reach = (gap - reach_x) / car.vel_x.abs();
        gap > -reach_x && time_to_reach < AUTOPILOT_REACTION_TIME
    });

    // Only cross water over the bridge
    let next = classify(player.pos.z - tuning.zone_size * AUTOPILOT_WATER_LOOKAHEAD, tuning.zone_size);
    let off_bridge = player.pos.x.abs() > tuning.bridge_half_width * AUTOPILOT_BRIDGE_FRACTION;
    let water_blocked = next.kind == ZoneKind::Water && off_bridge;

    input.forward = !danger && !water_blocked;
}
