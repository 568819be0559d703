//! Game state and core simulation types
//!
//! The whole session lives in [`GameState`], owned by the frame loop.
//! Renderers and audio only ever borrow it for a frame.

use std::collections::BTreeSet;

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb2;
use super::spawn;
use crate::consts::{CAR_Y, GROUND_Y, HEART_HEIGHT};
use crate::tuning::{Tuning, TuningError};

/// Life state of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeState {
    Alive,
    /// Terminal until the session is reset
    Dead { cause: DeathCause },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    RunOver,
    Drowned,
}

/// Something that happened during a tick, drained by audio/HUD each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CarsSpawned { count: u32 },
    HeartSpawned { zone: i32 },
    CarHit { hearts_left: u32 },
    HeartCollected { hearts: u32 },
    Died { cause: DeathCause, score: u64 },
    Jumped,
    BoostActivated,
    Restarted,
}

/// Which shapes the primitive fallback draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeshKind {
    Player,
    Car,
    Heart,
}

/// How an entity is drawn, decided once when it is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visual {
    /// Loaded model asset
    Model(MeshKind),
    /// Built-in box mesh
    Primitive(MeshKind),
}

impl Visual {
    pub fn pick(kind: MeshKind, model_loaded: bool) -> Self {
        if model_loaded {
            Visual::Model(kind)
        } else {
            Visual::Primitive(kind)
        }
    }

    pub fn mesh(&self) -> MeshKind {
        match *self {
            Visual::Model(kind) | Visual::Primitive(kind) => kind,
        }
    }

    /// World-space scale; collision extents derive from this
    pub fn scale(&self) -> Vec3 {
        match *self {
            Visual::Model(MeshKind::Car) => Vec3::splat(2.5),
            Visual::Primitive(MeshKind::Car) => Vec3::new(4.0, 1.2, 2.0),
            Visual::Model(MeshKind::Player) | Visual::Primitive(MeshKind::Player) => Vec3::ONE,
            Visual::Model(MeshKind::Heart) | Visual::Primitive(MeshKind::Heart) => {
                Vec3::splat(HEART_SCALE)
            }
        }
    }
}

/// Which model assets the rendering side managed to load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelAvailability {
    pub player: bool,
    pub car: bool,
}

pub const HEART_SCALE: f32 = 1.0;

/// Vertical motion of the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum JumpState {
    Grounded,
    Airborne { vertical_velocity: f32 },
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec3,
    /// Planar velocity (x, z) from the last movement input
    pub vel: Vec2,
    pub jump: JumpState,
    /// Seconds of speed boost left (0 = inactive)
    pub boost_timer: f32,
    pub hearts: u32,
    pub visual: Visual,
}

impl Player {
    pub fn new(hearts: u32, model_loaded: bool) -> Self {
        Self {
            pos: Vec3::new(0.0, GROUND_Y, 0.0),
            vel: Vec2::ZERO,
            jump: JumpState::Grounded,
            boost_timer: 0.0,
            hearts,
            visual: Visual::pick(MeshKind::Player, model_loaded),
        }
    }

    pub fn is_airborne(&self) -> bool {
        matches!(self.jump, JumpState::Airborne { .. })
    }

    pub fn has_boost(&self) -> bool {
        self.boost_timer > 0.0
    }

    pub fn bounds(&self) -> Aabb2 {
        Aabb2::from_scale(self.pos, self.visual.scale())
    }

    /// Start a jump; returns false if already in the air
    pub fn jump(&mut self, tuning: &Tuning) -> bool {
        if self.is_airborne() {
            return false;
        }
        self.jump = JumpState::Airborne {
            vertical_velocity: tuning.jump_velocity(),
        };
        true
    }

    pub fn activate_boost(&mut self, tuning: &Tuning) {
        self.boost_timer = tuning.boost_duration;
    }

    /// Apply movement input (x, z), gravity and the boost timer
    pub fn advance(&mut self, direction: Vec2, dt: f32, tuning: &Tuning) {
        let mut speed = tuning.move_speed;
        if self.has_boost() {
            speed *= tuning.boost_multiplier;
        }
        self.vel = direction.normalize_or_zero() * speed;
        self.pos.x = (self.pos.x + self.vel.x * dt).clamp(-tuning.lane_wrap_x, tuning.lane_wrap_x);
        self.pos.z += self.vel.y * dt;

        if let JumpState::Airborne {
            ref mut vertical_velocity,
        } = self.jump
        {
            *vertical_velocity += tuning.gravity * dt;
            self.pos.y += *vertical_velocity * dt;
            if self.pos.y <= GROUND_Y {
                self.pos.y = GROUND_Y;
                self.jump = JumpState::Grounded;
            }
        }

        if self.boost_timer > 0.0 {
            self.boost_timer = (self.boost_timer - dt).max(0.0);
        }
    }
}

/// A car driving along one lane of a road zone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub id: u32,
    pub lane: i32,
    pub lane_width: f32,
    pub pos: Vec3,
    /// Horizontal speed; the sign is the driving direction
    pub vel_x: f32,
    pub visual: Visual,
    pub color: [f32; 3],
}

impl Car {
    pub fn moving_right(&self) -> bool {
        self.vel_x > 0.0
    }

    pub fn bounds(&self) -> Aabb2 {
        Aabb2::from_scale(self.pos, self.visual.scale())
    }

    /// Drive along X, wrapping to the opposite edge instead of leaving
    pub fn advance(&mut self, dt: f32, wrap_x: f32, respawn_x: f32) {
        self.pos.x += self.vel_x * dt;
        if self.vel_x > 0.0 && self.pos.x > wrap_x {
            self.pos.x = -respawn_x;
        } else if self.vel_x < 0.0 && self.pos.x < -wrap_x {
            self.pos.x = respawn_x;
        }
    }

    /// Facing angle around Y, in degrees
    pub fn yaw_degrees(&self) -> f32 {
        if self.moving_right() { 90.0 } else { -90.0 }
    }
}

/// A heart pickup sitting in the middle of a grass zone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heart {
    pub id: u32,
    pub zone: i32,
    pub pos: Vec3,
}

impl Heart {
    pub fn new(id: u32, zone: i32, center_z: f32) -> Self {
        Self {
            id,
            zone,
            pos: Vec3::new(0.0, HEART_HEIGHT, center_z),
        }
    }

    pub fn bounds(&self) -> Aabb2 {
        Aabb2::from_scale(self.pos, Vec3::splat(HEART_SCALE))
    }
}

/// Complete game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Number of resets since the session started
    pub restarts: u32,
    rng: Pcg32,
    pub tuning: Tuning,
    pub models: ModelAvailability,
    pub life: LifeState,
    pub player: Player,
    /// Live cars (sorted by id)
    pub cars: Vec<Car>,
    /// Uncollected hearts (sorted by id)
    pub hearts: Vec<Heart>,
    /// High-water score
    pub score: u64,
    /// Furthest forward distance reached
    pub distance_travelled: f32,
    /// `distance_travelled` at the last car wave
    pub last_spawn_distance: f32,
    /// Grass zones that already received their heart
    pub heart_zones_used: BTreeSet<i32>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game with default tuning and primitive meshes
    pub fn new(seed: u64) -> Self {
        let mut state = Self::empty(seed, 0, Tuning::default(), ModelAvailability::default());
        spawn::populate(&mut state);
        state
    }

    /// Start a session with custom balance; rejects tuning the spawner cannot use
    pub fn with_tuning(
        seed: u64,
        tuning: Tuning,
        models: ModelAvailability,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;
        let mut state = Self::empty(seed, 0, tuning, models);
        spawn::populate(&mut state);
        Ok(state)
    }

    /// A session with no cars or hearts; spawning has not run yet.
    /// `tuning` must already be validated.
    pub(crate) fn empty(seed: u64, restarts: u32, tuning: Tuning, models: ModelAvailability) -> Self {
        let stream_seed = seed.wrapping_add((restarts as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self {
            seed,
            restarts,
            rng: Pcg32::seed_from_u64(stream_seed),
            player: Player::new(tuning.starting_hearts, models.player),
            tuning,
            models,
            life: LifeState::Alive,
            cars: Vec::new(),
            hearts: Vec::new(),
            score: 0,
            distance_travelled: 0.0,
            last_spawn_distance: 0.0,
            heart_zones_used: BTreeSet::new(),
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild the whole session from initial conditions
    pub fn reset(&mut self) {
        let restarts = self.restarts + 1;
        log::info!("Restarting run (restart #{})", restarts);
        let mut fresh = Self::empty(self.seed, restarts, self.tuning.clone(), self.models);
        spawn::populate(&mut fresh);
        fresh.events.push(GameEvent::Restarted);
        *self = fresh;
    }

    pub fn is_dead(&self) -> bool {
        matches!(self.life, LifeState::Dead { .. })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Keep entity lists sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.cars.sort_by_key(|c| c.id);
        self.hearts.sort_by_key(|h| h.id);
    }

    /// Build a car in a lane of the zone centred at `zone_center_z`
    pub fn make_car(&mut self, lane: i32, zone_center_z: f32, moving_right: bool, speed: f32, x: f32) -> Car {
        let lane_width = self.tuning.lane_width;
        let id = self.next_entity_id();
        let visual = Visual::pick(MeshKind::Car, self.models.car);
        let color = spawn::random_car_color(self.rng());
        Car {
            id,
            lane,
            lane_width,
            pos: Vec3::new(x, CAR_Y, zone_center_z + self.tuning.lane_offset(lane)),
            vel_x: if moving_right { speed } else { -speed },
            visual,
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_alive_on_grass() {
        let state = GameState::new(42);
        assert_eq!(state.life, LifeState::Alive);
        assert_eq!(state.player.hearts, 1);
        assert_eq!(state.score, 0);
        assert!(!state.cars.is_empty());
        assert!(!state.hearts.is_empty());
    }

    #[test]
    fn test_visual_scale_depends_on_fallback() {
        assert_eq!(Visual::pick(MeshKind::Car, true).scale(), Vec3::splat(2.5));
        assert_eq!(
            Visual::pick(MeshKind::Car, false).scale(),
            Vec3::new(4.0, 1.2, 2.0)
        );
        assert_eq!(Visual::Model(MeshKind::Heart).mesh(), MeshKind::Heart);
    }

    #[test]
    fn test_jump_lands_back_on_ground() {
        let tuning = Tuning::default();
        let mut player = Player::new(1, false);
        assert!(player.jump(&tuning));
        assert!(!player.jump(&tuning), "no double jump");

        let mut peak = player.pos.y;
        for _ in 0..240 {
            player.advance(Vec2::ZERO, 1.0 / 120.0, &tuning);
            peak = peak.max(player.pos.y);
        }
        assert!(!player.is_airborne());
        assert_eq!(player.pos.y, GROUND_Y);
        assert!((peak - GROUND_Y - tuning.jump_height).abs() < 0.1);
    }

    #[test]
    fn test_boost_doubles_speed_then_expires() {
        let tuning = Tuning::default();
        let mut player = Player::new(1, false);
        player.activate_boost(&tuning);
        player.advance(Vec2::new(0.0, -1.0), 0.5, &tuning);
        assert!((player.pos.z + tuning.move_speed * 2.0 * 0.5).abs() < 1e-4);

        player.advance(Vec2::ZERO, tuning.boost_duration, &tuning);
        assert!(!player.has_boost());
        let z = player.pos.z;
        player.advance(Vec2::new(0.0, -1.0), 0.5, &tuning);
        assert!((player.pos.z - (z - tuning.move_speed * 0.5)).abs() < 1e-4);
    }

    #[test]
    fn test_diagonal_input_is_normalized() {
        let tuning = Tuning::default();
        let mut player = Player::new(1, false);
        player.advance(Vec2::new(1.0, -1.0), 1.0, &tuning);
        assert!((player.vel.length() - tuning.move_speed).abs() < 1e-4);
    }

    #[test]
    fn test_car_wraps_instead_of_leaving() {
        let mut state = GameState::empty(1, 0, Tuning::default(), ModelAvailability::default());
        let mut car = state.make_car(0, -37.5, true, 10.0, 39.5);
        car.advance(0.1, 40.0, 50.0);
        assert_eq!(car.pos.x, -50.0);
        assert_eq!(car.vel_x, 10.0);

        let mut car = state.make_car(0, -37.5, false, 10.0, -39.5);
        car.advance(0.1, 40.0, 50.0);
        assert_eq!(car.pos.x, 50.0);
        assert_eq!(car.vel_x, -10.0);
    }

    #[test]
    fn test_with_tuning_rejects_unusable_balance() {
        let inverted = Tuning {
            cars_per_wave_min: 3,
            cars_per_wave_max: 2,
            ..Default::default()
        };
        assert!(matches!(
            GameState::with_tuning(1, inverted, ModelAvailability::default()),
            Err(TuningError::EmptyRange { .. })
        ));

        let no_lanes = Tuning {
            lanes: 0,
            ..Default::default()
        };
        assert!(GameState::with_tuning(1, no_lanes, ModelAvailability::default()).is_err());

        let state = GameState::with_tuning(1, Tuning::default(), ModelAvailability::default())
            .expect("default tuning is valid");
        assert!(!state.cars.is_empty());
    }

    #[test]
    fn test_reset_restores_initial_conditions() {
        let mut state = GameState::new(7);
        state.player.pos.z = -100.0;
        state.score = 50;
        state.life = LifeState::Dead {
            cause: DeathCause::RunOver,
        };
        state.heart_zones_used.insert(99);
        state.reset();

        assert_eq!(state.life, LifeState::Alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.pos.z, 0.0);
        assert!(!state.heart_zones_used.contains(&99));
        assert_eq!(state.restarts, 1);
        assert_eq!(state.events.last(), Some(&GameEvent::Restarted));
    }
}
