//! Procedural streaming of traffic and pickups
//!
//! Cars are created in waves a few zones ahead of the player as they make
//! forward progress, and dropped once they fall far behind. Hearts appear
//! once per grass zone as zones enter the lookahead window.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{GameEvent, GameState, Heart};
use super::zone::{ZoneKind, classify, next_zone_of_kind, zone_center_z, zone_index};

/// Initial population for a fresh session
pub fn populate(state: &mut GameState) {
    spawn_car_wave(state);
    spawn_hearts(state);
}

/// Per-tick streaming step: spawn a car wave if due, top up hearts, drop stale cars
pub fn update(state: &mut GameState) {
    if state.distance_travelled - state.last_spawn_distance >= state.tuning.spawn_interval {
        state.last_spawn_distance = state.distance_travelled;
        spawn_car_wave(state);
    }
    spawn_hearts(state);
    despawn_cars(state);
}

/// Cars currently driving in the given zone
pub fn cars_in_zone(state: &GameState, zone: i32) -> usize {
    let zone_size = state.tuning.zone_size;
    state
        .cars
        .iter()
        .filter(|car| classify(car.pos.z, zone_size).index == zone)
        .count()
}

/// Create one wave of cars ahead of the player; returns how many were placed
pub fn spawn_car_wave(state: &mut GameState) -> u32 {
    let tuning = state.tuning.clone();
    let player_zone = zone_index(state.player.pos.z, tuning.zone_size);
    let cap = tuning.zone_car_cap();

    let wave_size = state
        .rng()
        .random_range(tuning.cars_per_wave_min..=tuning.cars_per_wave_max);

    let mut placed = 0;
    for _ in 0..wave_size {
        let rng = state.rng();
        let lane = rng.random_range(tuning.min_lane()..tuning.max_lane());
        let moving_right = rng.random_bool(0.5);
        let ahead = rng.random_range(tuning.spawn_ahead_min..=tuning.spawn_ahead_max) as i32;
        let speed_bonus = if tuning.car_speed_jitter > 0 {
            rng.random_range(0..tuning.car_speed_jitter) as f32
        } else {
            0.0
        };
        let x = rng.random_range(-tuning.lane_wrap_x..=tuning.lane_wrap_x);

        let zone = next_zone_of_kind(player_zone + ahead, ZoneKind::Road);
        if cars_in_zone(state, zone) >= cap {
            log::debug!("Zone {} is full ({} cars), discarding car", zone, cap);
            continue;
        }

        let center_z = zone_center_z(zone, tuning.zone_size);
        let car = state.make_car(
            lane,
            center_z,
            moving_right,
            tuning.car_base_speed + speed_bonus,
            x,
        );
        log::debug!(
            "Spawned car {} in zone {} lane {} at x={:.1} vel={:.1}",
            car.id,
            zone,
            lane,
            car.pos.x,
            car.vel_x
        );
        state.cars.push(car);
        placed += 1;
    }

    if placed > 0 {
        state.events.push(GameEvent::CarsSpawned { count: placed });
    }
    placed
}

/// Give every unseen grass zone in the lookahead window its one heart
pub fn spawn_hearts(state: &mut GameState) -> u32 {
    let zone_size = state.tuning.zone_size;
    let first = zone_index(state.player.pos.z, zone_size);
    let last = first + state.tuning.heart_lookahead_zones;

    let mut spawned = 0;
    for zone in first..=last {
        if ZoneKind::of_index(zone) != ZoneKind::Grass {
            continue;
        }
        // Insert-once: creation alone retires the zone
        if !state.heart_zones_used.insert(zone) {
            continue;
        }
        let id = state.next_entity_id();
        state
            .hearts
            .push(Heart::new(id, zone, zone_center_z(zone, zone_size)));
        state.events.push(GameEvent::HeartSpawned { zone });
        log::debug!("Spawned heart {} in zone {}", id, zone);
        spawned += 1;
    }
    spawned
}

/// Remove cars that left road zones or fell too far behind
pub fn despawn_cars(state: &mut GameState) -> usize {
    let zone_size = state.tuning.zone_size;
    let max_behind = state.tuning.despawn_distance;
    let player_z = state.player.pos.z;

    let before = state.cars.len();
    state.cars.retain(|car| {
        if classify(car.pos.z, zone_size).kind != ZoneKind::Road {
            log::debug!("Car {} left the road at z={:.1}, removing", car.id, car.pos.z);
            return false;
        }
        // Forward is -Z, so "behind" is larger Z
        car.pos.z - player_z <= max_behind
    });
    before - state.cars.len()
}

/// Random pastel-ish body colour
pub fn random_car_color(rng: &mut Pcg32) -> [f32; 3] {
    let mut channel = || 0.3 + rng.random::<f32>() * 0.7;
    [channel(), channel(), channel()]
}
