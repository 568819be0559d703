//! Per-frame draw list built from the simulation state

use super::camera::Camera;
use super::hud::hud_lines;
use super::instance::{InstanceData, colors};
use crate::settings::Settings;
use crate::sim::{GameState, MeshKind, Visual, ZoneKind, zone::zone_bounds, zone_index};

/// Zones drawn behind the player
const ZONES_BEHIND: i32 = 2;

/// A flat band of ground covering one zone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundStrip {
    pub zone: i32,
    pub kind: ZoneKind,
    /// Z of the edge nearest the start
    pub near_z: f32,
    /// Z of the edge further forward
    pub far_z: f32,
    pub color: [f32; 4],
    /// Walkable bridge across water strips
    pub bridge: Option<Bridge>,
}

/// Plank strip centred on x = 0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bridge {
    pub half_width: f32,
    pub color: [f32; 4],
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub camera: Camera,
    pub ground: Vec<GroundStrip>,
    pub instances: Vec<InstanceData>,
    pub hud: Vec<String>,
    pub clear_color: [f32; 4],
}

impl FrameSnapshot {
    pub fn capture(state: &GameState, settings: &Settings) -> Self {
        Self::capture_with_fps(state, settings, None)
    }

    pub fn capture_with_fps(state: &GameState, settings: &Settings, fps: Option<f32>) -> Self {
        let tuning = &state.tuning;
        let player_zone = zone_index(state.player.pos.z, tuning.zone_size);
        let last = player_zone + settings.quality.zones_ahead();

        let ground = (player_zone - ZONES_BEHIND..=last)
            .map(|zone| {
                let kind = ZoneKind::of_index(zone);
                let (near_z, far_z) = zone_bounds(zone, tuning.zone_size);
                GroundStrip {
                    zone,
                    kind,
                    near_z,
                    far_z,
                    color: match kind {
                        ZoneKind::Grass => colors::GRASS,
                        ZoneKind::Water => colors::WATER,
                        ZoneKind::Road => colors::ROAD,
                    },
                    bridge: (kind == ZoneKind::Water).then_some(Bridge {
                        half_width: tuning.bridge_half_width,
                        color: colors::BRIDGE,
                    }),
                }
            })
            .collect();

        let mut instances = Vec::with_capacity(1 + state.cars.len() + state.hearts.len());

        let player = &state.player;
        let player_color = if player.has_boost() {
            colors::PLAYER_BOOSTED
        } else {
            colors::PLAYER
        };
        instances.push(InstanceData::new(
            player.pos,
            180.0,
            player.visual.scale(),
            player.visual,
            player_color,
        ));

        for car in &state.cars {
            let [r, g, b] = car.color;
            instances.push(InstanceData::new(
                car.pos,
                car.yaw_degrees(),
                car.visual.scale(),
                car.visual,
                [r, g, b, 1.0],
            ));
        }

        let heart_visual = Visual::Primitive(MeshKind::Heart);
        // Hearts spin slowly; purely cosmetic
        let spin = (state.time_ticks % 360) as f32;
        for heart in &state.hearts {
            instances.push(InstanceData::new(
                heart.pos,
                spin,
                heart_visual.scale(),
                heart_visual,
                colors::HEART,
            ));
        }

        Self {
            camera: Camera::from_settings(player.pos, settings),
            ground,
            instances,
            hud: hud_lines(state, fps.filter(|_| settings.show_fps)),
            clear_color: colors::BACKGROUND,
        }
    }

    /// Instances as raw bytes for a GPU upload
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}
