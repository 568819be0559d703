//! Per-instance data for the 3D draw list

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

use crate::sim::{MeshKind, Visual};

/// One drawable object, laid out for direct upload as an instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    /// Column-major model matrix
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// Which mesh to bind (see [`mesh_id`])
    pub mesh: u32,
    /// 1 if the loaded model asset should be used, 0 for the box fallback
    pub use_model: u32,
    pub _pad: [u32; 2],
}

impl InstanceData {
    pub fn new(translation: Vec3, yaw_degrees: f32, scale: Vec3, visual: Visual, color: [f32; 4]) -> Self {
        let model = Mat4::from_scale_rotation_translation(
            scale,
            Quat::from_rotation_y(yaw_degrees.to_radians()),
            translation,
        );
        Self {
            model: model.to_cols_array_2d(),
            color,
            mesh: mesh_id(visual.mesh()),
            use_model: matches!(visual, Visual::Model(_)) as u32,
            _pad: [0; 2],
        }
    }
}

/// Stable mesh slot numbers shared with the renderer
pub fn mesh_id(kind: MeshKind) -> u32 {
    match kind {
        MeshKind::Player => 0,
        MeshKind::Car => 1,
        MeshKind::Heart => 2,
    }
}

/// Colors for game elements
pub mod colors {
    pub const PLAYER: [f32; 4] = [0.9, 0.9, 0.2, 1.0];
    pub const PLAYER_BOOSTED: [f32; 4] = [0.2, 1.0, 0.3, 1.0];
    pub const HEART: [f32; 4] = [1.0, 0.15, 0.3, 1.0];
    pub const GRASS: [f32; 4] = [0.25, 0.65, 0.25, 1.0];
    pub const WATER: [f32; 4] = [0.15, 0.35, 0.85, 1.0];
    pub const ROAD: [f32; 4] = [0.3, 0.3, 0.32, 1.0];
    pub const BRIDGE: [f32; 4] = [0.55, 0.4, 0.25, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.5, 0.75, 0.95, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<InstanceData>(), 96);
        let instance = InstanceData::new(
            Vec3::new(1.0, 2.0, -3.0),
            90.0,
            Vec3::splat(2.5),
            Visual::Model(MeshKind::Car),
            colors::ROAD,
        );
        let bytes: &[u8] = bytemuck::bytes_of(&instance);
        assert_eq!(bytes.len(), 96);
        assert_eq!(instance.mesh, 1);
        assert_eq!(instance.use_model, 1);
        // Translation lives in the last column
        assert_eq!(instance.model[3], [1.0, 2.0, -3.0, 1.0]);
    }
}
