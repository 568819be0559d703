//! Rendering hand-off
//!
//! The game never talks to a graphics API directly. Each frame it captures a
//! [`FrameSnapshot`] (camera, ground strips, instance list, HUD text) and
//! passes it to a [`Renderer`] supplied by the host.

pub mod camera;
pub mod frame;
pub mod hud;
pub mod instance;

pub use camera::Camera;
pub use frame::{Bridge, FrameSnapshot, GroundStrip};
pub use instance::InstanceData;

/// Drawing backend contract
pub trait Renderer {
    fn draw(&mut self, frame: &FrameSnapshot);
}

/// Renderer that logs a summary of each frame at trace level
#[derive(Debug, Default)]
pub struct LogRenderer {
    pub frames_drawn: u64,
    pub last_hud: Vec<String>,
}

impl Renderer for LogRenderer {
    fn draw(&mut self, frame: &FrameSnapshot) {
        self.frames_drawn += 1;
        log::trace!(
            "frame {}: {} instances, {} ground strips, eye={:?} | {}",
            self.frames_drawn,
            frame.instances.len(),
            frame.ground.len(),
            frame.camera.eye,
            frame.hud.join(" | ")
        );
        self.last_hud.clone_from(&frame.hud);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::GameState;

    #[test]
    fn test_log_renderer_keeps_last_hud() {
        let state = GameState::new(3);
        let mut renderer = LogRenderer::default();
        renderer.draw(&FrameSnapshot::capture(&state, &Settings::default()));
        renderer.draw(&FrameSnapshot::capture(&state, &Settings::default()));
        assert_eq!(renderer.frames_drawn, 2);
        assert_eq!(renderer.last_hud[1], "Lives: 1");
    }
}
