//! Text overlay lines

use crate::sim::{DeathCause, GameState, LifeState};

/// Lines of HUD text, top-left first
pub fn hud_lines(state: &GameState, fps: Option<f32>) -> Vec<String> {
    let mut lines = vec![
        format!("Distance: {}m", state.score),
        format!("Lives: {}", state.player.hearts),
    ];
    if state.player.has_boost() {
        lines.push(format!("Boost: {:.1}s", state.player.boost_timer));
    }
    if let Some(fps) = fps {
        lines.push(format!("FPS: {:.0}", fps));
    }
    if let LifeState::Dead { cause } = state.life {
        lines.push(game_over_banner(cause).to_string());
    }
    lines
}

pub fn game_over_banner(cause: DeathCause) -> &'static str {
    match cause {
        DeathCause::RunOver => "GAME OVER - run over! Press R to restart",
        DeathCause::Drowned => "GAME OVER - drowned! Press R to restart",
    }
}
