//! Turtle Crossing entry point
//!
//! Headless runner: plays the game in idle (autopilot) mode on a fixed
//! timestep, feeding events to the audio manager and frames to a logging
//! renderer, then records the best runs in the high score table.
//!
//! Usage: `turtle-crossing [--seed N] [--seconds S] [--data-dir DIR]`

use std::path::PathBuf;

use clap::Parser;

use turtle_crossing::audio::{AudioManager, NullAudio, SoundEffect};
use turtle_crossing::consts::{MAX_SUBSTEPS, SIM_DT};
use turtle_crossing::highscores::{HighScores, now_timestamp};
use turtle_crossing::platform::{InputState, Key};
use turtle_crossing::renderer::{FrameSnapshot, LogRenderer, Renderer};
use turtle_crossing::sim::{DeathCause, GameEvent, GameState, ModelAvailability, tick};
use turtle_crossing::{Settings, Tuning};

/// Host frame rate the runner pretends to have
const FRAME_DT: f32 = 1.0 / 60.0;

/// Headless Turtle Crossing runner
#[derive(Debug, Parser)]
#[command(name = "turtle-crossing")]
#[command(about = "Plays Turtle Crossing on autopilot and records high scores")]
struct Options {
    /// Run seed
    #[arg(long, default_value_t = 0x7075_7274_6c65)]
    seed: u64,

    /// Simulated play time in seconds
    #[arg(long, default_value_t = 30.0)]
    seconds: f32,

    /// Directory holding tuning.json, settings.json and highscores.json
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
}

/// Game instance holding all state
struct Game<R: Renderer> {
    state: GameState,
    input: InputState,
    settings: Settings,
    audio: AudioManager<NullAudio>,
    renderer: R,
    highscores: HighScores,
    accumulator: f32,
}

impl<R: Renderer> Game<R> {
    /// Run simulation ticks for one host frame
    fn update(&mut self, dt: f32) {
        self.accumulator += dt.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            // One-shot edges only reach the first substep
            let input = if substeps == 0 {
                self.input.take_tick_input()
            } else {
                self.input.tick_input()
            };
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            let events = self.state.drain_events();
            self.audio.handle_events(&events);
            for event in &events {
                if let GameEvent::Died { cause, score } = *event {
                    self.record_score(score, cause);
                }
            }
        }
    }

    fn record_score(&mut self, score: u64, cause: DeathCause) {
        let distance = self.state.distance_travelled;
        if let Some(rank) = self
            .highscores
            .add_score(score, distance, cause, now_timestamp())
        {
            log::info!("New high score #{}: {} ({:.0}m)", rank, score, distance);
            self.audio.play(SoundEffect::HighScore);
        }
    }

    fn render(&mut self) {
        let fps = 1.0 / FRAME_DT;
        let frame = FrameSnapshot::capture_with_fps(&self.state, &self.settings, Some(fps));
        self.renderer.draw(&frame);
    }
}

fn main() {
    env_logger::init();
    let opts = Options::parse();
    log::info!("Turtle Crossing (headless) starting, seed {:#x}", opts.seed);

    let tuning = Tuning::load_or_default(&opts.data_dir.join("tuning.json"));
    let settings = Settings::load(&opts.data_dir.join("settings.json"));
    log::info!("Quality preset: {}", settings.quality.as_str());
    let scores_path = opts.data_dir.join("highscores.json");

    let mut audio = AudioManager::new(NullAudio, &settings);
    audio.start_music();

    let mut input = InputState::new();
    input.idle_mode = true;

    let state = match GameState::with_tuning(opts.seed, tuning, ModelAvailability::default()) {
        Ok(state) => state,
        Err(e) => {
            log::warn!("Unusable tuning ({}), using defaults", e);
            GameState::new(opts.seed)
        }
    };

    let mut game = Game {
        state,
        input,
        settings,
        audio,
        renderer: LogRenderer::default(),
        highscores: HighScores::load(&scores_path),
        accumulator: 0.0,
    };

    let frames = (opts.seconds / FRAME_DT).ceil() as u64;
    for _ in 0..frames {
        if game.input.was_pressed(Key::Quit) {
            break;
        }
        game.update(FRAME_DT);
        game.render();
    }

    log::info!(
        "Finished after {} frames: score {}, hearts {}, {} restarts",
        game.renderer.frames_drawn,
        game.state.score,
        game.state.player.hearts,
        game.state.restarts
    );
    for line in &game.renderer.last_hud {
        log::info!("{}", line);
    }

    if let Err(e) = game.highscores.save(&scores_path) {
        log::warn!("Could not save high scores: {}", e);
    }
    if let Some(best) = game.highscores.top_score() {
        log::info!("Best score: {}", best);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults() {
        let opts = Options::try_parse_from(["turtle-crossing"]).unwrap();
        assert_eq!(opts.seed, 0x7075_7274_6c65);
        assert_eq!(opts.seconds, 30.0);
        assert_eq!(opts.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_options_flags() {
        let opts = Options::try_parse_from([
            "turtle-crossing",
            "--seed",
            "42",
            "--seconds",
            "2.5",
            "--data-dir",
            "/tmp/turtle",
        ])
        .unwrap();
        assert_eq!(opts.seed, 42);
        assert_eq!(opts.seconds, 2.5);
        assert_eq!(opts.data_dir, PathBuf::from("/tmp/turtle"));
    }

    #[test]
    fn test_options_reject_bad_values() {
        assert!(Options::try_parse_from(["turtle-crossing", "--seed", "many"]).is_err());
        assert!(Options::try_parse_from(["turtle-crossing", "--frobnicate"]).is_err());
    }
}
