//! Audio dispatch
//!
//! The simulation emits [`GameEvent`]s; the manager turns them into sound
//! effects and hands them to whatever [`AudioBackend`] the host provides.

use crate::settings::Settings;
use crate::sim::{DeathCause, GameEvent};

/// Background track looped while a run is in progress
pub const MUSIC_TRACK: &str = "assets/audio/crossing_loop.ogg";

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Speed boost kicked in
    Boost,
    /// Car hit absorbed by a heart
    CarHit,
    /// Heart picked up
    HeartPickup,
    /// Run ended under a car
    RunOver,
    /// Run ended in the water
    Splash,
    /// Fresh run started
    Restart,
    /// New leaderboard entry
    HighScore,
}

impl SoundEffect {
    /// Map a simulation event to its sound, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match *event {
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::BoostActivated => Some(SoundEffect::Boost),
            GameEvent::CarHit { .. } => Some(SoundEffect::CarHit),
            GameEvent::HeartCollected { .. } => Some(SoundEffect::HeartPickup),
            GameEvent::Died {
                cause: DeathCause::RunOver,
                ..
            } => Some(SoundEffect::RunOver),
            GameEvent::Died {
                cause: DeathCause::Drowned,
                ..
            } => Some(SoundEffect::Splash),
            GameEvent::Restarted => Some(SoundEffect::Restart),
            GameEvent::CarsSpawned { .. } | GameEvent::HeartSpawned { .. } => None,
        }
    }
}

/// Output device contract
pub trait AudioBackend {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32);
    fn play_music(&mut self, path: &str, looping: bool, volume: f32);
    fn stop_music(&mut self);
    fn set_volume(&mut self, volume: f32);
}

/// Backend that only logs what would have played
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioBackend for NullAudio {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {:?} at {:.2}", effect, volume);
    }

    fn play_music(&mut self, path: &str, looping: bool, volume: f32) {
        log::debug!("music {} (loop={}) at {:.2}", path, looping, volume);
    }

    fn stop_music(&mut self) {
        log::debug!("music stopped");
    }

    fn set_volume(&mut self, volume: f32) {
        log::debug!("master volume {:.2}", volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B, settings: &Settings) -> Self {
        let mut manager = Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music_playing: false,
        };
        manager.apply_settings(settings);
        manager
    }

    /// Pull volumes from settings and push the master level to the backend
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.master_volume = settings.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = settings.music_volume.clamp(0.0, 1.0);
        let master = self.effective_master();
        self.backend.set_volume(master);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        let master = self.effective_master();
        self.backend.set_volume(master);
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    fn effective_master(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_master() * self.sfx_volume;
        if vol <= 0.0 {
            return;
        }
        self.backend.play_effect(effect, vol);
    }

    /// Start the looping track unless it is already running
    pub fn start_music(&mut self) {
        if self.music_playing {
            return;
        }
        self.backend
            .play_music(MUSIC_TRACK, true, self.music_volume);
        self.music_playing = true;
    }

    pub fn stop_music(&mut self) {
        if !self.music_playing {
            return;
        }
        self.backend.stop_music();
        self.music_playing = false;
    }

    /// React to one simulation event
    pub fn handle_event(&mut self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
        match event {
            GameEvent::Died { .. } => self.stop_music(),
            GameEvent::Restarted => self.start_music(),
            _ => {}
        }
    }

    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            self.handle_event(event);
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        effects: Vec<(SoundEffect, f32)>,
        music_starts: u32,
        music_stops: u32,
        volume: f32,
    }

    impl AudioBackend for Recorder {
        fn play_effect(&mut self, effect: SoundEffect, volume: f32) {
            self.effects.push((effect, volume));
        }
        fn play_music(&mut self, _path: &str, looping: bool, _volume: f32) {
            assert!(looping);
            self.music_starts += 1;
        }
        fn stop_music(&mut self) {
            self.music_stops += 1;
        }
        fn set_volume(&mut self, volume: f32) {
            self.volume = volume;
        }
    }

    #[test]
    fn test_events_map_to_effects() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Died {
                cause: DeathCause::Drowned,
                score: 3
            }),
            Some(SoundEffect::Splash)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::HeartSpawned { zone: 3 }),
            None
        );
    }

    #[test]
    fn test_volume_scaling_and_mute() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            ..Settings::default()
        };
        let mut audio = AudioManager::new(Recorder::default(), &settings);
        audio.handle_event(&GameEvent::Jumped);
        assert_eq!(audio.backend().effects, vec![(SoundEffect::Jump, 0.25)]);

        audio.set_muted(true);
        assert_eq!(audio.backend().volume, 0.0);
        audio.handle_event(&GameEvent::Jumped);
        assert_eq!(audio.backend().effects.len(), 1);
    }

    #[test]
    fn test_music_follows_run_lifecycle() {
        let mut audio = AudioManager::new(Recorder::default(), &Settings::default());
        audio.start_music();
        audio.start_music();
        assert!(audio.is_music_playing());
        assert_eq!(audio.backend().music_starts, 1);

        audio.handle_events(&[GameEvent::Died {
            cause: DeathCause::RunOver,
            score: 10,
        }]);
        assert!(!audio.is_music_playing());
        assert_eq!(audio.backend().music_stops, 1);

        audio.handle_event(&GameEvent::Restarted);
        assert!(audio.is_music_playing());
        assert_eq!(audio.backend().music_starts, 2);
    }
}
