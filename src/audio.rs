//! Sound effects for game events
//!
//! The simulation never plays audio itself. Frontends map each tick's
//! [`GameEvent`]s to [`SoundEffect`]s and hand them to an [`AudioSink`].

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball leaves the paddle
    Launch,
    PaddleHit,
    WallHit,
    /// Ball breaks a brick
    BrickBreak,
    /// TNT fuse lit
    Fuse,
    /// TNT detonation (one per chain)
    Explosion,
    /// Blinking brick released extra balls
    Multiball,
    EggCollect,
    BallLost,
    LevelClear,
    GameOver,
}

/// Sound for an event, if it has one
pub fn sound_for_event(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::BallLaunched => Some(SoundEffect::Launch),
        GameEvent::PaddleHit => Some(SoundEffect::PaddleHit),
        GameEvent::WallHit => Some(SoundEffect::WallHit),
        GameEvent::BrickDestroyed { .. } => Some(SoundEffect::BrickBreak),
        GameEvent::TntPrimed { .. } => Some(SoundEffect::Fuse),
        GameEvent::Detonation { .. } => Some(SoundEffect::Explosion),
        GameEvent::ExtraBalls { .. } => Some(SoundEffect::Multiball),
        GameEvent::EggCollected => Some(SoundEffect::EggCollect),
        GameEvent::BallLost => Some(SoundEffect::BallLost),
        GameEvent::LevelCleared { .. } => Some(SoundEffect::LevelClear),
        GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
        GameEvent::LifeLost { .. }
        | GameEvent::LevelStarted { .. }
        | GameEvent::Paused
        | GameEvent::Resumed => None,
    }
}

/// Distinct sounds for one tick's events, in first-occurrence order
///
/// A chain reaction emits one brick-destroyed event per victim; they all
/// collapse into a single break sound.
pub fn sounds_for_tick(events: &[GameEvent]) -> Vec<SoundEffect> {
    let mut sounds = Vec::new();
    for sound in events.iter().filter_map(sound_for_event) {
        if !sounds.contains(&sound) {
            sounds.push(sound);
        }
    }
    sounds
}

/// Anything that can play a sound effect
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Sink used when no audio device or asset is available
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Headless sink that logs what would have been played
#[derive(Debug, Clone)]
pub struct LogAudio {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    /// Sounds played so far
    pub played: u64,
}

impl Default for LogAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl LogAudio {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            played: 0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.played += 1;
        log::trace!("sfx {:?} at volume {:.2}", effect, vol);
    }
}
