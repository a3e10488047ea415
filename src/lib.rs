//! TNT Breakout - a brick breaker with chain-reacting explosive bricks
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, chain reactions, game state)
//! - `config`: Data-driven game balance
//! - `audio`: Sound effect vocabulary handed to the audio collaborator
//! - `error`: Configuration errors

pub mod audio;
pub mod config;
pub mod error;
pub mod sim;

pub use config::GameConfig;
pub use error::ConfigError;

use glam::Vec2;

/// RGB color triple
pub type Color = [u8; 3];

/// Game configuration defaults
pub mod consts {
    use crate::Color;

    /// Fixed simulation rate (one tick per rendered frame)
    pub const TICK_RATE_HZ: u32 = 60;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Brick grid
    pub const BRICK_ROWS: u32 = 5;
    pub const BRICK_COLS: u32 = 10;
    pub const BRICK_HEIGHT: f32 = 30.0;
    pub const BRICK_MARGIN_LEFT: f32 = 40.0;
    pub const BRICK_MARGIN_TOP: f32 = 60.0;
    pub const BRICK_SPACING_X: f32 = 10.0;
    pub const BRICK_SPACING_Y: f32 = 10.0;
    /// Pixels per tick while a new grid slides in
    pub const BRICK_FALL_SPEED: f32 = 2.0;

    /// Special bricks
    pub const TNT_COUNT: u32 = 5;
    pub const BLINKING_COUNT: u32 = 6;
    pub const BLINKING_EXTRA_BALLS: u32 = 2;
    /// Blinking palette full period (1.2 s)
    pub const BLINK_PERIOD_TICKS: u32 = 72;

    /// TNT priming and detonation
    pub const EXPLOSION_RADIUS: f32 = 100.0;
    /// One warning color phase (500 ms)
    pub const PRIME_BLINK_TICKS: u32 = 30;
    pub const PRIME_BLINK_REPEATS: u32 = 3;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_SPEED: f32 = 10.0;
    pub const PADDLE_MARGIN_BOTTOM: f32 = 50.0;

    /// Ball defaults (speed in pixels per tick)
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_SPEED: f32 = 7.0;
    pub const MAX_BOUNCE_ANGLE_DEG: f32 = 60.0;

    /// Debris
    pub const SHARDS_PER_HIT: u32 = 8;
    pub const SHARDS_PER_BLAST: u32 = 10;
    pub const SHARD_LIFE_MIN: u32 = 40;
    pub const SHARD_LIFE_MAX: u32 = 80;
    pub const SHARD_SIZE_MIN: u32 = 2;
    pub const SHARD_SIZE_MAX: u32 = 6;
    pub const SHARD_GRAVITY: f32 = 0.35;
    pub const SHARD_AIR_RESISTANCE: f32 = 0.995;

    /// Explosion visual
    pub const EXPLOSION_MAX_RADIUS: f32 = 80.0;
    pub const EXPLOSION_DURATION_TICKS: u32 = 30;

    /// Scoring
    pub const SCORE_BRICK_HIT: u64 = 100;
    pub const SCORE_TNT_EXPLOSION: u64 = 100;
    pub const SCORE_TNT_DESTROYED: u64 = 100;
    pub const SCORE_EGG_COLLECTED: u64 = 250;

    /// Session
    pub const STARTING_LIVES: u8 = 3;
    pub const LEVEL_COMPLETE_TICKS: u32 = 120;
    pub const EGGS_PER_CLEAR: u32 = 5;
    pub const SPIN_RADIUS: f32 = 100.0;
    pub const SPIN_ANGULAR_SPEED: f32 = 0.12;

    /// Palette
    pub const ROW_COLORS: [Color; 5] = [
        [255, 99, 71],  // tomato
        [255, 165, 0],  // orange
        [255, 215, 0],  // gold
        [60, 179, 113], // sea green
        [65, 105, 225], // royal blue
    ];
    pub const TNT_COLOR: Color = [139, 69, 19];
    pub const BLINK_PALETTE: [Color; 4] = [
        [173, 216, 230],
        [135, 206, 250],
        [65, 105, 225],
        [0, 0, 139],
    ];
    pub const WARNING_COLOR_ON: Color = [255, 0, 0];
    pub const WARNING_COLOR_OFF: Color = [255, 255, 255];
}

/// Linear blend between two colors, `t` in [0, 1]
#[inline]
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let mix = |x: u8, y: u8| (x as f32 * (1.0 - t) + y as f32 * t) as u8;
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])]
}

/// Unit vector for an angle measured from the +x axis (screen y points down)
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
