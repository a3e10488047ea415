//! Game balance and layout configuration
//!
//! Every tunable constant the simulation reads lives in [`GameConfig`]. Values
//! default to [`crate::consts`], and a TOML file may override any subset of
//! keys (missing keys keep their defaults).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::Color;

/// Upper bound on grid rows and columns
pub const MAX_GRID_DIM: u32 = 256;

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Brick grid ===
    pub brick_rows: u32,
    pub brick_cols: u32,
    pub brick_height: f32,
    pub brick_margin_left: f32,
    pub brick_margin_top: f32,
    pub brick_spacing_x: f32,
    pub brick_spacing_y: f32,
    pub brick_fall_speed: f32,

    // === Special bricks ===
    pub tnt_count: u32,
    pub blinking_count: u32,
    /// Balls spawned when a blinking brick is destroyed
    pub blinking_extra_balls: u32,
    pub blink_period_ticks: u32,

    // === Detonation ===
    /// Max center-to-center distance reached by a blast (inclusive)
    pub explosion_radius: f32,
    /// Length of one warning color phase while primed
    pub prime_blink_ticks: u32,
    /// Full red/white cycles before a primed brick detonates
    pub prime_blink_repeats: u32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub paddle_margin_bottom: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_speed: f32,
    pub max_bounce_angle_deg: f32,

    // === Debris ===
    pub shards_per_hit: u32,
    pub shards_per_blast: u32,
    pub shard_life_min: u32,
    pub shard_life_max: u32,
    pub shard_size_min: u32,
    pub shard_size_max: u32,
    pub shard_gravity: f32,
    pub shard_air_resistance: f32,

    // === Explosion visual ===
    pub explosion_max_radius: f32,
    pub explosion_duration_ticks: u32,

    // === Scoring ===
    pub score_brick_hit: u64,
    pub score_tnt_explosion: u64,
    pub score_tnt_destroyed: u64,
    pub score_egg_collected: u64,

    // === Session ===
    pub starting_lives: u8,
    pub level_complete_ticks: u32,
    pub eggs_per_clear: u32,
    pub spin_radius: f32,
    pub spin_angular_speed: f32,

    // === Palette ===
    pub row_colors: Vec<Color>,
    pub tnt_color: Color,
    pub blink_palette: Vec<Color>,
    pub warning_color_on: Color,
    pub warning_color_off: Color,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            brick_rows: BRICK_ROWS,
            brick_cols: BRICK_COLS,
            brick_height: BRICK_HEIGHT,
            brick_margin_left: BRICK_MARGIN_LEFT,
            brick_margin_top: BRICK_MARGIN_TOP,
            brick_spacing_x: BRICK_SPACING_X,
            brick_spacing_y: BRICK_SPACING_Y,
            brick_fall_speed: BRICK_FALL_SPEED,

            tnt_count: TNT_COUNT,
            blinking_count: BLINKING_COUNT,
            blinking_extra_balls: BLINKING_EXTRA_BALLS,
            blink_period_ticks: BLINK_PERIOD_TICKS,

            explosion_radius: EXPLOSION_RADIUS,
            prime_blink_ticks: PRIME_BLINK_TICKS,
            prime_blink_repeats: PRIME_BLINK_REPEATS,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_margin_bottom: PADDLE_MARGIN_BOTTOM,

            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,
            max_bounce_angle_deg: MAX_BOUNCE_ANGLE_DEG,

            shards_per_hit: SHARDS_PER_HIT,
            shards_per_blast: SHARDS_PER_BLAST,
            shard_life_min: SHARD_LIFE_MIN,
            shard_life_max: SHARD_LIFE_MAX,
            shard_size_min: SHARD_SIZE_MIN,
            shard_size_max: SHARD_SIZE_MAX,
            shard_gravity: SHARD_GRAVITY,
            shard_air_resistance: SHARD_AIR_RESISTANCE,

            explosion_max_radius: EXPLOSION_MAX_RADIUS,
            explosion_duration_ticks: EXPLOSION_DURATION_TICKS,

            score_brick_hit: SCORE_BRICK_HIT,
            score_tnt_explosion: SCORE_TNT_EXPLOSION,
            score_tnt_destroyed: SCORE_TNT_DESTROYED,
            score_egg_collected: SCORE_EGG_COLLECTED,

            starting_lives: STARTING_LIVES,
            level_complete_ticks: LEVEL_COMPLETE_TICKS,
            eggs_per_clear: EGGS_PER_CLEAR,
            spin_radius: SPIN_RADIUS,
            spin_angular_speed: SPIN_ANGULAR_SPEED,

            row_colors: ROW_COLORS.to_vec(),
            tnt_color: TNT_COLOR,
            blink_palette: BLINK_PALETTE.to_vec(),
            warning_color_on: WARNING_COLOR_ON,
            warning_color_off: WARNING_COLOR_OFF,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) TOML document
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Total bricks in one grid
    pub fn total_bricks(&self) -> u32 {
        self.brick_rows * self.brick_cols
    }

    /// Brick width derived from the screen width, margins and spacing
    pub fn brick_width(&self) -> f32 {
        let available = self.screen_width
            - 2.0 * self.brick_margin_left
            - (self.brick_cols.saturating_sub(1)) as f32 * self.brick_spacing_x;
        (available / self.brick_cols.max(1) as f32).floor()
    }

    pub fn max_bounce_angle(&self) -> f32 {
        self.max_bounce_angle_deg.to_radians()
    }

    /// Resting y of the given grid row
    pub fn row_y(&self, row: u32) -> f32 {
        self.brick_margin_top + row as f32 * (self.brick_height + self.brick_spacing_y)
    }

    /// Left x of the given grid column
    pub fn col_x(&self, col: u32) -> f32 {
        self.brick_margin_left + col as f32 * (self.brick_width() + self.brick_spacing_x)
    }

    /// Top of the paddle
    pub fn paddle_y(&self) -> f32 {
        self.screen_height - self.paddle_margin_bottom
    }

    /// Ticks a primed brick waits before detonating
    pub fn prime_fuse_ticks(&self) -> u64 {
        2 * self.prime_blink_ticks as u64 * self.prime_blink_repeats as u64
    }

    /// Reject configurations that could not produce a playable session
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("screen_width", self.screen_width)?;
        positive("screen_height", self.screen_height)?;
        positive("brick_rows", self.brick_rows as f32)?;
        positive("brick_cols", self.brick_cols as f32)?;
        positive("brick_height", self.brick_height)?;
        positive("brick_fall_speed", self.brick_fall_speed)?;
        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        positive("ball_radius", self.ball_radius)?;
        positive("ball_speed", self.ball_speed)?;
        positive("prime_blink_ticks", self.prime_blink_ticks as f32)?;
        positive("blink_period_ticks", self.blink_period_ticks as f32)?;
        positive("explosion_duration_ticks", self.explosion_duration_ticks as f32)?;

        if self.brick_rows > MAX_GRID_DIM || self.brick_cols > MAX_GRID_DIM {
            return Err(ConfigError::GridTooLarge {
                rows: self.brick_rows,
                cols: self.brick_cols,
                max: MAX_GRID_DIM,
            });
        }

        // Also rejects NaN
        if !(self.explosion_radius >= 0.0) {
            return Err(ConfigError::NonPositive {
                name: "explosion_radius",
                value: self.explosion_radius,
            });
        }
        if !(self.paddle_speed >= 0.0) {
            return Err(ConfigError::NonPositive {
                name: "paddle_speed",
                value: self.paddle_speed,
            });
        }

        if self.brick_width() <= 0.0 {
            return Err(ConfigError::GridDoesNotFit {
                cols: self.brick_cols,
                screen_width: self.screen_width,
            });
        }
        // Every row must stay reachable above the paddle
        let bottom = self.row_y(self.brick_rows - 1) + self.brick_height;
        let limit = self.paddle_y() - 2.0 * self.ball_radius;
        if !(bottom < limit) {
            return Err(ConfigError::GridTooTall {
                rows: self.brick_rows,
                bottom,
                limit,
            });
        }
        if self.paddle_width > self.screen_width {
            return Err(ConfigError::PaddleTooWide {
                paddle_width: self.paddle_width,
                screen_width: self.screen_width,
            });
        }

        let total = self
            .brick_rows
            .checked_mul(self.brick_cols)
            .ok_or(ConfigError::GridTooLarge {
                rows: self.brick_rows,
                cols: self.brick_cols,
                max: MAX_GRID_DIM,
            })?;
        if self.tnt_count.saturating_add(self.blinking_count) > total {
            return Err(ConfigError::TooManySpecialBricks {
                tnt: self.tnt_count,
                blinking: self.blinking_count,
                total,
            });
        }

        ordered("shard_life", self.shard_life_min as f32, self.shard_life_max as f32)?;
        ordered("shard_size", self.shard_size_min as f32, self.shard_size_max as f32)?;

        if !(self.max_bounce_angle_deg > 0.0 && self.max_bounce_angle_deg < 90.0) {
            return Err(ConfigError::BounceAngle(self.max_bounce_angle_deg));
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.row_colors.is_empty() || self.blink_palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn ordered(name: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { name, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.total_bricks(), 50);
        // (800 - 80 - 90) / 10
        assert_eq!(config.brick_width(), 63.0);
    }

    #[test]
    fn test_too_many_tnt_fails_fast() {
        let config = GameConfig {
            tnt_count: 51,
            blinking_count: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManySpecialBricks { total: 50, .. })
        ));
    }

    #[test]
    fn test_special_bricks_must_be_disjoint() {
        let config = GameConfig {
            tnt_count: 45,
            blinking_count: 6,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
            tnt_count = 2
            explosion_radius = 150.0
            "#,
        )
        .unwrap();
        assert_eq!(config.tnt_count, 2);
        assert_eq!(config.explosion_radius, 150.0);
        assert_eq!(config.ball_speed, BALL_SPEED);
        assert_eq!(config.row_colors.len(), 5);
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = GameConfig::from_toml_str("tnt_count = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_bounce_angle_range() {
        let config = GameConfig {
            max_bounce_angle_deg: 90.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::BounceAngle(_))));
    }

    #[test]
    fn test_grid_taller_than_playfield_rejected() {
        let config = GameConfig {
            brick_rows: 20,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooTall { rows: 20, .. })
        ));

        // 12 rows end at y=530, exactly the limit above a 10px ball
        let config = GameConfig {
            brick_rows: 12,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        let config = GameConfig {
            brick_rows: 11,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_huge_grid_is_an_error_not_a_panic() {
        let err = GameConfig::from_toml_str("brick_rows = 4294967295").unwrap_err();
        assert!(matches!(err, ConfigError::GridTooLarge { .. }));

        let config = GameConfig {
            brick_cols: MAX_GRID_DIM + 1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn test_nan_explosion_radius_rejected() {
        let config = GameConfig {
            explosion_radius: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                name: "explosion_radius",
                ..
            })
        ));
    }

    #[test]
    fn test_grid_must_fit() {
        let config = GameConfig {
            brick_cols: 100,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridDoesNotFit { .. })
        ));
    }
}
