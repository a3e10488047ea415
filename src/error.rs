//! Configuration errors
//!
//! The simulation step itself is infallible; everything that can go wrong is
//! caught when a session is built from a [`crate::GameConfig`].

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// More special bricks requested than the grid holds
    #[error("grid has {total} bricks but {tnt} TNT + {blinking} blinking were requested")]
    TooManySpecialBricks { tnt: u32, blinking: u32, total: u32 },

    /// A size, speed or count that must be strictly positive
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f32 },

    /// A min/max pair given in the wrong order
    #[error("{name}: min {min} exceeds max {max}")]
    InvertedRange { name: &'static str, min: f32, max: f32 },

    /// The brick grid does not leave room for a positive brick width
    #[error("{cols} columns do not fit a {screen_width}px wide screen with the given margins")]
    GridDoesNotFit { cols: u32, screen_width: f32 },

    /// Lowest brick row would sit too close to (or below) the paddle
    #[error("{rows} rows reach y={bottom}, past the playable limit y={limit}")]
    GridTooTall { rows: u32, bottom: f32, limit: f32 },

    #[error("{rows}x{cols} grid exceeds the {max} rows/columns limit")]
    GridTooLarge { rows: u32, cols: u32, max: u32 },

    #[error("paddle width {paddle_width} exceeds screen width {screen_width}")]
    PaddleTooWide { paddle_width: f32, screen_width: f32 },

    #[error("max bounce angle must be within (0, 90) degrees (got {0})")]
    BounceAngle(f32),

    #[error("session needs at least one life")]
    NoLives,

    #[error("color palettes must not be empty")]
    EmptyPalette,

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
