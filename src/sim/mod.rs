//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (bricks in grid order, balls by entity ID)
//! - No rendering, audio or platform dependencies

pub mod chain;
pub mod collision;
pub mod effects;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use chain::{BlastScoring, Detonation, detonate};
pub use collision::{Rect, circle_intersects_rect, paddle_bounce, reflect_off_rect, renormalize};
pub use effects::{Egg, Explosion, Shard};
pub use snapshot::Snapshot;
pub use state::{Ball, BallState, Brick, GameEvent, GamePhase, GameState, Paddle};
pub use tick::{TickInput, generate_bricks, tick};
