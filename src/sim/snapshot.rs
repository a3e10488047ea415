//! Per-tick view of the session for renderers
//!
//! Everything a frontend needs to draw one frame, with brick colors already
//! resolved. Serializes with serde so it can be shipped as JSON.

use glam::Vec2;
use serde::Serialize;

use super::collision::Rect;
use super::state::GameState;
use crate::Color;

#[derive(Debug, Clone, Serialize)]
pub struct BrickView {
    pub rect: Rect,
    pub color: Color,
    pub destroyed: bool,
    pub tnt: bool,
    pub primed: bool,
    pub blinking: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BallView {
    pub id: u32,
    pub center: Vec2,
    pub radius: f32,
    pub stuck: bool,
    pub spinning: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShardView {
    pub pos: Vec2,
    pub size: f32,
    pub color: Color,
    /// Ticks left before the shard disappears
    pub remaining: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EggView {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplosionView {
    pub pos: Vec2,
    pub radius: f32,
    /// 1 when fresh, fading to 0
    pub intensity: f32,
}

/// Renderable state after a tick
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: &'static str,
    pub tick: u64,
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    pub tnt_count: u32,
    pub bricks: Vec<BrickView>,
    pub paddle: Rect,
    pub balls: Vec<BallView>,
    pub shards: Vec<ShardView>,
    pub eggs: Vec<EggView>,
    pub explosions: Vec<ExplosionView>,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        let now = self.time_ticks;
        Snapshot {
            phase: self.phase.label(),
            tick: now,
            score: self.score,
            lives: self.lives,
            level: self.level,
            tnt_count: self.tnt_count,
            bricks: self
                .bricks
                .iter()
                .map(|b| BrickView {
                    rect: b.rect(),
                    color: b.display_color(now, &self.config),
                    destroyed: b.hit,
                    tnt: b.is_tnt,
                    primed: b.primed,
                    blinking: b.is_blinking,
                })
                .collect(),
            paddle: self.paddle.rect(),
            balls: self
                .balls
                .iter()
                .map(|b| BallView {
                    id: b.id,
                    center: b.pos,
                    radius: b.radius,
                    stuck: b.is_stuck(),
                    spinning: b.is_spinning(),
                })
                .collect(),
            shards: self
                .shards
                .iter()
                .map(|s| ShardView {
                    pos: s.pos,
                    size: s.size,
                    color: s.color,
                    remaining: s.remaining(),
                })
                .collect(),
            eggs: self
                .eggs
                .iter()
                .map(|e| EggView {
                    pos: e.pos,
                    radius: e.radius,
                })
                .collect(),
            explosions: self
                .explosions
                .iter()
                .map(|e| ExplosionView {
                    pos: e.pos,
                    radius: e.radius,
                    intensity: e.intensity(),
                })
                .collect(),
        }
    }
}
