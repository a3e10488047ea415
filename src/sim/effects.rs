//! Transient effects: debris shards, collectible eggs, explosion rings
//!
//! None of these affect brick or ball physics. Each `update` advances one
//! tick and returns whether the effect is still alive.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::{Color, GameConfig};

/// Extra distance below the screen before a shard is culled
const SHARD_CULL_MARGIN: f32 = 200.0;
/// Extra distance below the screen before an egg is culled
const EGG_CULL_MARGIN: f32 = 100.0;
pub const EGG_RADIUS: f32 = 8.0;

/// A debris particle thrown from a destroyed brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shard {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: Color,
    /// Lifetime in ticks
    pub life: u32,
    pub age: u32,
}

impl Shard {
    /// Spawn a shard with jittered upward velocity
    pub fn new(pos: Vec2, color: Color, rng: &mut impl Rng, config: &GameConfig) -> Self {
        Self {
            pos,
            vel: Vec2::new(rng.random_range(-4.0..=4.0), rng.random_range(-7.0..=-2.0)),
            size: rng.random_range(config.shard_size_min..=config.shard_size_max) as f32,
            color,
            life: rng.random_range(config.shard_life_min..=config.shard_life_max),
            age: 0,
        }
    }

    pub fn update(&mut self, config: &GameConfig) -> bool {
        self.vel.y += config.shard_gravity;
        self.vel.x *= config.shard_air_resistance;
        self.vel.y *= 0.999;
        self.pos += self.vel;
        self.age += 1;

        self.age < self.life && self.pos.y <= config.screen_height + SHARD_CULL_MARGIN
    }

    /// Remaining lifetime in ticks
    pub fn remaining(&self) -> u32 {
        self.life.saturating_sub(self.age)
    }
}

/// Scatter `count` shards uniformly over a brick's footprint
pub fn spawn_shards(
    shards: &mut Vec<Shard>,
    area: &Rect,
    color: Color,
    count: u32,
    rng: &mut impl Rng,
    config: &GameConfig,
) {
    for _ in 0..count {
        let pos = Vec2::new(
            rng.random_range(area.left()..=area.right()),
            rng.random_range(area.top()..=area.bottom()),
        );
        shards.push(Shard::new(pos, color, rng, config));
    }
}

/// A bonus egg that falls toward the paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Egg {
    pub pos: Vec2,
    pub fall_speed: f32,
    pub radius: f32,
    pub collected: bool,
}

impl Egg {
    pub fn new(pos: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            pos,
            fall_speed: rng.random_range(1.0..=3.0),
            radius: EGG_RADIUS,
            collected: false,
        }
    }

    pub fn update(&mut self, screen_height: f32) -> bool {
        self.pos.y += self.fall_speed;
        !self.collected && self.pos.y < screen_height + EGG_CULL_MARGIN
    }

    /// Mark collected when the egg reaches the paddle top within its span
    pub fn check_paddle(&mut self, paddle: &Rect) -> bool {
        if self.pos.y + self.radius >= paddle.top()
            && self.pos.x >= paddle.left()
            && self.pos.x <= paddle.right()
        {
            self.collected = true;
        }
        self.collected
    }
}

/// Expanding ring shown at each detonation center
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub duration: u32,
    pub timer: u32,
}

impl Explosion {
    pub fn new(pos: Vec2, config: &GameConfig) -> Self {
        Self {
            pos,
            radius: 0.0,
            max_radius: config.explosion_max_radius,
            duration: config.explosion_duration_ticks,
            timer: 0,
        }
    }

    pub fn update(&mut self) -> bool {
        self.timer += 1;
        self.radius = self.timer as f32 / self.duration as f32 * self.max_radius;
        self.timer < self.duration
    }

    /// Fade-out factor, 1 when fresh and 0 when finished
    pub fn intensity(&self) -> f32 {
        1.0 - (self.timer as f32 / self.duration as f32).min(1.0)
    }
}
