//! Fixed timestep simulation tick
//!
//! One call to [`tick`] is one frame: commands are applied first, then the
//! paddle, bricks, balls and effects advance, then session transitions
//! (life loss, level clear) are checked. Nothing outside the tick mutates
//! the session.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::chain::{BlastScoring, detonate};
use super::collision::{
    Rect, circle_intersects_rect, clamp_to_boundary, paddle_bounce, paddle_hit_position,
    reflect_off_rect, renormalize,
};
use super::effects::{Egg, Explosion, spawn_shards};
use super::state::{Ball, BallState, Brick, GameEvent, GamePhase, GameState};
use crate::GameConfig;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held direction
    pub move_left: bool,
    pub move_right: bool,
    /// Launch every ball riding the paddle
    pub launch: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start a fresh session
    pub restart: bool,
    pub quit: bool,
    /// Demo mode - the paddle steers itself and launches automatically
    pub auto_play: bool,
}

/// What happened to a free ball during one advance
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BallStep {
    /// False once the ball reached the bottom edge
    pub alive: bool,
    pub wall_hit: bool,
    pub paddle_hit: bool,
    /// First intact brick touched this tick
    pub brick: Option<usize>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    if !state.running {
        return;
    }

    if input.quit {
        state.running = false;
        log::info!("Quit requested at tick {}", state.time_ticks);
        return;
    }

    if input.restart {
        state.restart();
        log::info!("Session restarted (seed {})", state.seed);
        return;
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                state.events.push(GameEvent::Paused);
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    // Don't tick if paused or game over
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        _ => {}
    }

    state.time_ticks += 1;

    let mut input = input.clone();
    if input.auto_play {
        steer(state, &mut input);
    }
    let input = &input;

    let screen_width = state.config.screen_width;
    if input.move_left {
        state.paddle.move_left(screen_width);
    }
    if input.move_right {
        state.paddle.move_right(screen_width);
    }

    match state.phase {
        GamePhase::Playing => step_playing(state, input),
        GamePhase::LevelComplete => step_level_complete(state),
        _ => {}
    }

    // Ensure deterministic ordering
    state.normalize_order();
}

fn step_playing(state: &mut GameState, input: &TickInput) {
    if input.launch {
        let mut launched = false;
        for ball in &mut state.balls {
            launched |= ball.launch();
        }
        if launched {
            state.events.push(GameEvent::BallLaunched);
        }
    }

    update_bricks(state);
    update_balls(state);
    update_effects(state);

    if state.balls.is_empty() {
        lose_life(state);
        if state.phase == GamePhase::GameOver {
            return;
        }
    }

    if state.all_bricks_cleared() {
        begin_level_complete(state);
    }
}

fn step_level_complete(state: &mut GameState) {
    for ball in &mut state.balls {
        ball.update_spin();
    }
    update_effects(state);

    state.level_complete_ticks = state.level_complete_ticks.saturating_sub(1);
    if state.level_complete_ticks == 0 {
        start_next_level(state);
    }
}

/// Slide-in animation and TNT fuses
///
/// Bricks only report an expired fuse; the detonation itself is resolved
/// here so it can touch every other brick.
fn update_bricks(state: &mut GameState) {
    let now = state.time_ticks;
    let mut expired = Vec::new();
    for (idx, brick) in state.bricks.iter_mut().enumerate() {
        brick.update_fall(state.config.brick_fall_speed);
        if brick.tick_fuse(now, &state.config) {
            expired.push(idx);
        }
    }

    for idx in expired {
        // An earlier blast this tick may already have taken it out
        if state.bricks[idx].hit {
            continue;
        }
        trigger_detonation(state, idx);
    }
}

/// Detonate a primed brick and apply the outcome to the session
pub fn trigger_detonation(state: &mut GameState, origin: usize) -> usize {
    let scoring = BlastScoring {
        origin: state.config.score_tnt_explosion,
        victim: state.config.score_tnt_destroyed,
    };
    let result = detonate(&mut state.bricks, origin, state.config.explosion_radius, scoring);

    state.tnt_count += 1;
    state.score += result.points;
    for &pos in &result.explosions {
        state.explosions.push(Explosion::new(pos, &state.config));
    }
    if result.origin_destroyed {
        state.events.push(GameEvent::BrickDestroyed { index: origin });
    }
    for &victim in &result.victims {
        let (area, color) = (state.bricks[victim].rect(), state.bricks[victim].base_color);
        spawn_shards(
            &mut state.shards,
            &area,
            color,
            state.config.shards_per_blast,
            &mut state.rng,
            &state.config,
        );
        state.events.push(GameEvent::BrickDestroyed { index: victim });
    }

    let destroyed = result.destroyed();
    state.events.push(GameEvent::Detonation {
        index: origin,
        destroyed,
    });
    destroyed
}

/// Move every ball, then apply the brick effects each one produced
///
/// Balls are taken out of the session for the scan so that extra balls can
/// be queued without touching the list being iterated; they join after.
fn update_balls(state: &mut GameState) {
    let mut balls = std::mem::take(&mut state.balls);
    let mut spawned = Vec::new();

    balls.retain_mut(|ball| step_ball(state, ball, &mut spawned));
    balls.extend(spawned);
    state.balls = balls;
}

fn step_ball(state: &mut GameState, ball: &mut Ball, spawned: &mut Vec<Ball>) -> bool {
    match ball.state {
        BallState::Stuck => {
            ball.update_stuck(&state.paddle);
            return true;
        }
        BallState::Spinning { .. } => {
            ball.update_spin();
            return true;
        }
        BallState::Free => {}
    }

    let step = advance_ball(ball, &state.paddle.rect(), &state.bricks, &state.config);
    if step.wall_hit {
        state.events.push(GameEvent::WallHit);
    }
    if step.paddle_hit {
        state.events.push(GameEvent::PaddleHit);
    }
    if !step.alive {
        state.events.push(GameEvent::BallLost);
        return false;
    }

    if let Some(idx) = step.brick {
        resolve_brick_hit(state, idx, ball, spawned);
    }
    true
}

/// Move a free ball one tick and resolve its bounces
///
/// Order: move, side walls, top wall, bottom edge (ball lost), paddle, then
/// at most one brick. Bricks are only read here; the returned index tells
/// the caller which brick to prime or destroy.
pub fn advance_ball(ball: &mut Ball, paddle: &Rect, bricks: &[Brick], config: &GameConfig) -> BallStep {
    let mut step = BallStep {
        alive: true,
        ..Default::default()
    };
    let r = ball.radius;
    let width = config.screen_width;

    ball.pos += ball.vel;

    // Side walls - reflect inward
    if ball.pos.x - r <= 0.0 || ball.pos.x + r >= width {
        ball.vel.x = if ball.pos.x - r <= 0.0 {
            ball.vel.x.abs()
        } else {
            -ball.vel.x.abs()
        };
        ball.pos.x = clamp_to_boundary(ball.pos.x, r, (width - r).max(r));
        ball.vel = renormalize(ball.vel, ball.speed);
        step.wall_hit = true;
    }

    // Top wall
    if ball.pos.y - r <= 0.0 {
        ball.vel.y = ball.vel.y.abs();
        ball.pos.y = r;
        ball.vel = renormalize(ball.vel, ball.speed);
        step.wall_hit = true;
    }

    // Bottom edge - no bounce
    if ball.pos.y + r >= config.screen_height {
        step.alive = false;
        return step;
    }

    // Paddle: ball spans the paddle top and its center is over the paddle
    if ball.pos.y + r >= paddle.top()
        && ball.pos.y - r <= paddle.bottom()
        && ball.pos.x >= paddle.left()
        && ball.pos.x <= paddle.right()
    {
        let hit_pos = paddle_hit_position(ball.pos.x, paddle);
        ball.vel = paddle_bounce(hit_pos, ball.speed, config.max_bounce_angle());
        // Rest exactly on top so it can't sink in
        ball.pos.y = paddle.top() - r;
        step.paddle_hit = true;
    }

    // First intact brick wins; overlapping bricks wait for later ticks
    let hit = bricks
        .iter()
        .position(|brick| !brick.hit && circle_intersects_rect(ball.pos, r, &brick.rect()));
    if let Some(idx) = hit {
        ball.vel = reflect_off_rect(ball.vel, ball.pos, &bricks[idx].rect(), ball.speed);
        step.brick = Some(idx);
    }

    step
}

/// Apply a ball's brick contact: prime intact TNT, destroy anything else
fn resolve_brick_hit(state: &mut GameState, idx: usize, ball: &Ball, spawned: &mut Vec<Ball>) {
    let now = state.time_ticks;
    let brick = &mut state.bricks[idx];

    if brick.is_tnt && !brick.primed {
        if brick.start_priming(now) {
            log::debug!("TNT brick {} primed at tick {}", idx, now);
            state.events.push(GameEvent::TntPrimed { index: idx });
        }
        return;
    }

    brick.hit = true;
    brick.primed = false;
    let (area, color, blinking) = (brick.rect(), brick.base_color, brick.is_blinking);

    spawn_shards(
        &mut state.shards,
        &area,
        color,
        state.config.shards_per_hit,
        &mut state.rng,
        &state.config,
    );
    state.score += state.config.score_brick_hit;
    state.events.push(GameEvent::BrickDestroyed { index: idx });

    if blinking {
        let count = state.config.blinking_extra_balls;
        for _ in 0..count {
            let id = state.next_entity_id();
            let angle = state
                .rng
                .random_range(-std::f32::consts::PI..std::f32::consts::PI);
            spawned.push(Ball::new_free(id, ball.pos, ball.radius, ball.speed, angle));
        }
        if count > 0 {
            state.events.push(GameEvent::ExtraBalls { count });
        }
    }
}

fn update_effects(state: &mut GameState) {
    state.explosions.retain_mut(|explosion| explosion.update());

    let config = &state.config;
    state.shards.retain_mut(|shard| shard.update(config));

    let paddle = state.paddle.rect();
    let screen_height = state.config.screen_height;
    let mut collected = 0u64;
    state.eggs.retain_mut(|egg| {
        if !egg.update(screen_height) {
            return false;
        }
        if egg.check_paddle(&paddle) {
            collected += 1;
            return false;
        }
        true
    });
    for _ in 0..collected {
        state.score += state.config.score_egg_collected;
        state.events.push(GameEvent::EggCollected);
    }
}

fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    if state.lives > 0 {
        log::info!("Life lost, {} remaining", state.lives);
        state.events.push(GameEvent::LifeLost {
            remaining: state.lives,
        });
        state.spawn_ball_stuck();
    } else {
        log::info!("Game over: score {} on level {}", state.score, state.level);
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
    }
}

fn begin_level_complete(state: &mut GameState) {
    let cleared = state.level;
    state.level += 1;
    state.phase = GamePhase::LevelComplete;
    state.level_complete_ticks = state.config.level_complete_ticks;
    log::info!("Level {} cleared, score {}", cleared, state.score);

    spawn_eggs(state);

    let center = Vec2::new(state.config.screen_width / 2.0, state.config.screen_height / 2.0);
    for ball in &mut state.balls {
        ball.start_spin(center, state.config.spin_radius, state.config.spin_angular_speed);
    }
    state.events.push(GameEvent::LevelCleared { level: cleared });
}

fn start_next_level(state: &mut GameState) {
    state.bricks = generate_bricks(&state.config, &mut state.rng, true);
    state.balls.clear();
    state.spawn_ball_stuck();
    state.phase = GamePhase::Playing;
    log::info!("Level {} started", state.level);
    state.events.push(GameEvent::LevelStarted { level: state.level });
}

/// Drop eggs from the centers of destroyed bricks
fn spawn_eggs(state: &mut GameState) {
    let destroyed: Vec<Vec2> = state.bricks.iter().filter(|b| b.hit).map(Brick::center).collect();
    let sources = if destroyed.is_empty() {
        state.bricks.iter().map(Brick::center).collect()
    } else {
        destroyed
    };

    let width = state.config.screen_width;
    let side_margin = 60f32.min(width / 2.0);
    for _ in 0..state.config.eggs_per_clear {
        let Some(&src) = sources.choose(&mut state.rng) else {
            return;
        };
        let mut pos = src + Vec2::new(
            state.rng.random_range(-20.0..=20.0),
            state.rng.random_range(-10.0..=10.0),
        );
        if pos.y < 0.0 {
            pos = Vec2::new(
                state.rng.random_range(side_margin..=width - side_margin),
                state.rng.random_range(20.0..=80.0),
            );
        }
        let egg = Egg::new(pos, &mut state.rng);
        state.eggs.push(egg);
    }
}

/// Build a full grid with random TNT and blinking bricks
///
/// TNT bricks are sampled from the whole grid, blinking bricks from what is
/// left, so the two sets never overlap. With `slide_in` the rows start above
/// the screen, staggered so each row travels a different distance.
pub fn generate_bricks(config: &GameConfig, rng: &mut impl Rng, slide_in: bool) -> Vec<Brick> {
    let rows = config.brick_rows;
    let cols = config.brick_cols;
    let width = config.brick_width();
    let height = config.brick_height;

    let mut bricks = Vec::with_capacity(config.total_bricks() as usize);
    for row in 0..rows {
        let target_y = config.row_y(row);
        let start_y = if slide_in {
            -height * (rows - row) as f32 + row as f32 * (height + config.brick_spacing_y)
        } else {
            target_y
        };
        let color = config.row_colors[row as usize % config.row_colors.len()];

        for col in 0..cols {
            let mut brick = Brick::new(config.col_x(col), start_y, width, height, color);
            brick.target_y = target_y;
            brick.falling = slide_in;
            brick.blink_offset = rng.random_range(0..config.blink_period_ticks);
            bricks.push(brick);
        }
    }

    let total = bricks.len();
    for idx in rand::seq::index::sample(rng, total, config.tnt_count as usize).iter() {
        bricks[idx].is_tnt = true;
    }

    let plain: Vec<usize> = (0..total).filter(|&i| !bricks[i].is_tnt).collect();
    for pick in rand::seq::index::sample(rng, plain.len(), config.blinking_count as usize).iter() {
        bricks[plain[pick]].is_blinking = true;
    }

    bricks
}

/// Demo-mode controller: launch immediately, chase the lowest free ball
fn steer(state: &GameState, input: &mut TickInput) {
    if state.any_ball_stuck() {
        input.launch = true;
    }

    let target_x = state
        .balls
        .iter()
        .filter(|b| b.is_free())
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|b| b.pos.x)
        .or_else(|| {
            state
                .eggs
                .iter()
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                .map(|e| e.pos.x)
        });

    if let Some(x) = target_x {
        // Oscillating offset so rebounds don't settle into a vertical loop
        let time_factor = state.time_ticks as f32 * 0.01;
        let offset = time_factor.sin() * state.paddle.width * 0.3;
        let aim = x + offset;
        let center = state.paddle.center_x();
        let dead_zone = state.paddle.speed / 2.0;

        input.move_left = aim < center - dead_zone;
        input.move_right = aim > center + dead_zone;
    }
}
