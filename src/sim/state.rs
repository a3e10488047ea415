//! Game state and core simulation types
//!
//! Bricks, paddle, balls and the session that owns them. All mutation
//! happens inside [`super::tick`]; the types here only know how to move
//! themselves and answer questions about their own state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, clamp_to_boundary};
use super::effects::{Egg, Explosion, Shard};
use super::tick::generate_bricks;
use crate::error::ConfigError;
use crate::{Color, GameConfig, lerp_color};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay (balls may still be stuck to the paddle)
    Playing,
    /// Frozen; nothing advances until resumed
    Paused,
    /// Grid cleared, next grid arrives after a delay
    LevelComplete,
    /// No lives left
    GameOver,
}

impl GamePhase {
    pub fn label(&self) -> &'static str {
        match self {
            GamePhase::Playing => "PLAYING",
            GamePhase::Paused => "PAUSED",
            GamePhase::LevelComplete => "LEVEL_COMPLETE",
            GamePhase::GameOver => "GAME_OVER",
        }
    }
}

/// Ball motion state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BallState {
    /// Riding the paddle, waiting for launch
    Stuck,
    /// Normal physics
    Free,
    /// Victory orbit around a fixed point
    Spinning {
        center: Vec2,
        radius: f32,
        angle: f32,
        angular_speed: f32,
    },
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    /// Center position
    pub pos: Vec2,
    /// Velocity in pixels per tick
    pub vel: Vec2,
    pub radius: f32,
    /// Constant speed magnitude while free
    pub speed: f32,
    pub state: BallState,
}

impl Ball {
    /// A ball resting on top of the paddle center
    pub fn new_stuck(id: u32, paddle: &Paddle, radius: f32, speed: f32) -> Self {
        debug_assert!(radius > 0.0, "ball radius must be positive");
        let mut ball = Self {
            id,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius,
            speed,
            state: BallState::Stuck,
        };
        ball.update_stuck(paddle);
        ball
    }

    /// A free ball heading along `angle` at full speed
    pub fn new_free(id: u32, pos: Vec2, radius: f32, speed: f32, angle: f32) -> Self {
        Self {
            id,
            pos,
            vel: crate::direction(angle) * speed,
            radius,
            speed,
            state: BallState::Free,
        }
    }

    #[inline]
    pub fn is_stuck(&self) -> bool {
        self.state == BallState::Stuck
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.state == BallState::Free
    }

    #[inline]
    pub fn is_spinning(&self) -> bool {
        matches!(self.state, BallState::Spinning { .. })
    }

    /// Track the paddle while stuck
    pub fn update_stuck(&mut self, paddle: &Paddle) {
        if self.is_stuck() {
            self.pos = Vec2::new(paddle.pos.x + paddle.width / 2.0, paddle.pos.y - self.radius);
            self.vel = Vec2::ZERO;
        }
    }

    /// Release from the paddle straight up
    pub fn launch(&mut self) -> bool {
        if !self.is_stuck() {
            return false;
        }
        self.vel = Vec2::new(0.0, -self.speed);
        self.state = BallState::Free;
        true
    }

    /// Enter the victory orbit, starting from the current bearing to `center`
    pub fn start_spin(&mut self, center: Vec2, radius: f32, angular_speed: f32) {
        let offset = self.pos - center;
        self.state = BallState::Spinning {
            center,
            radius,
            angle: offset.y.atan2(offset.x),
            angular_speed,
        };
    }

    /// Advance the victory orbit by one tick
    pub fn update_spin(&mut self) {
        if let BallState::Spinning {
            center,
            radius,
            ref mut angle,
            angular_speed,
        } = self.state
        {
            *angle += angular_speed;
            self.pos = center + crate::direction(*angle) * radius;
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Pixels per tick while a direction is held
    pub speed: f32,
}

impl Paddle {
    /// Horizontally centered, `paddle_margin_bottom` above the screen bottom
    pub fn centered(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(
                ((config.screen_width - config.paddle_width) / 2.0).floor(),
                config.paddle_y(),
            ),
            width: config.paddle_width,
            height: config.paddle_height,
            speed: config.paddle_speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn move_left(&mut self, screen_width: f32) {
        self.shift(-self.speed, screen_width);
    }

    pub fn move_right(&mut self, screen_width: f32) {
        self.shift(self.speed, screen_width);
    }

    fn shift(&mut self, dx: f32, screen_width: f32) {
        self.pos.x = clamp_to_boundary(self.pos.x + dx, 0.0, screen_width - self.width);
    }

    /// Horizontal center of the paddle
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }
}

/// A brick entity
///
/// Destroyed bricks stay in the collection with `hit` set so indices remain
/// stable for the whole level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Row color, also used for debris
    pub base_color: Color,
    /// Destroyed
    pub hit: bool,
    pub is_tnt: bool,
    pub is_blinking: bool,
    /// TNT fuse lit, waiting to detonate
    pub primed: bool,
    pub primed_start_tick: u64,
    pub blink_cycles_completed: u32,
    /// Per-brick phase shift for the blinking palette
    pub blink_offset: u32,
    /// Sliding down into place at level start
    pub falling: bool,
    pub target_y: f32,
}

impl Brick {
    pub fn new(x: f32, y: f32, width: f32, height: f32, base_color: Color) -> Self {
        Self {
            pos: Vec2::new(x, y),
            width,
            height,
            base_color,
            hit: false,
            is_tnt: false,
            is_blinking: false,
            primed: false,
            primed_start_tick: 0,
            blink_cycles_completed: 0,
            blink_offset: 0,
            falling: false,
            target_y: y,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height) * 0.5
    }

    /// Light the fuse of an intact, unprimed TNT brick
    pub fn start_priming(&mut self, now: u64) -> bool {
        if !self.is_tnt || self.primed || self.hit {
            return false;
        }
        self.primed = true;
        self.primed_start_tick = now;
        self.blink_cycles_completed = 0;
        true
    }

    /// Full warning cycles elapsed since priming
    pub fn priming_cycles(&self, now: u64, blink_ticks: u32) -> u64 {
        let one_cycle = 2 * blink_ticks.max(1) as u64;
        now.saturating_sub(self.primed_start_tick) / one_cycle
    }

    /// Advance the fuse bookkeeping; true once the required cycles have run
    ///
    /// Only reports expiry. The caller decides what detonation means.
    pub fn tick_fuse(&mut self, now: u64, config: &GameConfig) -> bool {
        if !(self.is_tnt && self.primed && !self.hit) {
            return false;
        }
        let cycles = self.priming_cycles(now, config.prime_blink_ticks);
        if cycles >= config.prime_blink_repeats as u64 {
            return true;
        }
        self.blink_cycles_completed = cycles as u32;
        false
    }

    /// Slide toward `target_y`; stops for good on arrival
    pub fn update_fall(&mut self, fall_speed: f32) {
        if !self.falling {
            return;
        }
        if self.pos.y < self.target_y {
            self.pos.y += fall_speed;
        }
        if self.pos.y >= self.target_y {
            self.pos.y = self.target_y;
            self.falling = false;
        }
    }

    /// Color to draw this tick
    pub fn display_color(&self, now: u64, config: &GameConfig) -> Color {
        if self.is_tnt && self.primed && !self.hit {
            let elapsed = now.saturating_sub(self.primed_start_tick);
            let blink = config.prime_blink_ticks.max(1) as u64;
            return if elapsed % (2 * blink) < blink {
                config.warning_color_on
            } else {
                config.warning_color_off
            };
        }
        if self.is_blinking {
            return blink_palette_color(now + self.blink_offset as u64, config);
        }
        if self.is_tnt {
            return config.tnt_color;
        }
        self.base_color
    }
}

/// Smooth sinusoidal sweep through the blink palette
fn blink_palette_color(t: u64, config: &GameConfig) -> Color {
    let palette = &config.blink_palette;
    if palette.len() == 1 {
        return palette[0];
    }
    let period = config.blink_period_ticks.max(1) as u64;
    let phase = (t % period) as f32 / period as f32;
    let factor = (std::f32::consts::TAU * phase).sin() * 0.5 + 0.5;

    let segments = palette.len() - 1;
    let scaled = factor * segments as f32;
    let idx = (scaled as usize).min(segments - 1);
    let frac = scaled - idx as f32;
    lerp_color(palette[idx], palette[idx + 1], frac.clamp(0.0, 1.0))
}

/// Things that happened during a tick, for audio and other observers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BallLaunched,
    PaddleHit,
    WallHit,
    BrickDestroyed { index: usize },
    TntPrimed { index: usize },
    Detonation { index: usize, destroyed: usize },
    ExtraBalls { count: u32 },
    EggCollected,
    BallLost,
    LifeLost { remaining: u8 },
    LevelCleared { level: u32 },
    LevelStarted { level: u32 },
    GameOver { score: u64 },
    Paused,
    Resumed,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Seed the session (and every reset) starts from
    pub seed: u64,
    pub rng: Pcg32,
    pub score: u64,
    pub lives: u8,
    /// 1-based level number
    pub level: u32,
    /// Detonations triggered this session
    pub tnt_count: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Ticks left in LevelComplete
    pub level_complete_ticks: u32,
    /// Cleared by a quit command
    pub running: bool,
    pub paddle: Paddle,
    /// Live balls (sorted by id)
    pub balls: Vec<Ball>,
    /// Bricks in grid order; destroyed ones stay with `hit` set
    pub bricks: Vec<Brick>,
    pub shards: Vec<Shard>,
    pub eggs: Vec<Egg>,
    pub explosions: Vec<Explosion>,
    /// Events recorded during the last tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Validate the config and build a fresh session
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let paddle = Paddle::centered(&config);
        let mut state = Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
            score: 0,
            lives: config.starting_lives,
            level: 1,
            tnt_count: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            level_complete_ticks: 0,
            running: true,
            paddle,
            balls: Vec::new(),
            bricks: Vec::new(),
            shards: Vec::new(),
            eggs: Vec::new(),
            explosions: Vec::new(),
            events: Vec::new(),
            next_id: 1,
            config,
        };
        state.reset();
        Ok(state)
    }

    /// Reinitialize everything except the config
    ///
    /// The RNG restarts from the session seed, so a reset session replays
    /// identically under identical input.
    pub fn reset(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.score = 0;
        self.lives = self.config.starting_lives;
        self.level = 1;
        self.tnt_count = 0;
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
        self.level_complete_ticks = 0;
        self.running = true;
        self.next_id = 1;

        self.bricks = generate_bricks(&self.config, &mut self.rng, false);
        self.paddle = Paddle::centered(&self.config);
        self.balls.clear();
        self.shards.clear();
        self.eggs.clear();
        self.explosions.clear();
        self.events.clear();
        self.spawn_ball_stuck();
    }

    /// Start a new game with a freshly rolled brick layout
    ///
    /// The next seed is drawn from the current RNG, so a recorded input
    /// sequence still replays identically.
    pub fn restart(&mut self) {
        self.seed = self.rng.random::<u64>();
        self.reset();
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a ball resting on the paddle
    pub fn spawn_ball_stuck(&mut self) {
        let id = self.next_entity_id();
        let ball = Ball::new_stuck(id, &self.paddle, self.config.ball_radius, self.config.ball_speed);
        self.balls.push(ball);
    }

    /// Bricks not yet destroyed
    pub fn remaining_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| !b.hit).count()
    }

    pub fn all_bricks_cleared(&self) -> bool {
        self.bricks.iter().all(|b| b.hit)
    }

    pub fn any_ball_stuck(&self) -> bool {
        self.balls.iter().any(Ball::is_stuck)
    }

    /// Ensure balls are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.balls.sort_by_key(|b| b.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn test_new_session_layout() {
        let state = GameState::new(config(), 42).unwrap();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.bricks.len(), 50);
        assert_eq!(state.balls.len(), 1);
        assert!(state.balls[0].is_stuck());
        assert_eq!(state.paddle.pos.x, 340.0);
        assert_eq!(state.paddle.pos.y, 550.0);
    }

    #[test]
    fn test_invalid_config_fails_at_init() {
        let config = GameConfig {
            tnt_count: 60,
            ..Default::default()
        };
        assert!(matches!(
            GameState::new(config, 1),
            Err(ConfigError::TooManySpecialBricks { .. })
        ));
    }

    #[test]
    fn test_stuck_ball_rides_paddle() {
        let config = config();
        let mut paddle = Paddle::centered(&config);
        let mut ball = Ball::new_stuck(1, &paddle, 10.0, 7.0);
        assert_eq!(ball.pos, Vec2::new(400.0, 540.0));

        paddle.move_left(config.screen_width);
        ball.update_stuck(&paddle);
        assert_eq!(ball.pos, Vec2::new(390.0, 540.0));
        assert_eq!(ball.vel, Vec2::ZERO);
    }

    #[test]
    fn test_launch_goes_straight_up() {
        let paddle = Paddle::centered(&config());
        let mut ball = Ball::new_stuck(1, &paddle, 10.0, 7.0);
        assert!(ball.launch());
        assert_eq!(ball.vel, Vec2::new(0.0, -7.0));
        assert!(ball.is_free());
        // Already free: no-op
        assert!(!ball.launch());
    }

    #[test]
    fn test_paddle_clamped_to_screen() {
        let config = config();
        let mut paddle = Paddle::centered(&config);
        for _ in 0..100 {
            paddle.move_left(config.screen_width);
        }
        assert_eq!(paddle.pos.x, 0.0);
        for _ in 0..100 {
            paddle.move_right(config.screen_width);
        }
        assert_eq!(paddle.pos.x, config.screen_width - paddle.width);
    }

    #[test]
    fn test_spin_orbits_center() {
        let mut ball = Ball::new_free(1, Vec2::new(500.0, 300.0), 10.0, 7.0, 0.0);
        ball.start_spin(Vec2::new(400.0, 300.0), 100.0, 0.12);
        for _ in 0..10 {
            ball.update_spin();
            let r = ball.pos.distance(Vec2::new(400.0, 300.0));
            assert!((r - 100.0).abs() < 1e-3);
        }
        assert!(ball.is_spinning());
    }

    #[test]
    fn test_priming_only_once() {
        let mut brick = Brick::new(0.0, 0.0, 60.0, 30.0, [0, 0, 0]);
        assert!(!brick.start_priming(5), "plain bricks never prime");

        brick.is_tnt = true;
        assert!(brick.start_priming(5));
        assert!(!brick.start_priming(9));
        assert_eq!(brick.primed_start_tick, 5);

        let mut dead = Brick::new(0.0, 0.0, 60.0, 30.0, [0, 0, 0]);
        dead.is_tnt = true;
        dead.hit = true;
        assert!(!dead.start_priming(0));
    }

    #[test]
    fn test_fuse_expires_after_required_cycles() {
        let config = config();
        let mut brick = Brick::new(0.0, 0.0, 60.0, 30.0, [0, 0, 0]);
        brick.is_tnt = true;
        brick.start_priming(100);

        // 3 cycles of 2 x 30 ticks
        let fuse = config.prime_fuse_ticks();
        assert_eq!(fuse, 180);
        assert!(!brick.tick_fuse(100 + 61, &config));
        assert_eq!(brick.blink_cycles_completed, 1);
        assert!(!brick.tick_fuse(100 + fuse - 1, &config));
        assert_eq!(brick.blink_cycles_completed, 2);
        assert!(brick.tick_fuse(100 + fuse, &config));
    }

    #[test]
    fn test_fall_stops_at_target() {
        let mut brick = Brick::new(0.0, -5.0, 60.0, 30.0, [0, 0, 0]);
        brick.falling = true;
        brick.target_y = 0.0;
        brick.update_fall(2.0);
        brick.update_fall(2.0);
        assert!(brick.falling);
        brick.update_fall(2.0);
        assert_eq!(brick.pos.y, 0.0);
        assert!(!brick.falling);
        brick.update_fall(2.0);
        assert_eq!(brick.pos.y, 0.0);
    }

    #[test]
    fn test_display_colors() {
        let config = config();
        let mut brick = Brick::new(0.0, 0.0, 60.0, 30.0, [1, 2, 3]);
        assert_eq!(brick.display_color(0, &config), [1, 2, 3]);

        brick.is_tnt = true;
        assert_eq!(brick.display_color(0, &config), config.tnt_color);

        brick.start_priming(10);
        assert_eq!(brick.display_color(10, &config), config.warning_color_on);
        assert_eq!(brick.display_color(40, &config), config.warning_color_off);
        assert_eq!(brick.display_color(70, &config), config.warning_color_on);
    }

    #[test]
    fn test_blink_palette_stays_in_palette_range() {
        let config = config();
        let mut brick = Brick::new(0.0, 0.0, 60.0, 30.0, [1, 2, 3]);
        brick.is_blinking = true;
        // Phase 0 -> factor 0.5 -> between the 2nd and 3rd palette entries
        let color = brick.display_color(0, &config);
        assert_ne!(color, [1, 2, 3]);
        for t in 0..config.blink_period_ticks as u64 {
            let c = brick.display_color(t, &config);
            // Every palette entry is blue-dominant
            assert!(c[2] >= c[0]);
        }
    }
}
