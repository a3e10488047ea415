//! Collision detection and response for axis-aligned geometry
//!
//! Circle-vs-rectangle overlap, wall containment, and the velocity rules
//! used when a ball bounces: paddle angle mapping, per-axis brick
//! reflection, and constant-speed renormalization.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, `pos` is the top-left corner (screen y points down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        debug_assert!(width >= 0.0 && height >= 0.0, "negative rect size");
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Nearest point of the rectangle to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.pos, self.pos + self.size)
    }
}

/// Circle-vs-rectangle overlap test
///
/// Tangent contact does not count: the squared distance from the center to
/// the nearest rectangle point must be strictly below `radius²`.
pub fn circle_intersects_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    debug_assert!(radius >= 0.0, "negative circle radius");
    let nearest = rect.closest_point(center);
    center.distance_squared(nearest) < radius * radius
}

/// Clamp a coordinate into `[min, max]`
#[inline]
pub fn clamp_to_boundary(pos: f32, min: f32, max: f32) -> f32 {
    debug_assert!(min <= max, "inverted boundary");
    pos.clamp(min, max)
}

/// Rescale a velocity to exactly `speed`, keeping its heading
///
/// A zero vector has no heading and becomes straight up.
pub fn renormalize(vel: Vec2, speed: f32) -> Vec2 {
    if vel == Vec2::ZERO {
        return Vec2::new(0.0, -speed);
    }
    let angle = vel.y.atan2(vel.x);
    Vec2::new(speed * angle.cos(), speed * angle.sin())
}

/// Relative hit position along the paddle, 0 = left edge, 1 = right edge
#[inline]
pub fn paddle_hit_position(ball_x: f32, paddle: &Rect) -> f32 {
    ((ball_x - paddle.left()) / paddle.size.x).clamp(0.0, 1.0)
}

/// Velocity after a paddle bounce
///
/// The hit position maps linearly onto `[-max_angle, max_angle]` measured
/// from vertical; the result always points upward.
pub fn paddle_bounce(hit_pos: f32, speed: f32, max_angle: f32) -> Vec2 {
    let angle = (hit_pos - 0.5) * 2.0 * max_angle;
    Vec2::new(speed * angle.sin(), -speed * angle.cos())
}

/// Reflect off a brick by comparing the ball center to the brick bounds
/// independently per axis, then restore the speed
///
/// A center outside the horizontal span flips `vx`; outside the vertical
/// span flips `vy`. A center inside both spans flips nothing.
pub fn reflect_off_rect(vel: Vec2, center: Vec2, rect: &Rect, speed: f32) -> Vec2 {
    let mut vel = vel;
    if center.x < rect.left() || center.x > rect.right() {
        vel.x = -vel.x;
    }
    if center.y < rect.top() || center.y > rect.bottom() {
        vel.y = -vel.y;
    }
    renormalize(vel, speed)
}
