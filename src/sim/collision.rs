//! Collision detection for the box-shaped arena
//!
//! Pure functions over positions. Responses are reported as reflection
//! axes; the tick decides when to apply them.

use glam::Vec3;

use super::state::{Brick, Paddle};

/// Velocity component to negate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Reflections requested during one tick, at most one per axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reflection {
    pub x: bool,
    pub y: bool,
}

impl Reflection {
    pub fn add(&mut self, axis: Axis) {
        match axis {
            Axis::X => self.x = true,
            Axis::Y => self.y = true,
        }
    }

    /// Negate the requested components of `vel`
    pub fn apply(self, vel: Vec3) -> Vec3 {
        Vec3::new(
            if self.x { -vel.x } else { vel.x },
            if self.y { -vel.y } else { vel.y },
            vel.z,
        )
    }
}

/// Ball is past the left or right wall
#[inline]
pub fn hits_side_wall(pos: Vec3, radius: f32, half_width: f32) -> bool {
    pos.x.abs() > half_width - radius
}

/// Ball is past the ceiling
#[inline]
pub fn hits_top_wall(pos: Vec3, radius: f32, top: f32) -> bool {
    pos.y > top - radius
}

/// Ball dropped below the floor line
#[inline]
pub fn fell_out_bottom(pos: Vec3, radius: f32, bottom: f32) -> bool {
    pos.y < bottom - radius
}

/// Ball is in the band between the floor and the paddle's top face and
/// within the paddle span widened by the ball radius
pub fn hits_paddle(pos: Vec3, radius: f32, paddle: &Paddle, bottom: f32) -> bool {
    let contact_y = paddle.pos.y + paddle.height / 2.0 + radius;
    let half_span = paddle.width / 2.0 + radius;
    pos.y < contact_y
        && pos.y > bottom - radius
        && pos.x > paddle.pos.x - half_span
        && pos.x < paddle.pos.x + half_span
}

/// First active brick (row-major) the ball overlaps
pub fn first_brick_hit(pos: Vec3, radius: f32, bricks: &[Brick]) -> Option<usize> {
    bricks
        .iter()
        .position(|b| b.is_active() && b.bounds.overlaps_sphere(pos, radius))
}

/// Side of a brick that was struck: X only if the horizontal offset is
/// strictly larger than the vertical one
pub fn bounce_axis(ball_pos: Vec3, brick_pos: Vec3) -> Axis {
    let dx = (ball_pos.x - brick_pos.x).abs();
    let dy = (ball_pos.y - brick_pos.y).abs();
    if dx > dy { Axis::X } else { Axis::Y }
}
