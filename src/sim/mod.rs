//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no delta time
//! - Stable iteration order (row-major brick scan)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod collision;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use collision::{Axis, Reflection};
pub use state::{
    Ball, Brick, BrickGrid, BrickStatus, GameEvent, GamePhase, GameState, Outcome, Paddle,
};
pub use tick::{PaddleMove, TickInput, autopilot_input, tick};
