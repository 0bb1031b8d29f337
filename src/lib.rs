//! Breakout 3D - a brick breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `tuning`: Data-driven arena and entity dimensions
//! - `ui`: Render snapshot and overlay text read by the presentation layer
//! - `platform`: Keyboard mapping and fixed-rate frame scheduling

pub mod platform;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Simulation rate; one tick per display refresh at 60 Hz
    pub const TICK_RATE_HZ: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed into the scheduler (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Arena bounds (walls at x = ±4, top at y = 3, floor at y = -2)
    pub const ARENA_HALF_WIDTH: f32 = 4.0;
    pub const ARENA_TOP: f32 = 3.0;
    pub const ARENA_BOTTOM: f32 = -2.0;

    /// Brick grid layout
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COLUMNS: usize = 7;
    pub const BRICK_WIDTH: f32 = 1.0;
    pub const BRICK_HEIGHT: f32 = 0.4;
    pub const BRICK_DEPTH: f32 = 0.3;
    pub const BRICK_GAP: f32 = 0.1;
    /// Y of the first (top) brick row
    pub const BRICK_OFFSET_Y: f32 = 2.0;
    /// Row colors, cycled when there are more rows than colors
    pub const BRICK_COLORS: [&str; 5] = ["#e63946", "#f1faee", "#a8dadc", "#457b9d", "#1d3557"];

    /// Paddle defaults - sits on the arena floor
    pub const PADDLE_WIDTH: f32 = 2.0;
    pub const PADDLE_HEIGHT: f32 = 0.2;
    pub const PADDLE_DEPTH: f32 = 0.5;
    /// Distance moved per key press
    pub const PADDLE_STEP: f32 = 0.3;

    /// Ball defaults (units per tick)
    pub const BALL_RADIUS: f32 = 0.08;
    pub const BALL_START: [f32; 3] = [0.0, -1.0, 0.0];
    pub const BALL_INITIAL_VELOCITY: [f32; 3] = [0.02, 0.05, 0.0];

    /// Ticks after a paddle bounce before the paddle can reflect again
    pub const PADDLE_COOLDOWN_TICKS: u32 = 8;

    pub const POINTS_PER_BRICK: u32 = 10;
    /// Largest brick grid a tuning document may ask for
    pub const MAX_BRICKS: usize = 10_000;
}
