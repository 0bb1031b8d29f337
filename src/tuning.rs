//! Data-driven game tuning
//!
//! Every dimension the simulation reads lives here. Defaults reproduce the
//! classic layout; a JSON document may override any subset of fields.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Why a tuning document was rejected
#[derive(Debug)]
pub enum TuningError {
    /// Document is not valid JSON for [`Tuning`]
    Parse(serde_json::Error),
    /// Document parsed but describes an unplayable arena
    Invalid(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "failed to parse tuning: {}", e),
            TuningError::Invalid(reason) => write!(f, "invalid tuning: {}", reason),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Arena, entity and scoring parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_half_width: f32,
    pub arena_top: f32,
    /// Floor line; the paddle rests here and the ball is lost below it
    pub arena_bottom: f32,

    // === Bricks ===
    pub brick_rows: usize,
    pub brick_columns: usize,
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_depth: f32,
    pub brick_gap: f32,
    pub brick_offset_y: f32,
    pub brick_colors: Vec<String>,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_depth: f32,
    pub paddle_step: f32,
    /// Ticks the paddle ignores the ball after a bounce; 0 tests every tick
    pub paddle_cooldown_ticks: u32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_start: Vec3,
    pub ball_initial_velocity: Vec3,

    // === Scoring / timing ===
    pub points_per_brick: u32,
    pub tick_rate_hz: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_half_width: ARENA_HALF_WIDTH,
            arena_top: ARENA_TOP,
            arena_bottom: ARENA_BOTTOM,

            brick_rows: BRICK_ROWS,
            brick_columns: BRICK_COLUMNS,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_depth: BRICK_DEPTH,
            brick_gap: BRICK_GAP,
            brick_offset_y: BRICK_OFFSET_Y,
            brick_colors: BRICK_COLORS.iter().map(|c| c.to_string()).collect(),

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_depth: PADDLE_DEPTH,
            paddle_step: PADDLE_STEP,
            paddle_cooldown_ticks: PADDLE_COOLDOWN_TICKS,

            ball_radius: BALL_RADIUS,
            ball_start: Vec3::from_array(BALL_START),
            ball_initial_velocity: Vec3::from_array(BALL_INITIAL_VELOCITY),

            points_per_brick: POINTS_PER_BRICK,
            tick_rate_hz: TICK_RATE_HZ,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject layouts the simulation cannot play
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.brick_rows == 0 || self.brick_columns == 0 {
            return Err(TuningError::Invalid("brick grid must have at least one row and column"));
        }
        match self.brick_rows.checked_mul(self.brick_columns) {
            Some(count) if count <= MAX_BRICKS => {}
            _ => return Err(TuningError::Invalid("brick grid is too large")),
        }
        if self.checked_max_score().is_none() {
            return Err(TuningError::Invalid("maximum score does not fit in a u32"));
        }
        if self.brick_colors.is_empty() {
            return Err(TuningError::Invalid("brick color list is empty"));
        }
        let sizes = [
            self.arena_half_width,
            self.brick_width,
            self.brick_height,
            self.brick_depth,
            self.paddle_width,
            self.paddle_height,
            self.paddle_depth,
            self.paddle_step,
            self.ball_radius,
        ];
        if sizes.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(TuningError::Invalid("sizes must be positive and finite"));
        }
        if self.arena_top <= self.arena_bottom {
            return Err(TuningError::Invalid("arena top must lie above arena bottom"));
        }
        if self.paddle_width >= self.arena_half_width * 2.0 {
            return Err(TuningError::Invalid("paddle is wider than the arena"));
        }
        if self.brick_gap < 0.0 {
            return Err(TuningError::Invalid("brick gap is negative"));
        }
        if self.tick_rate_hz == 0 {
            return Err(TuningError::Invalid("tick rate must be non-zero"));
        }
        Ok(())
    }

    /// Center x range the paddle is clamped to
    pub fn paddle_x_limits(&self) -> (f32, f32) {
        let half = self.paddle_width / 2.0;
        (-self.arena_half_width + half, self.arena_half_width - half)
    }

    /// Fixed simulation timestep in seconds
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate_hz as f32
    }

    /// Highest score reachable with this grid, saturating for grids that
    /// `validate` would reject
    pub fn max_score(&self) -> u32 {
        self.checked_max_score().unwrap_or(u32::MAX)
    }

    fn checked_max_score(&self) -> Option<u32> {
        let count = self.brick_rows.checked_mul(self.brick_columns)?;
        u32::try_from(count).ok()?.checked_mul(self.points_per_brick)
    }
}
