//! Game state and core simulation types
//!
//! A single owned [`GameState`] holds the whole session. Everything is
//! recreated together by [`GameState::reset`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::tuning::Tuning;

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every brick destroyed
    Won,
    /// Ball fell past the paddle with bricks remaining
    Lost,
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start action
    NotStarted,
    /// Active gameplay
    Playing,
    /// Run ended
    Over(Outcome),
}

impl GamePhase {
    pub fn is_over(&self) -> bool {
        matches!(self, GamePhase::Over(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            GamePhase::Over(outcome) => Some(*outcome),
            _ => None,
        }
    }
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    SideWallBounce,
    TopWallBounce,
    PaddleBounce,
    /// Brick at this row-major index was destroyed
    BrickDestroyed { index: usize },
    Won,
    Lost,
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec3,
    /// Displacement per tick
    pub vel: Vec3,
    pub radius: f32,
    /// Ticks before the paddle can reflect the ball again (prevents sticking).
    /// With `paddle_cooldown_ticks` set to 0 the paddle is tested every tick.
    #[serde(default)]
    pub paddle_cooldown: u32,
}

impl Ball {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.ball_start,
            vel: tuning.ball_initial_velocity,
            radius: tuning.ball_radius,
            paddle_cooldown: 0,
        }
    }

    /// Freeze the ball in place (terminal outcomes)
    pub fn stop(&mut self) {
        self.vel = Vec3::ZERO;
    }
}

/// The player's paddle, resting on the arena floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Center position; y and z never change
    pub pos: Vec3,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Paddle {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec3::new(0.0, tuning.arena_bottom, 0.0),
            width: tuning.paddle_width,
            height: tuning.paddle_height,
            depth: tuning.paddle_depth,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec3::new(self.width, self.height, self.depth))
    }

    /// Shift horizontally by `dx`, clamped to `[min_x, max_x]`
    pub fn shift(&mut self, dx: f32, (min_x, max_x): (f32, f32)) {
        self.pos.x = if dx < 0.0 {
            (self.pos.x + dx).max(min_x)
        } else {
            (self.pos.x + dx).min(max_x)
        };
    }
}

/// Brick lifecycle; Destroyed is terminal until the next reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickStatus {
    Active,
    Destroyed,
}

/// A single brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub row: usize,
    pub col: usize,
    pub bounds: Aabb,
    pub status: BrickStatus,
    /// CSS color string handed to the renderer
    pub color: String,
}

impl Brick {
    #[inline]
    pub fn pos(&self) -> Vec3 {
        self.bounds.center
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == BrickStatus::Active
    }
}

/// Fixed R x C grid stored flat in row-major order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickGrid {
    pub rows: usize,
    pub columns: usize,
    bricks: Vec<Brick>,
}

impl BrickGrid {
    /// Lay out a fresh grid: row 0 on top, columns centered on x = 0
    pub fn new(tuning: &Tuning) -> Self {
        let pitch_x = tuning.brick_width + tuning.brick_gap;
        let pitch_y = tuning.brick_height + tuning.brick_gap;
        let offset_x = -(tuning.brick_columns as f32 * pitch_x) / 2.0 + pitch_x / 2.0;
        let size = Vec3::new(tuning.brick_width, tuning.brick_height, tuning.brick_depth);

        let mut bricks = Vec::with_capacity(tuning.brick_rows * tuning.brick_columns);
        for row in 0..tuning.brick_rows {
            for col in 0..tuning.brick_columns {
                let center = Vec3::new(
                    offset_x + col as f32 * pitch_x,
                    tuning.brick_offset_y - row as f32 * pitch_y,
                    0.0,
                );
                bricks.push(Brick {
                    row,
                    col,
                    bounds: Aabb::new(center, size),
                    status: BrickStatus::Active,
                    color: tuning.brick_colors[row % tuning.brick_colors.len()].clone(),
                });
            }
        }

        Self {
            rows: tuning.brick_rows,
            columns: tuning.brick_columns,
            bricks,
        }
    }

    /// Row-major index of a grid cell
    #[inline]
    pub fn index_of(&self, row: usize, col: usize) -> usize {
        row * self.columns + col
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        self.bricks.get(self.index_of(row, col))
    }

    /// All bricks in scan order
    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn active(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| b.is_active())
    }

    pub fn destroyed_count(&self) -> usize {
        self.bricks.iter().filter(|b| !b.is_active()).count()
    }

    pub fn all_destroyed(&self) -> bool {
        self.bricks.iter().all(|b| !b.is_active())
    }

    /// Flip a brick to Destroyed. Returns false if it was already destroyed
    /// or the index is out of range.
    pub fn destroy(&mut self, index: usize) -> bool {
        match self.bricks.get_mut(index) {
            Some(brick) if brick.is_active() => {
                brick.status = BrickStatus::Destroyed;
                true
            }
            _ => false,
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u32,
    /// Simulation ticks run since the last reset
    pub time_ticks: u64,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: BrickGrid,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl GameState {
    /// Create a fresh session in the NotStarted phase
    pub fn new(tuning: Tuning) -> Self {
        Self {
            phase: GamePhase::NotStarted,
            score: 0,
            time_ticks: 0,
            paddle: Paddle::new(&tuning),
            ball: Ball::new(&tuning),
            bricks: BrickGrid::new(&tuning),
            tuning,
        }
    }

    /// Recreate bricks, paddle and ball, zero the score and return to NotStarted
    pub fn reset(&mut self) {
        self.phase = GamePhase::NotStarted;
        self.score = 0;
        self.time_ticks = 0;
        self.paddle = Paddle::new(&self.tuning);
        self.ball = Ball::new(&self.tuning);
        self.bricks = BrickGrid::new(&self.tuning);
        log::info!(
            "Game reset ({}x{} bricks)",
            self.bricks.rows,
            self.bricks.columns
        );
    }

    /// Start play. From Over this performs a full reset first; while
    /// already Playing it does nothing.
    pub fn start(&mut self) {
        match self.phase {
            GamePhase::NotStarted => {
                self.ball.vel = self.tuning.ball_initial_velocity;
            }
            GamePhase::Over(_) => self.reset(),
            GamePhase::Playing => return,
        }
        self.phase = GamePhase::Playing;
        log::info!("Game started");
    }

    /// The "Play Again" / "Try Again" action
    pub fn retry(&mut self) {
        self.reset();
        self.start();
    }

    pub fn move_paddle_left(&mut self) {
        let limits = self.tuning.paddle_x_limits();
        self.paddle.shift(-self.tuning.paddle_step, limits);
    }

    pub fn move_paddle_right(&mut self) {
        let limits = self.tuning.paddle_x_limits();
        self.paddle.shift(self.tuning.paddle_step, limits);
    }

    /// Move to Over, freezing the ball. Ignored if already Over.
    pub(crate) fn finish(&mut self, outcome: Outcome) {
        if self.phase.is_over() {
            return;
        }
        self.ball.stop();
        self.phase = GamePhase::Over(outcome);
        log::info!(
            "Game over: {:?} (score {}, {} ticks)",
            outcome,
            self.score,
            self.time_ticks
        );
    }
}
