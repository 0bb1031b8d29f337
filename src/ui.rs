//! Presentation-facing views of the simulation
//!
//! The renderer and the DOM overlay only ever see these read-only views,
//! rebuilt from [`GameState`] once per frame.

use serde::Serialize;

use crate::sim::{GamePhase, GameState, Outcome};

/// One active brick as drawn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrickView {
    pub position: [f32; 3],
    pub size: [f32; 3],
    pub color: String,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub ball_position: [f32; 3],
    pub ball_radius: f32,
    pub paddle_position: [f32; 3],
    pub paddle_size: [f32; 3],
    /// Destroyed bricks are omitted
    pub bricks: Vec<BrickView>,
    pub score: u32,
    pub phase: GamePhase,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            ball_position: state.ball.pos.to_array(),
            ball_radius: state.ball.radius,
            paddle_position: state.paddle.pos.to_array(),
            paddle_size: state.paddle.aabb().size().to_array(),
            bricks: state
                .bricks
                .active()
                .map(|b| BrickView {
                    position: b.pos().to_array(),
                    size: b.bounds.size().to_array(),
                    color: b.color.clone(),
                })
                .collect(),
            score: state.score,
            phase: state.phase,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Which action a banner button triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BannerAction {
    Start,
    Retry,
}

/// Centered modal text with a single button
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub message: &'static str,
    pub button: &'static str,
    pub action: BannerAction,
}

/// HUD and modal state for the DOM overlay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overlay {
    pub score_text: String,
    pub banner: Option<Banner>,
}

impl Overlay {
    pub fn from_state(state: &GameState) -> Self {
        let banner = match state.phase {
            GamePhase::NotStarted => Some(Banner {
                message: "Press Space or Click to Start",
                button: "Start Game",
                action: BannerAction::Start,
            }),
            GamePhase::Playing => None,
            GamePhase::Over(Outcome::Won) => Some(Banner {
                message: "You Win!",
                button: "Play Again",
                action: BannerAction::Retry,
            }),
            GamePhase::Over(Outcome::Lost) => Some(Banner {
                message: "Game Over",
                button: "Try Again",
                action: BannerAction::Retry,
            }),
        };

        Self {
            score_text: format!("Score: {}", state.score),
            banner,
        }
    }
}
