//! Keyboard and button input
//!
//! Events arrive between ticks and are queued; the host takes the queue
//! as a [`TickInput`] at the start of the next tick.

use crate::sim::{GamePhase, PaddleMove, TickInput};

/// A player intent decoded from a raw event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    /// Start, or retry once the game is over
    Start,
    Reset,
    ToggleAutopilot,
}

/// Map a `KeyboardEvent.key` value to a command
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(Command::MoveLeft),
        "ArrowRight" | "d" | "D" => Some(Command::MoveRight),
        " " | "Enter" => Some(Command::Start),
        "r" | "R" => Some(Command::Reset),
        "i" | "I" => Some(Command::ToggleAutopilot),
        _ => None,
    }
}

/// Commands collected since the last tick
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: TickInput,
    autopilot: bool,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a command. `phase` decides whether Start means retry.
    pub fn push(&mut self, command: Command, phase: GamePhase) {
        match command {
            Command::MoveLeft => self.pending.paddle_moves.push(PaddleMove::Left),
            Command::MoveRight => self.pending.paddle_moves.push(PaddleMove::Right),
            Command::Start => {
                if phase.is_over() {
                    self.pending.reset = true;
                }
                self.pending.start = true;
            }
            Command::Reset => {
                self.pending.reset = true;
                self.pending.start = false;
            }
            Command::ToggleAutopilot => {
                self.autopilot = !self.autopilot;
                log::info!("Autopilot: {}", self.autopilot);
            }
        }
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    /// Take the queued input, leaving the queue empty (one-shot)
    pub fn take(&mut self) -> TickInput {
        std::mem::take(&mut self.pending)
    }
}
