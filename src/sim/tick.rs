//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. One call is
//! one tick; velocities are displacements per tick, so there is no dt.

use serde::{Deserialize, Serialize};

use super::collision::{
    Axis, Reflection, bounce_axis, fell_out_bottom, first_brick_hit, hits_paddle, hits_side_wall,
    hits_top_wall,
};
use super::state::{GameEvent, GamePhase, GameState, Outcome};

/// One discrete paddle step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleMove {
    Left,
    Right,
}

/// Input commands queued between ticks (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Paddle steps in the order the key presses arrived
    pub paddle_moves: Vec<PaddleMove>,
    /// Start action (Start button, Space)
    pub start: bool,
    /// Reset action; applied before `start`, so both together mean retry
    pub reset: bool,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        self.paddle_moves.is_empty() && !self.start && !self.reset
    }

    /// Fold another input in after this one (player keys, then autopilot)
    pub fn merge(&mut self, other: TickInput) {
        self.paddle_moves.extend(other.paddle_moves);
        self.start |= other.start;
        self.reset |= other.reset;
    }
}

/// Advance the game state by one tick, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    apply_input(state, input);

    if state.phase != GamePhase::Playing {
        return Vec::new();
    }

    step(state)
}

/// Apply queued input. Runs in every phase.
fn apply_input(state: &mut GameState, input: &TickInput) {
    if input.reset {
        state.reset();
    }
    if input.start {
        state.start();
    }
    for m in &input.paddle_moves {
        match m {
            PaddleMove::Left => state.move_paddle_left(),
            PaddleMove::Right => state.move_paddle_right(),
        }
    }
}

/// Integrate the ball and resolve collisions. Caller guarantees Playing.
fn step(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let tuning = &state.tuning;

    state.time_ticks += 1;
    if state.ball.paddle_cooldown > 0 {
        state.ball.paddle_cooldown -= 1;
    }

    let ball = &mut state.ball;
    ball.pos += ball.vel;
    let pos = ball.pos;
    let radius = ball.radius;

    let mut reflection = Reflection::default();

    // Walls
    if hits_side_wall(pos, radius, tuning.arena_half_width) {
        reflection.add(Axis::X);
        events.push(GameEvent::SideWallBounce);
    }
    if hits_top_wall(pos, radius, tuning.arena_top) {
        reflection.add(Axis::Y);
        events.push(GameEvent::TopWallBounce);
    }

    // Floor: terminal, nothing else is evaluated this tick
    if fell_out_bottom(pos, radius, tuning.arena_bottom) {
        state.finish(Outcome::Lost);
        events.push(GameEvent::Lost);
        return events;
    }

    // Paddle (no angle response; horizontal velocity is kept)
    if ball.paddle_cooldown == 0 && hits_paddle(pos, radius, &state.paddle, tuning.arena_bottom) {
        reflection.add(Axis::Y);
        ball.paddle_cooldown = tuning.paddle_cooldown_ticks;
        events.push(GameEvent::PaddleBounce);
    }

    // Bricks: first hit in row-major order only
    if let Some(index) = first_brick_hit(pos, radius, state.bricks.bricks()) {
        let brick_pos = state.bricks.bricks()[index].pos();
        if state.bricks.destroy(index) {
            state.score += tuning.points_per_brick;
            reflection.add(bounce_axis(pos, brick_pos));
            events.push(GameEvent::BrickDestroyed { index });
            log::debug!(
                "Brick {} destroyed at tick {} (score {})",
                index,
                state.time_ticks,
                state.score
            );
        }
    }

    ball.vel = reflection.apply(ball.vel);

    if state.bricks.all_destroyed() && !state.phase.is_over() {
        state.finish(Outcome::Won);
        events.push(GameEvent::Won);
    }

    events
}

/// Demo/idle mode: start the game and keep the paddle under the ball
pub fn autopilot_input(state: &GameState) -> TickInput {
    let mut input = TickInput::default();

    if state.phase == GamePhase::NotStarted {
        input.start = true;
    }

    let offset = state.ball.pos.x - state.paddle.pos.x;
    let dead_zone = state.tuning.paddle_step / 2.0;
    if offset < -dead_zone {
        input.paddle_moves.push(PaddleMove::Left);
    } else if offset > dead_zone {
        input.paddle_moves.push(PaddleMove::Right);
    }

    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::BrickStatus;
    use crate::tuning::Tuning;
    use glam::Vec3;

    fn playing() -> GameState {
        let mut state = GameState::default();
        state.start();
        state
    }

    fn run(state: &mut GameState, ticks: usize) -> Vec<GameEvent> {
        let input = TickInput::default();
        let mut events = Vec::new();
        for _ in 0..ticks {
            events.extend(tick(state, &input));
        }
        events
    }

    #[test]
    fn test_not_started_does_not_move_ball() {
        let mut state = GameState::default();
        run(&mut state, 10);
        assert_eq!(state.ball.pos, Vec3::from_array(BALL_START));
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_start_input_begins_play() {
        let mut state = GameState::default();
        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_integrates_velocity_per_tick() {
        let mut state = playing();
        run(&mut state, 2);
        assert!((state.ball.pos.x - 0.04).abs() < 1e-6);
        assert!((state.ball.pos.y - (-0.9)).abs() < 1e-6);
    }

    #[test]
    fn test_default_launch_hits_middle_column_of_lowest_row() {
        let mut state = playing();
        // Bottom face of row 4 (y = 0) expanded by the radius sits at -0.28;
        // the ball crosses it on tick 15 at (0.3, -0.25)
        let events = run(&mut state, 14);
        assert!(events.is_empty());
        assert_eq!(state.score, 0);

        let events = tick(&mut state, &TickInput::default());
        let index = state.bricks.index_of(4, 3);
        assert_eq!(events, vec![GameEvent::BrickDestroyed { index }]);
        assert_eq!(state.bricks.bricks()[index].status, BrickStatus::Destroyed);
        assert_eq!(state.score, 10);
        // |dx| = 0.3 beats |dy| = 0.25, so the side is struck
        assert!(state.ball.vel.x < 0.0);
        assert!(state.ball.vel.y > 0.0);
    }

    #[test]
    fn test_head_on_brick_hit_reflects_y() {
        let mut state = playing();
        state.ball.pos = Vec3::new(0.0, -0.5, 0.0);
        state.ball.vel = Vec3::new(0.0, 0.05, 0.0);
        let events = run(&mut state, 5);
        assert_eq!(
            events,
            vec![GameEvent::BrickDestroyed {
                index: state.bricks.index_of(4, 3)
            }]
        );
        assert_eq!(state.score, 10);
        assert!(state.ball.vel.y < 0.0);
        assert_eq!(state.ball.vel.x, 0.0);
    }

    #[test]
    fn test_only_one_brick_per_tick() {
        let mut state = playing();
        // Overlaps columns 2 and 3 of row 4 after integration
        state.ball.pos = Vec3::new(-0.55, -0.05, 0.0);
        state.ball.vel = Vec3::new(0.0, 0.05, 0.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.bricks.destroyed_count(), 1);
        assert_eq!(
            state.bricks.bricks()[state.bricks.index_of(4, 2)].status,
            BrickStatus::Destroyed
        );
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_side_wall_reflects_without_correction() {
        let mut state = playing();
        // Below the brick rows, above the paddle band
        state.ball.pos = Vec3::new(3.91, -1.0, 0.0);
        state.ball.vel = Vec3::new(0.02, 0.0, 0.0);
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events, vec![GameEvent::SideWallBounce]);
        assert!((state.ball.pos.x - 3.93).abs() < 1e-5);
        assert_eq!(state.ball.vel.x, -0.02);
    }

    #[test]
    fn test_top_wall_reflects() {
        let mut state = playing();
        state.ball.pos = Vec3::new(0.0, 2.9, 0.0);
        state.ball.vel = Vec3::new(0.0, 0.05, 0.0);
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events, vec![GameEvent::TopWallBounce]);
        assert_eq!(state.ball.vel.y, -0.05);
    }

    #[test]
    fn test_fall_below_floor_loses() {
        let mut state = playing();
        state.ball.pos = Vec3::new(3.0, -2.0, 0.0);
        state.ball.vel = Vec3::new(0.0, -0.1, 0.0);
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events, vec![GameEvent::Lost]);
        assert_eq!(state.phase, GamePhase::Over(Outcome::Lost));
        assert_eq!(state.ball.vel, Vec3::ZERO);

        // Frozen afterwards
        let pos = state.ball.pos;
        run(&mut state, 5);
        assert_eq!(state.ball.pos, pos);
    }

    #[test]
    fn test_loss_skips_remaining_checks() {
        let mut state = playing();
        // Falls out under the paddle's span: the paddle rule must not fire
        state.ball.pos = Vec3::new(0.0, -2.0, 0.0);
        state.ball.vel = Vec3::new(0.0, -0.1, 0.0);
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events, vec![GameEvent::Lost]);
    }

    #[test]
    fn test_paddle_bounce_keeps_horizontal_velocity() {
        let mut state = playing();
        state.ball.pos = Vec3::new(0.5, -1.8, 0.0);
        state.ball.vel = Vec3::new(0.02, -0.05, 0.0);
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events, vec![GameEvent::PaddleBounce]);
        assert_eq!(state.ball.vel, Vec3::new(0.02, 0.05, 0.0));
        assert_eq!(state.ball.paddle_cooldown, PADDLE_COOLDOWN_TICKS);
    }

    #[test]
    fn test_paddle_cooldown_prevents_sticking() {
        let mut state = playing();
        // Deep in the band moving down slowly: a second reflection next
        // tick would send it back down
        state.ball.pos = Vec3::new(0.0, -1.83, 0.0);
        state.ball.vel = Vec3::new(0.0, -0.01, 0.0);
        tick(&mut state, &TickInput::default());
        assert!(state.ball.vel.y > 0.0);
        run(&mut state, 3);
        assert!(state.ball.vel.y > 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_zero_cooldown_tests_paddle_every_tick() {
        let mut state = GameState::new(Tuning {
            paddle_cooldown_ticks: 0,
            ..Default::default()
        });
        state.start();
        state.ball.pos = Vec3::new(0.0, -1.83, 0.0);
        state.ball.vel = Vec3::new(0.0, -0.01, 0.0);
        let events = tick(&mut state, &TickInput::default());
        assert!(events.contains(&GameEvent::PaddleBounce));
        assert!(state.ball.vel.y > 0.0);
        assert_eq!(state.ball.paddle_cooldown, 0);
        // Still inside the band, so the paddle reflects it straight back down
        let events = tick(&mut state, &TickInput::default());
        assert!(events.contains(&GameEvent::PaddleBounce));
        assert!(state.ball.vel.y < 0.0);
    }

    #[test]
    fn test_ball_missing_paddle_is_lost() {
        let mut state = playing();
        state.ball.pos = Vec3::new(2.5, -1.5, 0.0);
        state.ball.vel = Vec3::new(0.0, -0.05, 0.0);
        run(&mut state, 20);
        assert_eq!(state.phase, GamePhase::Over(Outcome::Lost));
        assert_eq!(state.bricks.destroyed_count(), 0);
    }

    #[test]
    fn test_last_brick_wins_same_tick() {
        let mut state = playing();
        let last = state.bricks.index_of(4, 3);
        for i in 0..state.bricks.len() {
            if i != last {
                state.bricks.destroy(i);
            }
        }
        state.score = (state.bricks.len() as u32 - 1) * POINTS_PER_BRICK;

        state.ball.pos = Vec3::new(0.0, -0.35, 0.0);
        state.ball.vel = Vec3::new(0.0, 0.1, 0.0);
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(
            events,
            vec![GameEvent::BrickDestroyed { index: last }, GameEvent::Won]
        );
        assert_eq!(state.phase, GamePhase::Over(Outcome::Won));
        assert_eq!(state.ball.vel, Vec3::ZERO);
        assert_eq!(state.score, state.tuning.max_score());
    }

    #[test]
    fn test_reset_and_start_together_retry() {
        let mut state = playing();
        state.ball.pos = Vec3::new(3.0, -2.0, 0.0);
        state.ball.vel = Vec3::new(0.0, -0.1, 0.0);
        tick(&mut state, &TickInput::default());
        assert!(state.phase.is_over());

        let input = TickInput {
            reset: true,
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_paddle_moves_apply_in_order_in_any_phase() {
        let mut state = GameState::default();
        let input = TickInput {
            paddle_moves: vec![PaddleMove::Left, PaddleMove::Left, PaddleMove::Right],
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!((state.paddle.pos.x - (-PADDLE_STEP)).abs() < 1e-6);
        assert_eq!(state.phase, GamePhase::NotStarted);
    }

    #[test]
    fn test_autopilot_tracks_ball() {
        let mut state = GameState::default();
        let input = autopilot_input(&state);
        assert!(input.start);
        assert!(input.paddle_moves.is_empty());

        state.ball.pos.x = 2.0;
        let input = autopilot_input(&state);
        assert_eq!(input.paddle_moves, vec![PaddleMove::Right]);

        state.ball.pos.x = -2.0;
        state.start();
        let input = autopilot_input(&state);
        assert!(!input.start);
        assert_eq!(input.paddle_moves, vec![PaddleMove::Left]);
    }

    #[test]
    fn test_merge_keeps_order() {
        let mut input = TickInput {
            paddle_moves: vec![PaddleMove::Left],
            ..Default::default()
        };
        input.merge(TickInput {
            paddle_moves: vec![PaddleMove::Right],
            start: true,
            ..Default::default()
        });
        assert_eq!(input.paddle_moves, vec![PaddleMove::Left, PaddleMove::Right]);
        assert!(input.start);
        assert!(!input.reset);
    }

    #[test]
    fn test_autopilot_never_loses() {
        let mut state = GameState::default();
        for _ in 0..20_000 {
            let input = autopilot_input(&state);
            tick(&mut state, &input);
            if state.phase.is_over() {
                break;
            }
        }
        assert_ne!(state.phase, GamePhase::Over(Outcome::Lost));
        assert!(state.score > 0);
        assert_eq!(
            state.score,
            state.bricks.destroyed_count() as u32 * POINTS_PER_BRICK
        );
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::default();
        let mut state2 = GameState::default();

        for _ in 0..500 {
            let input = autopilot_input(&state1);
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.ball.pos, state2.ball.pos);
    }
}
