//! Carriage game status messages

use std::fmt;

use gantry_core::LogSummary;
use serde::{Deserialize, Serialize};

use super::input::now_nanos;

/// Phase of the carriage game. Drives all behavior branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Actuators idle, final score on display; a click starts a new game
    GameOver,
    /// Free movement to set up the rig; a click starts the run
    NewGame,
    /// Carriage advancing, operator steering; the action button ends the run
    Running,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::GameOver => write!(f, "GameOver"),
            GameState::NewGame => write!(f, "NewGame"),
            GameState::Running => write!(f, "Running"),
        }
    }
}

/// Per-cycle status published by the control node for rendering.
///
/// Carries both the player-facing fields (state, score) and the raw inputs
/// and derived speeds so the display's debug mode needs no second topic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GameStatus {
    pub state: GameState,
    /// Whole seconds survived in the current (or last) run
    pub score: u64,
    pub linear_speed: f32,
    pub stepper_speed: f32,
    pub raw_x: u16,
    pub raw_y: u16,
    pub joystick_pressed: bool,
    pub action_pressed: bool,
    /// Control-loop cycle counter
    pub tick: u64,
    /// Timestamp in nanoseconds since epoch
    pub timestamp: u64,
}

impl GameStatus {
    pub fn new(state: GameState, score: u64) -> Self {
        Self {
            state,
            score,
            linear_speed: 0.0,
            stepper_speed: 0.0,
            raw_x: 0,
            raw_y: 0,
            joystick_pressed: false,
            action_pressed: false,
            tick: 0,
            timestamp: now_nanos(),
        }
    }
}

impl LogSummary for GameStatus {
    fn log_summary(&self) -> String {
        format!("state:{} score:{}", self.state, self.score)
    }
}
