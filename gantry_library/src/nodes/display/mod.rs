use colored::Colorize;
use gantry_core::error::GantryResult;
use gantry_core::{Hub, Node, NodeInfo};

use crate::messages::{GameState, GameStatus};

/// Status Display Node - renders the game state once per cycle
///
/// Subscribes to `GameStatus` and prints a one-line status for the current
/// state. Debug mode prefixes each line with the raw inputs and derived
/// speeds; otherwise a few blank lines push the old status out of view.
pub struct StatusDisplayNode {
    subscriber: Hub<GameStatus>,
    debug: bool,
    last_status: Option<GameStatus>,
}

impl StatusDisplayNode {
    /// Create a display node subscribing to the default topic "game_status"
    pub fn new() -> GantryResult<Self> {
        Self::new_with_topic("game_status")
    }

    /// Create a display node subscribing to a custom topic
    pub fn new_with_topic(topic: &str) -> GantryResult<Self> {
        Ok(Self {
            subscriber: Hub::new(topic)?,
            debug: false,
            last_status: None,
        })
    }

    /// Show raw inputs and speeds alongside the status line
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn last_status(&self) -> Option<&GameStatus> {
        self.last_status.as_ref()
    }

    fn status_line(status: &GameStatus) -> String {
        match status.state {
            GameState::GameOver => format!(
                "GAME OVER! Final score:{} (Click to play again)",
                status.score
            ),
            GameState::NewGame => {
                "Ready to play? (Move the carriage to set up the game! And Click )".to_string()
            }
            GameState::Running => format!("Score {}", status.score),
        }
    }

    fn render(&self, status: &GameStatus) {
        if self.debug {
            print!(
                "{} X:{} Y:{} Click:{} Button:{} STATE:{} SPEED:{} STEPPER DIR:{} ",
                status.tick,
                status.raw_x,
                status.raw_y,
                status.joystick_pressed,
                status.action_pressed,
                status.state,
                status.linear_speed,
                status.stepper_speed,
            );
        } else {
            print!("\n\n\n");
        }

        let line = Self::status_line(status);
        match status.state {
            GameState::GameOver => println!("{}", line.red().bold()),
            GameState::NewGame => println!("{}", line.cyan()),
            GameState::Running => println!("{}", line.green()),
        }
    }
}

impl Node for StatusDisplayNode {
    fn name(&self) -> &'static str {
        "StatusDisplayNode"
    }

    fn tick(&mut self, mut ctx: Option<&mut NodeInfo>) {
        // Only the newest status is worth rendering
        while let Some(status) = self.subscriber.recv(ctx.as_deref_mut()) {
            self.last_status = Some(status);
        }

        if let Some(status) = self.last_status {
            self.render(&status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_lines_per_state() {
        let mut status = GameStatus::new(GameState::GameOver, 42);
        assert_eq!(
            StatusDisplayNode::status_line(&status),
            "GAME OVER! Final score:42 (Click to play again)"
        );

        status.state = GameState::Running;
        assert_eq!(StatusDisplayNode::status_line(&status), "Score 42");

        status.state = GameState::NewGame;
        assert!(StatusDisplayNode::status_line(&status).starts_with("Ready to play?"));
    }

    #[test]
    fn keeps_newest_status() {
        let mut node = StatusDisplayNode::new_with_topic("display_test_newest").unwrap();
        let hub = Hub::<GameStatus>::new("display_test_newest").unwrap();

        hub.send(GameStatus::new(GameState::Running, 1), None).unwrap();
        hub.send(GameStatus::new(GameState::Running, 2), None).unwrap();
        node.tick(None);

        assert_eq!(node.last_status().unwrap().score, 2);
    }

    #[test]
    fn no_status_renders_nothing() {
        let mut node = StatusDisplayNode::new_with_topic("display_test_empty").unwrap();
        node.tick(None);
        assert!(node.last_status().is_none());
    }
}
