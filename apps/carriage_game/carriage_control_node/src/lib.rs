use gantry::prelude::*;

pub mod mapping;

use mapping::joystick_to_speed;

/// Carriage speed while a run is in progress
const RUN_SPEED: f32 = 10.0;

/// Rising-edge detector for a debounced button level.
///
/// Fires exactly once per distinct press: the tick the level goes high, and
/// not again until it has been seen low.
#[derive(Debug, Default)]
struct EdgeDetector {
    previous: bool,
}

impl EdgeDetector {
    fn update(&mut self, level: bool) -> bool {
        let edge = level && !self.previous;
        self.previous = level;
        edge
    }
}

/// Carriage Control Node - the game's state machine
///
/// Consumes joystick samples and drives both actuators and the display:
///
/// - `GameOver`: both speeds forced to zero; a click starts a new game.
/// - `NewGame`: free movement, X axis drives the carriage and Y the stepper,
///   so the operator can set up the rig; a click starts the run.
/// - `Running`: carriage advances at a fixed speed, Y axis steers the
///   stepper, score counts whole seconds; the action button ends the run.
///
/// Hub queues are consumed exactly once, so each actuator gets its own copy
/// of the command on its own topic. One `MotorCommand` pair and one
/// `GameStatus` go out per tick, in every state.
pub struct CarriageControlNode {
    joystick_subscriber: Hub<JoystickSample>,
    motor_publisher: Hub<MotorCommand>,
    stepper_publisher: Hub<MotorCommand>,
    status_publisher: Hub<GameStatus>,

    state: GameState,
    click_edge: EdgeDetector,
    action_edge: EdgeDetector,
    last_sample: JoystickSample,

    linear_speed: f32,
    stepper_speed: f32,
    score: u64,

    // Monotonic clock: nanoseconds since node creation
    epoch: Instant,
    start_time_ns: u64,
    last_tick_ns: u64,
    tick_count: u64,
}

impl CarriageControlNode {
    /// Create with default topics
    pub fn new() -> GantryResult<Self> {
        Self::new_with_topics("joystick", "motor_cmd", "stepper_cmd", "game_status")
    }

    /// Create with custom topics
    pub fn new_with_topics(
        joystick_topic: &str,
        motor_topic: &str,
        stepper_topic: &str,
        status_topic: &str,
    ) -> GantryResult<Self> {
        Ok(Self {
            joystick_subscriber: Hub::new(joystick_topic)?,
            motor_publisher: Hub::new(motor_topic)?,
            stepper_publisher: Hub::new(stepper_topic)?,
            status_publisher: Hub::new(status_topic)?,
            state: GameState::NewGame,
            click_edge: EdgeDetector::default(),
            action_edge: EdgeDetector::default(),
            last_sample: JoystickSample::centered(),
            linear_speed: 0.0,
            stepper_speed: 0.0,
            score: 0,
            epoch: Instant::now(),
            start_time_ns: 0,
            last_tick_ns: 0,
            tick_count: 0,
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    fn now_ns(&self) -> u64 {
        self.epoch.elapsed().as_nanos() as u64
    }

    /// Advance the state machine by one cycle. One transition function per
    /// state; these are the only transitions that exist.
    fn process_inputs(&mut self, now_ns: u64) {
        let click = self.click_edge.update(self.last_sample.joystick_pressed);
        let action = self.action_edge.update(self.last_sample.action_pressed);

        match self.state {
            GameState::GameOver => self.tick_game_over(click),
            GameState::NewGame => self.tick_new_game(click, now_ns),
            GameState::Running => self.tick_running(action),
        }
    }

    /// Actuators idle, score on display; a click starts a new game.
    fn tick_game_over(&mut self, click: bool) {
        self.linear_speed = 0.0;
        self.stepper_speed = 0.0;
        if click {
            self.state = GameState::NewGame;
        }
    }

    /// Live axis previews for rig setup; a click captures the start time and
    /// begins the run.
    fn tick_new_game(&mut self, click: bool, now_ns: u64) {
        self.linear_speed = joystick_to_speed(self.last_sample.x);
        self.stepper_speed = joystick_to_speed(self.last_sample.y);
        if click {
            self.start_time_ns = now_ns;
            self.state = GameState::Running;
        }
    }

    /// Fixed advance, Y-axis steering, score in whole seconds; the action
    /// button ends the run.
    fn tick_running(&mut self, action: bool) {
        if action {
            // Speeds keep their previous values this cycle; the next
            // GameOver cycle zeroes them
            self.state = GameState::GameOver;
            return;
        }
        // Score from the previous cycle's clock, so it trails the loop by
        // one period
        self.score = self.last_tick_ns.saturating_sub(self.start_time_ns) / 1_000_000_000;
        self.linear_speed = RUN_SPEED;
        self.stepper_speed = joystick_to_speed(self.last_sample.y);
    }

    fn publish(&mut self, mut ctx: Option<&mut NodeInfo>) {
        let cmd = MotorCommand::new(self.linear_speed, self.stepper_speed);
        for publisher in [&self.motor_publisher, &self.stepper_publisher] {
            if publisher.send(cmd, ctx.as_deref_mut()).is_err() {
                if let Some(ctx) = ctx.as_deref_mut() {
                    ctx.log_warning("command topic full, command dropped");
                }
            }
        }

        let status = GameStatus {
            state: self.state,
            score: self.score,
            linear_speed: self.linear_speed,
            stepper_speed: self.stepper_speed,
            raw_x: self.last_sample.x,
            raw_y: self.last_sample.y,
            joystick_pressed: self.last_sample.joystick_pressed,
            action_pressed: self.last_sample.action_pressed,
            tick: self.tick_count,
            timestamp: self.last_sample.timestamp,
        };
        let _ = self.status_publisher.send(status, ctx);
    }
}

impl Node for CarriageControlNode {
    fn name(&self) -> &'static str {
        "CarriageControlNode"
    }

    fn init(&mut self, ctx: &mut NodeInfo) -> GantryResult<()> {
        ctx.log_info("Carriage game ready, state NewGame");
        Ok(())
    }

    fn tick(&mut self, mut ctx: Option<&mut NodeInfo>) {
        // Newest sample wins; the rig publishes one per cycle anyway
        while let Some(sample) = self.joystick_subscriber.recv(ctx.as_deref_mut()) {
            self.last_sample = sample;
        }

        let now_ns = self.now_ns();
        self.process_inputs(now_ns);
        self.publish(ctx);

        self.last_tick_ns = now_ns;
        self.tick_count += 1;
    }
}
