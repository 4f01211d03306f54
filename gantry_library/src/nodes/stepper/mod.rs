use std::thread;
use std::time::{Duration, Instant};

use gantry_core::error::GantryResult;
use gantry_core::{Hub, Node, NodeInfo};

use crate::hardware::DigitalOutput;
use crate::messages::MotorCommand;

/// Two-coil full-step drive sequence. Each row energizes two adjacent
/// windings; walking the rows forward or backward sets the direction.
const STEP_SEQUENCE: [[bool; 4]; 4] = [
    [true, true, false, false],
    [false, true, true, false],
    [false, false, true, true],
    [true, false, false, true],
];

/// Fastest step rate the motor can follow without losing sync
const DEFAULT_MAX_STEP_RATE_HZ: f64 = 520.0;

/// Stepper Node - drives the steering stepper from speed commands
///
/// Subscribes to `MotorCommand` and converts the `stepper_speed` percentage to
/// a step rate, up to `max_step_rate_hz`. At low speeds, where fewer than one
/// step falls in a control cycle, a single step fires only once enough time
/// has passed since the previous one. At higher speeds the due steps run
/// back to back within the tick, sleeping the step interval between them;
/// the cycle budget absorbs the blocked time.
pub struct StepperNode<A, B, C, D> {
    subscriber: Hub<MotorCommand>,
    coils: (A, B, C, D),
    phase: usize,
    current_speed: f32,
    max_step_rate_hz: f64,
    loop_rate_hz: f64,
    last_step: Instant,
    steps_taken: u64,
}

impl<A, B, C, D> StepperNode<A, B, C, D>
where
    A: DigitalOutput,
    B: DigitalOutput,
    C: DigitalOutput,
    D: DigitalOutput,
{
    /// Create a stepper node subscribing to the default topic "stepper_cmd"
    pub fn new(coil_a: A, coil_b: B, coil_c: C, coil_d: D) -> GantryResult<Self> {
        Self::new_with_topic("stepper_cmd", coil_a, coil_b, coil_c, coil_d)
    }

    /// Create a stepper node subscribing to a custom topic
    pub fn new_with_topic(
        topic: &str,
        coil_a: A,
        coil_b: B,
        coil_c: C,
        coil_d: D,
    ) -> GantryResult<Self> {
        Ok(Self {
            subscriber: Hub::new(topic)?,
            coils: (coil_a, coil_b, coil_c, coil_d),
            phase: 0,
            current_speed: 0.0,
            max_step_rate_hz: DEFAULT_MAX_STEP_RATE_HZ,
            loop_rate_hz: 10.0,
            last_step: Instant::now(),
            steps_taken: 0,
        })
    }

    /// Override the step rate ceiling and the control loop rate.
    ///
    /// The loop rate must match the scheduler's so the per-tick step count
    /// comes out right.
    pub fn set_rates(&mut self, max_step_rate_hz: f64, loop_rate_hz: f64) {
        self.max_step_rate_hz = max_step_rate_hz;
        self.loop_rate_hz = loop_rate_hz;
    }

    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Advance one full step in the direction given by the speed's sign.
    fn step_once(&mut self) {
        if self.current_speed > 0.0 {
            self.phase = (self.phase + 1) % STEP_SEQUENCE.len();
        } else {
            self.phase = (self.phase + STEP_SEQUENCE.len() - 1) % STEP_SEQUENCE.len();
        }

        let row = STEP_SEQUENCE[self.phase];
        self.coils.0.set(row[0]);
        self.coils.1.set(row[1]);
        self.coils.2.set(row[2]);
        self.coils.3.set(row[3]);

        self.last_step = Instant::now();
        self.steps_taken += 1;
    }

    /// Run the steps due for this cycle at the commanded speed.
    fn run_steps(&mut self) {
        if self.current_speed == 0.0 {
            return;
        }

        let steps_per_sec = self.max_step_rate_hz * f64::from(self.current_speed.abs()) / 100.0;
        let steps_per_loop = steps_per_sec / self.loop_rate_hz;
        let step_interval = Duration::from_secs_f64(1.0 / steps_per_sec);

        if steps_per_loop < 1.0 {
            // Too slow for every cycle; step only when the interval has passed
            if self.last_step.elapsed() > step_interval {
                self.step_once();
            }
            return;
        }

        // Fractional steps are dropped, not carried over
        for _ in 0..steps_per_loop as u64 {
            self.step_once();
            thread::sleep(step_interval);
        }
    }
}

impl<A, B, C, D> Node for StepperNode<A, B, C, D>
where
    A: DigitalOutput,
    B: DigitalOutput,
    C: DigitalOutput,
    D: DigitalOutput,
{
    fn name(&self) -> &'static str {
        "StepperNode"
    }

    fn init(&mut self, ctx: &mut NodeInfo) -> GantryResult<()> {
        ctx.log_info(&format!(
            "Stepper on topic '{}', max {} steps/s",
            self.subscriber.get_topic_name(),
            self.max_step_rate_hz
        ));
        Ok(())
    }

    fn tick(&mut self, mut ctx: Option<&mut NodeInfo>) {
        // The newest command wins; earlier ones in the same cycle are stale
        while let Some(cmd) = self.subscriber.recv(ctx.as_deref_mut()) {
            self.current_speed = cmd.stepper_speed;
        }
        self.run_steps();
    }

    fn shutdown(&mut self, ctx: &mut NodeInfo) -> GantryResult<()> {
        // De-energize so the motor does not cook while parked
        self.coils.0.set(false);
        self.coils.1.set(false);
        self.coils.2.set(false);
        self.coils.3.set(false);
        ctx.log_info("Stepper de-energized");
        Ok(())
    }
}
