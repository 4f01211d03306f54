use gantry_core::error::GantryResult;
use gantry_core::{Hub, Node, NodeInfo};

use crate::hardware::{DigitalOutput, PwmOutput};
use crate::messages::MotorCommand;

/// Duty cycle at which the carriage motor just overcomes stiction.
/// Anything nonzero below this would stall and heat the windings.
const MIN_DUTY: u16 = 41200;

/// Full-scale duty cycle
const MAX_DUTY: u16 = 65535;

/// Reverse speeds beyond this are rejected outright; the carriage would slam
/// into the rear stop before the operator could react.
const MIN_SPEED: f32 = -40.0;

/// DC Motor Node - drives the carriage motor through an H-bridge
///
/// Subscribes to `MotorCommand` and applies the `linear_speed` field.
/// Direction comes from the sign (two direction pins), magnitude maps to a
/// 16-bit PWM duty cycle on the enable pin. The mapping is affine rather than
/// proportional: any nonzero speed starts at the stiction threshold so the
/// motor always turns when commanded.
pub struct DcMotorNode<IN1, IN2, EN> {
    subscriber: Hub<MotorCommand>,
    in1: IN1,
    in2: IN2,
    enable: EN,
    pwm_frequency_hz: u32,
    current_speed: f32,
    rejected_commands: u64,
}

impl<IN1, IN2, EN> DcMotorNode<IN1, IN2, EN>
where
    IN1: DigitalOutput,
    IN2: DigitalOutput,
    EN: PwmOutput,
{
    /// Create a DC motor node subscribing to the default topic "motor_cmd"
    pub fn new(in1: IN1, in2: IN2, enable: EN) -> GantryResult<Self> {
        Self::new_with_topic("motor_cmd", in1, in2, enable)
    }

    /// Create a DC motor node subscribing to a custom topic
    pub fn new_with_topic(topic: &str, in1: IN1, in2: IN2, enable: EN) -> GantryResult<Self> {
        Ok(Self {
            subscriber: Hub::new(topic)?,
            in1,
            in2,
            enable,
            pwm_frequency_hz: 5000,
            current_speed: 0.0,
            rejected_commands: 0,
        })
    }

    /// PWM carrier frequency the enable pin is driven at
    pub fn pwm_frequency_hz(&self) -> u32 {
        self.pwm_frequency_hz
    }

    /// Last speed actually applied to the hardware
    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    pub fn rejected_commands(&self) -> u64 {
        self.rejected_commands
    }

    /// Map a signed speed percentage to a 16-bit duty cycle.
    ///
    /// Zero stays zero; any other magnitude lands in `MIN_DUTY..=MAX_DUTY`.
    fn duty_for(speed: f32) -> u16 {
        if speed == 0.0 {
            return 0;
        }
        let span = (MAX_DUTY - MIN_DUTY) as f32;
        (MIN_DUTY as f32 + span * speed.abs() / 100.0) as u16
    }

    /// Apply one speed command to the H-bridge.
    ///
    /// Speeds below `MIN_SPEED` leave the pins untouched entirely, keeping
    /// whatever the motor was last doing.
    fn apply_speed(&mut self, speed: f32, ctx: &mut Option<&mut NodeInfo>) {
        if speed < MIN_SPEED {
            self.rejected_commands += 1;
            if let Some(ctx) = ctx.as_deref_mut() {
                ctx.log_warning(&format!(
                    "reverse speed {:.1} below limit {:.1}, command ignored",
                    speed, MIN_SPEED
                ));
            }
            return;
        }

        if speed >= 0.0 {
            self.in1.set(false);
            self.in2.set(true);
        } else {
            self.in1.set(true);
            self.in2.set(false);
        }

        self.enable.set_duty(Self::duty_for(speed));
        self.current_speed = speed;
    }
}

impl<IN1, IN2, EN> Node for DcMotorNode<IN1, IN2, EN>
where
    IN1: DigitalOutput,
    IN2: DigitalOutput,
    EN: PwmOutput,
{
    fn name(&self) -> &'static str {
        "DcMotorNode"
    }

    fn init(&mut self, ctx: &mut NodeInfo) -> GantryResult<()> {
        // Known-safe starting point before the first command arrives
        self.in1.set(false);
        self.in2.set(true);
        self.enable.set_duty(0);
        ctx.log_info(&format!(
            "DC motor on topic '{}', PWM {} Hz",
            self.subscriber.get_topic_name(),
            self.pwm_frequency_hz
        ));
        Ok(())
    }

    fn tick(&mut self, mut ctx: Option<&mut NodeInfo>) {
        while let Some(cmd) = self.subscriber.recv(ctx.as_deref_mut()) {
            self.apply_speed(cmd.linear_speed, &mut ctx);
        }
    }

    fn shutdown(&mut self, ctx: &mut NodeInfo) -> GantryResult<()> {
        self.enable.set_duty(0);
        ctx.log_info("DC motor stopped");
        Ok(())
    }
}
