use carriage_control_node::CarriageControlNode;
use gantry::library::hardware::mock::{MockAnalogInput, MockDigitalInput, MockDigitalOutput, MockPwm};
use gantry::library::nodes::{DcMotorNode, JoystickInputNode, StatusDisplayNode, StepperNode};
use gantry::prelude::*;

fn main() -> Result<()> {
    let debug = std::env::args().any(|arg| arg == "--debug");

    println!("=== Carriage Game Controller ===");
    println!("Starting carriage scheduler on the bench rig...");
    println!("\nControls:");
    println!("  Joystick X/Y - Move the carriage / steer the stepper");
    println!("  Joystick click - Start a new game / start the run");
    println!("  Action button - End the run");
    println!("================================\n");

    // Bench hardware: swap these handles for a real GPIO backend on the rig
    let axis_x = MockAnalogInput::new(AXIS_MAX / 2);
    let axis_y = MockAnalogInput::new(AXIS_MAX / 2);
    let click = MockDigitalInput::new();
    let action = MockDigitalInput::new();

    let joystick_node = JoystickInputNode::new(axis_x, axis_y, click, action)?;
    let control_node = CarriageControlNode::new()?;
    let dc_motor_node = DcMotorNode::new(
        MockDigitalOutput::new(),
        MockDigitalOutput::new(),
        MockPwm::new(),
    )?;
    let stepper_node = StepperNode::new(
        MockDigitalOutput::new(),
        MockDigitalOutput::new(),
        MockDigitalOutput::new(),
        MockDigitalOutput::new(),
    )?;
    let mut display_node = StatusDisplayNode::new()?;
    display_node.set_debug(debug);

    let mut sched = Scheduler::new()
        .name("CarriageScheduler")
        .with_config(SchedulerConfig::standard());

    // Inputs first, then control, then actuators, display last
    sched.add(Box::new(joystick_node), 0, None);
    sched.add(Box::new(control_node), 1, Some(debug));
    sched.add(Box::new(dc_motor_node), 2, None);
    sched.add(Box::new(stepper_node), 3, None);
    sched.add(Box::new(display_node), 4, None);

    sched.run()
}
