use gantry_core::error::GantryResult;
use gantry_core::{Hub, Node, NodeInfo};

use crate::hardware::{AnalogInput, DigitalInput};
use crate::messages::JoystickSample;

/// Joystick Input Node - samples the operator's joystick rig
///
/// Reads two analog axes, the joystick's own click switch, and a separate
/// action button, and publishes one `JoystickSample` per cycle. Button fields
/// carry raw levels; consumers do their own edge detection.
pub struct JoystickInputNode<X, Y, C, B> {
    publisher: Hub<JoystickSample>,
    axis_x: X,
    axis_y: Y,
    click: C,
    action: B,
    samples_published: u64,
}

impl<X, Y, C, B> JoystickInputNode<X, Y, C, B>
where
    X: AnalogInput,
    Y: AnalogInput,
    C: DigitalInput,
    B: DigitalInput,
{
    /// Create a joystick node publishing on the default topic "joystick"
    pub fn new(axis_x: X, axis_y: Y, click: C, action: B) -> GantryResult<Self> {
        Self::new_with_topic("joystick", axis_x, axis_y, click, action)
    }

    /// Create a joystick node publishing on a custom topic
    pub fn new_with_topic(
        topic: &str,
        axis_x: X,
        axis_y: Y,
        click: C,
        action: B,
    ) -> GantryResult<Self> {
        Ok(Self {
            publisher: Hub::new(topic)?,
            axis_x,
            axis_y,
            click,
            action,
            samples_published: 0,
        })
    }

    pub fn samples_published(&self) -> u64 {
        self.samples_published
    }
}

impl<X, Y, C, B> Node for JoystickInputNode<X, Y, C, B>
where
    X: AnalogInput,
    Y: AnalogInput,
    C: DigitalInput,
    B: DigitalInput,
{
    fn name(&self) -> &'static str {
        "JoystickInputNode"
    }

    fn init(&mut self, ctx: &mut NodeInfo) -> GantryResult<()> {
        ctx.log_info(&format!(
            "Joystick input on topic '{}'",
            self.publisher.get_topic_name()
        ));
        Ok(())
    }

    fn tick(&mut self, mut ctx: Option<&mut NodeInfo>) {
        let sample = JoystickSample::new(
            self.axis_x.read(),
            self.axis_y.read(),
            self.click.is_high(),
            self.action.is_high(),
        );

        match self.publisher.send(sample, ctx.as_deref_mut()) {
            Ok(()) => self.samples_published += 1,
            Err(_) => {
                // Stale samples are worthless; drop and let the next tick retry
                if let Some(ctx) = ctx {
                    ctx.log_warning("joystick topic full, sample dropped");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::mock::{MockAnalogInput, MockDigitalInput};

    fn make_node(
        topic: &str,
    ) -> (
        JoystickInputNode<MockAnalogInput, MockAnalogInput, MockDigitalInput, MockDigitalInput>,
        MockAnalogInput,
        MockDigitalInput,
    ) {
        let x = MockAnalogInput::new(32767);
        let y = MockAnalogInput::new(32767);
        let click = MockDigitalInput::new();
        let action = MockDigitalInput::new();
        let node = JoystickInputNode::new_with_topic(
            topic,
            x,
            y.clone(),
            click,
            action.clone(),
        )
        .unwrap();
        (node, y, action)
    }

    #[test]
    fn publishes_one_sample_per_tick() {
        let (mut node, y, action) = make_node("joystick_test_sample");
        let subscriber = Hub::<JoystickSample>::new("joystick_test_sample").unwrap();

        y.set_value(60000);
        action.set_level(true);
        node.tick(None);

        let sample = subscriber.recv(None).expect("sample published");
        assert_eq!(sample.y, 60000);
        assert!(sample.action_pressed);
        assert!(!sample.joystick_pressed);
        assert!(subscriber.recv(None).is_none());
        assert_eq!(node.samples_published(), 1);
    }

    #[test]
    fn full_topic_drops_without_panicking() {
        // Create the topic first so the node reuses the capacity-1 queue
        let hub =
            Hub::<JoystickSample>::new_with_capacity("joystick_test_full", 1).unwrap();
        hub.send(JoystickSample::centered(), None).unwrap();

        let (mut node, _y, _action) = make_node("joystick_test_full");
        node.tick(None);
        assert_eq!(node.samples_published(), 0);
    }
}
