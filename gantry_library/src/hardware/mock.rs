//! In-memory hardware backends
//!
//! Used by the bench scheduler and by node tests. Each mock is a cheap clone
//! sharing its state through an `Arc`, so a test can hold one handle while the
//! node under test holds another.

use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};
use std::sync::{Arc, Mutex};

use super::{AnalogInput, DigitalInput, DigitalOutput, PwmOutput};

/// Digital input with an externally settable level
#[derive(Debug, Clone, Default)]
pub struct MockDigitalInput {
    level: Arc<AtomicBool>,
}

impl MockDigitalInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_level(&self, high: bool) {
        self.level.store(high, Ordering::SeqCst);
    }
}

impl DigitalInput for MockDigitalInput {
    fn is_high(&mut self) -> bool {
        self.level.load(Ordering::SeqCst)
    }
}

/// Analog input with an externally settable raw value
#[derive(Debug, Clone, Default)]
pub struct MockAnalogInput {
    value: Arc<AtomicU16>,
}

impl MockAnalogInput {
    pub fn new(initial: u16) -> Self {
        Self {
            value: Arc::new(AtomicU16::new(initial)),
        }
    }

    pub fn set_value(&self, value: u16) {
        self.value.store(value, Ordering::SeqCst);
    }
}

impl AnalogInput for MockAnalogInput {
    fn read(&mut self) -> u16 {
        self.value.load(Ordering::SeqCst)
    }
}

/// Digital output recording every level written to it
#[derive(Debug, Clone, Default)]
pub struct MockDigitalOutput {
    level: Arc<AtomicBool>,
    writes: Arc<Mutex<Vec<bool>>>,
}

impl MockDigitalOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last level driven (false before any write)
    pub fn level(&self) -> bool {
        self.level.load(Ordering::SeqCst)
    }

    /// Every level written, in order
    pub fn writes(&self) -> Vec<bool> {
        self.writes.lock().expect("mock lock poisoned").clone()
    }
}

impl DigitalOutput for MockDigitalOutput {
    fn set(&mut self, high: bool) {
        self.level.store(high, Ordering::SeqCst);
        self.writes.lock().expect("mock lock poisoned").push(high);
    }
}

/// PWM channel recording every duty cycle written to it
#[derive(Debug, Clone, Default)]
pub struct MockPwm {
    duty: Arc<AtomicU16>,
    writes: Arc<Mutex<Vec<u16>>>,
}

impl MockPwm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last duty cycle driven (0 before any write)
    pub fn duty(&self) -> u16 {
        self.duty.load(Ordering::SeqCst)
    }

    /// Every duty cycle written, in order
    pub fn writes(&self) -> Vec<u16> {
        self.writes.lock().expect("mock lock poisoned").clone()
    }
}

impl PwmOutput for MockPwm {
    fn set_duty(&mut self, duty: u16) {
        self.duty.store(duty, Ordering::SeqCst);
        self.writes.lock().expect("mock lock poisoned").push(duty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let input = MockDigitalInput::new();
        let mut handle: Box<dyn DigitalInput> = Box::new(input.clone());
        assert!(!handle.is_high());
        input.set_level(true);
        assert!(handle.is_high());
    }

    #[test]
    fn outputs_record_write_history() {
        let pin = MockDigitalOutput::new();
        let mut handle = pin.clone();
        handle.set(true);
        handle.set(false);
        handle.set(true);
        assert!(pin.level());
        assert_eq!(pin.writes(), vec![true, false, true]);
    }

    #[test]
    fn pwm_tracks_last_duty() {
        let pwm = MockPwm::new();
        let mut handle = pwm.clone();
        handle.set_duty(41200);
        handle.set_duty(65535);
        assert_eq!(pwm.duty(), 65535);
        assert_eq!(pwm.writes(), vec![41200, 65535]);
    }
}
