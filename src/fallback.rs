//! Handling for pins that have no hardware PWM channel.

use embedded_hal::digital::v2::OutputPin;

/// Generic analog-write primitive used for pins the timers don't drive.
pub trait AnalogWrite {
    fn analog_write(&mut self, pin: u8, value: u8);
}

impl<F> AnalogWrite for F
where
    F: FnMut(u8, u8),
{
    fn analog_write(&mut self, pin: u8, value: u8) {
        self(pin, value)
    }
}

/// Values at or above this drive the pin high.
pub const DIGITAL_THRESHOLD: u8 = 128;

/// Analog write on plain digital pins: low below [`DIGITAL_THRESHOLD`],
/// high from it up. Writes to pins not in the table are ignored.
pub struct DigitalFallback<P, const N: usize> {
    pins: [(u8, P); N],
}

impl<P: OutputPin, const N: usize> DigitalFallback<P, N> {
    pub fn new(pins: [(u8, P); N]) -> Self {
        Self { pins }
    }

    pub fn free(self) -> [(u8, P); N] {
        self.pins
    }
}

impl<P: OutputPin, const N: usize> AnalogWrite for DigitalFallback<P, N> {
    fn analog_write(&mut self, pin: u8, value: u8) {
        if let Some((_, output)) = self.pins.iter_mut().find(|(id, _)| *id == pin) {
            // AnalogWrite has no error path.
            let _ = if value < DIGITAL_THRESHOLD {
                output.set_low()
            } else {
                output.set_high()
            };
        }
    }
}
