//! Fast PWM on pins 0, 1 and 4 of the ATtiny85.
//!
//! Timer/Counter0 drives PB0 (OC0A) and PB1 (OC0B), Timer/Counter1 drives
//! PB4 (OC1B). Both run from the undivided system clock with a top of 255.
//! Writes to any other pin are handed to an [`AnalogWrite`] implementation.
//!
//! ```
//! use tiny85_pwm::{Pwm, Register, SimulatedRegisters, TimerRegisters};
//!
//! let mut pwm = Pwm::new(SimulatedRegisters::new(), |_pin: u8, _value: u8| {});
//! pwm.write(4, 128);
//! assert_eq!(pwm.registers().read(Register::Ocr1b), 128);
//! ```
#![cfg_attr(not(test), no_std)]

pub mod fallback;
pub mod pwm;
pub mod regs;
#[cfg(target_arch = "avr")]
pub mod tiny85;

pub use fallback::{AnalogWrite, DigitalFallback};
pub use pwm::{init, write, Channel, Pwm, PwmChannel};
pub use regs::{Register, SimulatedRegisters, TimerRegisters};
#[cfg(target_arch = "avr")]
pub use tiny85::Timers;
