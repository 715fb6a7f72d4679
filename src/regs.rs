//! Timer/Counter registers used for PWM and the accessor trait over them.

use ufmt::derive::uDebug;

// TCCR0A
pub const WGM00: u8 = 0;
pub const WGM01: u8 = 1;
pub const COM0B1: u8 = 5;
pub const COM0A1: u8 = 7;

// TCCR0B
pub const CS00: u8 = 0;

// TCCR1
pub const CS10: u8 = 0;

// GTCCR
pub const COM1B1: u8 = 5;
pub const PWM1B: u8 = 6;

/// Fast PWM, top at 0xFF, clear OC0A and OC0B on compare match.
pub const TCCR0A_FAST_PWM: u8 = (1 << WGM00) | (1 << WGM01) | (1 << COM0A1) | (1 << COM0B1);
/// No prescaler.
pub const TCCR0B_DIRECT: u8 = 1 << CS00;
/// No prescaler.
pub const TCCR1_DIRECT: u8 = 1 << CS10;
/// PWM on OC1B, clear on compare match.
pub const GTCCR_PWM1B: u8 = (1 << COM1B1) | (1 << PWM1B);
/// Timer1 top, sets the PWM frequency.
pub const OCR1C_TOP: u8 = 255;

/// The 8-bit registers this crate touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
pub enum Register {
    Tccr0a,
    Tccr0b,
    Ocr0a,
    Ocr0b,
    Tccr1,
    Gtccr,
    Ocr1b,
    Ocr1c,
}

impl Register {
    pub const ALL: [Register; 8] = [
        Register::Tccr0a,
        Register::Tccr0b,
        Register::Ocr0a,
        Register::Ocr0b,
        Register::Tccr1,
        Register::Gtccr,
        Register::Ocr1b,
        Register::Ocr1c,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

/// Typed access to the timer register block.
///
/// Implemented over the real peripherals on AVR and by [`SimulatedRegisters`]
/// everywhere, so the PWM logic can run against either.
pub trait TimerRegisters {
    fn read(&self, reg: Register) -> u8;
    fn write(&mut self, reg: Register, value: u8);

    fn modify<F>(&mut self, reg: Register, f: F)
    where
        F: FnOnce(u8) -> u8,
    {
        let value = f(self.read(reg));
        self.write(reg, value);
    }
}

impl<T: TimerRegisters + ?Sized> TimerRegisters for &mut T {
    fn read(&self, reg: Register) -> u8 {
        (**self).read(reg)
    }

    fn write(&mut self, reg: Register, value: u8) {
        (**self).write(reg, value)
    }
}

/// In-memory register file. Every register starts at zero, like after reset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimulatedRegisters {
    regs: [u8; Register::ALL.len()],
    writes: usize,
}

impl SimulatedRegisters {
    pub const fn new() -> Self {
        Self {
            regs: [0; Register::ALL.len()],
            writes: 0,
        }
    }

    /// Number of register writes performed so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl TimerRegisters for SimulatedRegisters {
    fn read(&self, reg: Register) -> u8 {
        self.regs[reg.index()]
    }

    fn write(&mut self, reg: Register, value: u8) {
        self.regs[reg.index()] = value;
        self.writes += 1;
    }
}
