use attiny_hal::pac::{TC0, TC1};

use crate::regs::{Register, TimerRegisters};

/// Timer/Counter0 and Timer/Counter1 of the ATtiny85.
pub struct Timers {
    tc0: TC0,
    tc1: TC1,
}

impl Timers {
    pub fn new(tc0: TC0, tc1: TC1) -> Self {
        Timers { tc0, tc1 }
    }

    pub fn free(self) -> (TC0, TC1) {
        (self.tc0, self.tc1)
    }
}

impl TimerRegisters for Timers {
    fn read(&self, reg: Register) -> u8 {
        match reg {
            Register::Tccr0a => self.tc0.tccr0a.read().bits(),
            Register::Tccr0b => self.tc0.tccr0b.read().bits(),
            Register::Ocr0a => self.tc0.ocr0a.read().bits(),
            Register::Ocr0b => self.tc0.ocr0b.read().bits(),
            Register::Tccr1 => self.tc1.tccr1.read().bits(),
            Register::Gtccr => self.tc1.gtccr.read().bits(),
            Register::Ocr1b => self.tc1.ocr1b.read().bits(),
            Register::Ocr1c => self.tc1.ocr1c.read().bits(),
        }
    }

    #[allow(unused_unsafe)]
    fn write(&mut self, reg: Register, value: u8) {
        match reg {
            Register::Tccr0a => self.tc0.tccr0a.write(|w| unsafe { w.bits(value) }),
            Register::Tccr0b => self.tc0.tccr0b.write(|w| unsafe { w.bits(value) }),
            Register::Ocr0a => self.tc0.ocr0a.write(|w| unsafe { w.bits(value) }),
            Register::Ocr0b => self.tc0.ocr0b.write(|w| unsafe { w.bits(value) }),
            Register::Tccr1 => self.tc1.tccr1.write(|w| unsafe { w.bits(value) }),
            Register::Gtccr => self.tc1.gtccr.write(|w| unsafe { w.bits(value) }),
            Register::Ocr1b => self.tc1.ocr1b.write(|w| unsafe { w.bits(value) }),
            Register::Ocr1c => self.tc1.ocr1c.write(|w| unsafe { w.bits(value) }),
        }
    }
}
