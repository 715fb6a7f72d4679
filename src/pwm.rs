use ufmt::derive::uDebug;

use crate::fallback::AnalogWrite;
use crate::regs::{
    Register, TimerRegisters, COM0A1, COM0B1, COM1B1, GTCCR_PWM1B, OCR1C_TOP, TCCR0A_FAST_PWM,
    TCCR0B_DIRECT, TCCR1_DIRECT,
};

/// A hardware PWM output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
pub enum Channel {
    /// Timer0 channel A on PB0.
    Oc0a,
    /// Timer0 channel B on PB1.
    Oc0b,
    /// Timer1 channel B on PB4.
    Oc1b,
}

/// Pin number to hardware channel.
pub const CHANNELS: [(u8, Channel); 3] = [
    (0, Channel::Oc0a),
    (1, Channel::Oc0b),
    (4, Channel::Oc1b),
];

impl Channel {
    pub fn from_pin(pin: u8) -> Option<Channel> {
        CHANNELS
            .iter()
            .find(|(id, _)| *id == pin)
            .map(|(_, channel)| *channel)
    }

    pub fn pin(self) -> u8 {
        match self {
            Channel::Oc0a => 0,
            Channel::Oc0b => 1,
            Channel::Oc1b => 4,
        }
    }

    pub fn compare_register(self) -> Register {
        match self {
            Channel::Oc0a => Register::Ocr0a,
            Channel::Oc0b => Register::Ocr0b,
            Channel::Oc1b => Register::Ocr1b,
        }
    }

    /// Control register and bit connecting the pin to the waveform.
    fn output_bit(self) -> (Register, u8) {
        match self {
            Channel::Oc0a => (Register::Tccr0a, 1 << COM0A1),
            Channel::Oc0b => (Register::Tccr0a, 1 << COM0B1),
            Channel::Oc1b => (Register::Gtccr, 1 << COM1B1),
        }
    }
}

/// Puts both timers in fast PWM with no prescaler, clears the outputs on
/// compare match and zeroes all three duty cycles. Timer1 counts up to
/// [`OCR1C_TOP`].
///
/// Every register is assigned whole, so calling this again restores the same
/// baseline. It replaces whatever the runtime configured on these timers.
pub fn init<R: TimerRegisters>(regs: &mut R) {
    // Timer 0
    regs.write(Register::Tccr0a, TCCR0A_FAST_PWM);
    regs.write(Register::Tccr0b, TCCR0B_DIRECT);
    regs.write(Register::Ocr0a, 0);
    regs.write(Register::Ocr0b, 0);

    // Timer 1
    regs.write(Register::Tccr1, TCCR1_DIRECT);
    regs.write(Register::Gtccr, GTCCR_PWM1B);
    regs.write(Register::Ocr1b, 0);
    regs.write(Register::Ocr1c, OCR1C_TOP);
}

/// Sets the duty cycle of `pin`, 0 fully off and 255 fully on.
///
/// Pins 0, 1 and 4 get their compare register written; any other pin goes to
/// `fallback` unchanged.
pub fn write<R, F>(regs: &mut R, fallback: &mut F, pin: u8, value: u8)
where
    R: TimerRegisters,
    F: AnalogWrite,
{
    match Channel::from_pin(pin) {
        Some(channel) => regs.write(channel.compare_register(), value),
        None => fallback.analog_write(pin, value),
    }
}

/// PWM on pins 0, 1 and 4 of the ATtiny85.
pub struct Pwm<R, F> {
    regs: R,
    fallback: F,
}

impl<R: TimerRegisters, F: AnalogWrite> Pwm<R, F> {
    /// Takes the timers and configures them with [`init`].
    pub fn new(regs: R, fallback: F) -> Self {
        let mut pwm = Pwm { regs, fallback };
        pwm.init();
        pwm
    }

    /// Restores the baseline configuration, all duty cycles back to 0.
    pub fn init(&mut self) {
        init(&mut self.regs);
    }

    pub fn write(&mut self, pin: u8, value: u8) {
        write(&mut self.regs, &mut self.fallback, pin, value);
    }

    /// Current duty cycle of a hardware PWM pin, `None` for other pins.
    pub fn duty(&self, pin: u8) -> Option<u8> {
        Channel::from_pin(pin).map(|channel| self.regs.read(channel.compare_register()))
    }

    pub fn channel(&mut self, channel: Channel) -> PwmChannel<'_, R> {
        PwmChannel {
            regs: &mut self.regs,
            channel,
        }
    }

    pub fn registers(&self) -> &R {
        &self.regs
    }

    pub fn release(self) -> (R, F) {
        (self.regs, self.fallback)
    }
}

/// Handle to one hardware channel.
pub struct PwmChannel<'a, R> {
    regs: &'a mut R,
    channel: Channel,
}

impl<'a, R: TimerRegisters> PwmChannel<'a, R> {
    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn is_enabled(&self) -> bool {
        let (reg, bit) = self.channel.output_bit();
        self.regs.read(reg) & bit != 0
    }
}

impl<'a, R: TimerRegisters> embedded_hal::PwmPin for PwmChannel<'a, R> {
    type Duty = u8;

    fn disable(&mut self) {
        let (reg, bit) = self.channel.output_bit();
        self.regs.modify(reg, |r| r & !bit);
    }

    fn enable(&mut self) {
        let (reg, bit) = self.channel.output_bit();
        self.regs.modify(reg, |r| r | bit);
    }

    fn get_duty(&self) -> u8 {
        self.regs.read(self.channel.compare_register())
    }

    fn get_max_duty(&self) -> u8 {
        match self.channel {
            Channel::Oc0a | Channel::Oc0b => u8::MAX,
            Channel::Oc1b => self.regs.read(Register::Ocr1c),
        }
    }

    fn set_duty(&mut self, duty: u8) {
        self.regs.write(self.channel.compare_register(), duty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regs::SimulatedRegisters;
    use embedded_hal::PwmPin;

    const PWM_PINS: [u8; 3] = [0, 1, 4];

    fn compare_registers(regs: &SimulatedRegisters) -> [u8; 3] {
        [
            regs.read(Register::Ocr0a),
            regs.read(Register::Ocr0b),
            regs.read(Register::Ocr1b),
        ]
    }

    fn no_fallback(pin: u8, value: u8) {
        panic!("unexpected fallback write ({pin}, {value})");
    }

    #[test]
    fn init_sets_baseline() {
        let mut regs = SimulatedRegisters::new();
        for reg in Register::ALL {
            regs.write(reg, 0x5a);
        }
        init(&mut regs);

        assert_eq!(regs.read(Register::Tccr0a), 0b1010_0011);
        assert_eq!(regs.read(Register::Tccr0b), 0b0000_0001);
        assert_eq!(regs.read(Register::Tccr1), 0b0000_0001);
        assert_eq!(regs.read(Register::Gtccr), 0b0110_0000);
        assert_eq!(compare_registers(&regs), [0, 0, 0]);
        assert_eq!(regs.read(Register::Ocr1c), 255);
    }

    #[test]
    fn init_twice_matches_init_once() {
        let mut once = SimulatedRegisters::new();
        init(&mut once);

        let mut twice = SimulatedRegisters::new();
        init(&mut twice);
        init(&mut twice);

        for reg in Register::ALL {
            assert_eq!(once.read(reg), twice.read(reg), "{reg:?} differs");
        }
    }

    #[test]
    fn init_after_writes_restores_baseline() {
        let mut pwm = Pwm::new(SimulatedRegisters::new(), no_fallback);
        pwm.write(0, 10);
        pwm.write(1, 20);
        pwm.write(4, 30);
        pwm.init();

        let mut fresh = SimulatedRegisters::new();
        init(&mut fresh);
        for reg in Register::ALL {
            assert_eq!(pwm.registers().read(reg), fresh.read(reg));
        }
    }

    #[test]
    fn write_hits_only_the_target_register() {
        let config = [
            Register::Tccr0a,
            Register::Tccr0b,
            Register::Tccr1,
            Register::Gtccr,
            Register::Ocr1c,
        ];
        for (slot, pin) in PWM_PINS.into_iter().enumerate() {
            for value in 0..=u8::MAX {
                let mut regs = SimulatedRegisters::new();
                init(&mut regs);
                let before = regs.clone();

                write(&mut regs, &mut no_fallback, pin, value);

                let mut expected = [0; 3];
                expected[slot] = value;
                assert_eq!(compare_registers(&regs), expected);
                assert_eq!(regs.writes(), before.writes() + 1);
                for reg in config {
                    assert_eq!(regs.read(reg), before.read(reg));
                }
            }
        }
    }

    #[test]
    fn other_pins_go_to_fallback() {
        let mut calls = Vec::new();
        let mut regs = SimulatedRegisters::new();
        init(&mut regs);
        let before = regs.clone();

        {
            let mut fallback = |pin: u8, value: u8| calls.push((pin, value));
            for pin in (0..=u8::MAX).filter(|pin| !PWM_PINS.contains(pin)) {
                write(&mut regs, &mut fallback, pin, pin.wrapping_mul(7));
            }
        }

        assert_eq!(regs, before);
        assert_eq!(calls.len(), 256 - PWM_PINS.len());
        assert!(calls.iter().all(|&(pin, value)| value == pin.wrapping_mul(7)));
        assert_eq!(calls[..3], [(2, 14), (3, 21), (5, 35)]);
    }

    #[test]
    fn writes_to_different_pins_are_kept() {
        let mut pwm = Pwm::new(SimulatedRegisters::new(), no_fallback);
        pwm.write(0, 100);
        pwm.write(1, 50);

        assert_eq!(pwm.duty(0), Some(100));
        assert_eq!(pwm.duty(1), Some(50));
        assert_eq!(pwm.duty(4), Some(0));
        assert_eq!(pwm.duty(2), None);
    }

    #[test]
    fn boundary_values_are_stored_exactly() {
        let mut pwm = Pwm::new(SimulatedRegisters::new(), no_fallback);
        for pin in PWM_PINS {
            pwm.write(pin, 255);
            assert_eq!(pwm.duty(pin), Some(255));
            pwm.write(pin, 0);
            assert_eq!(pwm.duty(pin), Some(0));
        }
    }

    #[test]
    fn driver_borrows_registers() {
        let mut regs = SimulatedRegisters::new();
        {
            let mut pwm = Pwm::new(&mut regs, no_fallback);
            pwm.write(4, 200);
        }
        assert_eq!(regs.read(Register::Ocr1b), 200);
        assert_eq!(regs.read(Register::Ocr1c), 255);
    }

    #[test]
    fn pin_table_round_trips() {
        for (pin, channel) in CHANNELS {
            assert_eq!(Channel::from_pin(pin), Some(channel));
            assert_eq!(channel.pin(), pin);
        }
        assert_eq!(Channel::from_pin(2), None);
        assert_eq!(Channel::from_pin(3), None);
    }

    #[test]
    fn channel_handle_sets_and_reads_duty() {
        let mut pwm = Pwm::new(SimulatedRegisters::new(), no_fallback);
        {
            let mut ch = pwm.channel(Channel::Oc1b);
            assert_eq!(ch.get_max_duty(), 255);
            ch.set_duty(64);
            assert_eq!(ch.get_duty(), 64);
        }
        assert_eq!(pwm.duty(4), Some(64));
        assert_eq!(pwm.channel(Channel::Oc0a).get_max_duty(), u8::MAX);
    }

    #[test]
    fn channel_disable_only_clears_its_output() {
        let mut pwm = Pwm::new(SimulatedRegisters::new(), no_fallback);
        pwm.write(0, 80);

        let mut ch = pwm.channel(Channel::Oc0a);
        assert!(ch.is_enabled());
        ch.disable();
        assert!(!ch.is_enabled());

        assert_eq!(pwm.registers().read(Register::Tccr0a), 0b0010_0011);
        assert_eq!(pwm.registers().read(Register::Gtccr), 0b0110_0000);
        assert_eq!(pwm.duty(0), Some(80));
        assert!(pwm.channel(Channel::Oc0b).is_enabled());

        pwm.channel(Channel::Oc0a).enable();
        assert_eq!(pwm.registers().read(Register::Tccr0a), 0b1010_0011);
    }

    #[test]
    fn timer1_channel_disable_clears_com1b1() {
        let mut pwm = Pwm::new(SimulatedRegisters::new(), no_fallback);
        pwm.channel(Channel::Oc1b).disable();
        assert_eq!(pwm.registers().read(Register::Gtccr), 1 << 6);
        pwm.channel(Channel::Oc1b).enable();
        assert_eq!(pwm.registers().read(Register::Gtccr), 0b0110_0000);
    }

    #[test]
    fn release_returns_parts() {
        let pwm = Pwm::new(SimulatedRegisters::new(), no_fallback);
        let (regs, _) = pwm.release();
        assert_eq!(regs.read(Register::Ocr1c), 255);
    }

    #[test]
    fn channel_udebug() {
        let mut s = String::new();
        ufmt::uwrite!(s, "{:?}", Channel::Oc0b).unwrap();
        assert_eq!(s, "Oc0b");
    }
}
