#![no_std]
#![no_main]

use panic_halt as _;
use tiny85_pwm::{DigitalFallback, Pwm, Timers};

// 8 MHz internal oscillator, roughly one second per ramp
const STEP_DELAY_CYCLES: u32 = 8_000_000 / 256;
const FADE_PINS: [u8; 5] = [0, 1, 2, 3, 4];

#[avr_device::entry]
fn main() -> ! {
    let dp = attiny_hal::Peripherals::take().unwrap();
    let pins = attiny_hal::pins!(dp);

    // OC0A, OC0B and OC1B only reach the pins when they are outputs
    let _pb0 = pins.pb0.into_output();
    let _pb1 = pins.pb1.into_output();
    let _pb4 = pins.pb4.into_output();

    // No PWM hardware on PB2/PB3
    let fallback = DigitalFallback::new([
        (2, pins.pb2.into_output().downgrade()),
        (3, pins.pb3.into_output().downgrade()),
    ]);

    let mut pwm = Pwm::new(Timers::new(dp.TC0, dp.TC1), fallback);

    let mut level: u8 = 0;
    let mut rising = true;
    loop {
        for pin in FADE_PINS {
            pwm.write(pin, level);
        }

        if rising {
            level += 1;
            rising = level < u8::MAX;
        } else {
            level -= 1;
            rising = level == 0;
        }

        avr_device::asm::delay_cycles(STEP_DELAY_CYCLES);
    }
}
