use avr_device::atmega328p::TC0;

use crate::config::CPU_FREQ_HZ;

/// Clock select for Timer0 (TCCR0B CS02:0).
#[derive(Clone, Copy)]
pub enum Prescaler {
    Stop = 0,
    Direct = 1,
    Div8 = 2,
    Div64 = 3,
    Div256 = 4,
    Div1024 = 5,
}

const PRESCALER_MASK: u8 = 0x07;

/// The 8-bit Timer0 in normal (free-running) mode.
pub struct Timer0 {
    _marker: (),
}

impl Timer0 {
    pub fn new() -> Self {
        unsafe {
            let tc = &*TC0::ptr();
            tc.tccr0a.write(|w| w.bits(0));
            tc.tccr0b.write(|w| w.bits(0));
            tc.tcnt0.write(|w| w.bits(0));
        }
        Self { _marker: () }
    }

    pub fn start(&mut self, prescaler: Prescaler) {
        unsafe {
            (*TC0::ptr()).tccr0b.modify(|r, w| {
                w.bits((r.bits() & !PRESCALER_MASK) | (prescaler as u8 & PRESCALER_MASK))
            });
        }
    }

    pub fn stop(&mut self) {
        unsafe {
            (*TC0::ptr()).tccr0b.modify(|r, w| w.bits(r.bits() & !PRESCALER_MASK));
        }
    }

    pub fn counter(&self) -> u8 {
        unsafe { (*TC0::ptr()).tcnt0.read().bits() }
    }

    pub fn set_counter(&mut self, value: u8) {
        unsafe {
            (*TC0::ptr()).tcnt0.write(|w| w.bits(value));
        }
    }
}

impl Default for Timer0 {
    fn default() -> Self {
        Self::new()
    }
}

// Timer0 counts at CPU/8, one count per 8 us on the 1 MHz clock.
const TICKS_PER_MS: u8 = (CPU_FREQ_HZ / 8 / 1000) as u8;

/// Busy-wait for `ms` milliseconds. Claims Timer0 for the duration.
pub fn delay_ms(ms: u16) {
    let mut timer = Timer0::new();
    timer.start(Prescaler::Div8);

    for _ in 0..ms {
        while timer.counter() < TICKS_PER_MS {}
        timer.set_counter(0);
    }

    timer.stop();
}
