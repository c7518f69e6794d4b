use core::cell::Cell;

use avr_device::atmega328p::EXINT;
use avr_device::interrupt::{self, Mutex};

use crate::game::Direction;
use crate::hal::gpio::board::{BTN_DOWN, BTN_LEFT, BTN_RIGHT, BTN_UP};

// EICRA: falling edge on INT0 and INT1 (ISC01, ISC11).
const EICRA_FALLING: u8 = 0b0000_1010;
// EIMSK: INT0 | INT1.
const EIMSK_INT01: u8 = 0b0000_0011;
// PCICR: PCIE1 | PCIE2.
const PCICR_BANKS: u8 = 0b0000_0110;
// PCINT13 (left, PC5) lives in PCMSK1, PCINT23 (right, PD7) in PCMSK2.
const PCMSK1_LEFT: u8 = 1 << 5;
const PCMSK2_RIGHT: u8 = 1 << 7;

// Last direction pressed, overwritten by every button event and read once
// per tick. Button interrupts may fire mid-render or mid-tick, so every
// access runs in a critical section.
static DIRECTION: Mutex<Cell<Direction>> = Mutex::new(Cell::new(Direction::Right));

/// The four direction buttons and their interrupt wiring.
///
/// No debouncing and no queueing: each press overwrites the latch and the
/// last writer before a tick wins.
pub struct DirectionPad {
    _buttons: (BTN_UP, BTN_DOWN, BTN_LEFT, BTN_RIGHT),
}

impl DirectionPad {
    pub fn new() -> Self {
        let buttons = (
            BTN_UP::default().into_input(),
            BTN_DOWN::default().into_input(),
            BTN_LEFT::default().into_input(),
            BTN_RIGHT::default().into_input(),
        );
        unsafe {
            let exint = &*EXINT::ptr();
            exint.eicra.write(|w| w.bits(EICRA_FALLING));
            exint.eimsk.write(|w| w.bits(EIMSK_INT01));
            exint.pcicr.modify(|r, w| w.bits(r.bits() | PCICR_BANKS));
            exint.pcmsk1.modify(|r, w| w.bits(r.bits() | PCMSK1_LEFT));
            exint.pcmsk2.modify(|r, w| w.bits(r.bits() | PCMSK2_RIGHT));
        }
        Self { _buttons: buttons }
    }

    /// The latched direction.
    pub fn current(&self) -> Direction {
        interrupt::free(|cs| DIRECTION.borrow(cs).get())
    }
}

impl Default for DirectionPad {
    fn default() -> Self {
        Self::new()
    }
}

fn latch(dir: Direction) {
    interrupt::free(|cs| DIRECTION.borrow(cs).set(dir));
}

#[avr_device::interrupt(atmega328p)]
fn INT0() {
    latch(Direction::Up);
}

#[avr_device::interrupt(atmega328p)]
fn INT1() {
    latch(Direction::Down);
}

// The pin-change lines fire on both edges; latching the same direction
// again on release is harmless.
#[avr_device::interrupt(atmega328p)]
fn PCINT1() {
    latch(Direction::Left);
}

#[avr_device::interrupt(atmega328p)]
fn PCINT2() {
    latch(Direction::Right);
}
