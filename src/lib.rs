//! Snake on a 5x7 LED matrix, ATmega328P firmware.
//!
//! The `game` module is pure `core` logic and builds for any target, so the
//! rules are unit-tested on the host (`cargo test --target <host-triple>`).
//! Everything that touches peripherals (`hal`, `drivers`, `testing`) only
//! exists on AVR builds.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

pub mod config;
pub mod game;

#[cfg(target_arch = "avr")]
pub mod drivers;
#[cfg(target_arch = "avr")]
pub mod hal;
#[cfg(target_arch = "avr")]
pub mod testing;
