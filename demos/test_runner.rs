//! On-target test runner: flash this, open the serial port at 4800 baud
//! and read the results.

#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]

#[cfg(target_arch = "avr")]
use panic_halt as _;

#[cfg(target_arch = "avr")]
#[avr_device::entry]
fn main() -> ! {
    use matrix_snake::drivers::SerialConsole;
    use matrix_snake::hal::delay_ms;
    use matrix_snake::testing;

    let _dp = avr_device::atmega328p::Peripherals::take().unwrap();
    let console = SerialConsole::new();
    unsafe { avr_device::interrupt::enable() };

    testing::run_all(console);

    loop {
        delay_ms(1000);
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {}
