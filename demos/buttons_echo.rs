//! Input bring-up: prints the latched direction twice a second so the
//! button wiring and interrupt routing can be checked one line at a time.

#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]

#[cfg(target_arch = "avr")]
use panic_halt as _;

#[cfg(target_arch = "avr")]
#[avr_device::entry]
fn main() -> ! {
    use matrix_snake::drivers::{DirectionPad, SerialConsole};
    use matrix_snake::game::Direction;
    use matrix_snake::hal::delay_ms;

    let _dp = avr_device::atmega328p::Peripherals::take().unwrap();
    let mut console = SerialConsole::new();
    let pad = DirectionPad::new();
    unsafe { avr_device::interrupt::enable() };

    console.write_line("press a direction button");
    loop {
        let name = match pad.current() {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        console.write_line(name);
        delay_ms(500);
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {}
