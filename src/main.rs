//! Firmware entry: peripheral bring-up, then the render/tick loop forever.

#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]

#[cfg(target_arch = "avr")]
use panic_halt as _;

#[cfg(target_arch = "avr")]
#[avr_device::entry]
fn main() -> ! {
    use matrix_snake::drivers::{DirectionPad, MatrixDisplay, SerialConsole};
    use matrix_snake::game::{Game, TickOutcome};
    use matrix_snake::hal::{Prescaler, Timer0};

    let _dp = avr_device::atmega328p::Peripherals::take().unwrap();

    // Free-running counter; read once below as the RNG seed. The board has
    // no better entropy source than its own bring-up timing.
    let mut ticks = Timer0::new();
    ticks.start(Prescaler::Direct);

    let mut console = SerialConsole::new();
    let mut display = MatrixDisplay::new();
    let pad = DirectionPad::new();

    // Buttons and the UART are interrupt-driven from here on.
    unsafe { avr_device::interrupt::enable() };

    console.write_line("matrix_snake 0.1.0");
    console.write_line("ready");

    let mut game = Game::new(u64::from(ticks.counter()));

    loop {
        display.render(game.board());
        match game.tick(pad.current()) {
            TickOutcome::Ate => {
                ufmt::uwriteln!(console, "length {}", game.snake_len() as u8).ok();
            }
            TickOutcome::Reset => console.write_line("game over, restarting"),
            TickOutcome::Moved => {}
        }
    }
}

// The firmware only means something on the chip; this stub keeps host
// builds of the package linking.
#[cfg(not(target_arch = "avr"))]
fn main() {}
