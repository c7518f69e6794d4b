//! Thin hardware abstraction over the ATmega328P peripherals the snake
//! firmware uses: GPIO, Timer0 and USART0.

pub mod gpio;
pub mod timer;
pub mod uart;

pub use gpio::{board, Input, Output, Pin};
pub use timer::{delay_ms, Prescaler, Timer0};
pub use uart::Uart;
