use std::env;

fn main() {
    // The AVR linker needs the MCU to pick the right vector table and
    // memory layout. Host builds (unit tests) link nothing AVR-specific.
    let target = env::var("TARGET").unwrap_or_default();
    if target.contains("avr") {
        println!("cargo:rustc-link-arg=-mmcu=atmega328p");
    }
}
