pub mod display;
pub mod dpad;
pub mod serial_console;

pub use display::MatrixDisplay;
pub use dpad::DirectionPad;
pub use serial_console::SerialConsole;
