//! Compile-time configuration for the snake firmware.

/// CPU frequency in Hz (internal RC oscillator with CKDIV8).
pub const CPU_FREQ_HZ: u32 = 1_000_000;

/// UART baud rate. 4800 keeps the baud error at 0.2% on a 1 MHz clock.
pub const UART_BAUD: u32 = 4800;

/// LED matrix rows.
pub const GRID_HEIGHT: usize = 5;

/// LED matrix columns.
pub const GRID_WIDTH: usize = 7;

/// The snake can at most cover the whole grid.
pub const MAX_SNAKE_LEN: usize = GRID_HEIGHT * GRID_WIDTH;

/// How long each row stays lit during a scan, in milliseconds.
pub const ROW_DWELL_MS: u16 = 1;

/// Full scans per game tick. Together with the row dwell this sets the
/// tick duration, i.e. the snake speed: more repeats, slower snake.
pub const FRAME_REPEATS: u16 = 200;
