use avr_device::atmega328p::{PORTB, PORTC};

use crate::config::{FRAME_REPEATS, GRID_HEIGHT, ROW_DWELL_MS};
use crate::game::Board;
use crate::hal::delay_ms;
use crate::hal::gpio::board::{COL0, COL1, COL2, COL3, COL4, COL5, COL6};
use crate::hal::gpio::board::{ROW0, ROW1, ROW2, ROW3, ROW4};

// PC0-PC4 select rows; PC5 carries the left button and must stay untouched.
const ROW_MASK: u8 = 0b0001_1111;
// PB0-PB6 drive columns; PB7 is not wired.
const COLUMN_MASK: u8 = 0b0111_1111;

/// Row-multiplexed driver for the 5x7 matrix.
///
/// One `render` call shows the board for a whole game tick by repeating the
/// five-row scan `FRAME_REPEATS` times, one millisecond of dwell per row.
pub struct MatrixDisplay {
    _rows: (ROW0, ROW1, ROW2, ROW3, ROW4),
    _cols: (COL0, COL1, COL2, COL3, COL4, COL5, COL6),
}

impl MatrixDisplay {
    pub fn new() -> Self {
        Self {
            _rows: (
                ROW0::default().into_output(),
                ROW1::default().into_output(),
                ROW2::default().into_output(),
                ROW3::default().into_output(),
                ROW4::default().into_output(),
            ),
            _cols: (
                COL0::default().into_output(),
                COL1::default().into_output(),
                COL2::default().into_output(),
                COL3::default().into_output(),
                COL4::default().into_output(),
                COL5::default().into_output(),
                COL6::default().into_output(),
            ),
        }
    }

    /// Drive exactly one row-select line high.
    fn select_row(&mut self, row: u8) {
        unsafe {
            (*PORTC::ptr())
                .portc
                .modify(|r, w| w.bits((r.bits() & !ROW_MASK) | (1 << row)));
        }
    }

    /// Present one row's column pattern. The column lines are active low,
    /// so the mask is inverted on the way out.
    fn drive_columns(&mut self, bits: u8) {
        unsafe {
            (*PORTB::ptr())
                .portb
                .modify(|r, w| w.bits((r.bits() & !COLUMN_MASK) | (!bits & COLUMN_MASK)));
        }
    }

    /// One visible frame: `FRAME_REPEATS` top-to-bottom scans with a fixed
    /// dwell per row. This call is what paces the game tick.
    pub fn render(&mut self, board: &Board) {
        for _ in 0..FRAME_REPEATS {
            for row in 0..GRID_HEIGHT {
                self.select_row(row as u8);
                self.drive_columns(board.row_bits(row));
                delay_ms(ROW_DWELL_MS);
            }
        }
    }
}

impl Default for MatrixDisplay {
    fn default() -> Self {
        Self::new()
    }
}
