//! Game-state engine: board, snake tracker, movement rules.
//!
//! No peripheral access anywhere in this module tree; the firmware layers
//! pass a direction in and read the board out.

pub mod board;
pub mod direction;
pub mod engine;
pub mod snake;

pub use board::{Board, Cell};
pub use direction::Direction;
pub use engine::{Game, TickOutcome, SNAKE_START};
pub use snake::{Coord, SnakeTracker};
