use crate::config::{GRID_HEIGHT, GRID_WIDTH, MAX_SNAKE_LEN};

use super::direction::Direction;

/// A grid position, row 0 at the top, column 0 at the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// The neighbouring position one step in `dir`, or `None` if that step
    /// leaves the grid. Bounds are decided here, before anyone reads the
    /// destination cell.
    pub fn step(self, dir: Direction) -> Option<Coord> {
        match dir {
            Direction::Up => self.row.checked_sub(1).map(|row| Coord { row, ..self }),
            Direction::Down => {
                let row = self.row + 1;
                (row < GRID_HEIGHT as u8).then(|| Coord { row, ..self })
            }
            Direction::Left => self.col.checked_sub(1).map(|col| Coord { col, ..self }),
            Direction::Right => {
                let col = self.col + 1;
                (col < GRID_WIDTH as u8).then(|| Coord { col, ..self })
            }
        }
    }
}

/// Snake body segments, head first, in a fixed array. The snake can never
/// outgrow the grid, so 35 slots always suffice and nothing allocates.
#[derive(Clone)]
pub struct SnakeTracker {
    segments: [Coord; MAX_SNAKE_LEN],
    len: usize,
}

impl SnakeTracker {
    pub fn new(head: Coord) -> Self {
        Self {
            segments: [head; MAX_SNAKE_LEN],
            len: 1,
        }
    }

    pub fn head(&self) -> Coord {
        self.segments[0]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn get(&self, index: usize) -> Coord {
        self.segments[index]
    }

    pub(crate) fn set(&mut self, index: usize, at: Coord) {
        self.segments[index] = at;
    }

    /// Grow by one segment at the tail end.
    pub(crate) fn push_tail(&mut self, at: Coord) {
        self.segments[self.len] = at;
        self.len += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_stops_at_every_edge() {
        assert_eq!(Coord::new(0, 3).step(Direction::Up), None);
        assert_eq!(Coord::new(4, 3).step(Direction::Down), None);
        assert_eq!(Coord::new(2, 0).step(Direction::Left), None);
        assert_eq!(Coord::new(2, 6).step(Direction::Right), None);
    }

    #[test]
    fn step_moves_one_cell_inside_the_grid() {
        let at = Coord::new(2, 3);
        assert_eq!(at.step(Direction::Up), Some(Coord::new(1, 3)));
        assert_eq!(at.step(Direction::Down), Some(Coord::new(3, 3)));
        assert_eq!(at.step(Direction::Left), Some(Coord::new(2, 2)));
        assert_eq!(at.step(Direction::Right), Some(Coord::new(2, 4)));
    }

    #[test]
    fn push_tail_appends_and_keeps_head() {
        let mut tracker = SnakeTracker::new(Coord::new(2, 1));
        tracker.push_tail(Coord::new(2, 0));
        assert_eq!(tracker.len(), 2);
        assert_eq!(tracker.head(), Coord::new(2, 1));
        assert_eq!(tracker.get(1), Coord::new(2, 0));
    }

    #[test]
    fn indexed_overwrite_reaches_any_segment() {
        let mut tracker = SnakeTracker::new(Coord::new(1, 1));
        tracker.push_tail(Coord::new(1, 2));
        tracker.set(1, Coord::new(0, 2));
        assert_eq!(tracker.get(1), Coord::new(0, 2));
        assert_eq!(tracker.len(), 2);
    }
}
