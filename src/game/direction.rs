/// Travel direction of the snake, one variant per push-button.
///
/// Deliberately exhaustive: every consumer matches all four variants, so
/// there is no "unknown direction" fallback anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}
