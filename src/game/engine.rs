use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::{GRID_HEIGHT, GRID_WIDTH};

use super::board::{Board, Cell};
use super::direction::Direction;
use super::snake::{Coord, SnakeTracker};

/// Where the single starting segment goes after every reset.
pub const SNAKE_START: Coord = Coord::new(2, 1);

/// What a call to [`Game::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Head advanced one cell, tail followed.
    Moved,
    /// Head advanced onto the apple; the snake grew and a new apple spawned.
    Ate,
    /// The move would have left the grid or hit the body; the game restarted.
    Reset,
}

/// The rules engine. Owns the board, the tracker and the RNG; the display
/// only ever sees `&Board`.
pub struct Game {
    board: Board,
    snake: SnakeTracker,
    rng: SmallRng,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        let mut game = Self {
            board: Board::new(),
            snake: SnakeTracker::new(SNAKE_START),
            rng: SmallRng::seed_from_u64(seed),
        };
        game.reset();
        game
    }

    /// Restart: size 1 at the start position, fresh apple.
    pub fn reset(&mut self) {
        self.board.clear();
        self.snake = SnakeTracker::new(SNAKE_START);
        self.board.set(SNAKE_START, Cell::Body);
        self.spawn_apple();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn head(&self) -> Coord {
        self.snake.head()
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    /// True iff the cell one step ahead of the head holds the apple. At a
    /// grid edge there is no such cell and the answer is no.
    pub fn will_eat(&self, dir: Direction) -> bool {
        matches!(
            self.snake.head().step(dir),
            Some(dest) if self.board.get(dest) == Cell::Apple
        )
    }

    /// True iff moving one step in `dir` leaves the grid or lands on the
    /// body, i.e. the next tick with this direction restarts the game.
    pub fn will_collide(&self, dir: Direction) -> bool {
        match self.snake.head().step(dir) {
            Some(dest) => self.board.get(dest) == Cell::Body,
            None => true,
        }
    }

    /// One game step in `dir`: the whole body advances one cell, growing by
    /// one if the head reaches the apple; a colliding move restarts instead.
    pub fn tick(&mut self, dir: Direction) -> TickOutcome {
        let eats = self.will_eat(dir);
        let new_head = match self.snake.head().step(dir) {
            Some(dest) if self.board.get(dest) != Cell::Body => dest,
            _ => {
                self.reset();
                return TickOutcome::Reset;
            }
        };

        // Move the head, then drag the body: each segment takes the cell its
        // predecessor vacated, threading one carried coordinate through the
        // tracker. The vacated cell is cleared immediately so a size-1 snake
        // leaves nothing behind.
        let mut carried = self.snake.head();
        self.board.set(carried, Cell::Empty);
        self.snake.set(0, new_head);
        self.board.set(new_head, Cell::Body);

        for index in 1..self.snake.len() {
            self.board.set(carried, Cell::Body);
            let vacated = self.snake.get(index);
            self.snake.set(index, carried);
            carried = vacated;
            self.board.set(carried, Cell::Empty);
        }

        if eats {
            // The new tail re-occupies the cell the drag just vacated.
            self.board.set(carried, Cell::Body);
            self.snake.push_tail(carried);
            self.spawn_apple();
            TickOutcome::Ate
        } else {
            TickOutcome::Moved
        }
    }

    /// Rejection sampling: draw uniform cells until one is not covered by
    /// the body. The snake is always shorter than the grid when this runs,
    /// so a free cell exists.
    fn spawn_apple(&mut self) {
        loop {
            let at = Coord::new(
                self.rng.gen_range(0..GRID_HEIGHT as u8),
                self.rng.gen_range(0..GRID_WIDTH as u8),
            );
            if self.board.get(at) != Cell::Body {
                self.board.set(at, Cell::Apple);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: u64 = 0x5eed;

    fn cell_counts(game: &Game) -> (usize, usize) {
        let mut body = 0;
        let mut apples = 0;
        for row in 0..GRID_HEIGHT as u8 {
            for col in 0..GRID_WIDTH as u8 {
                match game.board.get(Coord::new(row, col)) {
                    Cell::Body => body += 1,
                    Cell::Apple => apples += 1,
                    Cell::Empty => {}
                }
            }
        }
        (body, apples)
    }

    fn apple_pos(game: &Game) -> Coord {
        for row in 0..GRID_HEIGHT as u8 {
            for col in 0..GRID_WIDTH as u8 {
                let at = Coord::new(row, col);
                if game.board.get(at) == Cell::Apple {
                    return at;
                }
            }
        }
        panic!("no apple on the board");
    }

    fn move_apple(game: &mut Game, to: Coord) {
        let old = apple_pos(game);
        game.board.set(old, Cell::Empty);
        game.board.set(to, Cell::Apple);
    }

    /// A game with an explicit body layout, head first, apple respawned.
    fn game_with_body(segments: &[Coord]) -> Game {
        let mut game = Game::new(SEED);
        game.board.clear();
        game.snake = SnakeTracker::new(segments[0]);
        game.board.set(segments[0], Cell::Body);
        for &seg in &segments[1..] {
            game.snake.push_tail(seg);
            game.board.set(seg, Cell::Body);
        }
        game.spawn_apple();
        game
    }

    fn assert_reset_state(game: &Game) {
        assert_eq!(game.snake_len(), 1);
        assert_eq!(game.head(), SNAKE_START);
        assert_eq!(game.board.get(SNAKE_START), Cell::Body);
        let (body, apples) = cell_counts(game);
        assert_eq!(body, 1);
        assert_eq!(apples, 1);
        assert_ne!(apple_pos(game), SNAKE_START);
    }

    #[test]
    fn new_game_is_in_reset_state() {
        for seed in 0..32 {
            let game = Game::new(seed);
            assert_reset_state(&game);
        }
    }

    #[test]
    fn tick_advances_head_one_cell() {
        let mut game = Game::new(SEED);
        move_apple(&mut game, Coord::new(4, 6));
        assert_eq!(game.tick(Direction::Right), TickOutcome::Moved);
        assert_eq!(game.head(), Coord::new(2, 2));
        assert_eq!(game.board.get(SNAKE_START), Cell::Empty);
        assert_eq!(game.snake_len(), 1);
    }

    #[test]
    fn eating_grows_by_one_and_respawns_apple() {
        let mut game = Game::new(SEED);
        move_apple(&mut game, Coord::new(2, 2));
        assert!(game.will_eat(Direction::Right));
        assert!(!game.will_collide(Direction::Right));

        assert_eq!(game.tick(Direction::Right), TickOutcome::Ate);
        assert_eq!(game.snake_len(), 2);
        assert_eq!(game.head(), Coord::new(2, 2));
        // The old head cell is now the tail.
        assert_eq!(game.snake.get(1), SNAKE_START);
        assert_eq!(game.board.get(SNAKE_START), Cell::Body);

        let (body, apples) = cell_counts(&game);
        assert_eq!(body, 2);
        assert_eq!(apples, 1);
        let apple = apple_pos(&game);
        assert_ne!(apple, Coord::new(2, 2));
        assert_ne!(apple, SNAKE_START);
    }

    #[test]
    fn wall_hit_resets_to_start_state() {
        let mut game = game_with_body(&[Coord::new(0, 3)]);
        assert!(game.will_collide(Direction::Up));
        assert!(!game.will_eat(Direction::Up));
        assert_eq!(game.tick(Direction::Up), TickOutcome::Reset);
        assert_reset_state(&game);
    }

    #[test]
    fn every_edge_is_a_wall() {
        let cases = [
            (Coord::new(0, 3), Direction::Up),
            (Coord::new(4, 3), Direction::Down),
            (Coord::new(2, 0), Direction::Left),
            (Coord::new(2, 6), Direction::Right),
        ];
        for (head, dir) in cases {
            let game = game_with_body(&[head]);
            assert!(game.will_collide(dir), "{:?} {:?}", head, dir);
            assert!(!game.will_eat(dir), "{:?} {:?}", head, dir);
        }
    }

    #[test]
    fn reversal_into_neck_resets() {
        // Heading right with the neck directly behind: turning left is an
        // immediate body collision. There is no reversal guard.
        let mut game = game_with_body(&[Coord::new(2, 2), Coord::new(2, 1)]);
        assert!(game.will_collide(Direction::Left));
        assert_eq!(game.tick(Direction::Left), TickOutcome::Reset);
        assert_reset_state(&game);
    }

    #[test]
    fn body_drag_follows_the_head() {
        let mut game = game_with_body(&[
            Coord::new(2, 3),
            Coord::new(2, 2),
            Coord::new(2, 1),
        ]);
        move_apple(&mut game, Coord::new(4, 6));

        assert_eq!(game.tick(Direction::Right), TickOutcome::Moved);
        assert_eq!(game.snake.get(0), Coord::new(2, 4));
        assert_eq!(game.snake.get(1), Coord::new(2, 3));
        assert_eq!(game.snake.get(2), Coord::new(2, 2));
        assert_eq!(game.board.get(Coord::new(2, 1)), Cell::Empty);
        let (body, apples) = cell_counts(&game);
        assert_eq!(body, 3);
        assert_eq!(apples, 1);
    }

    #[test]
    fn tick_resets_exactly_when_will_collide() {
        let layout = [Coord::new(2, 2), Coord::new(2, 1)];
        let dirs = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];
        for dir in dirs {
            let mut game = game_with_body(&layout);
            move_apple(&mut game, Coord::new(0, 6));
            let predicted = game.will_collide(dir);
            let outcome = game.tick(dir);
            assert_eq!(predicted, outcome == TickOutcome::Reset, "{:?}", dir);
        }
    }

    #[test]
    fn closed_loop_walk_preserves_invariants() {
        let mut game = game_with_body(&[Coord::new(2, 2), Coord::new(2, 1)]);
        move_apple(&mut game, Coord::new(0, 6));
        // A 2x2 loop: (2,2) -> (3,2) -> (3,1) -> (2,1) -> (2,2) -> ...
        let path = [
            Direction::Down,
            Direction::Left,
            Direction::Up,
            Direction::Right,
        ];
        for lap in 0..10 {
            for dir in path {
                assert_eq!(game.tick(dir), TickOutcome::Moved, "lap {}", lap);
                let (body, apples) = cell_counts(&game);
                assert_eq!(body, game.snake_len());
                assert_eq!(apples, 1);
                for index in 1..game.snake.len() {
                    let a = game.snake.get(index - 1);
                    let b = game.snake.get(index);
                    let dr = (a.row as i8 - b.row as i8).abs();
                    let dc = (a.col as i8 - b.col as i8).abs();
                    assert_eq!(dr + dc, 1, "segments must stay grid-adjacent");
                }
            }
        }
    }

    #[test]
    fn feeding_along_a_serpentine_grows_every_tick() {
        let mut game = Game::new(SEED);
        let path = [
            Direction::Right,
            Direction::Right,
            Direction::Right,
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Left,
            Direction::Left,
            Direction::Left,
            Direction::Left,
        ];
        for (step, dir) in path.into_iter().enumerate() {
            let dest = game.head().step(dir).unwrap();
            move_apple(&mut game, dest);
            assert_eq!(game.tick(dir), TickOutcome::Ate, "step {}", step);
            assert_eq!(game.snake_len(), step + 2);
            let (body, apples) = cell_counts(&game);
            assert_eq!(body, game.snake_len());
            assert_eq!(apples, 1);
        }
        assert_eq!(game.snake_len(), 12);
    }
}
