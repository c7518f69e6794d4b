//! On-target smoke tests, reported over the serial console.
//!
//! The host unit tests in `game` cover the rules exhaustively; these run on
//! the real chip (see `demos/test_runner.rs`) and go through the public API
//! only.

use ufmt::uwriteln;

use crate::config::{GRID_HEIGHT, GRID_WIDTH};
use crate::drivers::SerialConsole;
use crate::game::{Cell, Coord, Direction, Game, TickOutcome, SNAKE_START};

const SEED: u64 = 7;

pub trait TestCase {
    fn name(&self) -> &'static str;
    fn run(&self) -> TestResult;
}

#[derive(PartialEq)]
pub enum TestResult {
    Pass,
    Fail(&'static str),
}

pub struct TestRunner {
    console: SerialConsole,
    total: u16,
    passed: u16,
}

impl TestRunner {
    pub fn new(console: SerialConsole) -> Self {
        Self {
            console,
            total: 0,
            passed: 0,
        }
    }

    pub fn run_suite(&mut self, name: &str, tests: &[&dyn TestCase]) {
        uwriteln!(self.console, "=== {} ===", name).ok();
        for test in tests {
            self.total += 1;
            match test.run() {
                TestResult::Pass => {
                    self.passed += 1;
                    uwriteln!(self.console, "{}: PASS", test.name()).ok();
                }
                TestResult::Fail(reason) => {
                    uwriteln!(self.console, "{}: FAIL - {}", test.name(), reason).ok();
                }
            }
        }
        uwriteln!(self.console, "{}/{} passed", self.passed, self.total).ok();
    }
}

macro_rules! check {
    ($cond:expr, $msg:expr) => {
        if !$cond {
            return TestResult::Fail($msg);
        }
    };
}

fn counts(game: &Game) -> (usize, usize) {
    let mut body = 0;
    let mut apples = 0;
    for row in 0..GRID_HEIGHT as u8 {
        for col in 0..GRID_WIDTH as u8 {
            match game.board().get(Coord::new(row, col)) {
                Cell::Body => body += 1,
                Cell::Apple => apples += 1,
                Cell::Empty => {}
            }
        }
    }
    (body, apples)
}

fn find_apple(game: &Game) -> Coord {
    for row in 0..GRID_HEIGHT as u8 {
        for col in 0..GRID_WIDTH as u8 {
            let at = Coord::new(row, col);
            if game.board().get(at) == Cell::Apple {
                return at;
            }
        }
    }
    // One apple is always present between ticks.
    SNAKE_START
}

pub struct ResetState;
impl TestCase for ResetState {
    fn name(&self) -> &'static str {
        "reset state"
    }

    fn run(&self) -> TestResult {
        let game = Game::new(SEED);
        check!(game.snake_len() == 1, "size must be 1");
        check!(game.head() == SNAKE_START, "head must start at (2,1)");
        check!(game.board().get(SNAKE_START) == Cell::Body, "head cell lit");
        let (body, apples) = counts(&game);
        check!(body == 1, "exactly one body cell");
        check!(apples == 1, "exactly one apple");
        check!(find_apple(&game) != SNAKE_START, "apple clear of the snake");
        TestResult::Pass
    }
}

pub struct WalkAndEat;
impl TestCase for WalkAndEat {
    fn name(&self) -> &'static str {
        "walk to the apple and eat"
    }

    fn run(&self) -> TestResult {
        let mut game = Game::new(SEED);
        // Steer head-on toward the apple. A size-1 snake cannot hit itself
        // and never reaches a wall while homing on an in-bounds target.
        for _ in 0..(GRID_HEIGHT + GRID_WIDTH) {
            let apple = find_apple(&game);
            let head = game.head();
            let dir = if head.row > apple.row {
                Direction::Up
            } else if head.row < apple.row {
                Direction::Down
            } else if head.col > apple.col {
                Direction::Left
            } else {
                Direction::Right
            };
            if game.will_eat(dir) {
                check!(game.tick(dir) == TickOutcome::Ate, "eating tick");
                check!(game.snake_len() == 2, "size must grow to 2");
                let (body, apples) = counts(&game);
                check!(body == 2, "two body cells");
                check!(apples == 1, "apple respawned");
                return TestResult::Pass;
            }
            check!(game.tick(dir) == TickOutcome::Moved, "approach tick");
        }
        TestResult::Fail("never reached the apple")
    }
}

pub struct WallReset;
impl TestCase for WallReset {
    fn name(&self) -> &'static str {
        "wall collision resets"
    }

    fn run(&self) -> TestResult {
        let mut game = Game::new(SEED);
        // From (2,1) the top wall is at most a few ticks up; eating along
        // the way only grows the snake, it cannot save it.
        for _ in 0..GRID_HEIGHT {
            if game.tick(Direction::Up) == TickOutcome::Reset {
                check!(game.snake_len() == 1, "size back to 1");
                check!(game.head() == SNAKE_START, "head back at start");
                let (body, apples) = counts(&game);
                check!(body == 1, "fresh board");
                check!(apples == 1, "fresh apple");
                return TestResult::Pass;
            }
        }
        TestResult::Fail("never hit the wall")
    }
}

pub struct BijectionSweep;
impl TestCase for BijectionSweep {
    fn name(&self) -> &'static str {
        "body/size bijection"
    }

    fn run(&self) -> TestResult {
        let mut game = Game::new(SEED);
        // March a small square; occupancy must match the tracker after
        // every tick, whatever the tick did.
        let path = [
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Up,
        ];
        for dir in path {
            let _ = game.tick(dir);
            let (body, apples) = counts(&game);
            check!(body == game.snake_len(), "body cells == size");
            check!(apples == 1, "exactly one apple");
        }
        TestResult::Pass
    }
}

/// Run every suite; used by the on-target test runner demo.
pub fn run_all(console: SerialConsole) {
    let mut runner = TestRunner::new(console);
    let cases: [&dyn TestCase; 4] = [&ResetState, &WalkAndEat, &WallReset, &BijectionSweep];
    runner.run_suite("game logic", &cases);
}
