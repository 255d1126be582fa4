//! Error taxonomy for boards, automata and individuals.

/// Errors raised by grid, automaton and individual operations.
///
/// Every variant is raised at the point of violation; nothing in the core
/// retries or clamps.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifeError {
    #[error("Board dimensions must be at least 1x1 (got {width}x{height})")]
    InvalidSize { width: usize, height: usize },
    #[error(
        "Seed {seed_width}x{seed_height} does not fit on board {board_width}x{board_height}"
    )]
    SeedTooLarge {
        seed_width: usize,
        seed_height: usize,
        board_width: usize,
        board_height: usize,
    },
    #[error("Cell ({x}, {y}) is outside the {width}x{height} board")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error(
        "Expected a {}x{} board, got {}x{}",
        .expected.0,
        .expected.1,
        .found.0,
        .found.1
    )]
    SizeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("Row {row} has {found} cells, expected {expected}")]
    NotRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error(
        "Seed offset ({offset_x}, {offset_y}) places a {seed_width}x{seed_height} seed outside the {board_width}x{board_height} board"
    )]
    OffsetOutOfRange {
        offset_x: usize,
        offset_y: usize,
        seed_width: usize,
        seed_height: usize,
        board_width: usize,
        board_height: usize,
    },
}
