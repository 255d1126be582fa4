//! Compute module - Game of Life board, step rule and evolutionary search.

mod automaton;
mod error;
pub(crate) mod grid;
mod history;

pub mod evolution;

pub use automaton::*;
pub use error::*;
pub use grid::{ALIVE_GLYPH, DEAD_GLYPH, Grid};
pub use history::*;
