//! Life Breeder - Evolutionary search for Game of Life seed patterns.
//!
//! A population of small seed patterns is placed on a larger Game of Life
//! board, simulated until the board state repeats, scored, and bred through
//! truncation selection and mutation across generations.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration and result types
//! - `compute`: Board, automaton, history and the evolutionary search
//!
//! # Example
//!
//! ```rust
//! use life_breeder::compute::evolution::Individual;
//! use life_breeder::schema::ScoringConfig;
//!
//! // A blinker on a 9x9 board
//! let mut individual = Individual::new(9, 9, 3, 1, false).unwrap();
//! for x in 0..3 {
//!     individual.set_seed_cell(x, 0, true).unwrap();
//! }
//!
//! individual.init_run(3, 4, ScoringConfig::default()).unwrap();
//! let steps = individual.simulate_until_periodic();
//!
//! assert_eq!(steps, 3);
//! println!("{}", individual.automaton().grid());
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::evolution::{EvolutionEngine, Individual, MutationKind};
pub use compute::{Automaton, Grid, History, LifeError};
pub use schema::{EvolutionConfig, GenerationStats};
