//! Evolutionary search over Game of Life seed patterns.
//!
//! # Overview
//!
//! - **Individual** (`individual`): a seed genome placed on a larger board,
//!   simulated until its state repeats and scored along the way
//! - **Mutation** (`mutation`): rebuilds a seed from a better-scoring donor
//! - **Search** (`search`): the generation loop that evaluates the whole
//!   population on a worker pool, keeps the top fraction and breeds the rest
//!
//! # Example
//!
//! ```rust,no_run
//! use life_breeder::schema::EvolutionConfig;
//! use life_breeder::compute::evolution::EvolutionEngine;
//!
//! let config = EvolutionConfig::default();
//! let mut engine = EvolutionEngine::new(config).unwrap();
//! let result = engine
//!     .run_with_callback(|stats, _| {
//!         println!("Generation {}: best score = {:.3}", stats.generation, stats.best_score);
//!     })
//!     .unwrap();
//!
//! println!("Best score: {:.3}", result.best_score);
//! ```
//!
//! # Scoring
//!
//! A run starts at `-cost_per_seed_cell * seeded_cells`. Every simulate call
//! then adds `reward_per_step_call` once and
//! `reward_per_alive_cell_per_step * live_cells`. Long-lived, busy seeds that
//! start small score best.

mod individual;
mod mutation;
mod search;

pub use individual::{Individual, SimulationOutcome, StopCondition};
pub use mutation::{BIG_MUTATION_FACTOR, MutationKind, RELOCATE_ATTEMPTS, mutate_seed};
pub use search::{EvolutionEngine, EvolutionError, FALLBACK_THREADS};
