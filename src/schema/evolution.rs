//! Evolution configuration and result types for the seed breeding loop.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{BoardConfig, ScoringConfig};

/// Top-level configuration for a breeding run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Board/seed geometry and edge policy.
    #[serde(default)]
    pub board: BoardConfig,
    /// Score formula coefficients, supplied to every run.
    #[serde(default)]
    pub scoring: ScoringConfig,
    /// Mutation probabilities.
    #[serde(default)]
    pub mutation: MutationConfig,
    /// Population size, generation count and selection pressure.
    #[serde(default)]
    pub population: PopulationConfig,
    /// How each individual is simulated.
    #[serde(default)]
    pub evaluation: EvaluationConfig,
    /// Master random seed for reproducible runs.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

/// Population and selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of individuals.
    #[serde(default = "default_population_size")]
    pub size: usize,
    /// Number of generations to run.
    #[serde(default = "default_generations")]
    pub generations: usize,
    /// Top fraction (by count, rounded up) kept unmutated as donors.
    #[serde(default = "default_survivor_fraction")]
    pub survivor_fraction: f64,
    /// Fill percentage for the initial random seeds.
    #[serde(default = "default_fill_percent")]
    pub initial_fill_percent: f32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: default_population_size(),
            generations: default_generations(),
            survivor_fraction: default_survivor_fraction(),
            initial_fill_percent: default_fill_percent(),
        }
    }
}

fn default_population_size() -> usize {
    1000
}
fn default_generations() -> usize {
    500
}
fn default_survivor_fraction() -> f64 {
    0.1
}
fn default_fill_percent() -> f32 {
    30.0
}

impl PopulationConfig {
    /// Number of survivors: `ceil(size * survivor_fraction)`, at least one.
    pub fn survivor_count(&self) -> usize {
        // Absorb representation error so 10 * 0.3 counts as 3, not 4.
        const EPSILON: f64 = 1e-9;
        let raw = (self.size as f64 * self.survivor_fraction - EPSILON).ceil() as usize;
        raw.clamp(1, self.size.max(1))
    }
}

/// Mutation probabilities, all in percent (`0..=100`, clamped).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Chance per cell of flipping the donor's value.
    #[serde(default = "default_change_state")]
    pub change_state: f32,
    /// Chance per live donor cell of moving it to a dead position.
    #[serde(default = "default_relocate")]
    pub relocate: f32,
    /// Chance of escalating the two per-cell rates for one mutation.
    #[serde(default = "default_big_mutation")]
    pub big_mutation: f32,
    /// Chance of discarding the donor and refilling randomly.
    #[serde(default = "default_complete_mutation")]
    pub complete_mutation: f32,
    /// Fill percentage used by complete mutations.
    #[serde(default = "default_fill_percent")]
    pub random_fill_percent: f32,
    /// Ceiling on copy passes that produced no change. Unbounded when unset.
    #[serde(default)]
    pub max_passes: Option<usize>,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            change_state: default_change_state(),
            relocate: default_relocate(),
            big_mutation: default_big_mutation(),
            complete_mutation: default_complete_mutation(),
            random_fill_percent: default_fill_percent(),
            max_passes: None,
        }
    }
}

fn default_change_state() -> f32 {
    5.0
}
fn default_relocate() -> f32 {
    2.0
}
fn default_big_mutation() -> f32 {
    7.0
}
fn default_complete_mutation() -> f32 {
    7.0
}

/// Per-individual simulation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Step ceiling per run. Unbounded when unset, in which case a seed that
    /// never becomes periodic stalls the generation.
    #[serde(default)]
    pub max_steps: Option<usize>,
    /// Also stop as soon as a live cell reaches the board edge.
    #[serde(default)]
    pub stop_on_wall_hit: bool,
    /// Worker threads (None = available parallelism).
    #[serde(default)]
    pub threads: Option<usize>,
}

/// Counts of mutation outcomes in one generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationTally {
    pub complete: usize,
    pub big: usize,
    pub normal: usize,
}

impl MutationTally {
    pub fn total(&self) -> usize {
        self.complete + self.big + self.normal
    }
}

/// Summary of one evaluated generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Zero-based generation index.
    pub generation: usize,
    /// Mean score over the whole population.
    pub average_score: f64,
    /// Mean score over the survivors.
    pub survivor_average_score: f64,
    /// Highest score.
    pub best_score: f64,
    /// Lowest score.
    pub worst_score: f64,
    /// Steps simulated across all individuals.
    pub total_steps: usize,
    /// Runs cut off by the step ceiling.
    pub step_limited: usize,
    /// Runs stopped because a cell touched the board edge.
    pub wall_hits: usize,
    /// Mutations applied while breeding.
    pub mutations: MutationTally,
}

/// Result of a full run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionResult {
    /// Per-generation statistics.
    pub history: Vec<GenerationStats>,
    /// Best score of the final generation.
    pub best_score: f64,
    /// Best seed of the final generation as rows.
    pub best_seed: Vec<Vec<bool>>,
    /// Wall-clock time (in seconds).
    pub elapsed_seconds: f64,
}

// ============================================================================
// Validation
// ============================================================================

/// Evolution configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionConfigError {
    #[error("Population size must be at least 2")]
    PopulationTooSmall,
    #[error("Survivor fraction must be in (0, 1], got {0}")]
    InvalidSurvivorFraction(f64),
    #[error("Thread count must be non-zero")]
    InvalidThreadCount,
    #[error("Step ceiling must be non-zero")]
    InvalidStepLimit,
    #[error("Board config validation failed: {0}")]
    BoardConfigError(#[from] super::ConfigError),
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

impl EvolutionConfig {
    /// Validate evolution configuration.
    pub fn validate(&self) -> Result<(), EvolutionConfigError> {
        self.board.validate()?;
        self.scoring.validate()?;

        if self.population.size < 2 {
            return Err(EvolutionConfigError::PopulationTooSmall);
        }

        let fraction = self.population.survivor_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(EvolutionConfigError::InvalidSurvivorFraction(fraction));
        }

        if self.evaluation.threads == Some(0) {
            return Err(EvolutionConfigError::InvalidThreadCount);
        }
        if self.evaluation.max_steps == Some(0) {
            return Err(EvolutionConfigError::InvalidStepLimit);
        }

        Ok(())
    }

    /// Load and validate a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, EvolutionConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}
