//! Configuration types for the board and the scoring formula.

use serde::{Deserialize, Serialize};

/// Board and seed geometry shared by every individual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Simulation board width in cells.
    #[serde(default = "default_board_size")]
    pub width: usize,
    /// Simulation board height in cells.
    #[serde(default = "default_board_size")]
    pub height: usize,
    /// Seed (genome) width in cells.
    #[serde(default = "default_seed_size")]
    pub seed_width: usize,
    /// Seed (genome) height in cells.
    #[serde(default = "default_seed_size")]
    pub seed_height: usize,
    /// Toroidal neighbor lookup. With wrapping, escaping gliders may never
    /// settle into a cycle visible to the history window.
    #[serde(default)]
    pub wrap_edges: bool,
    /// Top-left placement of the seed on the board. Centered when unset.
    #[serde(default)]
    pub seed_offset: Option<(usize, usize)>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: default_board_size(),
            height: default_board_size(),
            seed_width: default_seed_size(),
            seed_height: default_seed_size(),
            wrap_edges: false,
            seed_offset: None,
        }
    }
}

fn default_board_size() -> usize {
    40
}
fn default_seed_size() -> usize {
    8
}

impl BoardConfig {
    /// Seed placement, defaulting to the board center.
    pub fn offset(&self) -> (usize, usize) {
        self.seed_offset.unwrap_or((
            self.width.saturating_sub(self.seed_width) / 2,
            self.height.saturating_sub(self.seed_height) / 2,
        ))
    }

    /// Validate geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidBoardDimensions);
        }
        if self.seed_width == 0 || self.seed_height == 0 {
            return Err(ConfigError::InvalidSeedDimensions);
        }
        if self.seed_width > self.width || self.seed_height > self.height {
            return Err(ConfigError::SeedTooLarge {
                seed: (self.seed_width, self.seed_height),
                board: (self.width, self.height),
            });
        }
        let (x, y) = self.offset();
        if x > self.width - self.seed_width || y > self.height - self.seed_height {
            return Err(ConfigError::OffsetOutOfRange { x, y });
        }
        Ok(())
    }
}

/// Coefficients of the score formula.
///
/// `score = -cost_per_seed_cell * seeded_cells
///          + Σ_calls (reward_per_step_call + reward_per_alive_cell_per_step * live_cells)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// One-time penalty per live cell after placing the seed.
    #[serde(default = "default_cost_per_seed_cell")]
    pub cost_per_seed_cell: f64,
    /// Added once per `simulate_steps` call, whatever its step count.
    #[serde(default = "default_reward_per_step_call")]
    pub reward_per_step_call: f64,
    /// Multiplied by the live count after each `simulate_steps` call.
    #[serde(default = "default_reward_per_alive_cell")]
    pub reward_per_alive_cell_per_step: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            cost_per_seed_cell: default_cost_per_seed_cell(),
            reward_per_step_call: default_reward_per_step_call(),
            reward_per_alive_cell_per_step: default_reward_per_alive_cell(),
        }
    }
}

fn default_cost_per_seed_cell() -> f64 {
    3.0
}
fn default_reward_per_step_call() -> f64 {
    1.0
}
fn default_reward_per_alive_cell() -> f64 {
    0.1
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let all_finite = [
            self.cost_per_seed_cell,
            self.reward_per_step_call,
            self.reward_per_alive_cell_per_step,
        ]
        .iter()
        .all(|c| c.is_finite());
        if !all_finite {
            return Err(ConfigError::NonFiniteCoefficient);
        }
        Ok(())
    }
}

/// Board and scoring validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Board dimensions must be non-zero")]
    InvalidBoardDimensions,
    #[error("Seed dimensions must be non-zero")]
    InvalidSeedDimensions,
    #[error(
        "Seed {}x{} is larger than board {}x{}",
        .seed.0,
        .seed.1,
        .board.0,
        .board.1
    )]
    SeedTooLarge {
        seed: (usize, usize),
        board: (usize, usize),
    },
    #[error("Seed offset ({x}, {y}) pushes the seed past the board edge")]
    OffsetOutOfRange { x: usize, y: usize },
    #[error("Scoring coefficients must be finite")]
    NonFiniteCoefficient,
}
