//! A single member of the population: a seed genome plus the board it is
//! simulated on.

use log::warn;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::compute::{Automaton, Grid, History, LifeError};
use crate::schema::{MutationConfig, ScoringConfig};

use super::mutation::{MutationKind, mutate_seed};

/// When an unbounded simulation stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopCondition {
    /// The newest board repeats one still in the history.
    Periodic,
    /// As `Periodic`, or as soon as a live cell sits on the board edge.
    WallHitOrPeriodic,
}

/// How a simulation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationOutcome {
    Periodic { steps: usize, period: usize },
    WallHit { steps: usize },
    StepLimit { steps: usize },
}

impl SimulationOutcome {
    pub fn steps(&self) -> usize {
        match *self {
            Self::Periodic { steps, .. } | Self::WallHit { steps } | Self::StepLimit { steps } => {
                steps
            }
        }
    }
}

/// Seed genome, simulation board, run history and score.
#[derive(Debug, Clone)]
pub struct Individual {
    /// Stable identity across re-sorting.
    pub id: u64,
    automaton: Automaton,
    seed: Grid,
    history: History,
    score: f64,
    scoring: ScoringConfig,
    last_outcome: Option<SimulationOutcome>,
    rng: StdRng,
}

impl Individual {
    /// Create an individual with an empty seed and a randomly seeded generator.
    pub fn new(
        board_width: usize,
        board_height: usize,
        seed_width: usize,
        seed_height: usize,
        wrap_edges: bool,
    ) -> Result<Self, LifeError> {
        Self::seeded(
            board_width,
            board_height,
            seed_width,
            seed_height,
            wrap_edges,
            rand::random(),
        )
    }

    /// As [`Individual::new`], with the private generator seeded from `rng_seed`.
    pub fn seeded(
        board_width: usize,
        board_height: usize,
        seed_width: usize,
        seed_height: usize,
        wrap_edges: bool,
        rng_seed: u64,
    ) -> Result<Self, LifeError> {
        let automaton = Automaton::new(board_width, board_height, wrap_edges)?;
        let seed = Grid::new(seed_width, seed_height)?;
        if seed_width > board_width || seed_height > board_height {
            return Err(LifeError::SeedTooLarge {
                seed_width,
                seed_height,
                board_width,
                board_height,
            });
        }

        Ok(Self {
            id: 0,
            automaton,
            seed,
            history: History::new(),
            score: 0.0,
            scoring: ScoringConfig::default(),
            last_outcome: None,
            rng: StdRng::seed_from_u64(rng_seed),
        })
    }

    /// Set the identity.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    #[inline]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[inline]
    pub fn seed(&self) -> &Grid {
        &self.seed
    }

    #[inline]
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    #[inline]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Outcome of the most recent unbounded or limited simulation.
    pub fn last_outcome(&self) -> Option<SimulationOutcome> {
        self.last_outcome
    }

    pub fn set_seed_cell(&mut self, x: usize, y: usize, state: bool) -> Result<(), LifeError> {
        self.seed.set_cell(x, y, state)
    }

    /// Turn seed cells alive with probability `percent / 100`.
    pub fn random_fill_seed(&mut self, percent: f32) {
        self.seed.random_fill(percent, &mut self.rng);
    }

    pub fn clear_seed(&mut self) {
        self.seed.clear();
    }

    /// Reset the board to the seed placed at `(offset_x, offset_y)` and start
    /// a new score: `-cost_per_seed_cell * seeded_cells`.
    pub fn init_run(
        &mut self,
        offset_x: usize,
        offset_y: usize,
        scoring: ScoringConfig,
    ) -> Result<(), LifeError> {
        let (seed_width, seed_height) = self.seed.dims();
        let (board_width, board_height) = (self.automaton.width(), self.automaton.height());
        // The seed never exceeds the board, so the subtractions cannot underflow.
        if offset_x > board_width - seed_width || offset_y > board_height - seed_height {
            return Err(LifeError::OffsetOutOfRange {
                offset_x,
                offset_y,
                seed_width,
                seed_height,
                board_width,
                board_height,
            });
        }

        self.automaton.clear();
        for (y, row) in self.seed.rows().enumerate() {
            for (x, &alive) in row.iter().enumerate() {
                self.automaton.set_cell(x + offset_x, y + offset_y, alive)?;
            }
        }

        self.score = 0.0;
        self.scoring = scoring;
        self.history.clear();
        self.last_outcome = None;
        self.score -= scoring.cost_per_seed_cell * self.automaton.live_count() as f64;
        Ok(())
    }

    /// Advance `steps` generations and score the call.
    ///
    /// The per-call reward is added once regardless of `steps`; the alive-cell
    /// reward uses the live count after the last step.
    pub fn simulate_steps(&mut self, steps: usize) {
        self.automaton.step(steps);
        self.score += self.scoring.reward_per_step_call;
        self.score +=
            self.scoring.reward_per_alive_cell_per_step * self.automaton.live_count() as f64;
        self.history.push(self.automaton.grid());
    }

    /// Step one generation at a time until the board repeats a snapshot still
    /// in the history. Returns the number of steps taken.
    ///
    /// Has no upper bound: a pattern that neither dies nor cycles within the
    /// history window (for example a glider on a torus) never returns.
    pub fn simulate_until_periodic(&mut self) -> usize {
        self.simulate(StopCondition::Periodic, None).steps()
    }

    /// As `simulate_until_periodic`, but also stops the first time a live
    /// cell occupies a boundary row or column.
    pub fn simulate_until_wall_hit_or_periodic(&mut self) -> usize {
        self.simulate(StopCondition::WallHitOrPeriodic, None).steps()
    }

    /// Step until `stop` is met or `max_steps` steps have been taken.
    pub fn simulate(&mut self, stop: StopCondition, max_steps: Option<usize>) -> SimulationOutcome {
        let mut steps = 0usize;

        let outcome = loop {
            if stop == StopCondition::WallHitOrPeriodic && self.automaton.grid().touches_border() {
                break SimulationOutcome::WallHit { steps };
            }
            if let Some(period) = self.history.period() {
                break SimulationOutcome::Periodic { steps, period };
            }
            if max_steps.is_some_and(|max| steps >= max) {
                warn!(
                    "Individual {} did not converge within {} steps",
                    self.id, steps
                );
                break SimulationOutcome::StepLimit { steps };
            }

            self.simulate_steps(1);
            steps += 1;
        };

        self.last_outcome = Some(outcome);
        outcome
    }

    /// Replace the seed with a mutated copy of `donor_seed`, drawing from this
    /// individual's generator.
    pub fn mutate(
        &mut self,
        donor_seed: &Grid,
        params: &MutationConfig,
    ) -> Result<MutationKind, LifeError> {
        mutate_seed(&mut self.seed, donor_seed, params, &mut self.rng)
    }
}
