//! Generation loop: parallel evaluation, selection and breeding.

use std::num::NonZeroUsize;
use std::time::Instant;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::compute::LifeError;
use crate::schema::{
    EvolutionConfig, EvolutionConfigError, EvolutionResult, GenerationStats, MutationTally,
};

use super::individual::{Individual, SimulationOutcome, StopCondition};
use super::mutation::MutationKind;

/// Worker count used when the available parallelism cannot be queried.
pub const FALLBACK_THREADS: usize = 4;

/// Errors that abort a breeding run.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] EvolutionConfigError),
    #[error("Simulation failed: {0}")]
    Simulation(#[from] LifeError),
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Runs the evolutionary search over a fixed-size population.
pub struct EvolutionEngine {
    config: EvolutionConfig,
    pool: rayon::ThreadPool,
    population: Vec<Individual>,
    generation: usize,
}

impl EvolutionEngine {
    /// Validate `config`, start the worker pool and create a population of
    /// randomly filled seeds.
    pub fn new(config: EvolutionConfig) -> Result<Self, EvolutionError> {
        config.validate()?;

        let threads = config.evaluation.threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(FALLBACK_THREADS)
        });
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("life-worker-{i}"))
            .build()?;

        let master_seed = config.random_seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(master_seed);

        let board = &config.board;
        let population = (0..config.population.size)
            .map(|id| {
                let mut individual = Individual::seeded(
                    board.width,
                    board.height,
                    board.seed_width,
                    board.seed_height,
                    board.wrap_edges,
                    rng.r#gen(),
                )?
                .with_id(id as u64);
                individual.random_fill_seed(config.population.initial_fill_percent);
                Ok(individual)
            })
            .collect::<Result<Vec<_>, LifeError>>()?;

        info!(
            "Population of {} on {}x{} board ({} threads, seed {})",
            population.len(),
            board.width,
            board.height,
            threads,
            master_seed
        );

        Ok(Self {
            config,
            pool,
            population,
            generation: 0,
        })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Current population. Sorted ascending by score after each generation.
    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// Generations completed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Index of the first survivor in the sorted population.
    pub fn survivor_offset(&self) -> usize {
        self.population.len() - self.config.population.survivor_count()
    }

    /// The survivors (top fraction) of the last sorted generation.
    pub fn survivors(&self) -> &[Individual] {
        &self.population[self.survivor_offset()..]
    }

    /// Simulate every individual on the worker pool and wait for all of them.
    ///
    /// Any task failure fails the whole batch.
    pub fn evaluate(&mut self) -> Result<Vec<SimulationOutcome>, EvolutionError> {
        let Self {
            config,
            pool,
            population,
            ..
        } = self;

        let (offset_x, offset_y) = config.board.offset();
        let scoring = config.scoring;
        let stop = if config.evaluation.stop_on_wall_hit {
            StopCondition::WallHitOrPeriodic
        } else {
            StopCondition::Periodic
        };
        let max_steps = config.evaluation.max_steps;

        let start = Instant::now();
        let outcomes = pool.install(|| {
            population
                .par_iter_mut()
                .map(|individual| {
                    individual.init_run(offset_x, offset_y, scoring)?;
                    Ok(individual.simulate(stop, max_steps))
                })
                .collect::<Result<Vec<_>, LifeError>>()
        })?;

        debug!(
            "Evaluated {} individuals in {:.3}s",
            outcomes.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(outcomes)
    }

    /// Run one generation: evaluate, aggregate, sort, then breed the
    /// non-survivors from the survivors in round-robin order.
    pub fn step_generation(&mut self) -> Result<GenerationStats, EvolutionError> {
        let outcomes = self.evaluate()?;

        self.population
            .sort_by(|a, b| a.score().total_cmp(&b.score()));

        let mut stats = self.aggregate(&outcomes);

        let offset = self.survivor_offset();
        let mutation = &self.config.mutation;
        let (breeders, survivors) = self.population.split_at_mut(offset);
        for (i, individual) in breeders.iter_mut().enumerate() {
            let donor = &survivors[i % survivors.len()];
            match individual.mutate(donor.seed(), mutation)? {
                MutationKind::Complete => stats.mutations.complete += 1,
                MutationKind::Big => stats.mutations.big += 1,
                MutationKind::Normal => stats.mutations.normal += 1,
            }
        }

        info!(
            "Generation {}: avg {:.3}, survivor avg {:.3}, best {:.3} ({} complete / {} big / {} normal mutations)",
            stats.generation,
            stats.average_score,
            stats.survivor_average_score,
            stats.best_score,
            stats.mutations.complete,
            stats.mutations.big,
            stats.mutations.normal
        );

        self.generation += 1;
        Ok(stats)
    }

    /// Score statistics of the sorted population.
    fn aggregate(&self, outcomes: &[SimulationOutcome]) -> GenerationStats {
        let mean = |individuals: &[Individual]| {
            individuals.iter().map(Individual::score).sum::<f64>() / individuals.len() as f64
        };

        let mut stats = GenerationStats {
            generation: self.generation,
            average_score: mean(&self.population),
            survivor_average_score: mean(self.survivors()),
            best_score: self.population.last().map_or(0.0, Individual::score),
            worst_score: self.population.first().map_or(0.0, Individual::score),
            mutations: MutationTally::default(),
            ..Default::default()
        };

        for outcome in outcomes {
            stats.total_steps += outcome.steps();
            match outcome {
                SimulationOutcome::StepLimit { .. } => stats.step_limited += 1,
                SimulationOutcome::WallHit { .. } => stats.wall_hits += 1,
                SimulationOutcome::Periodic { .. } => {}
            }
        }

        stats
    }

    /// Best individual of the last sorted generation.
    pub fn best(&self) -> Option<&Individual> {
        self.population.last()
    }

    /// Run all configured generations, calling `callback` after each one.
    pub fn run_with_callback<F>(&mut self, mut callback: F) -> Result<EvolutionResult, EvolutionError>
    where
        F: FnMut(&GenerationStats, &EvolutionEngine),
    {
        let start_time = Instant::now();
        let mut history = Vec::with_capacity(self.config.population.generations);

        while self.generation < self.config.population.generations {
            let stats = self.step_generation()?;
            callback(&stats, self);
            history.push(stats);
        }

        let (best_score, best_seed) = self
            .best()
            .map(|best| (best.score(), best.seed().to_rows()))
            .unwrap_or_default();

        Ok(EvolutionResult {
            history,
            best_score,
            best_seed,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }

    /// Run evolution (blocking).
    pub fn run(&mut self) -> Result<EvolutionResult, EvolutionError> {
        self.run_with_callback(|_, _| {})
    }
}
