//! Quick evolution performance test

use life_breeder::{
    EvolutionConfig, EvolutionEngine,
    schema::{BoardConfig, EvaluationConfig, PopulationConfig},
};
use std::time::Instant;

fn main() {
    println!("=== Evolution Performance Test ===\n");

    // Test different board sizes
    for board_size in [20, 40, 80] {
        println!("Board size: {}x{}", board_size, board_size);

        let config = EvolutionConfig {
            board: BoardConfig {
                width: board_size,
                height: board_size,
                ..Default::default()
            },
            population: PopulationConfig {
                size: 100,
                generations: 10,
                ..Default::default()
            },
            evaluation: EvaluationConfig {
                max_steps: Some(10_000),
                ..Default::default()
            },
            random_seed: Some(42),
            ..Default::default()
        };

        let start = Instant::now();
        let mut engine = EvolutionEngine::new(config).expect("valid config");
        let result = engine.run().expect("evolution run");
        let elapsed = start.elapsed();

        let total_steps: usize = result.history.iter().map(|s| s.total_steps).sum();
        let steps_per_sec = total_steps as f64 / elapsed.as_secs_f64();

        println!("  Generations:    {}", result.history.len());
        println!("  Total steps:    {}", total_steps);
        println!("  Elapsed:        {:.2}s", elapsed.as_secs_f64());
        println!("  Steps/sec:      {:.1}", steps_per_sec);
        println!("  Best score:     {:.4}", result.best_score);
        println!();
    }

    println!("=== Scalability Test (fixed 40x40 board) ===\n");

    // Test different worker counts
    for threads in [1, 2, 4, 8] {
        let config = EvolutionConfig {
            population: PopulationConfig {
                size: 200,
                generations: 5,
                ..Default::default()
            },
            evaluation: EvaluationConfig {
                max_steps: Some(10_000),
                threads: Some(threads),
                ..Default::default()
            },
            random_seed: Some(42),
            ..Default::default()
        };

        let start = Instant::now();
        let mut engine = EvolutionEngine::new(config).expect("valid config");
        let result = engine.run().expect("evolution run");
        let elapsed = start.elapsed();

        let total_steps: usize = result.history.iter().map(|s| s.total_steps).sum();

        println!(
            "Threads {}: {} steps in {:.2}s ({:.1} steps/sec)",
            threads,
            total_steps,
            elapsed.as_secs_f64(),
            total_steps as f64 / elapsed.as_secs_f64()
        );
    }
}
