//! Life Breeder CLI - Evolve Game of Life seeds from a JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use life_breeder::{EvolutionConfig, EvolutionEngine, GenerationStats};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.get(1).is_some_and(|a| a == "--example") {
        print_example_config();
        return;
    }
    if args.get(1).is_some_and(|a| a == "--help" || a == "-h") {
        eprintln!("Usage: {} [config.json]", args[0]);
        eprintln!();
        eprintln!("Evolve Game of Life seed patterns.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to evolution configuration (default: built-in)");
        eprintln!();
        eprintln!("Print the default configuration with --example.");
        std::process::exit(1);
    }

    // Load configuration
    let config = match args.get(1) {
        Some(path) => EvolutionConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }),
        None => EvolutionConfig::default(),
    };

    println!("Life Breeder");
    println!("============");
    println!(
        "Board: {}x{} (seed {}x{}, wrap: {})",
        config.board.width,
        config.board.height,
        config.board.seed_width,
        config.board.seed_height,
        config.board.wrap_edges
    );
    println!(
        "Population: {} ({} survivors), generations: {}",
        config.population.size,
        config.population.survivor_count(),
        config.population.generations
    );
    println!();

    let generations = config.population.generations;
    let mut engine = EvolutionEngine::new(config).unwrap_or_else(|e| {
        eprintln!("Error creating engine: {}", e);
        std::process::exit(1);
    });

    let mut previous = GenerationStats::default();
    let result = engine.run_with_callback(|stats, engine| {
        println!("{}", "-".repeat(96));
        println!("Generation {}/{}", stats.generation + 1, generations);
        let offset = engine.survivor_offset();
        for (i, survivor) in engine.survivors().iter().enumerate() {
            println!(
                "Survivor {} (individual {}, score {:.3}):",
                offset + i,
                survivor.id,
                survivor.score()
            );
            print!("{}", survivor.seed());
        }
        println!(
            "Average score:          {:.3} (prev.: {:.3})",
            stats.average_score, previous.average_score
        );
        println!(
            "Survivor average score: {:.3} (prev.: {:.3})",
            stats.survivor_average_score, previous.survivor_average_score
        );
        if stats.step_limited > 0 {
            println!("Runs hitting the step ceiling: {}", stats.step_limited);
        }
        previous = stats.clone();
    });

    let result = result.unwrap_or_else(|e| {
        eprintln!("Evolution failed: {}", e);
        std::process::exit(1);
    });

    println!();
    println!("Final best score: {:.3}", result.best_score);
    println!(
        "Time: {:.2}s ({:.2} generations/s)",
        result.elapsed_seconds,
        result.history.len() as f64 / result.elapsed_seconds.max(1e-9)
    );
}

fn print_example_config() {
    let config = EvolutionConfig::default();
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing config: {}", e),
    }
}
