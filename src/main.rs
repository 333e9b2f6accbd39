//! Tire Evolve CLI - Run one generational step over a pipeline cycle directory.

use std::path::PathBuf;
use std::process;

use tire_evolve::{
    compute::evolution::{ChromosomeRng, CycleStore, run_generation},
    schema::EvolutionConfig,
};

struct Args {
    cycle_dir: PathBuf,
    config: Option<PathBuf>,
    seed: Option<u64>,
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <cycle_dir> [--config <file>] [--seed <u64>]", program);
    eprintln!();
    eprintln!("Breed the next tire population from the ranked simulation results.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  cycle_dir        Directory holding chromosomes.json, fitness_results.json");
    eprintln!("                   and current_generation.json");
    eprintln!("  --config <file>  Evolution configuration (JSON)");
    eprintln!("  --seed <u64>     Random seed, overrides the configured seed");
    eprintln!();
    eprintln!("Example configuration is printed with --example.");
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut cycle_dir = None;
    let mut config = None;
    let mut seed = None;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter.next().ok_or("--config requires a file path")?;
                config = Some(PathBuf::from(value));
            }
            "--seed" => {
                let value = iter.next().ok_or("--seed requires a value")?;
                let parsed = value
                    .parse()
                    .map_err(|e| format!("Invalid seed {:?}: {}", value, e))?;
                seed = Some(parsed);
            }
            other if other.starts_with("--") => {
                return Err(format!("Unknown option {}", other));
            }
            other => {
                if cycle_dir.replace(PathBuf::from(other)).is_some() {
                    return Err("Only one cycle directory may be given".to_string());
                }
            }
        }
    }

    Ok(Args {
        cycle_dir: cycle_dir.ok_or("Missing cycle directory")?,
        config,
        seed,
    })
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("tire-evolve");

    if args.get(1).is_some_and(|a| a == "--example") {
        print_example_config();
        return;
    }

    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage(program);
            process::exit(1);
        }
    };

    let config = match &args.config {
        Some(path) => EvolutionConfig::load(path).unwrap_or_else(|e| {
            log::error!("{}", e);
            process::exit(1);
        }),
        None => EvolutionConfig::default(),
    };

    let mut rng = match args.seed.or(config.random_seed) {
        Some(seed) => {
            log::info!("Using random seed {}", seed);
            ChromosomeRng::new(seed)
        }
        None => ChromosomeRng::random(),
    };

    let store = CycleStore::with_paths(&args.cycle_dir, config.artifacts.clone());

    match run_generation(&store, &config, &mut rng) {
        Ok(outcome) => {
            println!(
                "Generation {} complete: {} offspring bred from env {} and env {}",
                outcome.generation.generation,
                outcome.population.len(),
                outcome.parents.first.env_id,
                outcome.parents.second.env_id
            );
        }
        Err(e) => {
            log::error!("Generational step failed: {}", e);
            process::exit(1);
        }
    }
}

fn print_example_config() {
    let config = EvolutionConfig::default();

    println!("Example configuration (evolution.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing config: {}", e);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_full_arguments() {
        let args = parse_args(&argv(&[
            "tire-evolve",
            "cycle_updates",
            "--seed",
            "42",
            "--config",
            "evolution.json",
        ]))
        .unwrap();
        assert_eq!(args.cycle_dir, PathBuf::from("cycle_updates"));
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.config, Some(PathBuf::from("evolution.json")));
    }

    #[test]
    fn test_parse_requires_cycle_dir() {
        assert!(parse_args(&argv(&["tire-evolve", "--seed", "1"])).is_err());
    }

    #[test]
    fn test_parse_rejects_bad_seed() {
        assert!(parse_args(&argv(&["tire-evolve", "dir", "--seed", "abc"])).is_err());
    }
}
