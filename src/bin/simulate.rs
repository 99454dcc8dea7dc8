//! Game balance simulator CLI.
//!
//! Run Monte Carlo simulations to analyze game balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                       # Default: 1000 runs, classes rotated
//!   cargo run --bin simulate -- -n 100 -c charge   # 100 Charge Fighter runs
//!   cargo run --bin simulate -- --seed 42 --meta   # Reproducible, buying talents between runs

use rps_rogue::simulator::{run_simulation, SimConfig, UpgradePolicy};
use rps_rogue::ClassKind;
use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              RPS ROGUE BALANCE SIMULATOR                      ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    match config.class {
        Some(class) => println!("  Class:          {}", class),
        None => println!("  Class:          rotate"),
    }
    println!("  Upgrades:       {:?}", config.upgrade_policy);
    println!("  Max Rounds:     {}", config.max_rounds_per_run);
    if config.meta_progression {
        println!("  Talents:        bought between runs");
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    if config.verbosity > 0 {
        println!("{}", report.to_text());
    }

    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(err) => {
                tracing::error!(file = %filename, error = %err, "failed to write JSON report");
                std::process::exit(1);
            }
        }
    }
}

fn parse_class(name: &str) -> Option<ClassKind> {
    match name.to_ascii_lowercase().as_str() {
        "lucky" | "warrior" => Some(ClassKind::LuckyWarrior),
        "charge" | "fighter" => Some(ClassKind::ChargeFighter),
        "healer" | "priest" => Some(ClassKind::HealerPriest),
        _ => None,
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    // Presets first so the remaining flags override them regardless of order
    let mut config = if args.iter().any(|a| a == "--progression") {
        SimConfig::meta_progression_test()
    } else if args.iter().any(|a| a == "--compare") {
        SimConfig::class_comparison(300)
    } else {
        SimConfig::default()
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-c" | "--class" => {
                if i + 1 < args.len() {
                    config.class = parse_class(&args[i + 1]);
                    i += 1;
                }
            }
            "-u" | "--upgrades" => {
                if i + 1 < args.len() {
                    if let Some(policy) = UpgradePolicy::parse(&args[i + 1]) {
                        config.upgrade_policy = policy;
                    }
                    i += 1;
                }
            }
            "-r" | "--rounds" => {
                if i + 1 < args.len() {
                    config.max_rounds_per_run = args[i + 1].parse().unwrap_or(100_000);
                    i += 1;
                }
            }
            "--meta" => {
                config.meta_progression = true;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-q" | "--quiet" => {
                config.verbosity = 0;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("RPS Rogue Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>        Number of simulated runs (default: 1000)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("    -c, --class <C>       lucky | charge | healer (default: rotate)");
    println!("    -u, --upgrades <P>    balanced | attack | defense | survival");
    println!("    -r, --rounds <R>      Max rounds per run (default: 100,000)");
    println!("    --meta                Buy talents with earned tokens between runs");
    println!("    -v, --verbose         Log every run");
    println!("    -q, --quiet           Skip the text report");
    println!("    --json                Save JSON report");
    println!("    --compare             Class comparison (300 runs, blank ledger)");
    println!("    --progression         Meta-progression pacing (200 runs)");
    println!("                          Presets apply first; other flags override them");
    println!("    -h, --help            Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                        # Default run");
    println!("    cargo run --bin simulate -- -n 100 -c healer    # 100 Healer Priest runs");
    println!("    cargo run --bin simulate -- --seed 42           # Reproducible");
    println!("    cargo run --bin simulate -- --progression --json");
    println!("    RUST_LOG=rps_rogue=debug cargo run --bin simulate -- -n 1");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(flags: &[&str]) -> Vec<String> {
        std::iter::once("simulate")
            .chain(flags.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_flags_before_preset_survive() {
        let config = parse_args(&args(&["-n", "12", "--seed", "7", "--progression"]));
        assert!(config.meta_progression);
        assert_eq!(config.num_runs, 12);
        assert_eq!(config.seed, Some(7));

        let config = parse_args(&args(&["--compare", "-n", "40", "-c", "healer"]));
        assert_eq!(config.num_runs, 40);
        assert_eq!(config.class, Some(ClassKind::HealerPriest));
    }

    #[test]
    fn test_preset_defaults_apply() {
        let config = parse_args(&args(&["--compare"]));
        assert_eq!(config.num_runs, 300);
        assert!(!config.meta_progression);
        assert_eq!(parse_args(&args(&[])).num_runs, 1000);
    }
}
