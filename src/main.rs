use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use rock_breaker::catalog::Catalog;
use rock_breaker::config::{self, Operation};
use rock_breaker::{engine, output};

const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate the scenario file (default if no subcommand)
    Evaluate {
        /// Switch a module on before evaluating, as UNIT:SLOT:POSITION (repeatable)
        #[arg(long, value_name = "U:S:P")]
        activate: Vec<String>,

        /// Switch a module off before evaluating, as UNIT:SLOT:POSITION (repeatable).
        /// A position may not appear in both --activate and --deactivate.
        #[arg(long, value_name = "U:S:P")]
        deactivate: Vec<String>,
    },
    /// Power needed for a rock, ignoring all equipment
    Required {
        /// Rock mass
        mass: f64,
        /// Resistance, 0-100
        resistance: f64,
    },
    /// Recover baseline resistance from a reading taken through equipment
    Reverse {
        /// Resistance as read, 0-100
        reading: f64,
        /// Combined multiplier that was active at scan time (e.g. 0.7)
        multiplier: f64,
    },
    /// List heads, modules, gadgets and vehicles
    Catalog,
}

#[derive(Parser, Debug)]
#[command(name = "rock-breaker")]
#[command(about = "Mining laser breakability calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to scenario file (defaults to ~/.config/rock-breaker/scenario.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "rock_breaker=debug"
    } else {
        "rock_breaker=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_config_error(message: &str, err: anyhow::Error) -> ! {
    eprintln!("{}: {:#}", message, err);
    std::process::exit(EXIT_CONFIG);
}

/// Load, validate and resolve the scenario; exits on any problem
fn load_operation(path: Option<PathBuf>) -> Operation {
    // Load scenario
    let scenario = match config::load_scenario(path) {
        Ok(s) => s,
        Err(e) => exit_config_error("Config error", e),
    };

    // Validate against the merged catalog
    let catalog = scenario.effective_catalog();
    if let Err(errors) = config::validate_scenario(&scenario, &catalog) {
        eprintln!("Scenario errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    // Resolve ids into engine inputs
    match config::resolve(&scenario, &catalog) {
        Ok(op) => op,
        Err(e) => exit_config_error("Config error", e),
    }
}

fn apply_toggles(mut op: Operation, activate: &[String], deactivate: &[String]) -> Operation {
    let requests = match config::parse_toggles(activate, deactivate) {
        Ok(r) => r,
        Err(e) => exit_config_error("Invalid module reference", e),
    };

    for (target, on) in requests {
        op.units = match config::set_module_active(&op.units, target, on) {
            Ok(units) => units,
            Err(e) => exit_config_error("Cannot toggle module", e),
        };
    }
    op
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => exit_config_error("Failed to serialize output", e.into()),
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Evaluate {
        activate: Vec::new(),
        deactivate: Vec::new(),
    });
    let use_colors = !cli.no_color && output::should_use_colors();
    let config_path = cli.config.map(PathBuf::from);
    let start_time = Instant::now();

    match command {
        Commands::Evaluate {
            activate,
            deactivate,
        } => {
            // Load config and apply any module toggles
            let op = apply_toggles(load_operation(config_path), &activate, &deactivate);

            let result = if op.group {
                tracing::debug!(
                    units = op.units.len(),
                    active = op.units.iter().filter(|u| u.active).count(),
                    "Group evaluation"
                );
                engine::evaluate_group(&op.units, &op.target, &op.gadgets)
            } else {
                let Some(unit) = op.units.first() else {
                    eprintln!("Scenario has no units to evaluate.");
                    std::process::exit(EXIT_CONFIG);
                };
                tracing::debug!(vehicle = %unit.kind.id, "Single-unit evaluation");
                engine::evaluate(&unit.config, &op.target, &op.gadgets, &unit.kind)
            };

            if let Some(reversal) = result.reversal {
                if reversal.multiplier == 0.0 {
                    tracing::warn!("Reversal multiplier is zero; reading used as-is");
                }
            }

            // Output results
            if cli.json {
                match output::format_json(&result) {
                    Ok(s) => println!("{}", s),
                    Err(e) => exit_config_error("Output error", e),
                }
            } else {
                println!("{}", output::format_result(&result, &op.target, use_colors));
            }
        }
        Commands::Required { mass, resistance } => {
            let required = engine::required_power(mass, resistance);
            if cli.json {
                print_json(&serde_json::json!({
                    "mass": mass,
                    "resistance": resistance,
                    "required_power": required,
                }));
            } else {
                println!(
                    "{:.1} power required ({})",
                    required,
                    output::format_power(required)
                );
            }
        }
        Commands::Reverse {
            reading,
            multiplier,
        } => {
            if multiplier == 0.0 {
                tracing::warn!("Multiplier is zero; reading returned unchanged");
            }
            let baseline = engine::reverse(reading, multiplier);
            if cli.json {
                print_json(&serde_json::json!({
                    "reading": reading,
                    "multiplier": multiplier,
                    "baseline_resistance": baseline,
                }));
            } else {
                println!("{:.2}% baseline resistance", baseline);
            }
        }
        Commands::Catalog => {
            let catalog = match config_path {
                Some(path) => match config::load_scenario(Some(path)) {
                    Ok(s) => s.effective_catalog(),
                    Err(e) => exit_config_error("Config error", e),
                },
                None => match config::load_scenario(None) {
                    Ok(s) => s.effective_catalog(),
                    Err(e) => {
                        tracing::debug!("No usable default scenario ({:#}); built-in catalog", e);
                        Catalog::builtin()
                    }
                },
            };
            println!("{}", output::format_catalog(&catalog, use_colors));
        }
    }

    tracing::debug!(elapsed = ?start_time.elapsed(), "Done");
    std::process::exit(EXIT_SUCCESS);
}
