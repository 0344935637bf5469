//! Dungeon topology generator CLI.
//!
//! Usage:
//!   labyrinth [OPTIONS]
//!
//! Examples:
//!   labyrinth                          # 10x10 grid, minimum route of 8, random seed
//!   labyrinth -W 16 -H 12 -l 20 -s 42  # reproducible larger dungeon
//!   labyrinth --branch 0 --loops 0     # main route only
//!   labyrinth -s 42 --json dungeon.json

use labyrinth::{build_info, generate, DungeonExport, GeneratorConfig, GridBounds, RoomGraph};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Parsed command line
struct CliArgs {
    width: usize,
    height: usize,
    min_path_length: usize,
    seed: Option<u64>,
    branch_chance: Option<f64>,
    loop_chance: Option<f64>,
    max_branch_depth: Option<u32>,
    max_attempts: Option<u32>,
    config_path: Option<PathBuf>,
    /// `Some(None)` prints JSON to stdout, `Some(Some(path))` writes a file
    json: Option<Option<PathBuf>>,
    verbose: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            min_path_length: 8,
            seed: None,
            branch_chance: None,
            loop_chance: None,
            max_branch_depth: None,
            max_attempts: None,
            config_path: None,
            json: None,
            verbose: false,
        }
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let cli = parse_args(&args);

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &CliArgs) -> Result<(), String> {
    let mut config = match &cli.config_path {
        Some(path) => GeneratorConfig::load(path),
        None => GeneratorConfig::load_or_default(),
    }
    .map_err(|e| e.to_string())?;

    if let Some(chance) = cli.branch_chance {
        config.branch_chance = chance;
    }
    if let Some(chance) = cli.loop_chance {
        config.loop_chance = chance;
    }
    if let Some(depth) = cli.max_branch_depth {
        config.max_branch_depth = depth;
    }
    if let Some(attempts) = cli.max_attempts {
        config.max_attempts = attempts;
    }

    let bounds = GridBounds::checked(cli.width, cli.height, cli.min_path_length, &config)
        .map_err(|e| e.to_string())?;
    let seed = cli.seed.unwrap_or_else(rand::random);

    let graph = generate(&bounds, seed, &config).map_err(|e| e.to_string())?;

    match &cli.json {
        Some(None) => {
            let json = DungeonExport::from_graph(&graph)
                .to_json()
                .map_err(|e| e.to_string())?;
            println!("{json}");
        }
        Some(Some(path)) => {
            print_summary(&graph, seed);
            let json = DungeonExport::from_graph(&graph)
                .to_json()
                .map_err(|e| e.to_string())?;
            std::fs::write(path, json)
                .map_err(|e| format!("could not write {}: {e}", path.display()))?;
            println!("JSON export saved to: {}", path.display());
        }
        None => print_summary(&graph, seed),
    }

    Ok(())
}

fn print_summary(graph: &RoomGraph, seed: u64) {
    println!("Dungeon {}x{}", graph.width(), graph.height());
    println!("  Seed:           {}", seed);
    println!("  Attempts:       {}", graph.attempts());
    println!("  Rooms:          {}", graph.room_count());
    println!("  Passages:       {}", graph.edge_count());
    println!("  Main route:     {} hops", graph.main_path_len());
    println!(
        "  Shortest route: {} hops (minimum {})",
        graph.exit_distance(),
        graph.min_path_length()
    );
    println!("  Dead ends:      {}", graph.dead_ends().count());
    println!("  Entrance:       {}", graph.entrance().cell());
    println!("  Exit:           {}", graph.exit().cell());
    println!("  Fingerprint:    {}", graph.fingerprint());
}

fn parse_args(args: &[String]) -> CliArgs {
    let mut cli = CliArgs::default();

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "-W" | "--width" => {
                if let Some(v) = value {
                    cli.width = parse_value(&args[i], v).unwrap_or(cli.width);
                    i += 1;
                }
            }
            "-H" | "--height" => {
                if let Some(v) = value {
                    cli.height = parse_value(&args[i], v).unwrap_or(cli.height);
                    i += 1;
                }
            }
            "-l" | "--min-path" => {
                if let Some(v) = value {
                    cli.min_path_length = parse_value(&args[i], v).unwrap_or(cli.min_path_length);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if let Some(v) = value {
                    cli.seed = parse_value(&args[i], v);
                    i += 1;
                }
            }
            "--branch" => {
                if let Some(v) = value {
                    cli.branch_chance = parse_value(&args[i], v);
                    i += 1;
                }
            }
            "--loops" => {
                if let Some(v) = value {
                    cli.loop_chance = parse_value(&args[i], v);
                    i += 1;
                }
            }
            "--depth" => {
                if let Some(v) = value {
                    cli.max_branch_depth = parse_value(&args[i], v);
                    i += 1;
                }
            }
            "--attempts" => {
                if let Some(v) = value {
                    cli.max_attempts = parse_value(&args[i], v);
                    i += 1;
                }
            }
            "--config" => {
                if let Some(v) = value {
                    cli.config_path = Some(PathBuf::from(v));
                    i += 1;
                }
            }
            "--json" => match value {
                Some(v) if !v.starts_with('-') => {
                    cli.json = Some(Some(PathBuf::from(v)));
                    i += 1;
                }
                _ => cli.json = Some(None),
            },
            "-v" | "--verbose" => {
                cli.verbose = true;
            }
            "--version" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                eprintln!("warning: ignoring unknown argument '{other}'");
            }
        }
        i += 1;
    }

    cli
}

/// Parses a flag value, warning instead of silently dropping a bad one
fn parse_value<T: FromStr>(flag: &str, value: &str) -> Option<T> {
    let parsed = value.parse().ok();
    if parsed.is_none() {
        eprintln!("warning: ignoring invalid value '{value}' for {flag}");
    }
    parsed
}

fn print_help() {
    println!("Labyrinth - dungeon topology generator");
    println!();
    println!("USAGE:");
    println!("    labyrinth [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -W, --width <N>       Grid width (default: 10)");
    println!("    -H, --height <N>      Grid height (default: 10)");
    println!("    -l, --min-path <N>    Minimum Entrance-to-Exit hops (default: 8)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("    --branch <P>          Side corridor chance per room, 0..1");
    println!("    --loops <P>           Extra passage chance per adjacent pair, 0..1");
    println!("    --depth <N>           Maximum branch depth");
    println!("    --attempts <N>        Generation attempts before giving up");
    println!("    --config <PATH>       Read generator settings from a JSON file");
    println!("    --json [PATH]         Emit the JSON export (stdout, or save to PATH)");
    println!("    -v, --verbose         Log generation phases");
    println!("    --version             Show version information");
    println!("    -h, --help            Show this help message");
    println!();
    println!("RUST_LOG overrides the log filter.");
}
