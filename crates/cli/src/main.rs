//! framedex CLI - semantic search over extracted video frames.
//!
//! Single-shot commands against an engine data directory:
//! - `framedex ingest FOLDER` - index new frame images
//! - `framedex search QUERY` - temporally deduplicated retrieval
//! - `framedex remove VIDEO` - drop every frame of a video
//! - `framedex info` - catalog and index counters
//!
//! The bundled binary embeds with a deterministic offline backend, so
//! scores only exercise the pipeline; production callers supply a
//! model-backed `Embedder` through the library API.

mod commands;
mod format;

use std::path::Path;
use std::process;

use framedex_engine::{Engine, EngineConfig, MockEmbedder};

use commands::build_cli;
use format::{format_error, format_info, format_ingest, format_remove, format_search, OutputMode};

const DEFAULT_DATA_DIR: &str = ".framedex";
const DEFAULT_DIMENSION: usize = 512;
const DEFAULT_TOP_K: usize = 5;
const DEFAULT_THRESHOLD: f64 = 5.0;

fn main() {
    let cli = build_cli();
    let matches = cli.get_matches();

    init_tracing(matches.get_flag("verbose"));

    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let mut engine = match open_engine(&matches) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let exit_code = run_command(&matches, &mut engine, output_mode);
    process::exit(exit_code);
}

fn open_engine(matches: &clap::ArgMatches) -> Result<Engine, String> {
    let data_dir = matches
        .get_one::<String>("data-dir")
        .map(|s| s.as_str())
        .unwrap_or(DEFAULT_DATA_DIR);
    let dimension = matches
        .get_one::<String>("dimension")
        .map(|s| s.parse::<usize>())
        .transpose()
        .map_err(|e| format!("Invalid dimension: {}", e))?
        .unwrap_or(DEFAULT_DIMENSION);
    if dimension == 0 {
        return Err("Invalid dimension: must be at least 1".to_string());
    }

    let config = EngineConfig::load_or_init(data_dir)
        .map_err(|e| format!("Failed to load configuration: {}", e))?;
    Engine::open(config, MockEmbedder::new(dimension))
        .map_err(|e| format!("Failed to open engine: {}", e))
}

fn run_command(matches: &clap::ArgMatches, engine: &mut Engine, mode: OutputMode) -> i32 {
    match matches.subcommand() {
        Some(("ingest", m)) => {
            let folder = m.get_one::<String>("folder").unwrap();
            match engine.ingest_frames(Path::new(folder)) {
                Ok(report) => {
                    println!("{}", format_ingest(&report, mode));
                    0
                }
                Err(e) => {
                    eprintln!("{}", format_error(&e, mode));
                    1
                }
            }
        }
        Some(("remove", m)) => {
            let video = m.get_one::<String>("video").unwrap();
            match engine.remove_video(video) {
                Ok(report) => {
                    println!("{}", format_remove(&report, mode));
                    0
                }
                Err(e) => {
                    eprintln!("{}", format_error(&e, mode));
                    1
                }
            }
        }
        Some(("search", m)) => {
            let query = m.get_one::<String>("query").unwrap();
            let top_k = match parse_arg(m, "top-k", DEFAULT_TOP_K) {
                Ok(v) => v,
                Err(e) => {
                    eprintln!("{}", format_error(&e, mode));
                    return 1;
                }
            };
            let threshold = match parse_arg(m, "threshold", DEFAULT_THRESHOLD) {
                Ok(v) => v,
                Err(e) => {
                    eprintln!("{}", format_error(&e, mode));
                    return 1;
                }
            };
            match engine.search(query, top_k, threshold) {
                Ok(hits) => {
                    println!("{}", format_search(&hits, mode));
                    0
                }
                Err(e) => {
                    eprintln!("{}", format_error(&e, mode));
                    1
                }
            }
        }
        Some(("info", _)) => match engine.info() {
            Ok(info) => {
                println!("{}", format_info(&info, mode));
                0
            }
            Err(e) => {
                eprintln!("{}", format_error(&e, mode));
                1
            }
        },
        _ => unreachable!("subcommand is required"),
    }
}

fn parse_arg<T: std::str::FromStr>(
    m: &clap::ArgMatches,
    name: &str,
    default: T,
) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    match m.get_one::<String>(name) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| format!("Invalid {}: {}", name, e)),
        None => Ok(default),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "framedex=debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
