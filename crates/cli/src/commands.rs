//! Clap command tree definition.

use clap::{Arg, Command};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("framedex")
        .about("Semantic search over extracted video frames")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .value_name("DIR")
                .help("Engine state directory (default: .framedex)")
                .global(true),
        )
        .arg(
            Arg::new("dimension")
                .long("dimension")
                .value_name("N")
                .help("Embedding dimension of the offline backend (default: 512)")
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(clap::ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Debug logging on stderr")
                .action(clap::ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(build_ingest())
        .subcommand(build_remove())
        .subcommand(build_search())
        .subcommand(build_info())
}

fn build_ingest() -> Command {
    Command::new("ingest")
        .about("Index new frame images from a folder")
        .arg(
            Arg::new("folder")
                .required(true)
                .value_name("FOLDER")
                .help("Directory of frames named <video>_fps=<fps>_pts=<pts>.jpg"),
        )
}

fn build_remove() -> Command {
    Command::new("remove")
        .about("Remove every indexed frame of a video")
        .arg(
            Arg::new("video")
                .required(true)
                .value_name("VIDEO")
                .help("Video name or path; only the file stem is used"),
        )
}

fn build_search() -> Command {
    Command::new("search")
        .about("Search indexed frames with a text query")
        .arg(
            Arg::new("query")
                .required(true)
                .value_name("QUERY")
                .help("Free-text query"),
        )
        .arg(
            Arg::new("top-k")
                .long("top-k")
                .short('k')
                .value_name("N")
                .help("Maximum results to return (default: 5)"),
        )
        .arg(
            Arg::new("threshold")
                .long("threshold")
                .short('t')
                .value_name("SECONDS")
                .help("Collapse same-video hits closer than this (default: 5, 0 disables)"),
        )
}

fn build_info() -> Command {
    Command::new("info").about("Show catalog and index counters")
}
