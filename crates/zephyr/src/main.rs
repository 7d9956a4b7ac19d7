mod commands;

use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "zephyr", version, about = "Inspect Zephyr syntax trees")]
struct Options {
    /// Verbose logging on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the syntax tree of a file
    Tree {
        path: Utf8PathBuf,
        /// Fail on a malformed token stream instead of repairing it
        #[arg(long)]
        strict: bool,
        /// Print the flat record buffer instead of the indented tree
        #[arg(long)]
        raw: bool,
    },
    /// Print the highlighted spans of a file
    Highlight {
        path: Utf8PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Report unrecognized tokens
    Check { path: Utf8PathBuf },
    /// Print the node type table
    NodeTypes,
}

fn main() -> anyhow::Result<ExitCode> {
    let options = Options::parse();

    let filter = match options.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match options.command {
        Command::Tree { path, strict, raw } => commands::tree(&path, strict, raw),
        Command::Highlight { path, json } => commands::highlight(&path, json),
        Command::Check { path } => commands::check(&path),
        Command::NodeTypes => {
            commands::node_types();
            Ok(ExitCode::SUCCESS)
        }
    }
}
