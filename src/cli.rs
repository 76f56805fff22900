//! Command-line interface for strictly_go.

use clap::Parser;
use std::path::PathBuf;

/// Strictly Go - play two GTP engines against each other
#[derive(Parser, Debug)]
#[command(name = "strictly_go")]
#[command(about = "Referee a game of Go between two GTP engines", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command line for the Black engine (split on spaces, no quoting)
    #[arg(short, long)]
    pub black: Option<String>,

    /// Command line for the White engine (split on spaces, no quoting)
    #[arg(short, long)]
    pub white: Option<String>,

    /// Board size
    #[arg(long)]
    pub boardsize: Option<u32>,

    /// Komi, as a decimal number
    #[arg(long)]
    pub komi: Option<String>,

    /// Optional TOML file with board size, komi and engine commands
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log protocol traffic
    #[arg(short, long)]
    pub verbose: bool,
}
