//! Command-line interface for meta_tictactoe.

use std::path::PathBuf;

use clap::Parser;
use meta_tictactoe_protocol::Player;

/// Nested tic-tac-toe: nine boards, each a session on a remote game service
#[derive(Parser, Debug)]
#[command(name = "meta_tictactoe")]
#[command(about = "Nested tic-tac-toe client for a remote game service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Game service base URL (overrides config file and TICTACTOE_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long, default_value = "meta_tictactoe.toml")]
    pub config: PathBuf,

    /// Player who moves first on every board (X or O)
    #[arg(long)]
    pub starting_player: Option<Player>,

    /// File that receives log output (the terminal is owned by the UI)
    #[arg(long, default_value = "meta_tictactoe.log")]
    pub log_file: PathBuf,
}
