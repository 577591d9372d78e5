use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line client for the FinWall invoicing API
#[derive(Parser, Debug)]
#[command(name = "finwall", author, version, about, long_about = None)]
pub struct Args {
    /// Path to the config file (defaults to ~/.config/finwall/config.toml)
    #[arg(short, long, env = "FINWALL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the API, e.g. http://127.0.0.1:8000/api/v1
    #[arg(long)]
    pub api_url: Option<String>,

    /// Path to the session file
    #[arg(long)]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "FINWALL_PASSWORD")]
        password: String,
    },

    /// Create a user and organization, then store the session
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, env = "FINWALL_PASSWORD")]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        /// Name of the organization to create
        #[arg(long)]
        organization: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the stored session
    Status,

    /// Ask the server who the stored session belongs to
    Me,

    /// Send an authenticated request and print the JSON response
    Request {
        /// HTTP method: GET, POST, PATCH or DELETE
        method: String,
        /// Path relative to the API base URL, e.g. /customers
        path: String,
        /// JSON request body
        #[arg(short, long)]
        data: Option<String>,
    },
}
