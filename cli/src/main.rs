use clap::Parser;
use std::process::ExitCode;

mod app;
mod cli;
mod logging;
mod navigator;
mod output;

use crate::cli::Args;
use crate::output::print_error;

#[tokio::main]
async fn main() -> ExitCode {
    // Environment first so FINWALL_* variables from .env reach both clap and the config
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = match app::resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            print_error(&format!("{:#}", e));
            return ExitCode::FAILURE;
        }
    };

    logging::init(config.log_level.as_deref().unwrap_or("info"));

    match app::run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
