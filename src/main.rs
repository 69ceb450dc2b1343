mod commands;

use clap::Parser;
use commands::{Cli, Context};
use log::error;
use std::process::ExitCode;
use std::sync::Arc;
use yi_vote::api::ApiClient;
use yi_vote::config::Config;
use yi_vote::session::{LogNavigator, SqliteSession};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let session = match SqliteSession::connect(&config.session_db).await {
        Ok(session) => Arc::new(session),
        Err(e) => {
            error!("Failed to open session store {}: {}", config.session_db, e);
            return ExitCode::FAILURE;
        }
    };

    let navigator = Arc::new(LogNavigator);
    let api = match ApiClient::new(&config, session.clone(), navigator.clone()) {
        Ok(api) => Arc::new(api),
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let ctx = Context {
        config,
        api,
        session,
        navigator,
        assume_yes: cli.yes,
    };

    match commands::run(&ctx, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e.user_message(&e.to_string()));
            ExitCode::FAILURE
        }
    }
}
