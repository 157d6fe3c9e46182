use clap::Parser;
use dotenvy::dotenv;
use tracing::error;

use tm_cli::{render, run, Cli, CliError};
use tm_common::{logging, run_id, MatchingEngine};

const APP_NAME: &str = "tm-match";

fn execute() -> Result<(), CliError> {
    let cli = Cli::parse();
    let engine = MatchingEngine::from_env()?;
    tracing::debug!(process_run_id = run_id::get(), config = ?engine.config(), "engine ready");

    let response = run(&cli, &engine)?;
    println!("{}", render(&response, cli.compact)?);
    Ok(())
}

fn main() {
    dotenv().ok();
    logging::init_tracing_subscriber(APP_NAME);
    logging::install_tracing_panic_hook(APP_NAME);

    if let Err(err) = execute() {
        error!(error = %err, "tm-match failed");
        std::process::exit(1);
    }
}
