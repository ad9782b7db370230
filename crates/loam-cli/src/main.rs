//! Loam command-line entry point.

use clap::Parser;

mod app;
mod cli;
mod config;
mod config_handlers;
mod resolve_handlers;
mod sync_handlers;

use app::LoamCli;
use cli::CliArgs;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    let cli = match LoamCli::from_args("loam", &args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = cli.run(args).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
