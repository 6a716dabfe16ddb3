mod cli;
mod config;
mod llm;
mod models;
mod service;
mod ui;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use service::run::RunOptions;
use ui::Output;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { local } => service::init::initialize(local),
        Commands::Run {
            query,
            mode,
            model,
            contract,
            csv,
            json,
            local,
            global,
        } => {
            service::run::run(RunOptions {
                query,
                mode,
                model,
                contract,
                csv,
                json,
                force_local: local,
                force_global: global,
            })
            .await
        }
        Commands::Models => {
            service::models::list_models();
            Ok(())
        }
    };

    if let Err(e) = result {
        Output::new().error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
