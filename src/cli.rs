use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::llm::ContractVersion;
use crate::models::FanoutMode;

#[derive(Parser)]
#[command(name = "fanout")]
#[command(about = "LLM-powered query fan-out simulator for search analysis", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Initialize fanout configuration (optional, auto-init on first use)")]
    Init {
        /// Initialize in local directory (./.fanout) instead of global (~/.fanout)
        #[arg(short, long)]
        local: bool,
    },

    #[command(about = "Fan out a query into synthetic related queries")]
    Run {
        /// The search query to fan out
        query: String,

        /// Search mode: simple (AI Overview) or complex (AI Mode)
        #[arg(short, long, value_enum)]
        mode: Option<FanoutMode>,

        /// Model ID to use, catalog or custom (overrides the configured model)
        #[arg(long, env = "FANOUT_MODEL")]
        model: Option<String>,

        /// Prompt contract version
        #[arg(short, long, value_enum)]
        contract: Option<ContractVersion>,

        /// Export results to CSV (default file name if omitted)
        #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "")]
        csv: Option<PathBuf>,

        /// Export results to JSON (default file name if omitted)
        #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "")]
        json: Option<PathBuf>,

        /// Use local configuration (./.fanout)
        #[arg(short, long)]
        local: bool,

        /// Use global configuration (~/.fanout)
        #[arg(short, long)]
        global: bool,
    },

    #[command(about = "List the built-in model catalog")]
    Models,
}
