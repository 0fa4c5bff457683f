mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::swp::{SwpArgs, SwpScheduleArgs};
use commands::wealth::WealthArgs;

/// Withdrawal-plan and wealth-growth projections
#[derive(Parser)]
#[command(
    name = "corpus",
    version,
    about = "Withdrawal-plan and wealth-growth projections",
    long_about = "A CLI for projecting investment corpora with decimal precision. \
                  Supports systematic withdrawal plans (yearly report or monthly \
                  schedule with TDS) and SIP wealth growth with yearly step-up."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a systematic withdrawal plan, reported year by year
    Swp(SwpArgs),
    /// Month-by-month withdrawal schedule with tax deducted at source
    SwpSchedule(SwpScheduleArgs),
    /// Project wealth from a lump sum plus a stepped-up monthly SIP
    Wealth(WealthArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CORPUS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Swp(args) => commands::swp::run_swp(args),
        Commands::SwpSchedule(args) => commands::swp::run_swp_schedule(args),
        Commands::Wealth(args) => commands::wealth::run_wealth(args),
        Commands::Version => {
            println!("corpus {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::render(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
