use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "workboard", version, about = "Workload and leaderboard scoring for office task snapshots")]
struct Cli {
    /// Path to the config file (defaults to ~/.config/workboard/config.toml)
    #[arg(long = "config", global = true, value_name = "FILE")]
    config_file: Option<PathBuf>,

    /// Evaluate as if the current local time were this timestamp
    #[arg(long, global = true, value_parser = parse_as_of)]
    as_of: Option<NaiveDateTime>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-user workload for a dashboard filter
    Workload(commands::workload::WorkloadArgs),
    /// High performer leaderboard for a period
    Leaderboard(commands::leaderboard::LeaderboardArgs),
    /// Dashboard summary numbers
    Summary(commands::summary::SummaryArgs),
    /// Today's motivation quote
    Quote(commands::quote::QuoteArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn parse_as_of(value: &str) -> Result<NaiveDateTime, String> {
    workboard_core::parse_datetime(value).map_err(|e| e.to_string())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = commands::Context {
        config_path: cli.config_file,
        now: cli.as_of.unwrap_or_else(|| Local::now().naive_local()),
    };

    let result = match cli.command {
        Commands::Workload(args) => commands::workload::run(&ctx, args),
        Commands::Leaderboard(args) => commands::leaderboard::run(&ctx, args),
        Commands::Summary(args) => commands::summary::run(&ctx, args),
        Commands::Quote(args) => commands::quote::run(&ctx, args),
        Commands::Config { action } => commands::config::run(&ctx, action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "workboard", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
