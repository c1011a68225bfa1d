//! gapscan CLI - gap-up stock screener over a market-data REST API.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use display::{Format, ProfileArg};

#[derive(Parser)]
#[command(name = "gapscan")]
#[command(about = "Gap-up stock screener over a market-data REST API", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the gap-up screen over the ticker universe
    Scan {
        /// Screen profile
        #[arg(short, long, value_enum, default_value = "gap-and-go")]
        profile: ProfileArg,

        /// Anchor date for the lookback window (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        as_of: Option<String>,

        /// Output file path. Defaults to gapscan-<profile>.<format>
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Scan only these tickers instead of the full universe (repeatable)
        #[arg(short, long)]
        ticker: Vec<String>,

        /// Cap the universe to the first N tickers
        #[arg(long)]
        limit: Option<usize>,

        /// Record every qualifying day per ticker instead of stopping at the first
        #[arg(long)]
        all_days: bool,
    },

    /// List the enumerated NASDAQ/NYSE ticker universe
    Tickers {
        /// Restrict to one exchange MIC (XNAS or XNYS)
        #[arg(short, long)]
        exchange: Option<String>,
    },

    /// Augment a previously exported report with additional intraday columns
    Augment {
        /// Input report (CSV, must carry Ticker and Date columns)
        input: PathBuf,

        /// Output path. Defaults to <input stem>-augmented.csv
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Maps -v counts onto a tracing filter, deferring to RUST_LOG when set.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gapscan={default_level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Scan {
            profile,
            as_of,
            output,
            format,
            ticker,
            limit,
            all_days,
        } => {
            commands::scan::scan(
                profile,
                as_of.as_deref(),
                output,
                format,
                ticker,
                limit,
                all_days,
                cli.quiet,
            )
            .await
        }
        Commands::Tickers { exchange } => commands::tickers::tickers(exchange.as_deref()).await,
        Commands::Augment { input, output } => {
            commands::augment::augment(&input, output, cli.quiet).await
        }
    }
}
