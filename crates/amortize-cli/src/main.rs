mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::loan::{LoanArgs, ScenarioArgs, ScheduleArgs};

/// Loan amortization schedules and accelerated-payoff scenarios
#[derive(Parser)]
#[command(
    name = "amort",
    version,
    about = "Loan amortization schedules and accelerated-payoff scenarios",
    long_about = "A CLI for level-payment loan amortization with decimal precision. \
                  Computes periodic payments, full schedules (optionally with a higher \
                  fixed payment), payoff comparisons and CSV payment trackers for \
                  weekly, fortnightly and monthly repayments."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Emit debug logs to stderr (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the level periodic payment
    Payment(LoanArgs),
    /// Generate the amortization schedule, optionally with a fixed payment
    Schedule(ScheduleArgs),
    /// Compare payoff scenarios with increased payments
    Scenarios(ScenarioArgs),
    /// Summarise total interest, payments and years to pay
    Summary(LoanArgs),
    /// Payment, schedule, summary and scenarios in one report
    Analyze(LoanArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
    /// Payment tracker CSV with due dates and spreadsheet formulas (schedule only)
    Tracker,
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "amortize_core=debug,amort=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Scenarios(args) => commands::loan::run_scenarios(args),
        Commands::Summary(args) => commands::loan::run_summary(args),
        Commands::Analyze(args) => commands::loan::run_analyze(args),
        Commands::Version => {
            println!("amort {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result.and_then(|value| output::format_output(&cli.output, &value)) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
