//! Wagerkit scenario runner
//!
//! Runs the built-in demo scenario, or one loaded from a TOML file, and prints
//! the results as text or JSON.

use clap::{Parser, ValueEnum};
use wagerkit::{live_accounts, ConfigLoader, Scenario, ScenarioReport};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "wagerkit")]
#[command(about = "Account and wager settlement simulator", long_about = None)]
struct Args {
    /// Scenario file (TOML); the built-in demo runs when omitted
    #[arg(short, long)]
    config: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_filter = if args.verbose { "wagerkit=debug" } else { "wagerkit=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let loader = match args.config {
        Some(ref path) => ConfigLoader::new().with_path(path),
        None => ConfigLoader::new(),
    };
    let config = loader.load()?;
    let mut scenario = Scenario::from_config(&config)?;

    match args.format {
        OutputFormat::Text => {
            print_setup(&scenario);
            let report = scenario.run();
            print_report(&scenario, &report);
        }
        OutputFormat::Json => {
            let report = scenario.run();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn print_setup(scenario: &Scenario) {
    println!("{}", scenario.game());
    for account in scenario.accounts() {
        println!("{}", account);
    }
    println!("{}", scenario.bonus());
    println!("{}", scenario.jackpot());
    println!();
}

fn print_report(scenario: &Scenario, report: &ScenarioReport) {
    for step in &report.steps {
        println!("[{}] account {}: {}", step.index, step.account, step.outcome);
        if let Some(ref summary) = step.round_summary {
            println!("    {}", summary);
        }
        if let Some(ref tx) = step.transaction {
            println!("    {}", tx);
        }
    }
    if !report.completed {
        println!("Stopped early after a failed step");
    }

    println!();
    for account in scenario.accounts() {
        println!("{}", account);
    }
    println!("{}", scenario.jackpot());
    println!("Live accounts: {}", live_accounts());
}
