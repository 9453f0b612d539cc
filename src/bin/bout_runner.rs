//! Headless Bout Runner
//!
//! Plays one automatic match to the end and prints the result.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use prizefight::bout::{BoutSummary, MatchEngine, MatchEvent, MatchMode};
use prizefight::core::{load_match_config, DecisionRule, MatchConfig, Result, SeededDice};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Headless Bout Runner - simulate a full match without a UI
#[derive(Parser, Debug)]
#[command(name = "bout_runner")]
#[command(about = "Simulate an automatic match and report the verdict")]
struct Args {
    /// TOML match config (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of rounds (1-12)
    #[arg(long)]
    rounds: Option<u32>,

    /// Exchanges per round (1-30)
    #[arg(long)]
    exchanges: Option<u32>,

    /// Decision rule: score or health
    #[arg(long)]
    decision: Option<String>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Roll random attributes instead of the stock fighters
    #[arg(long)]
    randomize: bool,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Print every match event to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct BoutReport {
    #[serde(flatten)]
    summary: BoutSummary,
    rounds_total: u32,
    exchanges_per_round: u32,
    seed: u64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("prizefight=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("bout_runner: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let seed = args.seed.unwrap_or_else(|| rand::random());

    let mut config = match &args.config {
        Some(path) => load_match_config(path)?,
        None => MatchConfig::default(),
    };
    if let Some(rounds) = args.rounds {
        config.rounds_total = rounds;
    }
    if let Some(exchanges) = args.exchanges {
        config.exchanges_per_round = exchanges;
    }
    match args.decision.as_deref() {
        Some("health") => config.decision_rule = DecisionRule::HealthOnly,
        Some("score") => config.decision_rule = DecisionRule::ScoreThenHealth,
        Some(other) => eprintln!("Unknown decision rule '{other}', using {:?}", config.decision_rule),
        None => {}
    }
    config.mode = MatchMode::Automatic;
    let config = config.clamped();

    let (report, events) = play(config, seed, args.randomize)?;
    if args.verbose {
        for event in events {
            eprintln!("  {event}");
        }
    }

    match args.format.as_str() {
        "text" => print_text(&report),
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        other => {
            eprintln!("Unknown format '{other}', defaulting to json");
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

/// Play one automatic bout with stock (or re-rolled) fighters
fn play(
    config: MatchConfig,
    seed: u64,
    randomize: bool,
) -> Result<(BoutReport, Vec<MatchEvent>)> {
    let mut engine = MatchEngine::with_stock_fighters(config, SeededDice::new(seed));
    if randomize {
        engine.reset_match(true);
    }
    let summary = engine.run_to_completion()?;
    let report = BoutReport {
        summary,
        rounds_total: config.rounds_total,
        exchanges_per_round: config.exchanges_per_round,
        seed,
    };
    Ok((report, engine.drain_events()))
}

fn print_text(report: &BoutReport) {
    let summary = &report.summary;
    println!("Bout Result");
    println!("===========");
    println!("Verdict: {}", summary.verdict);
    println!(
        "Rounds: {}/{}  Exchanges: {}",
        summary.rounds_fought, report.rounds_total, summary.total_exchanges
    );
    for tally in [&summary.red, &summary.green] {
        println!(
            "{:<8} health {:>3}  endurance {:>3}  score {:>3}{}",
            tally.name,
            tally.health,
            tally.endurance,
            tally.score,
            if tally.knocked_out { "  (KO)" } else { "" }
        );
    }
    println!();
    println!("Seed: {}", report.seed);
}
