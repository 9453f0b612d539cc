//! Prizefight - console entry point
//!
//! A thin presentation layer: it forwards typed commands to the match
//! driver and prints every notification the engine publishes.

use std::path::PathBuf;

use clap::Parser;
use prizefight::bout::{next_event, MatchDriver, MatchEngine, MatchMode, MatchSnapshot};
use prizefight::combat::ActionType;
use prizefight::core::{load_match_config, Corner, MatchConfig, Result, SeededDice};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "prizefight")]
#[command(about = "Watch or fight a simulated bout in the terminal")]
struct Args {
    /// TOML match config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for a repeatable bout
    #[arg(long)]
    seed: Option<u64>,

    /// Start in manual mode
    #[arg(long)]
    manual: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("prizefight=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => load_match_config(path)?,
        None => MatchConfig::default(),
    };
    if args.manual {
        config.mode = MatchMode::Manual;
    }

    let dice = match args.seed {
        Some(seed) => SeededDice::new(seed),
        None => SeededDice::from_entropy(),
    };
    let handle = MatchDriver::spawn(MatchEngine::with_stock_fighters(config, dice));

    let mut events = handle.subscribe();
    tokio::spawn(async move {
        while let Some(event) = next_event(&mut events).await {
            println!("{event}");
        }
    });

    println!("\n=== PRIZEFIGHT ===");
    print_help();
    print_status(&handle.snapshot().await?);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let words: Vec<&str> = line.split_whitespace().collect();
        let result = match words.as_slice() {
            [] => Ok(()),
            ["quit" | "q"] => break,
            ["help" | "h"] => {
                print_help();
                Ok(())
            }
            ["status" | "s"] => handle.snapshot().await.map(|s| print_status(&s)),
            ["start"] => handle.start_match(config).await,
            ["start", "auto"] => {
                config.mode = MatchMode::Automatic;
                handle.start_match(config).await
            }
            ["start", "manual"] => {
                config.mode = MatchMode::Manual;
                handle.start_match(config).await
            }
            ["pause" | "p"] => handle.pause().await,
            ["resume" | "r"] => handle.resume().await,
            ["next" | "n"] => handle.start_next_round().await,
            ["reset"] => handle.reset_match(false).await,
            ["reset", "full"] => handle.reset_match(true).await,
            [corner, action] => match (parse_corner(corner), parse_action(action)) {
                (Some(corner), Some(action)) => {
                    handle.manual_attack(corner, action).await.map(|_| ())
                }
                _ => {
                    println!("Unknown command: {line}");
                    Ok(())
                }
            },
            _ => {
                println!("Unknown command: {line}");
                Ok(())
            }
        };

        if let Err(e) = result {
            println!("! {e}");
        }
    }

    Ok(())
}

fn parse_corner(word: &str) -> Option<Corner> {
    match word {
        "red" => Some(Corner::Red),
        "green" => Some(Corner::Green),
        _ => None,
    }
}

fn parse_action(word: &str) -> Option<ActionType> {
    match word {
        "light" | "l" => Some(ActionType::Light),
        "heavy" | "h" => Some(ActionType::Heavy),
        _ => None,
    }
}

fn print_help() {
    println!("Commands:");
    println!("  start [auto|manual]   - Start a match");
    println!("  pause / resume        - Suspend or continue the automatic ticks");
    println!("  next                  - Call the next round");
    println!("  reset [full]          - Back to idle; 'full' rolls new attributes");
    println!("  red|green light|heavy - Throw a punch (manual mode)");
    println!("  status                - Show both fighters");
    println!("  quit                  - Exit");
    println!();
}

fn print_status(snapshot: &MatchSnapshot) {
    let state = &snapshot.state;
    println!(
        "Round {}/{}  exchange {}/{}  ({}, {} mode)",
        state.current_round,
        state.rounds_total,
        state.exchange_in_round,
        state.exchanges_per_round,
        state.phase,
        state.mode
    );
    for fighter in [&snapshot.red, &snapshot.green] {
        let attributes = fighter.attributes;
        println!(
            "  {:<6} HP {:>3}/{}  END {:>3}/{}  PWR {:>2}  ACC {:>2}  score {}",
            fighter.name,
            fighter.health,
            fighter.max_health,
            fighter.endurance,
            attributes.endurance,
            attributes.power,
            attributes.accuracy,
            fighter.score
        );
    }
}
