use anyhow::{Context, Result};
use clap::Parser;
use mineopoly_core::{
    Team,
    board::{Board, load_board_from_string},
    economy::Economy,
    random::RandomStrategy,
    sandbox::{MatchResult, Sandbox},
    smart::SmartStrategy,
    strategy::MatchSettings,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset. Targets are the crate names.
const DEFAULT_LOG_FILTER: &str = "mineopoly_core=info,mineopoly_cli=info";

#[derive(Parser, Debug)]
#[command(version, about = "Runs SmartStrategy against a random opponent", long_about = None)]
struct Args {
    /// Board file to load
    #[arg(short, long, value_name = "BOARD_FILE", default_value = "maps/board01.txt")]
    map: PathBuf,

    /// Maximum rounds per match
    #[arg(short, long, default_value_t = 500)]
    rounds: u32,

    /// Seed for the random opponent
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Number of matches; more than one reports the win percentage
    #[arg(long, default_value_t = 1)]
    matches: u32,

    #[arg(long, default_value_t = 80)]
    max_charge: u32,

    #[arg(long, default_value_t = 5)]
    max_inventory: usize,

    #[arg(long, default_value_t = 1000)]
    winning_score: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let args = Args::parse();
    if !args.map.exists() {
        return Err(anyhow::anyhow!(
            "Board file does not exist: {}",
            args.map.display()
        ));
    }

    let board_string = std::fs::read_to_string(&args.map)
        .with_context(|| format!("Failed to read board file {}", args.map.display()))?;
    let board = load_board_from_string(&board_string)
        .with_context(|| format!("Failed to load board from {}", args.map.display()))?;

    let settings = MatchSettings {
        board_size: board.size(),
        max_inventory_size: args.max_inventory,
        max_charge: args.max_charge,
        winning_score: args.winning_score,
    };
    tracing::info!(?settings, map = %args.map.display(), "Starting");

    if args.matches <= 1 {
        let result = play_match(&board, settings, args.seed, args.rounds)?;
        println!(
            "Rounds: {}  Red (SmartStrategy): {}  Blue (RandomStrategy): {}  Winner: {}",
            result.rounds,
            result.red_score,
            result.blue_score,
            match result.winner {
                Some(team) => format!("{team:?}"),
                None => "none".to_string(),
            }
        );
        return Ok(());
    }

    let mut wins = 0u32;
    for i in 0..args.matches {
        let seed = args.seed.wrapping_add(u64::from(i));
        let result = play_match(&board, settings, seed, args.rounds)?;
        // Only count matches where the smart strategy reached the winning score.
        if result.red_score >= settings.winning_score {
            wins += 1;
        }
    }
    println!(
        "(Board size, win percent): ({}, {})",
        settings.board_size,
        f64::from(wins) / f64::from(args.matches)
    );
    Ok(())
}

/// Plays one match with the smart strategy as red.
fn play_match(board: &Board, settings: MatchSettings, seed: u64, rounds: u32) -> Result<MatchResult> {
    let mut sandbox = Sandbox::new(
        board.clone(),
        settings,
        Economy::default(),
        Box::new(SmartStrategy::new()),
        Box::new(RandomStrategy::new(seed)),
        seed,
    );
    let result = sandbox.run(rounds)?;
    tracing::debug!(
        seed,
        red_charge = sandbox.player(Team::Red).charge,
        blue_charge = sandbox.player(Team::Blue).charge,
        "Match done"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_log_filter_parses_and_names_both_crates() {
        assert!(DEFAULT_LOG_FILTER.parse::<EnvFilter>().is_ok());
        assert!(DEFAULT_LOG_FILTER.contains("mineopoly_core=info"));
        assert!(DEFAULT_LOG_FILTER.contains("mineopoly_cli=info"));
    }

    #[test]
    fn args_default_to_bundled_board() {
        let args = Args::parse_from(["mineopoly"]);
        assert_eq!(args.map, PathBuf::from("maps/board01.txt"));
        assert_eq!(args.rounds, 500);
        assert_eq!(args.matches, 1);
    }
}
