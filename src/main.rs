use std::path::PathBuf;

use quoridor_rules::tournament::{Tournament, TournamentConfig};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Optional positional overrides: <games> <output.csv>
    let mut config = TournamentConfig::default();
    let mut args = std::env::args().skip(1);
    if let Some(games) = args.next() {
        match games.parse() {
            Ok(games) => config.games = games,
            Err(_) => warn!(%games, "ignoring non-numeric game count"),
        }
    }
    if let Some(output) = args.next() {
        config.output = PathBuf::from(output);
    }

    info!(
        games = config.games,
        max_turns = config.max_turns,
        "running Quoridor self-play tournament"
    );

    let mut tournament = Tournament::new(config);
    tournament.run_tournament();

    match tournament.write_results_to_csv(tournament.output()) {
        Ok(()) => info!(path = %tournament.output().display(), "tournament results saved"),
        Err(e) => error!("error writing results: {}", e),
    }
}
