//! Self-play tournament between the built-in strategies.

use std::path::{Path, PathBuf};

use csv::Writer;
use tracing::{info, warn};

use crate::game::{Player, Quoridor};
use crate::strategy::{strategy_by_name, Strategy};

pub const STRATEGY_NAMES: [&str; 3] = ["Greedy", "GreedyShuffled", "ShortestPath"];

#[derive(Debug, Clone)]
pub struct TournamentConfig {
    /// Games per pairing; the strategies alternate playing as player 1.
    pub games: usize,
    /// Turns (both sides counted) before a game is scored as a draw.
    pub max_turns: usize,
    /// Seed for the shuffled strategies, offset per game.
    pub seed: u64,
    pub output: PathBuf,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        TournamentConfig {
            games: 10,
            max_turns: 300,
            seed: 42,
            output: PathBuf::from("tournament_results.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentResult {
    pub strategy1: String,
    pub strategy2: String,
    pub strategy1_wins: usize,
    pub strategy2_wins: usize,
    pub draws: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

pub struct Tournament {
    config: TournamentConfig,
    results: Vec<TournamentResult>,
}

impl Tournament {
    pub fn new(config: TournamentConfig) -> Self {
        Tournament {
            config,
            results: Vec::new(),
        }
    }

    pub fn results(&self) -> &[TournamentResult] {
        &self.results
    }

    /// Plays `games` games between two named strategies and records the tally.
    /// Returns `false` if either name is unknown.
    pub fn run_match(&mut self, strategy1_name: &str, strategy2_name: &str) -> bool {
        let mut s1_wins = 0;
        let mut s2_wins = 0;
        let mut draws = 0;

        for game_num in 0..self.config.games {
            let seed = self.config.seed.wrapping_add(game_num as u64);
            let (Some(mut first), Some(mut second)) = (
                strategy_by_name(strategy1_name, seed),
                strategy_by_name(strategy2_name, seed.wrapping_add(1)),
            ) else {
                return false;
            };

            // Alternate who plays player 1
            let s1_side = if game_num % 2 == 0 { Player::Player1 } else { Player::Player2 };
            let (p1, p2): (&mut dyn Strategy, &mut dyn Strategy) = if s1_side == Player::Player1 {
                (first.as_mut(), second.as_mut())
            } else {
                (second.as_mut(), first.as_mut())
            };

            match play_game(p1, p2, self.config.max_turns) {
                GameOutcome::Winner(player) if player == s1_side => s1_wins += 1,
                GameOutcome::Winner(_) => s2_wins += 1,
                GameOutcome::Draw => draws += 1,
            }
        }

        info!(strategy1_name, strategy2_name, s1_wins, s2_wins, draws, "match finished");
        self.results.push(TournamentResult {
            strategy1: strategy1_name.to_string(),
            strategy2: strategy2_name.to_string(),
            strategy1_wins: s1_wins,
            strategy2_wins: s2_wins,
            draws,
        });
        true
    }

    /// Every ordered pairing of distinct built-in strategies.
    pub fn run_tournament(&mut self) {
        for i in 0..STRATEGY_NAMES.len() {
            for j in 0..STRATEGY_NAMES.len() {
                if i != j {
                    self.run_match(STRATEGY_NAMES[i], STRATEGY_NAMES[j]);
                }
            }
        }
    }

    pub fn write_results_to_csv(&self, filename: &Path) -> std::io::Result<()> {
        let mut writer = Writer::from_path(filename)?;

        writer.write_record(["Strategy", "Opponent", "Wins", "Draws", "Win %"])?;

        let games = self.config.games.max(1) as f64;
        for result in &self.results {
            for (strategy, opponent, wins) in [
                (&result.strategy1, &result.strategy2, result.strategy1_wins),
                (&result.strategy2, &result.strategy1, result.strategy2_wins),
            ] {
                let wins_field = wins.to_string();
                let draws_field = result.draws.to_string();
                let percent_field = format!("{:.2}", wins as f64 / games * 100.0);
                writer.write_record([
                    strategy.as_str(),
                    opponent.as_str(),
                    wins_field.as_str(),
                    draws_field.as_str(),
                    percent_field.as_str(),
                ])?;
            }
        }

        writer.flush()?;
        Ok(())
    }

    pub fn output(&self) -> &Path {
        &self.config.output
    }
}

/// Plays one game from the standard start, player 1 moving first.
///
/// A side whose strategy fails to produce a legal action forfeits.
pub fn play_game(
    player1: &mut dyn Strategy,
    player2: &mut dyn Strategy,
    max_turns: usize,
) -> GameOutcome {
    let mut game = Quoridor::new(player1.name(), player2.name());
    let mut active = Player::Player1;

    for _ in 0..max_turns {
        let strategy: &mut dyn Strategy = match active {
            Player::Player1 => &mut *player1,
            Player::Player2 => &mut *player2,
        };
        if let Err(err) = game.play_with(active.index(), strategy) {
            warn!(player = %active, %err, "forfeit");
            return GameOutcome::Winner(active.opponent());
        }
        if let Some(winner) = game.winner() {
            return GameOutcome::Winner(winner);
        }
        active = active.opponent();
    }

    GameOutcome::Draw
}
