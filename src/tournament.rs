//! Head-to-head matches between agent configurations.
//!
//! A match is a pair of games starting from the same random opening, once
//! with each agent moving first, so neither side benefits from a lucky
//! opening or from the first-move advantage.

use log::info;

use crate::agent::AgentConfig;
use crate::board::{Board, Player};
use crate::constants::{NUM_MATCHES, OPENING_PLIES, TIME_LIMIT};
use crate::game::{Game, GameResult, Outcome};

/// Tournament parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TournamentSettings {
    pub width: usize,
    pub height: usize,
    /// Match pairs per pairing.
    pub num_matches: usize,
    /// Per-turn time limit in milliseconds.
    pub time_limit: u64,
    /// Random plies played before the agents take over.
    pub opening_plies: usize,
    pub seed: u64,
}

impl Default for TournamentSettings {
    fn default() -> Self {
        let board = Board::new();
        Self {
            width: board.width(),
            height: board.height(),
            num_matches: NUM_MATCHES,
            time_limit: TIME_LIMIT,
            opening_plies: OPENING_PLIES,
            seed: 0,
        }
    }
}

/// Results of one pairing, from the point of view of `agent`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchReport {
    pub agent: String,
    pub opponent: String,
    pub wins: usize,
    pub losses: usize,
    /// Games the agent lost by timeout, forfeit or illegal move.
    pub agent_faults: usize,
    /// Games the opponent lost by timeout, forfeit or illegal move.
    pub opponent_faults: usize,
}

impl MatchReport {
    pub fn games(&self) -> usize {
        self.wins + self.losses
    }

    /// Fraction of games won, in `[0, 1]`.
    pub fn win_rate(&self) -> f64 {
        if self.games() == 0 {
            0.0
        } else {
            self.wins as f64 / self.games() as f64
        }
    }

    fn record(&mut self, result: &GameResult, agent_seat: Player) {
        let faulted = result.outcome != Outcome::NoLegalMoves;
        if result.winner == agent_seat {
            self.wins += 1;
            if faulted {
                self.opponent_faults += 1;
            }
        } else {
            self.losses += 1;
            if faulted {
                self.agent_faults += 1;
            }
        }
    }
}

/// A board with `plies` random legal moves applied.
pub fn random_opening(width: usize, height: usize, plies: usize, rng: &mut fastrand::Rng) -> Board {
    let mut board = Board::with_size(width, height);
    for _ in 0..plies {
        let moves = board.legal_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.usize(..moves.len())];
        // Drawn from legal_moves, so this cannot fail.
        board = board.successor(mv);
    }
    board
}

/// Play `settings.num_matches` match pairs between `agent` and `opponent`.
pub fn play_matches(agent: &AgentConfig, opponent: &AgentConfig, settings: &TournamentSettings) -> MatchReport {
    let mut rng = fastrand::Rng::with_seed(settings.seed);
    let mut report = MatchReport {
        agent: agent.to_string(),
        opponent: opponent.to_string(),
        ..MatchReport::default()
    };

    for round in 0..settings.num_matches {
        let opening = random_opening(settings.width, settings.height, settings.opening_plies, &mut rng);
        for agent_seat in [Player::One, Player::Two] {
            let a = agent.build(rng.u64(..));
            let b = opponent.build(rng.u64(..));
            let (first, second) = match agent_seat {
                Player::One => (a, b),
                Player::Two => (b, a),
            };
            let result = Game::from_board(opening.clone(), first, second)
                .with_time_limit(settings.time_limit)
                .play();
            report.record(&result, agent_seat);
        }
        info!(
            "round {}: {} vs {}: {}-{}",
            round + 1,
            report.agent,
            report.opponent,
            report.wins,
            report.losses
        );
    }
    report
}

/// Play every agent in `agents` against every agent in `opponents`.
pub fn round_robin(
    agents: &[AgentConfig],
    opponents: &[AgentConfig],
    settings: &TournamentSettings,
) -> Vec<Vec<MatchReport>> {
    agents
        .iter()
        .map(|agent| {
            opponents
                .iter()
                .map(|opponent| play_matches(agent, opponent, settings))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentKind;
    use crate::eval::Heuristic;

    #[test]
    fn test_random_opening_is_reproducible() {
        let a = random_opening(7, 7, 2, &mut fastrand::Rng::with_seed(9));
        let b = random_opening(7, 7, 2, &mut fastrand::Rng::with_seed(9));
        assert_eq!(a, b);
        assert_eq!(a.move_count(), 2);
        assert_eq!(a.active_player(), Player::One);
    }

    #[test]
    fn test_report_win_rate() {
        let mut report = MatchReport::default();
        assert_eq!(report.win_rate(), 0.0);
        report.wins = 3;
        report.losses = 1;
        assert_eq!(report.games(), 4);
        assert_eq!(report.win_rate(), 0.75);
    }

    #[test]
    fn test_play_matches_counts_every_game() {
        let random = AgentConfig::new(AgentKind::Random, Heuristic::Null);
        let greedy = AgentConfig::new(AgentKind::Greedy, Heuristic::Improved);
        let settings = TournamentSettings {
            width: 5,
            height: 5,
            num_matches: 3,
            seed: 42,
            ..TournamentSettings::default()
        };
        let report = play_matches(&greedy, &random, &settings);
        assert_eq!(report.games(), 6);
        assert_eq!(report.agent, "Greedy_improved");
        assert_eq!(report.opponent, "Random");
        // Neither baseline can time out, forfeit or play illegally.
        assert_eq!(report.agent_faults + report.opponent_faults, 0);
    }

    #[test]
    fn test_round_robin_shape() {
        let random = AgentConfig::new(AgentKind::Random, Heuristic::Null);
        let settings = TournamentSettings {
            width: 4,
            height: 4,
            num_matches: 1,
            ..TournamentSettings::default()
        };
        let table = round_robin(&[random, random], &[random], &settings);
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].len(), 1);
        assert_eq!(table[1][0].games(), 2);
    }
}
