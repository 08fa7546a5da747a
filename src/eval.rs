//! Heuristic evaluation of board states.
//!
//! The search is evaluator-agnostic: anything implementing [`Evaluator`]
//! can score leaves, including plain closures `Fn(&Board, Player) -> f64`.
//! [`Heuristic`] bundles the stock scoring strategies so they can be picked
//! by name from configuration.
//!
//! Every stock heuristic scores a lost position as `-inf` and a won position
//! as `+inf` from the point of view of the player asked about.

use std::fmt;

use clap::ValueEnum;

use crate::board::{Board, Coord, Player};

/// Weight of the centre-distance penalty in [`Heuristic::CenterDistance`].
const CENTER_WEIGHT: f64 = 0.5;

/// Weight of the opponent-distance penalty in [`Heuristic::OpponentDistance`].
const CHASE_WEIGHT: f64 = 0.5;

/// Scores a board from one player's point of view. Higher is better for
/// that player.
pub trait Evaluator {
    fn score(&self, board: &Board, player: Player) -> f64;
}

impl<F> Evaluator for F
where
    F: Fn(&Board, Player) -> f64,
{
    fn score(&self, board: &Board, player: Player) -> f64 {
        self(board, player)
    }
}

/// Stock scoring strategies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Heuristic {
    /// Zero for every non-terminal state.
    Null,
    /// Number of moves available to the player.
    OpenMoves,
    /// Own move count minus the opponent's.
    #[default]
    Improved,
    /// Own move count minus twice the opponent's.
    Aggressive,
    /// Squared distance of the player from the board centre.
    Center,
    /// [`Heuristic::Improved`] with a penalty for drifting away from the centre.
    CenterDistance,
    /// [`Heuristic::Improved`] with a penalty for distance to the opponent.
    OpponentDistance,
}

impl Heuristic {
    pub const ALL: [Heuristic; 7] = [
        Heuristic::Null,
        Heuristic::OpenMoves,
        Heuristic::Improved,
        Heuristic::Aggressive,
        Heuristic::Center,
        Heuristic::CenterDistance,
        Heuristic::OpponentDistance,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Null => "null",
            Heuristic::OpenMoves => "open_moves",
            Heuristic::Improved => "improved",
            Heuristic::Aggressive => "aggressive",
            Heuristic::Center => "center",
            Heuristic::CenterDistance => "center_distance",
            Heuristic::OpponentDistance => "opponent_distance",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Evaluator for Heuristic {
    fn score(&self, board: &Board, player: Player) -> f64 {
        if board.is_loser(player) {
            return f64::NEG_INFINITY;
        }
        if board.is_winner(player) {
            return f64::INFINITY;
        }

        match self {
            Heuristic::Null => 0.0,
            Heuristic::OpenMoves => board.legal_moves_for(player).len() as f64,
            Heuristic::Improved => move_difference(board, player, 1.0),
            Heuristic::Aggressive => move_difference(board, player, 2.0),
            Heuristic::Center => board
                .player_location(player)
                .map_or(0.0, |cell| center_distance_sq(board, cell)),
            Heuristic::CenterDistance => {
                let penalty = board
                    .player_location(player)
                    .map_or(0.0, |cell| center_distance_sq(board, cell) / max_center_distance_sq(board));
                move_difference(board, player, 1.0) - CENTER_WEIGHT * penalty
            }
            Heuristic::OpponentDistance => {
                let own = board.player_location(player);
                let opp = board.player_location(player.opponent());
                let penalty = match (own, opp) {
                    (Some(a), Some(b)) => distance_sq(a, b) / diagonal_sq(board),
                    _ => 0.0,
                };
                move_difference(board, player, 1.0) - CHASE_WEIGHT * penalty
            }
        }
    }
}

/// `own - weight * opponent` legal move counts.
fn move_difference(board: &Board, player: Player, weight: f64) -> f64 {
    let own = board.legal_moves_for(player).len() as f64;
    let opp = board.legal_moves_for(player.opponent()).len() as f64;
    own - weight * opp
}

/// Squared distance from `cell` to the point `(height / 2, width / 2)`.
pub fn center_distance_sq(board: &Board, (row, col): Coord) -> f64 {
    let h = board.height() as f64 / 2.0;
    let w = board.width() as f64 / 2.0;
    (h - row as f64).powi(2) + (w - col as f64).powi(2)
}

/// Largest [`center_distance_sq`] on this board (reached at a corner).
fn max_center_distance_sq(board: &Board) -> f64 {
    let h = board.height() as f64 / 2.0;
    let w = board.width() as f64 / 2.0;
    (h * h + w * w).max(1.0)
}

fn distance_sq(a: Coord, b: Coord) -> f64 {
    let dr = a.0 as f64 - b.0 as f64;
    let dc = a.1 as f64 - b.1 as f64;
    dr * dr + dc * dc
}

fn diagonal_sq(board: &Board) -> f64 {
    let h = board.height() as f64;
    let w = board.width() as f64;
    (h * h + w * w).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn midgame() -> Board {
        let mut board = Board::new();
        board.apply_move((2, 3)).unwrap();
        board.apply_move((0, 5)).unwrap();
        board
    }

    #[test]
    fn test_closures_are_evaluators() {
        let eval = |_: &Board, _: Player| 4.5;
        assert_eq!(eval.score(&Board::new(), Player::One), 4.5);
    }

    #[test]
    fn test_open_moves_and_improved() {
        let board = midgame();
        let own = board.legal_moves_for(Player::One).len() as f64;
        let opp = board.legal_moves_for(Player::Two).len() as f64;
        assert_eq!(Heuristic::OpenMoves.score(&board, Player::One), own);
        assert_eq!(Heuristic::Improved.score(&board, Player::One), own - opp);
        assert_eq!(Heuristic::Improved.score(&board, Player::Two), opp - own);
        assert_eq!(Heuristic::Aggressive.score(&board, Player::One), own - 2.0 * opp);
    }

    #[test]
    fn test_terminal_scores_are_infinite() {
        // 1x2 board: after both players are placed, player one cannot move.
        let mut board = Board::with_size(2, 1);
        board.apply_move((0, 0)).unwrap();
        board.apply_move((0, 1)).unwrap();
        assert!(board.is_terminal());
        for h in Heuristic::ALL {
            assert_eq!(h.score(&board, Player::One), f64::NEG_INFINITY, "{h}");
            assert_eq!(h.score(&board, Player::Two), f64::INFINITY, "{h}");
        }
    }

    #[test]
    fn test_center_distance() {
        let board = Board::new();
        assert_eq!(center_distance_sq(&board, (3, 3)), 0.5);
        assert_eq!(center_distance_sq(&board, (0, 0)), 3.5 * 3.5 * 2.0);

        let board = midgame();
        assert_eq!(Heuristic::Center.score(&board, Player::One), 1.5 * 1.5 + 0.5 * 0.5);
    }

    #[test]
    fn test_null_is_zero_when_not_terminal() {
        assert_eq!(Heuristic::Null.score(&midgame(), Player::Two), 0.0);
    }

    #[test]
    fn test_distance_heuristics_penalise_distance() {
        let board = midgame();
        let improved = Heuristic::Improved.score(&board, Player::One);
        assert!(Heuristic::CenterDistance.score(&board, Player::One) < improved);
        assert!(Heuristic::OpponentDistance.score(&board, Player::One) < improved);
    }
}
