//! Game driver: alternates two agents on an authoritative board.
//!
//! Each turn the active agent gets a fresh [`TurnClock`] and a copy of the
//! board. The game ends when the player to move has no legal moves, returns
//! no move, returns an illegal move, or answers after its clock expired.

use std::fmt;

use log::{info, warn};

use crate::agent::Agent;
use crate::board::{Board, Coord, Player};
use crate::clock::TurnClock;
use crate::constants::TIME_LIMIT;

/// Why the game ended. The loser is always the player who was to move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The player to move had no legal moves.
    NoLegalMoves,
    /// The agent returned no move while legal moves remained.
    Forfeit,
    /// The agent returned a move that is not legal.
    IllegalMove,
    /// The agent answered after its clock ran out.
    Timeout,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::NoLegalMoves => "no legal moves",
            Outcome::Forfeit => "forfeit",
            Outcome::IllegalMove => "illegal move",
            Outcome::Timeout => "timeout",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug)]
pub struct GameResult {
    pub winner: Player,
    pub outcome: Outcome,
    /// Every move applied, starting from the initial board.
    pub history: Vec<Coord>,
    /// Board at the end of the game.
    pub board: Board,
}

/// A game between two agents.
pub struct Game {
    board: Board,
    agents: [Box<dyn Agent>; 2],
    time_limit: u64,
}

impl Game {
    /// New game on the default board. `first` plays as [`Player::One`].
    pub fn new(first: Box<dyn Agent>, second: Box<dyn Agent>) -> Self {
        Self::from_board(Board::new(), first, second)
    }

    /// Continue from an existing position (e.g. a random opening).
    pub fn from_board(board: Board, first: Box<dyn Agent>, second: Box<dyn Agent>) -> Self {
        Self {
            board,
            agents: [first, second],
            time_limit: TIME_LIMIT,
        }
    }

    /// Per-turn time limit in milliseconds.
    pub fn with_time_limit(mut self, time_limit: u64) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Play until the game ends.
    pub fn play(&mut self) -> GameResult {
        let outcome = loop {
            let active = self.board.active_player();
            if self.board.is_terminal() {
                break Outcome::NoLegalMoves;
            }

            let snapshot = self.board.clone();
            let clock = TurnClock::start(self.time_limit);
            let agent = &mut self.agents[active.index()];
            let mv = agent.get_move(&snapshot, &|| clock.time_left());

            if clock.expired() {
                warn!("{active} ({}) timed out", agent.name());
                break Outcome::Timeout;
            }
            let Some(cell) = mv else {
                warn!("{active} ({}) forfeited with moves left", agent.name());
                break Outcome::Forfeit;
            };
            if let Err(e) = self.board.apply_move(cell) {
                warn!("{} returned {e}", agent.name());
                break Outcome::IllegalMove;
            }
        };

        let winner = self.board.inactive_player();
        info!(
            "{winner} wins by {outcome} after {} plies",
            self.board.move_count()
        );
        GameResult {
            winner,
            outcome,
            history: self.board.move_history().to_vec(),
            board: self.board.clone(),
        }
    }
}
