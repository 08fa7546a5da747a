//! Isolation-Agent: time-bounded adversarial search for the game of Isolation.
//!
//! Two players each occupy a cell and move like chess queens; every cell
//! visited is blocked for good, and the last player able to move wins.
//! This crate provides the board, minimax and alpha-beta search, an
//! iterative-deepening agent bounded by a per-turn clock, pluggable
//! heuristics, and a small game/tournament driver around them.
//!
//! ## Modules
//!
//! - [`constants`] - Board defaults, timing and tournament parameters
//! - [`board`] - Board state, legal moves, forecasting
//! - [`clock`] - Time budget guard and turn clock
//! - [`eval`] - Evaluator trait and stock heuristics
//! - [`search`] - Minimax and alpha-beta search
//! - [`agent`] - Minimax, iterative-deepening and baseline players
//! - [`game`] - Game driver
//! - [`tournament`] - Head-to-head match runner
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//!
//! use isolation_agent::agent::{Agent, AlphaBetaPlayer};
//! use isolation_agent::board::Board;
//! use isolation_agent::eval::Heuristic;
//!
//! let mut board = Board::new();
//! board.apply_move((2, 3)).unwrap();
//! board.apply_move((0, 5)).unwrap();
//!
//! // A simulated clock that loses one millisecond per probe.
//! let remaining = Cell::new(5_000.0);
//! let time_left = || {
//!     remaining.set(remaining.get() - 1.0);
//!     remaining.get()
//! };
//!
//! let mut player = AlphaBetaPlayer::new(Heuristic::Improved);
//! let best = player.get_move(&board, &time_left);
//! assert!(board.legal_moves().contains(&best.unwrap()));
//! ```

pub mod agent;
pub mod board;
pub mod clock;
pub mod constants;
pub mod eval;
pub mod game;
pub mod search;
pub mod tournament;
