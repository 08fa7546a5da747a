//! Game-playing agents.
//!
//! An [`Agent`] is asked for a move once per turn and is given a probe for the
//! milliseconds left on its clock. Returning [`NO_MOVE`] forfeits the game.
//!
//! - [`MinimaxPlayer`] runs fixed-depth minimax.
//! - [`AlphaBetaPlayer`] runs iterative deepening alpha-beta until the clock
//!   is nearly out and plays the result of the deepest completed iteration.
//! - [`GreedyPlayer`] and [`RandomPlayer`] are cheap baselines.

use std::fmt;

use clap::ValueEnum;
use log::debug;

use crate::board::{Board, Move};
use crate::clock::{SearchTimeout, TimeGuard};
use crate::constants::{DEFAULT_SEARCH_DEPTH, NO_MOVE, TIMER_THRESHOLD};
use crate::eval::{Evaluator, Heuristic};
use crate::search::{alphabeta_search, minimax};

/// Something that can choose moves.
pub trait Agent {
    /// Short label used in logs and reports.
    fn name(&self) -> String;

    /// Choose a move for the active player of `board`.
    ///
    /// `time_left` returns the milliseconds remaining on this turn; the game
    /// driver forfeits an agent that returns after it goes negative.
    fn get_move(&mut self, board: &Board, time_left: &dyn Fn() -> f64) -> Move;
}

// =============================================================================
// Minimax
// =============================================================================

/// Fixed-depth minimax player.
pub struct MinimaxPlayer<E = Heuristic> {
    pub search_depth: usize,
    pub evaluator: E,
    pub timer_threshold: f64,
}

impl<E: Evaluator> MinimaxPlayer<E> {
    pub fn new(search_depth: usize, evaluator: E) -> Self {
        Self {
            search_depth,
            evaluator,
            timer_threshold: TIMER_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, timer_threshold: f64) -> Self {
        self.timer_threshold = timer_threshold;
        self
    }
}

impl Default for MinimaxPlayer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEPTH, Heuristic::default())
    }
}

impl<E: Evaluator> Agent for MinimaxPlayer<E> {
    fn name(&self) -> String {
        format!("minimax(d={})", self.search_depth)
    }

    /// Plays the depth-`search_depth` minimax move, or [`NO_MOVE`] if the
    /// search does not finish in time.
    fn get_move(&mut self, board: &Board, time_left: &dyn Fn() -> f64) -> Move {
        let guard = TimeGuard::with_threshold(time_left, self.timer_threshold);
        match minimax(board, self.search_depth, &self.evaluator, &guard) {
            Ok(mv) => mv,
            Err(SearchTimeout) => {
                debug!("{}: timed out at depth {}", self.name(), self.search_depth);
                NO_MOVE
            }
        }
    }
}

// =============================================================================
// Iterative deepening alpha-beta
// =============================================================================

/// Iterative deepening alpha-beta player.
pub struct AlphaBetaPlayer<E = Heuristic> {
    pub evaluator: E,
    pub timer_threshold: f64,
    /// Deepest iteration completed during the last `get_move` (0 if none).
    completed_depth: usize,
}

impl<E: Evaluator> AlphaBetaPlayer<E> {
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            timer_threshold: TIMER_THRESHOLD,
            completed_depth: 0,
        }
    }

    pub fn with_threshold(mut self, timer_threshold: f64) -> Self {
        self.timer_threshold = timer_threshold;
        self
    }

    /// Deepest fully searched depth on the last call to `get_move`.
    pub fn completed_depth(&self) -> usize {
        self.completed_depth
    }
}

impl Default for AlphaBetaPlayer {
    fn default() -> Self {
        Self::new(Heuristic::default())
    }
}

impl<E: Evaluator> Agent for AlphaBetaPlayer<E> {
    fn name(&self) -> String {
        "alphabeta".to_string()
    }

    /// Search depth 1, 2, 3, ... and keep the move of the last depth that
    /// finished. The in-flight depth is discarded when the guard fires.
    ///
    /// Stops early once a depth proves the game (score of `+inf` or `-inf`),
    /// or once the depth exceeds the number of open cells.
    fn get_move(&mut self, board: &Board, time_left: &dyn Fn() -> f64) -> Move {
        let guard = TimeGuard::with_threshold(time_left, self.timer_threshold);
        let max_depth = board.blank_spaces().len().max(1);
        let mut best_move = NO_MOVE;
        self.completed_depth = 0;

        for depth in 1..=max_depth {
            match alphabeta_search(board, depth, f64::NEG_INFINITY, f64::INFINITY, &self.evaluator, &guard) {
                Ok(result) => {
                    debug!(
                        "depth {depth}: move {:?} score {} nodes {}",
                        result.best_move, result.score, result.nodes
                    );
                    best_move = result.best_move;
                    self.completed_depth = depth;
                    if result.score.is_infinite() {
                        break;
                    }
                }
                Err(SearchTimeout) => {
                    debug!("timed out during depth {depth}, keeping depth {}", depth - 1);
                    break;
                }
            }
        }
        best_move
    }
}

// =============================================================================
// Baselines
// =============================================================================

/// Plays the move whose successor scores best under the evaluator, one ply
/// deep with no search.
pub struct GreedyPlayer<E = Heuristic> {
    pub evaluator: E,
}

impl<E: Evaluator> GreedyPlayer<E> {
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }
}

impl<E: Evaluator> Agent for GreedyPlayer<E> {
    fn name(&self) -> String {
        "greedy".to_string()
    }

    fn get_move(&mut self, board: &Board, _time_left: &dyn Fn() -> f64) -> Move {
        let me = board.active_player();
        let mut best: Move = NO_MOVE;
        let mut best_score = f64::NEG_INFINITY;
        for mv in board.legal_moves() {
            let score = self.evaluator.score(&board.successor(mv), me);
            if best.is_none() || score > best_score {
                best = Some(mv);
                best_score = score;
            }
        }
        best
    }
}

/// Plays a uniformly random legal move.
pub struct RandomPlayer {
    rng: fastrand::Rng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomPlayer {
    fn name(&self) -> String {
        "random".to_string()
    }

    fn get_move(&mut self, board: &Board, _time_left: &dyn Fn() -> f64) -> Move {
        let moves = board.legal_moves();
        if moves.is_empty() {
            return NO_MOVE;
        }
        Some(moves[self.rng.usize(..moves.len())])
    }
}

// =============================================================================
// Configuration
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum AgentKind {
    Random,
    Greedy,
    Minimax,
    #[value(name = "alphabeta")]
    AlphaBeta,
}

/// Everything needed to build an agent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AgentConfig {
    pub kind: AgentKind,
    pub heuristic: Heuristic,
    /// Only used by [`AgentKind::Minimax`].
    pub search_depth: usize,
    /// Only used by the searching agents.
    pub timer_threshold: f64,
}

impl AgentConfig {
    pub fn new(kind: AgentKind, heuristic: Heuristic) -> Self {
        Self {
            kind,
            heuristic,
            search_depth: DEFAULT_SEARCH_DEPTH,
            timer_threshold: TIMER_THRESHOLD,
        }
    }

    /// Build the agent. `seed` only affects [`AgentKind::Random`].
    pub fn build(&self, seed: u64) -> Box<dyn Agent> {
        match self.kind {
            AgentKind::Random => Box::new(RandomPlayer::with_seed(seed)),
            AgentKind::Greedy => Box::new(GreedyPlayer::new(self.heuristic)),
            AgentKind::Minimax => Box::new(
                MinimaxPlayer::new(self.search_depth, self.heuristic).with_threshold(self.timer_threshold),
            ),
            AgentKind::AlphaBeta => {
                Box::new(AlphaBetaPlayer::new(self.heuristic).with_threshold(self.timer_threshold))
            }
        }
    }
}

impl fmt::Display for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AgentKind::Random => write!(f, "Random"),
            AgentKind::Greedy => write!(f, "Greedy_{}", self.heuristic),
            AgentKind::Minimax => write!(f, "MM_{}_d{}", self.heuristic, self.search_depth),
            AgentKind::AlphaBeta => write!(f, "AB_{}", self.heuristic),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player;
    use std::cell::Cell;

    fn plenty() -> f64 {
        1.0e9
    }

    fn opened() -> Board {
        let mut board = Board::new();
        board.apply_move((2, 3)).unwrap();
        board.apply_move((0, 5)).unwrap();
        board
    }

    #[test]
    fn test_minimax_player_returns_legal_move() {
        let board = opened();
        let mut player: MinimaxPlayer = MinimaxPlayer::default();
        let mv = player.get_move(&board, &plenty).unwrap();
        assert!(board.legal_moves().contains(&mv));
    }

    #[test]
    fn test_minimax_player_forfeits_on_timeout() {
        let board = opened();
        let mut player: MinimaxPlayer = MinimaxPlayer::default();
        assert_eq!(player.get_move(&board, &|| 1.0), NO_MOVE);
    }

    #[test]
    fn test_alphabeta_player_without_time_returns_no_move() {
        let board = opened();
        let mut player: AlphaBetaPlayer = AlphaBetaPlayer::default();
        assert_eq!(player.get_move(&board, &|| 0.0), NO_MOVE);
        assert_eq!(player.completed_depth(), 0);
    }

    #[test]
    fn test_alphabeta_player_keeps_last_completed_depth() {
        let board = opened();
        // Enough probes for a few shallow depths, then the clock runs out.
        let probes = Cell::new(0u32);
        let probe = || {
            probes.set(probes.get() + 1);
            if probes.get() > 2_000 { 0.0 } else { 1_000.0 }
        };
        let mut player: AlphaBetaPlayer = AlphaBetaPlayer::default();
        let mv = player.get_move(&board, &probe);

        let depth = player.completed_depth();
        assert!(depth >= 1);
        let guard = TimeGuard::unlimited();
        let expected = alphabeta_search(&board, depth, f64::NEG_INFINITY, f64::INFINITY, &Heuristic::Improved, &guard)
            .unwrap()
            .best_move;
        assert_eq!(mv, expected);
    }

    #[test]
    fn test_alphabeta_player_stops_on_proven_win() {
        let mut board = Board::with_size(4, 1);
        board.apply_move((0, 0)).unwrap();
        board.apply_move((0, 3)).unwrap();
        let mut player: AlphaBetaPlayer = AlphaBetaPlayer::default();
        assert_eq!(player.get_move(&board, &plenty), Some((0, 2)));
        assert!(player.completed_depth() <= 2);
    }

    #[test]
    fn test_greedy_player_uses_evaluator() {
        let board = opened();
        // Reward moving as far down the board as possible.
        let eval = |b: &Board, p: Player| b.player_location(p).map_or(0.0, |(r, _)| r as f64);
        let mut player = GreedyPlayer::new(eval);
        assert_eq!(player.get_move(&board, &plenty), Some((6, 3)));
    }

    #[test]
    fn test_random_player_is_seeded() {
        let board = Board::new();
        let mut a = RandomPlayer::with_seed(7);
        let mut b = RandomPlayer::with_seed(7);
        for _ in 0..10 {
            let mv = a.get_move(&board, &plenty);
            assert_eq!(mv, b.get_move(&board, &plenty));
            assert!(board.legal_moves().contains(&mv.unwrap()));
        }
    }

    #[test]
    fn test_config_builds_named_agents() {
        let mut config = AgentConfig::new(AgentKind::Minimax, Heuristic::OpenMoves);
        config.search_depth = 2;
        assert_eq!(config.to_string(), "MM_open_moves_d2");
        assert_eq!(config.build(0).name(), "minimax(d=2)");
        assert_eq!(AgentConfig::new(AgentKind::AlphaBeta, Heuristic::Improved).to_string(), "AB_improved");
        assert_eq!(AgentConfig::new(AgentKind::Random, Heuristic::Null).build(1).name(), "random");
    }
}
