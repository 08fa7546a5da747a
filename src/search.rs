//! Depth-limited game tree search: minimax and alpha-beta.
//!
//! Both searches score positions from the point of view of the player to move
//! at the root (the *perspective* player). Terminal positions are worth
//! `+inf` if the perspective player has won and `-inf` if they have lost,
//! whatever depth remains; at the depth cutoff the external [`Evaluator`]
//! is asked instead.
//!
//! Every recursive step first consults the [`TimeGuard`]. Once it fires, the
//! resulting [`SearchTimeout`] propagates out of every frame with `?`, so an
//! interrupted search never produces a partial result.

use crate::board::{Board, Coord, Move, Player};
use crate::clock::{SearchTimeout, TimeGuard};
use crate::constants::NO_MOVE;
use crate::eval::Evaluator;

/// Outcome of a completed fixed-depth search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Best root move, or [`NO_MOVE`] if the root has no legal moves.
    pub best_move: Move,
    /// Value of `best_move` from the root player's point of view.
    pub score: f64,
    /// Number of `max_value`/`min_value` calls made.
    pub nodes: u64,
}

/// Fixed-depth minimax. Returns only the chosen move; see [`minimax_search`].
///
/// # Errors
/// [`SearchTimeout`] if the guard fires before the search completes.
pub fn minimax<E: Evaluator + ?Sized>(
    board: &Board,
    depth: usize,
    evaluator: &E,
    guard: &TimeGuard<'_>,
) -> Result<Move, SearchTimeout> {
    minimax_search(board, depth, evaluator, guard).map(|r| r.best_move)
}

/// Fixed-depth minimax over every legal move.
///
/// Picks the move whose `min_value` one ply down is largest; on ties the first
/// move in [`Board::legal_moves`] order wins. A depth of 0 behaves like 1.
///
/// # Errors
/// [`SearchTimeout`] if the guard fires before the search completes.
pub fn minimax_search<E: Evaluator + ?Sized>(
    board: &Board,
    depth: usize,
    evaluator: &E,
    guard: &TimeGuard<'_>,
) -> Result<SearchResult, SearchTimeout> {
    let mut search = Search::new(board, evaluator, guard);
    guard.check()?;

    let mut best: Option<(Coord, f64)> = None;
    for mv in board.legal_moves() {
        let score = search.min_value(&board.successor(mv), depth.saturating_sub(1))?;
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((mv, score));
        }
    }
    Ok(search.finish(board, best))
}

/// Fixed-depth alpha-beta. Returns only the chosen move; see
/// [`alphabeta_search`].
///
/// # Errors
/// [`SearchTimeout`] if the guard fires before the search completes.
pub fn alphabeta<E: Evaluator + ?Sized>(
    board: &Board,
    depth: usize,
    alpha: f64,
    beta: f64,
    evaluator: &E,
    guard: &TimeGuard<'_>,
) -> Result<Move, SearchTimeout> {
    alphabeta_search(board, depth, alpha, beta, evaluator, guard).map(|r| r.best_move)
}

/// Fixed-depth minimax with alpha-beta pruning.
///
/// Chooses the same move as [`minimax_search`] at the same depth. The root
/// walks moves in order and feeds the best score so far to each child as its
/// alpha bound; a later move replaces the current best only if it scores
/// strictly higher. Pass `f64::NEG_INFINITY` / `f64::INFINITY` for a full
/// window.
///
/// # Errors
/// [`SearchTimeout`] if the guard fires before the search completes.
pub fn alphabeta_search<E: Evaluator + ?Sized>(
    board: &Board,
    depth: usize,
    alpha: f64,
    beta: f64,
    evaluator: &E,
    guard: &TimeGuard<'_>,
) -> Result<SearchResult, SearchTimeout> {
    let mut search = Search::new(board, evaluator, guard);
    guard.check()?;

    let mut best: Option<(Coord, f64)> = None;
    for mv in board.legal_moves() {
        let running = best.map_or(alpha, |(_, s)| s.max(alpha));
        let score = search.ab_min_value(&board.successor(mv), depth.saturating_sub(1), running, beta)?;
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((mv, score));
        }
    }
    Ok(search.finish(board, best))
}

enum Node {
    /// Terminal or cutoff; the value is final.
    Leaf(f64),
    /// Moves still to expand.
    Interior(Vec<Coord>),
}

/// Per-call search context.
struct Search<'a, E: ?Sized> {
    evaluator: &'a E,
    guard: &'a TimeGuard<'a>,
    perspective: Player,
    nodes: u64,
}

impl<'a, E: Evaluator + ?Sized> Search<'a, E> {
    fn new(root: &Board, evaluator: &'a E, guard: &'a TimeGuard<'a>) -> Self {
        Self {
            evaluator,
            guard,
            perspective: root.active_player(),
            nodes: 0,
        }
    }

    fn finish(self, root: &Board, best: Option<(Coord, f64)>) -> SearchResult {
        let (best_move, score) = match best {
            Some((mv, score)) => (Some(mv), score),
            None => (NO_MOVE, self.terminal_value(root)),
        };
        SearchResult {
            best_move,
            score,
            nodes: self.nodes,
        }
    }

    /// Legal moves of the side to move; empty means the game is over.
    fn terminal_test(&self, board: &Board) -> Result<Vec<Coord>, SearchTimeout> {
        self.guard.check()?;
        Ok(board.legal_moves())
    }

    /// Value of a finished game: the side to move has lost.
    fn terminal_value(&self, board: &Board) -> f64 {
        if board.active_player() == self.perspective {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }
    }

    /// Shared prologue of every node: guard, terminal test, depth cutoff.
    fn enter(&mut self, board: &Board, depth: usize) -> Result<Node, SearchTimeout> {
        self.guard.check()?;
        self.nodes += 1;

        let moves = self.terminal_test(board)?;
        if moves.is_empty() {
            return Ok(Node::Leaf(self.terminal_value(board)));
        }
        if depth == 0 {
            return Ok(Node::Leaf(self.evaluator.score(board, self.perspective)));
        }
        Ok(Node::Interior(moves))
    }

    fn max_value(&mut self, board: &Board, depth: usize) -> Result<f64, SearchTimeout> {
        let moves = match self.enter(board, depth)? {
            Node::Leaf(value) => return Ok(value),
            Node::Interior(moves) => moves,
        };
        let mut v = f64::NEG_INFINITY;
        for mv in moves {
            v = v.max(self.min_value(&board.successor(mv), depth - 1)?);
        }
        Ok(v)
    }

    fn min_value(&mut self, board: &Board, depth: usize) -> Result<f64, SearchTimeout> {
        let moves = match self.enter(board, depth)? {
            Node::Leaf(value) => return Ok(value),
            Node::Interior(moves) => moves,
        };
        let mut v = f64::INFINITY;
        for mv in moves {
            v = v.min(self.max_value(&board.successor(mv), depth - 1)?);
        }
        Ok(v)
    }

    fn ab_max_value(&mut self, board: &Board, depth: usize, mut alpha: f64, beta: f64) -> Result<f64, SearchTimeout> {
        let moves = match self.enter(board, depth)? {
            Node::Leaf(value) => return Ok(value),
            Node::Interior(moves) => moves,
        };
        let mut v = f64::NEG_INFINITY;
        for mv in moves {
            v = v.max(self.ab_min_value(&board.successor(mv), depth - 1, alpha, beta)?);
            if v >= beta {
                return Ok(v);
            }
            alpha = alpha.max(v);
        }
        Ok(v)
    }

    fn ab_min_value(&mut self, board: &Board, depth: usize, alpha: f64, mut beta: f64) -> Result<f64, SearchTimeout> {
        let moves = match self.enter(board, depth)? {
            Node::Leaf(value) => return Ok(value),
            Node::Interior(moves) => moves,
        };
        let mut v = f64::INFINITY;
        for mv in moves {
            v = v.min(self.ab_max_value(&board.successor(mv), depth - 1, alpha, beta)?);
            if v <= alpha {
                return Ok(v);
            }
            beta = beta.min(v);
        }
        Ok(v)
    }
}
