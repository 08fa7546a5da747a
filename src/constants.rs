//! Constants for board geometry, search timing, and tournament defaults.
//!
//! These are the defaults the CLI falls back to. Everything that depends on
//! the board size (legal moves, centre tables) takes the size from the
//! [`Board`](crate::board::Board) itself, so non-default boards work without
//! recompiling.

use crate::board::Move;

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board width.
pub const DEFAULT_WIDTH: usize = 7;

/// Default board height.
pub const DEFAULT_HEIGHT: usize = 7;

/// Queen directions as `(d_row, d_col)`.
/// Order: N, NE, E, SE, S, SW, W, NW
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, 0),  // North
    (-1, 1),  // NE
    (0, 1),   // East
    (1, 1),   // SE
    (1, 0),   // South
    (1, -1),  // SW
    (0, -1),  // West
    (-1, -1), // NW
];

// =============================================================================
// Special Move Values
// =============================================================================

/// Returned by an agent that has no legal move (or ran out of time before
/// finishing its first search). The game driver treats it as a forfeit.
pub const NO_MOVE: Move = None;

// =============================================================================
// Search Parameters
// =============================================================================

/// Milliseconds left on the turn clock below which search aborts.
///
/// Must leave enough room for the search to unwind and return before the
/// real deadline.
pub const TIMER_THRESHOLD: f64 = 10.0;

/// Default depth for fixed-depth (minimax) players.
pub const DEFAULT_SEARCH_DEPTH: usize = 3;

// =============================================================================
// Game / Tournament Defaults
// =============================================================================

/// Per-turn time limit in milliseconds.
pub const TIME_LIMIT: u64 = 150;

/// Number of match pairs played between two agents in a tournament.
pub const NUM_MATCHES: usize = 5;

/// Plies played at random before a tournament match starts.
pub const OPENING_PLIES: usize = 2;
