//! Isolation board state.
//!
//! Each player occupies one cell and moves like a chess queen. Every cell a
//! player lands on (including the first placement) becomes blocked for the
//! rest of the game. The player to move with no legal moves loses.
//!
//! A [`Board`] is a plain value: [`Board::forecast_move`] returns an
//! independent successor and never touches the receiver, which is what the
//! search relies on when it forecasts every child from the same parent.

use std::fmt;

use thiserror::Error;

use crate::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH, DIRECTIONS};

/// A cell on the board as `(row, col)`, zero-indexed from the top-left.
pub type Coord = (usize, usize);

/// A move returned by an agent. `None` means "no move" (forfeit).
pub type Move = Option<Coord>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The other player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    fn symbol(self) -> char {
        match self {
            Player::One => '1',
            Player::Two => '2',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.symbol())
    }
}

/// Error returned when a move is not in the active player's legal move set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("illegal move ({row}, {col}) for {player}")]
    IllegalMove { player: Player, row: usize, col: usize },
}

/// The Isolation board.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    /// Row-major, `true` = blocked.
    blocked: Vec<bool>,
    locations: [Option<Coord>; 2],
    active: Player,
    history: Vec<Coord>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Empty board of the default size (7x7). Player one moves first.
    pub fn new() -> Self {
        Self::with_size(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    /// Empty board of the given size.
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            blocked: vec![false; width * height],
            locations: [None, None],
            active: Player::One,
            history: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn idx(&self, (row, col): Coord) -> usize {
        row * self.width + col
    }

    /// `true` if `(row, col)` is on the board.
    #[inline]
    pub fn in_bounds(&self, (row, col): Coord) -> bool {
        row < self.height && col < self.width
    }

    /// `true` if the cell is on the board and has never been visited.
    #[inline]
    pub fn is_open(&self, cell: Coord) -> bool {
        self.in_bounds(cell) && !self.blocked[self.idx(cell)]
    }

    /// Mark a cell as blocked without moving anyone onto it.
    ///
    /// Used to set up positions with obstacles; out-of-bounds cells are ignored.
    pub fn block_cell(&mut self, cell: Coord) {
        if self.in_bounds(cell) {
            let i = self.idx(cell);
            self.blocked[i] = true;
        }
    }

    pub fn active_player(&self) -> Player {
        self.active
    }

    pub fn inactive_player(&self) -> Player {
        self.active.opponent()
    }

    /// Current cell of `player`, or `None` before their first move.
    pub fn player_location(&self, player: Player) -> Option<Coord> {
        self.locations[player.index()]
    }

    /// Moves applied so far, in order.
    pub fn move_history(&self) -> &[Coord] {
        &self.history
    }

    /// Number of plies played.
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// All open cells in row-major order.
    pub fn blank_spaces(&self) -> Vec<Coord> {
        (0..self.height)
            .flat_map(|row| (0..self.width).map(move |col| (row, col)))
            .filter(|&cell| !self.blocked[self.idx(cell)])
            .collect()
    }

    /// Legal moves for the player to move.
    pub fn legal_moves(&self) -> Vec<Coord> {
        self.legal_moves_for(self.active)
    }

    /// Legal moves for `player`, whether or not it is their turn.
    ///
    /// An unplaced player may move to any open cell. A placed player slides
    /// along each queen direction (see [`DIRECTIONS`]) until hitting a blocked
    /// cell or the edge. The order is deterministic for a given board.
    pub fn legal_moves_for(&self, player: Player) -> Vec<Coord> {
        let Some((row, col)) = self.player_location(player) else {
            return self.blank_spaces();
        };

        let mut moves = Vec::new();
        for (dr, dc) in DIRECTIONS {
            let (mut r, mut c) = (row as isize, col as isize);
            loop {
                r += dr;
                c += dc;
                if r < 0 || c < 0 {
                    break;
                }
                let cell = (r as usize, c as usize);
                if !self.is_open(cell) {
                    break;
                }
                moves.push(cell);
            }
        }
        moves
    }

    /// `true` if `cell` is a legal destination for the active player.
    pub fn is_legal(&self, cell: Coord) -> bool {
        if !self.is_open(cell) {
            return false;
        }
        let Some((row, col)) = self.player_location(self.active) else {
            return true;
        };
        let (dr, dc) = (cell.0 as isize - row as isize, cell.1 as isize - col as isize);
        if !(dr == 0 || dc == 0 || dr.abs() == dc.abs()) {
            return false;
        }

        // Every cell strictly between here and there must be open.
        let steps = dr.abs().max(dc.abs());
        let (sr, sc) = (dr.signum(), dc.signum());
        (1..steps).all(|k| {
            let between = ((row as isize + sr * k) as usize, (col as isize + sc * k) as usize);
            self.is_open(between)
        })
    }

    /// Return a new board with `cell` played by the active player.
    ///
    /// The receiver is left untouched.
    ///
    /// # Errors
    /// [`MoveError::IllegalMove`] if `cell` is not a legal move.
    pub fn forecast_move(&self, cell: Coord) -> Result<Board, MoveError> {
        let mut next = self.clone();
        next.apply_move(cell)?;
        Ok(next)
    }

    /// Play `cell` for the active player in place and pass the turn.
    ///
    /// # Errors
    /// [`MoveError::IllegalMove`] if `cell` is not a legal move; the board
    /// is unchanged in that case.
    pub fn apply_move(&mut self, cell: Coord) -> Result<(), MoveError> {
        if !self.is_legal(cell) {
            return Err(MoveError::IllegalMove {
                player: self.active,
                row: cell.0,
                col: cell.1,
            });
        }
        self.play(cell);
        Ok(())
    }

    /// Successor for a move taken from [`Board::legal_moves`], skipping the
    /// legality re-check.
    pub(crate) fn successor(&self, cell: Coord) -> Board {
        debug_assert!(self.is_legal(cell), "{cell:?} is not legal");
        let mut next = self.clone();
        next.play(cell);
        next
    }

    fn play(&mut self, cell: Coord) {
        let i = self.idx(cell);
        self.blocked[i] = true;
        self.locations[self.active.index()] = Some(cell);
        self.history.push(cell);
        self.active = self.active.opponent();
    }

    /// The player to move has no legal moves.
    pub fn is_terminal(&self) -> bool {
        self.legal_moves().is_empty()
    }

    /// `player` is to move and has no legal moves.
    pub fn is_loser(&self, player: Player) -> bool {
        player == self.active && self.is_terminal()
    }

    /// `player` is waiting and the player to move has no legal moves.
    pub fn is_winner(&self, player: Player) -> bool {
        player != self.active && self.is_terminal()
    }

    /// The winner, if the game is over.
    pub fn winner(&self) -> Option<Player> {
        self.is_terminal().then(|| self.inactive_player())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "    ")?;
        for col in 0..self.width {
            write!(f, "{col:>2}")?;
        }
        writeln!(f)?;
        for row in 0..self.height {
            write!(f, "{row:>2} |")?;
            for col in 0..self.width {
                let cell = (row, col);
                let ch = if self.locations[0] == Some(cell) {
                    Player::One.symbol()
                } else if self.locations[1] == Some(cell) {
                    Player::Two.symbol()
                } else if self.blocked[self.idx(cell)] {
                    '-'
                } else {
                    '.'
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.width(), 7);
        assert_eq!(board.height(), 7);
        assert_eq!(board.blank_spaces().len(), 49);
        assert_eq!(board.active_player(), Player::One);
        assert_eq!(board.player_location(Player::One), None);
        assert_eq!(board.player_location(Player::Two), None);
    }

    #[test]
    fn test_unplaced_player_gets_every_open_cell() {
        let mut board = Board::with_size(3, 3);
        board.block_cell((1, 1));
        let moves = board.legal_moves();
        assert_eq!(moves.len(), 8);
        assert!(!moves.contains(&(1, 1)));
        assert_eq!(moves, board.blank_spaces());
    }

    #[test]
    fn test_slide_stops_before_blocked_cell() {
        let mut board = Board::with_size(5, 1);
        board.apply_move((0, 0)).unwrap();
        board.apply_move((0, 3)).unwrap();
        // Player one slides east and stops before player two.
        assert_eq!(board.legal_moves(), vec![(0, 1), (0, 2)]);
    }

    #[test]
    fn test_apply_move_blocks_and_swaps_turn() {
        let mut board = Board::new();
        board.apply_move((3, 3)).unwrap();
        assert!(!board.is_open((3, 3)));
        assert_eq!(board.player_location(Player::One), Some((3, 3)));
        assert_eq!(board.active_player(), Player::Two);
        assert_eq!(board.move_history(), &[(3, 3)]);
    }

    #[test]
    fn test_apply_illegal_move_leaves_board_unchanged() {
        let mut board = Board::new();
        board.apply_move((0, 0)).unwrap();
        board.apply_move((6, 6)).unwrap();
        let before = board.clone();

        // Knight jump, not a queen line.
        let err = board.apply_move((1, 2)).unwrap_err();
        assert_eq!(
            err,
            MoveError::IllegalMove {
                player: Player::One,
                row: 1,
                col: 2
            }
        );
        assert_eq!(board, before);

        // Occupied and off-board cells.
        assert!(board.apply_move((6, 6)).is_err());
        assert!(board.apply_move((7, 0)).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn test_cannot_jump_over_blocked_cell() {
        let mut board = Board::new();
        board.apply_move((0, 0)).unwrap();
        board.apply_move((0, 2)).unwrap();
        assert!(!board.is_legal((0, 3)));
        assert!(board.forecast_move((0, 3)).is_err());
        assert!(board.is_legal((0, 1)));
    }

    #[test]
    fn test_display_marks_players_and_blocks() {
        let mut board = Board::with_size(3, 2);
        board.apply_move((0, 0)).unwrap();
        board.apply_move((1, 2)).unwrap();
        board.apply_move((0, 1)).unwrap();
        let s = board.to_string();
        assert!(s.contains(" 0 | - 1 ."));
        assert!(s.contains(" 1 | . . 2"));
    }

    #[test]
    fn test_player_display() {
        assert_eq!(Player::One.to_string(), "Player 1");
        assert_eq!(Player::Two.opponent(), Player::One);
    }
}
