//! Gravity-constrained grid board and its game rules.

use anyhow::{anyhow, Result};

use crate::error::GameError;
use crate::game::{Game, Role, Utility};
use crate::{HEIGHT, WIDTH, WIN_LENGTH};

/// Board dimensions and the run length required to win.
///
/// Geometry is a per-board value rather than a process-wide constant, so
/// differently sized games can coexist (and tests can shrink the board to
/// keep exhaustive search cheap).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Geometry {
    pub width: usize,
    pub height: usize,
    pub win_length: usize,
}

impl Geometry {
    pub const fn new(width: usize, height: usize, win_length: usize) -> Self {
        Self {
            width,
            height,
            win_length,
        }
    }

    /// The standard 7x6 board with a four-in-a-row target
    pub const fn standard() -> Self {
        Self::new(WIDTH, HEIGHT, WIN_LENGTH)
    }

    pub const fn cells(&self) -> usize {
        self.width * self.height
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl From<Role> for Cell {
    fn from(role: Role) -> Self {
        match role {
            Role::Maximizer => Cell::PlayerOne,
            Role::Minimizer => Cell::PlayerTwo,
        }
    }
}

/// A drop target: the cell that receives the next piece in its column.
///
/// Row 0 is the top of the board; gravity pulls pieces towards higher rows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub row: usize,
    pub column: usize,
}

/// A Connect Four position.
///
/// Cells are stored row-major from the top-left corner. Legality of a drop is
/// derived from the per-column piece counts instead of a separate table: the
/// single lowest empty cell of each non-full column is the only playable cell
/// in it, which keeps the state minimal and self-checking.
///
/// Boards are value types. [`Board::child`] builds a new board with exactly
/// one cell changed and never touches the parent.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    geometry: Geometry,
    cells: Vec<Cell>,
    heights: Vec<usize>,
}

impl Board {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            cells: vec![Cell::Empty; geometry.cells()],
            heights: vec![0; geometry.width],
        }
    }

    /// An empty board with the standard geometry
    pub fn standard() -> Self {
        Self::new(Geometry::standard())
    }

    /// Builds a standard board from a string of 1-indexed column digits,
    /// players alternating from the maximizer.
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        Self::from_moves_on(Geometry::standard(), moves)
    }

    /// [`Board::from_moves`] over an arbitrary geometry (widths up to 9).
    pub fn from_moves_on<S: AsRef<str>>(geometry: Geometry, moves: S) -> Result<Self> {
        let mut board = Self::new(geometry);
        let mut actor = Role::Maximizer;

        for column_char in moves.as_ref().chars() {
            let column = match column_char.to_digit(10).map(|c| c as usize) {
                Some(column) if column >= 1 && column <= geometry.width => column - 1,
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            };
            // abort if the position is won at any point
            if board.utility().is_some() {
                return Err(anyhow!("Invalid position, game is over"));
            }
            let row = board
                .drop_row(column)
                .ok_or_else(|| anyhow!("Invalid move, column {} full", column + 1))?;
            board = board.child(Move { row, column }, actor)?;
            actor = actor.opponent();
        }
        Ok(board)
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[self.index(row, column)]
    }

    /// The row the next piece in `column` would land in, if the column is open
    pub fn drop_row(&self, column: usize) -> Option<usize> {
        if self.heights[column] < self.geometry.height {
            Some(self.geometry.height - 1 - self.heights[column])
        } else {
            None
        }
    }

    /// Every legal drop target, scanned row-major (top-to-bottom then
    /// left-to-right).
    ///
    /// The order is stable between calls on equal boards; exact search
    /// tie-breaking depends on it.
    pub fn moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(self.geometry.width);
        for row in 0..self.geometry.height {
            for column in 0..self.geometry.width {
                if self.drop_row(column) == Some(row) {
                    moves.push(Move { row, column });
                }
            }
        }
        moves
    }

    /// The board reached by `actor` dropping a piece at `mv`.
    ///
    /// `mv` must be a current drop target; anything else is rejected with
    /// [`GameError::InvalidMove`].
    pub fn child(&self, mv: Move, actor: Role) -> Result<Board, GameError> {
        if mv.column >= self.geometry.width || self.drop_row(mv.column) != Some(mv.row) {
            return Err(GameError::InvalidMove {
                row: mv.row,
                column: mv.column,
            });
        }
        let mut next = self.clone();
        let index = self.index(mv.row, mv.column);
        next.cells[index] = Cell::from(actor);
        next.heights[mv.column] += 1;
        Ok(next)
    }

    /// `Some` when a winning run exists or the board is full, `None` while
    /// the game is open.
    ///
    /// Each occupied cell anchors a check in the four forward directions
    /// (right, down, down-right, down-left); that covers every run once
    /// without scanning both ends of a line. The first run found in scan
    /// order wins — a reachable position holds at most one winner.
    pub fn utility(&self) -> Option<Utility> {
        for row in 0..self.geometry.height {
            for column in 0..self.geometry.width {
                let winner = match self.cell(row, column) {
                    Cell::Empty => continue,
                    Cell::PlayerOne => Utility::MaxWin,
                    Cell::PlayerTwo => Utility::MinWin,
                };
                for (dr, dc) in [(0, 1), (1, 0), (1, 1), (1, -1)] {
                    if self.run_from(row, column, dr, dc) {
                        return Some(winner);
                    }
                }
            }
        }
        if self.open_cells() == 0 {
            Some(Utility::Draw)
        } else {
            None
        }
    }

    /// Number of cells not yet holding a piece
    pub fn open_cells(&self) -> usize {
        self.geometry.cells() - self.heights.iter().sum::<usize>()
    }

    fn index(&self, row: usize, column: usize) -> usize {
        row * self.geometry.width + column
    }

    // whether a full winning run starts at (row, column) in direction (dr, dc)
    fn run_from(&self, row: usize, column: usize, dr: isize, dc: isize) -> bool {
        let target = self.cell(row, column);
        for step in 1..self.geometry.win_length as isize {
            let r = row as isize + dr * step;
            let c = column as isize + dc * step;
            if r < 0
                || r >= self.geometry.height as isize
                || c < 0
                || c >= self.geometry.width as isize
                || self.cells[r as usize * self.geometry.width + c as usize] != target
            {
                return false;
            }
        }
        true
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Game for Board {
    type Move = Move;

    fn moves(&self) -> Vec<Move> {
        Board::moves(self)
    }

    fn child(&self, mv: Move, actor: Role) -> Result<Board, GameError> {
        Board::child(self, mv, actor)
    }

    fn utility(&self) -> Option<Utility> {
        Board::utility(self)
    }

    fn open_cells(&self) -> usize {
        Board::open_cells(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_offers_one_drop_per_column() {
        let board = Board::standard();
        let moves = board.moves();
        assert_eq!(moves.len(), WIDTH);
        // all drop targets start on the bottom row, left to right
        for (column, mv) in moves.iter().enumerate() {
            assert_eq!((mv.row, mv.column), (HEIGHT - 1, column));
        }
    }

    #[test]
    fn drops_stack_upwards() -> anyhow::Result<()> {
        let board = Board::from_moves("444")?;
        assert_eq!(board.cell(5, 3), Cell::PlayerOne);
        assert_eq!(board.cell(4, 3), Cell::PlayerTwo);
        assert_eq!(board.cell(3, 3), Cell::PlayerOne);
        assert_eq!(board.drop_row(3), Some(2));
        Ok(())
    }

    #[test]
    fn move_order_is_row_major() -> anyhow::Result<()> {
        // column 4 holds three pieces, so its target sits above the others
        let board = Board::from_moves("444")?;
        let moves = board.moves();
        assert_eq!(moves[0], Move { row: 2, column: 3 });
        for mv in &moves[1..] {
            assert_eq!(mv.row, 5);
        }
        Ok(())
    }

    #[test]
    fn full_column_is_rejected() -> anyhow::Result<()> {
        let board = Board::from_moves("444444")?;
        assert_eq!(board.drop_row(3), None);
        assert!(Board::from_moves("4444444").is_err());
        Ok(())
    }

    #[test]
    fn from_moves_rejects_play_past_a_win() {
        // maximizer completes a vertical run on the seventh drop
        assert!(Board::from_moves("1212121").is_ok());
        assert!(Board::from_moves("12121213").is_err());
    }
}
