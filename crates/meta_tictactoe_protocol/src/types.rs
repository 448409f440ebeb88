//! Core value types shared by the snapshot and the requests.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of cells on a single board.
pub const BOARD_CELLS: usize = 9;

/// Player mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Player {
    /// Player X.
    X,
    /// Player O.
    O,
}

impl Player {
    /// Returns the opponent player.
    #[instrument]
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Outcome {
    /// Three in a row for this player.
    #[display("{}", _0)]
    Won(Player),
    /// Board full with no winner.
    #[display("draw")]
    Draw,
}

/// Index of a cell on a board, guaranteed to be in `0..9`.
///
/// Cells are numbered row-major: 0 is top-left, 4 is the center and 8 is
/// bottom-right.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(try_from = "u8", into = "u8")]
#[display("{}", _0)]
pub struct CellIndex(u8);

impl CellIndex {
    /// Creates a cell index, or `None` if `index` is off the board.
    pub fn new(index: usize) -> Option<Self> {
        (index < BOARD_CELLS).then_some(Self(index as u8))
    }

    /// Creates a cell index from a row and column in `0..3`.
    pub fn from_row_col(row: usize, col: usize) -> Option<Self> {
        if row < 3 && col < 3 {
            Self::new(row * 3 + col)
        } else {
            None
        }
    }

    /// Returns the index as a `usize`.
    pub fn get(self) -> usize {
        self.0 as usize
    }

    /// Row of the cell (0-2).
    pub fn row(self) -> usize {
        self.get() / 3
    }

    /// Column of the cell (0-2).
    pub fn col(self) -> usize {
        self.get() % 3
    }

    /// All nine cells in row-major order.
    pub fn all() -> [CellIndex; BOARD_CELLS] {
        std::array::from_fn(|i| CellIndex(i as u8))
    }
}

/// Rejected cell index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("cell index {} is outside 0..9", index)]
pub struct InvalidCellIndex {
    /// The rejected value.
    pub index: usize,
}

impl TryFrom<u8> for CellIndex {
    type Error = InvalidCellIndex;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value as usize).ok_or(InvalidCellIndex {
            index: value as usize,
        })
    }
}

impl TryFrom<usize> for CellIndex {
    type Error = InvalidCellIndex;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidCellIndex { index: value })
    }
}

impl From<CellIndex> for u8 {
    fn from(index: CellIndex) -> Self {
        index.0
    }
}

impl From<CellIndex> for usize {
    fn from(index: CellIndex) -> Self {
        index.get()
    }
}
