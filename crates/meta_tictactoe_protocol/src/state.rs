//! Game snapshot returned by the service.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::types::{BOARD_CELLS, CellIndex, Outcome, Player};

/// Authoritative game state as reported by the service.
///
/// Clients hold this as a read-only cache and replace it wholesale with
/// every successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Opaque session identifier assigned at creation.
    pub id: String,
    /// The nine cells in row-major order.
    pub board: [Option<Player>; BOARD_CELLS],
    /// Whose turn is next.
    pub current_player: Player,
    /// Winner, once the game has been won.
    pub winner: Option<Player>,
    /// True once the board is full with no winner.
    pub is_draw: bool,
    /// Human-readable status, display only.
    #[serde(default)]
    pub status: String,
}

impl GameState {
    /// Creates the snapshot of a fresh game.
    pub fn fresh(id: impl Into<String>, starting_player: Player) -> Self {
        Self {
            id: id.into(),
            board: [None; BOARD_CELLS],
            current_player: starting_player,
            winner: None,
            is_draw: false,
            status: String::new(),
        }
    }

    /// Returns the mark at `index`.
    pub fn cell(&self, index: CellIndex) -> Option<Player> {
        self.board[index.get()]
    }

    /// Checks whether the cell at `index` already holds a mark.
    pub fn is_occupied(&self, index: CellIndex) -> bool {
        self.cell(index).is_some()
    }

    /// A terminal game accepts no further moves.
    pub fn is_terminal(&self) -> bool {
        self.winner.is_some() || self.is_draw
    }

    /// Returns how the game ended, or `None` while it is still running.
    #[instrument(skip(self), fields(id = %self.id))]
    pub fn outcome(&self) -> Option<Outcome> {
        match (self.winner, self.is_draw) {
            (Some(player), _) => Some(Outcome::Won(player)),
            (None, true) => Some(Outcome::Draw),
            (None, false) => None,
        }
    }

    /// Number of marks on the board.
    pub fn marks_placed(&self) -> usize {
        self.board.iter().filter(|cell| cell.is_some()).count()
    }
}
