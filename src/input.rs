//! Keyboard handling: cursor movement and key-to-action mapping.

use crossterm::event::KeyCode;
use meta_tictactoe_protocol::CellIndex;

use crate::session::BoardId;

/// Keyboard cursor over the 9×9 grid of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Board under the cursor.
    pub board: BoardId,
    /// Cell within that board.
    pub cell: CellIndex,
}

impl Default for Cursor {
    /// Center cell of the center board.
    fn default() -> Self {
        Self::from_global(4, 4)
    }
}

impl Cursor {
    /// Global (row, column) in `0..9`.
    pub fn global(self) -> (usize, usize) {
        let row = (self.board / 3) * 3 + self.cell.row();
        let col = (self.board % 3) * 3 + self.cell.col();
        (row, col)
    }

    /// Cursor at global (row, column), clamped to the grid.
    pub fn from_global(row: usize, col: usize) -> Self {
        let row = row.min(8);
        let col = col.min(8);
        let board = (row / 3) * 3 + col / 3;
        let cell = CellIndex::from_row_col(row % 3, col % 3).unwrap_or(CellIndex::all()[0]);
        Self { board, cell }
    }

    /// Moves one step; arrows stop at the grid edge.
    pub fn step(self, key: KeyCode) -> Self {
        let (row, col) = self.global();
        match key {
            KeyCode::Up => Self::from_global(row.saturating_sub(1), col),
            KeyCode::Down => Self::from_global(row + 1, col),
            KeyCode::Left => Self::from_global(row, col.saturating_sub(1)),
            KeyCode::Right => Self::from_global(row, col + 1),
            _ => self,
        }
    }
}

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the application.
    Quit,
    /// Start a new game on every board.
    NewGame,
    /// Retry the focused board.
    Retry,
    /// Click the cell under the cursor.
    Click,
    /// Click a cell (0-8) of the focused board and move the cursor there.
    ClickCell(usize),
    /// Move the cursor.
    Navigate(KeyCode),
    /// Nothing bound to this key.
    Ignore,
}

/// Maps a key to an action.
pub fn action_for(key: KeyCode) -> Action {
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('n') | KeyCode::Char('N') => Action::NewGame,
        KeyCode::Char('r') | KeyCode::Char('R') => Action::Retry,
        KeyCode::Enter | KeyCode::Char(' ') => Action::Click,
        KeyCode::Char(c @ '1'..='9') => Action::ClickCell(c as usize - '1' as usize),
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => Action::Navigate(key),
        _ => Action::Ignore,
    }
}
