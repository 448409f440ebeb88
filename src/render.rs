//! Board rendering.
//!
//! [`render`] is a pure mapping from a [`BoardView`] to a [`BoardFrame`];
//! [`draw_board`] paints a frame with ratatui. A finished game keeps its
//! grid on screen with every cell disabled and shows the outcome in the
//! board's title.

use meta_tictactoe_protocol::{BOARD_CELLS, CellIndex, Outcome, Player};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::session::BoardView;

/// One rendered cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    /// Position on the board.
    pub index: CellIndex,
    /// Mark in the cell.
    pub mark: Option<Player>,
    /// Whether a click here would submit a move.
    pub enabled: bool,
}

/// What a board shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardFrame {
    /// The last request failed; the grid is hidden.
    Error(String),
    /// No snapshot yet.
    Loading,
    /// The nine cells.
    Grid {
        /// Cells in row-major order.
        cells: [CellView; BOARD_CELLS],
        /// Set once the game is over.
        outcome: Option<Outcome>,
        /// A request is in flight.
        busy: bool,
    },
}

impl BoardFrame {
    /// Indices a click would act on.
    pub fn enabled_cells(&self) -> Vec<CellIndex> {
        match self {
            BoardFrame::Grid { cells, .. } => cells
                .iter()
                .filter(|cell| cell.enabled)
                .map(|cell| cell.index)
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Maps a board view to what should be shown.
pub fn render(view: BoardView<'_>) -> BoardFrame {
    if let Some(message) = view.error {
        return BoardFrame::Error(message.to_string());
    }
    let Some(state) = view.state else {
        return BoardFrame::Loading;
    };

    let terminal = state.is_terminal();
    let cells = CellIndex::all().map(|index| {
        let mark = state.cell(index);
        CellView {
            index,
            mark,
            enabled: !view.loading && mark.is_none() && !terminal,
        }
    });

    BoardFrame::Grid {
        cells,
        outcome: state.outcome(),
        busy: view.loading,
    }
}

/// Glyph shown for a mark.
pub fn mark_symbol(mark: Option<Player>) -> &'static str {
    match mark {
        Some(Player::X) => "X",
        Some(Player::O) => "O",
        None => "·",
    }
}

fn mark_style(mark: Option<Player>) -> Style {
    match mark {
        Some(Player::X) => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        Some(Player::O) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        None => Style::default().fg(Color::DarkGray),
    }
}

/// Title for a board's frame.
pub fn board_title(board: usize, frame: &BoardFrame) -> String {
    let name = format!("Board {}", board + 1);
    match frame {
        BoardFrame::Grid {
            outcome: Some(Outcome::Won(player)),
            ..
        } => format!("{} · {} wins", name, player),
        BoardFrame::Grid {
            outcome: Some(Outcome::Draw),
            ..
        } => format!("{} · draw", name),
        BoardFrame::Grid { busy: true, .. } => format!("{} · …", name),
        _ => name,
    }
}

/// Paints one board into `area`.
///
/// `focus` is the cell under the keyboard cursor, if it is on this board.
pub fn draw_board(
    frame: &mut Frame,
    area: Rect,
    board: usize,
    board_frame: &BoardFrame,
    focus: Option<CellIndex>,
) {
    let border_style = if focus.is_some() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(board_title(board, board_frame));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match board_frame {
        BoardFrame::Error(message) => {
            let text = Paragraph::new(format!("Error: {}", message))
                .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(text, inner);
        }
        BoardFrame::Loading => {
            let text = Paragraph::new("Loading…")
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center);
            frame.render_widget(text, center_rect(inner, inner.width, 1));
        }
        BoardFrame::Grid { cells, .. } => draw_grid(frame, area, cells, focus),
    }
}

/// Screen area of each cell of a board drawn into `area`, row-major.
pub fn cell_areas(area: Rect) -> Vec<Rect> {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(inner);

    rows.iter()
        .flat_map(|row| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, 3); 3])
                .split(*row)
                .to_vec()
        })
        .collect()
}

fn draw_grid(frame: &mut Frame, area: Rect, cells: &[CellView; BOARD_CELLS], focus: Option<CellIndex>) {
    for (cell, cell_area) in cells.iter().zip(cell_areas(area)) {
        let mut style = mark_style(cell.mark);
        if !cell.enabled && cell.mark.is_none() {
            style = style.add_modifier(Modifier::DIM);
        }
        if focus == Some(cell.index) {
            style = style.bg(Color::White).fg(Color::Black);
        }

        let paragraph = Paragraph::new(Line::from(Span::styled(mark_symbol(cell.mark), style)))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, center_rect(cell_area, cell_area.width, 1));
    }
}

/// Centers a `width`×`height` rectangle inside `area`.
pub fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
