//! Stateless drawing of the whole meta board.

use meta_tictactoe_protocol::CellIndex;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::input::Cursor;
use crate::meta::{META_BOARDS, MetaBoard};
use crate::render::{cell_areas, draw_board, render};

const HELP: &str = "click or arrows+enter play · 1-9 play in board · n new game · r retry · q quit";

/// Renders the header, the nine boards and the status line.
pub fn draw(frame: &mut Frame, meta: &MetaBoard, cursor: Cursor) {
    let [header, boards, status] = sections(frame.area());

    draw_header(frame, header, meta);
    draw_boards(frame, boards, meta, cursor);

    let status_line = Paragraph::new(format!("{}\n{}", meta.status_message(), HELP))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(status_line, status);
}

/// Cell under the terminal position (`column`, `row`) when the meta board
/// fills `area`.
pub fn cell_at(area: Rect, column: u16, row: u16) -> Option<Cursor> {
    let [_, boards, _] = sections(area);
    let position = Position::new(column, row);

    board_areas(boards).into_iter().enumerate().find_map(|(board, board_area)| {
        let index = cell_areas(board_area)
            .iter()
            .position(|cell| cell.contains(position))?;
        Some(Cursor {
            board,
            cell: CellIndex::new(index)?,
        })
    })
}

fn sections(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(9),    // Boards
            Constraint::Length(3), // Status
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

fn board_areas(area: Rect) -> Vec<Rect> {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

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

fn draw_header(frame: &mut Frame, area: Rect, meta: &MetaBoard) {
    let tally = meta.tally();
    let text = format!(
        "{}'s turn\nX {} · O {} · draws {}",
        meta.turn(),
        tally.x_wins(),
        tally.o_wins(),
        tally.draws()
    );
    let header = Paragraph::new(text)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(header, area);
}

fn draw_boards(frame: &mut Frame, area: Rect, meta: &MetaBoard, cursor: Cursor) {
    for (board, board_area) in board_areas(area).into_iter().enumerate().take(META_BOARDS) {
        let Some(session) = meta.board(board) else {
            continue;
        };
        let board_frame = render(session.view());
        let focus = (cursor.board == board).then_some(cursor.cell);
        draw_board(frame, board_area, board, &board_frame, focus);
    }
}
