//! Tests for board rendering.

mod common;

use common::{drawn, state, won};
use meta_tictactoe::{
    BoardFrame, BoardView, CellIndex, Cursor, MetaBoard, Outcome, Player, board_title, cell_at,
    cell_areas, draw, draw_board, render,
};
use ratatui::{Terminal, backend::TestBackend, layout::Rect};

fn view<'a>(
    state: Option<&'a meta_tictactoe::GameState>,
    loading: bool,
    error: Option<&'a str>,
) -> BoardView<'a> {
    BoardView {
        state,
        loading,
        error,
    }
}

#[test]
fn test_error_suppresses_grid() {
    let snapshot = state("g1", "X........", Player::O);
    let frame = render(view(Some(&snapshot), false, Some("cell occupied")));
    assert_eq!(frame, BoardFrame::Error("cell occupied".to_string()));
    assert!(frame.enabled_cells().is_empty());
}

#[test]
fn test_loading_without_state() {
    assert_eq!(render(view(None, true, None)), BoardFrame::Loading);
    assert_eq!(render(view(None, false, None)), BoardFrame::Loading);
}

#[test]
fn test_grid_reflects_snapshot() {
    let snapshot = state("g1", "X...O...X", Player::O);
    let BoardFrame::Grid { cells, outcome, busy } = render(view(Some(&snapshot), false, None)) else {
        panic!("expected grid");
    };

    let marks: Vec<_> = cells.iter().map(|cell| cell.mark).collect();
    assert_eq!(marks, snapshot.board.to_vec());
    assert_eq!(outcome, None);
    assert!(!busy);

    let enabled: Vec<_> = cells
        .iter()
        .filter(|cell| cell.enabled)
        .map(|cell| cell.index.get())
        .collect();
    assert_eq!(enabled, vec![1, 2, 3, 5, 6, 7]);
}

#[test]
fn test_in_flight_disables_every_cell() {
    let snapshot = state("g1", ".........", Player::X);
    let frame = render(view(Some(&snapshot), true, None));
    assert!(frame.enabled_cells().is_empty());
    assert!(matches!(frame, BoardFrame::Grid { busy: true, .. }));
}

#[test]
fn test_terminal_keeps_grid_disabled() {
    let snapshot = won("g1", "XXXOO....", Player::X);
    let frame = render(view(Some(&snapshot), false, None));

    let BoardFrame::Grid { cells, outcome, .. } = &frame else {
        panic!("expected grid");
    };
    assert_eq!(*outcome, Some(Outcome::Won(Player::X)));
    assert_eq!(cells[0].mark, Some(Player::X));
    assert!(frame.enabled_cells().is_empty());
    assert_eq!(board_title(0, &frame), "Board 1 · X wins");

    let draw_frame = render(view(Some(&drawn("g2")), false, None));
    assert_eq!(board_title(8, &draw_frame), "Board 9 · draw");
}

#[test]
fn test_meta_board_draws_header_and_loading_boards() {
    let mut meta = MetaBoard::new(Player::X);
    let _tickets = meta.mount_all();

    let mut terminal = Terminal::new(TestBackend::new(90, 40)).unwrap();
    terminal
        .draw(|f| draw(f, &meta, Cursor::default()))
        .unwrap();

    let text: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect();
    assert!(text.contains("X's turn"));
    assert!(text.contains("Board 5"));
    assert!(text.contains("Loading…"));
}

#[test]
fn test_cursor_cell_is_within_board() {
    let cursor = Cursor::default();
    assert_eq!(cursor.board, 4);
    assert_eq!(cursor.cell, CellIndex::new(4).unwrap());
}

#[test]
fn test_mouse_position_maps_to_cell() {
    let area = Rect::new(0, 0, 90, 40);

    let target = cell_at(area, 3, 5).unwrap();
    assert_eq!((target.board, target.cell.get()), (0, 0));

    let target = cell_at(area, 45, 20).unwrap();
    assert_eq!((target.board, target.cell.get()), (4, 4));

    let target = cell_at(area, 85, 34).unwrap();
    assert_eq!((target.board, target.cell.get()), (8, 8));
}

#[test]
fn test_mouse_outside_cells_maps_to_nothing() {
    let area = Rect::new(0, 0, 90, 40);

    // Header, status line, and board borders.
    assert!(cell_at(area, 10, 1).is_none());
    assert!(cell_at(area, 10, 38).is_none());
    assert!(cell_at(area, 0, 5).is_none());
    assert!(cell_at(area, 60, 20).is_none());
}

#[test]
fn test_cell_areas_match_drawn_marks() {
    let area = Rect::new(0, 0, 30, 11);
    let cells = cell_areas(area);
    assert_eq!(cells.len(), 9);
    for cell in &cells {
        assert!(cell.x > area.x && cell.right() < area.right());
        assert!(cell.y > area.y && cell.bottom() < area.bottom());
    }

    let snapshot = state("g1", "....X....", Player::O);
    let frame = render(view(Some(&snapshot), false, None));
    let mut terminal = Terminal::new(TestBackend::new(30, 11)).unwrap();
    terminal
        .draw(|f| draw_board(f, area, 0, &frame, None))
        .unwrap();

    let buffer = terminal.backend().buffer();
    let center = cells[4];
    let found = (center.y..center.bottom()).any(|y| {
        (center.x..center.right()).any(|x| buffer[(x, y)].symbol() == "X")
    });
    assert!(found);
}
