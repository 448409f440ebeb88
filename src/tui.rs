//! Terminal front end.

use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use meta_tictactoe_protocol::CellIndex;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};
use tracing::{debug, error, info, instrument};

use crate::api::{GameApi, HttpGameApi};
use crate::config::ClientConfig;
use crate::dispatch::Dispatcher;
use crate::input::{Action, Cursor, action_for};
use crate::meta::MetaBoard;
use crate::session::{Resolution, Ticket};
use crate::ui;

/// Runs the nested board against the service in `config` until the user
/// quits.
#[instrument(skip(config), fields(api_url = %config.api_url()))]
pub async fn run_tui(config: ClientConfig) -> Result<()> {
    let api: Arc<dyn GameApi> = Arc::new(HttpGameApi::new(&config)?);

    info!("Starting terminal UI");
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, api, &config).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &res {
        error!(error = ?e, "Terminal UI failed");
    }
    res
}

/// Single event loop owning every board.
async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    api: Arc<dyn GameApi>,
    config: &ClientConfig,
) -> Result<()> {
    let (dispatcher, mut results) = Dispatcher::new(api);
    let mut meta = MetaBoard::new(*config.starting_player());
    let mut cursor = Cursor::default();

    dispatcher.dispatch_all(meta.mount_all());

    let mut area = Rect::default();

    loop {
        drain_results(&mut meta, &mut results);
        terminal.draw(|f| {
            area = f.area();
            ui::draw(f, &meta, cursor);
        })?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                // crossterm reports both press and release on some platforms
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    match action_for(key.code) {
                        Action::Quit => {
                            info!("User quit");
                            meta.unmount_all();
                            return Ok(());
                        }
                        Action::NewGame => {
                            dispatcher.dispatch_all(meta.new_game());
                        }
                        Action::Retry => {
                            submit(&dispatcher, meta.retry(cursor.board));
                        }
                        Action::Click => {
                            submit(&dispatcher, meta.click(cursor.board, cursor.cell.get()));
                        }
                        Action::ClickCell(cell) => {
                            if let Some(index) = CellIndex::new(cell) {
                                cursor.cell = index;
                            }
                            submit(&dispatcher, meta.click(cursor.board, cell));
                        }
                        Action::Navigate(code) => cursor = cursor.step(code),
                        Action::Ignore => debug!(code = ?key.code, "Unbound key"),
                    }
                }
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    if let Some(target) = ui::cell_at(area, mouse.column, mouse.row) {
                        cursor = target;
                        submit(&dispatcher, meta.click(target.board, target.cell.get()));
                    }
                }
                _ => {}
            }
        }

        sleep(Duration::from_millis(10)).await;
    }
}

fn submit(dispatcher: &Dispatcher, ticket: Option<Ticket>) {
    if let Some(ticket) = ticket {
        dispatcher.dispatch(ticket);
    }
}

fn drain_results(meta: &mut MetaBoard, results: &mut mpsc::UnboundedReceiver<Resolution>) {
    while let Ok(resolution) = results.try_recv() {
        let applied = meta.apply(resolution);
        debug!(?applied, "Applied resolution");
    }
}
