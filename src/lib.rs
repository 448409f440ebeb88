//! Meta tic-tac-toe client library.
//!
//! A 3×3 grid of tic-tac-toe boards, each backed by its own session on a
//! remote game service. The service owns the rules; this crate keeps each
//! board's snapshot in sync with it.
//!
//! # Architecture
//!
//! - **Transport**: [`GameApi`] and its HTTP implementation [`HttpGameApi`]
//! - **Session**: [`BoardSession`] decides which requests may go out and
//!   folds responses back in, discarding those of cancelled mounts
//! - **Dispatch**: [`Dispatcher`] runs requests on tokio and posts results
//!   back to the single UI thread
//! - **Rendering**: [`render`] maps a board to a [`BoardFrame`]
//! - **Meta board**: [`MetaBoard`] holds the nine boards
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use meta_tictactoe::{BoardSession, ClientConfig, GameApi, HttpGameApi, Player};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ClientConfig::new("http://localhost:8000")?;
//! let api: Arc<dyn GameApi> = Arc::new(HttpGameApi::new(&config)?);
//!
//! let mut board = BoardSession::new(0, Player::X);
//! let created = board.mount().run(api.as_ref()).await;
//! board.apply(created);
//!
//! if let Ok(ticket) = board.click(4) {
//!     let moved = ticket.run(api.as_ref()).await;
//!     board.apply(moved);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod api;
mod config;
mod dispatch;
mod error;
mod input;
mod meta;
mod outcome;
mod render;
mod session;
mod tui;
mod ui;

// Crate-level exports - Transport
pub use api::{GameApi, HttpGameApi};

// Crate-level exports - Configuration
pub use config::{API_URL_ENV, ClientConfig, DEFAULT_API_URL, normalize_api_url};

// Crate-level exports - Errors
pub use error::{ClientError, ClientErrorKind, ConfigError};

// Crate-level exports - Sessions
pub use dispatch::Dispatcher;
pub use outcome::{OutcomeObserver, OutcomeWatcher, SharedObserver};
pub use session::{Applied, BoardId, BoardSession, BoardView, Request, Resolution, Suppressed, Ticket};

// Crate-level exports - Rendering and input
pub use input::{Action, Cursor, action_for};
pub use meta::{META_BOARDS, MetaBoard, Tally, TallyObserver};
pub use render::{
    BoardFrame, CellView, board_title, cell_areas, center_rect, draw_board, mark_symbol, render,
};
pub use ui::{cell_at, draw};

// Crate-level exports - Terminal front end
pub use tui::run_tui;

// Crate-level exports - Wire types
pub use meta_tictactoe_protocol::{CellIndex, GameState, Outcome, Player};
