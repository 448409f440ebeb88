//! Wire contract for the tic-tac-toe game-session service.
//!
//! The service owns every rule of the game. This crate only describes what
//! travels over HTTP: the [`GameState`] snapshot, the request bodies, the
//! error payload, and the route paths. Nothing here performs I/O.
//!
//! # Example
//!
//! ```
//! use meta_tictactoe_protocol::{GameState, Outcome, Player};
//!
//! let json = r#"{
//!     "id": "abc",
//!     "board": ["X", "X", "X", "O", "O", null, null, null, null],
//!     "current_player": "O",
//!     "winner": "X",
//!     "is_draw": false,
//!     "status": "X wins"
//! }"#;
//! let state: GameState = serde_json::from_str(json).unwrap();
//! assert!(state.is_terminal());
//! assert_eq!(state.outcome(), Some(Outcome::Won(Player::X)));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod state;
mod types;
mod wire;

pub use state::GameState;
pub use types::{BOARD_CELLS, CellIndex, InvalidCellIndex, Outcome, Player};
pub use wire::{ErrorBody, MoveRequest, NewGameRequest, move_path, new_game_path};
