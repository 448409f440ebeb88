//! Request bodies, error payload and route paths.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use crate::types::{CellIndex, Player};

/// Characters escaped in a path segment. `.` is included so an id never
/// reads as a relative path step.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'~');

/// Body of `POST /tictactoe/new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameRequest {
    /// Who moves first.
    pub starting_player: Player,
}

/// Body of `POST /tictactoe/{id}/move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Target cell.
    pub index: CellIndex,
}

/// Optional payload of a non-2xx response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Server-supplied reason; usually a string.
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Returns the reason as display text.
    ///
    /// Strings are used verbatim, other non-null values as JSON text. Blank
    /// strings and `null` yield `None`.
    pub fn reason(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(text) if text.trim().is_empty() => None,
            serde_json::Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Path of the session-creation endpoint.
pub fn new_game_path() -> &'static str {
    "/tictactoe/new"
}

/// Path of the move endpoint for `session_id`, relative to the base URL.
///
/// The id is emitted as a single path segment with everything but ASCII
/// alphanumerics, `-`, `_` and `~` percent-encoded. Returns `None` for ids
/// no URL can carry as a segment: the empty id and the dot segments `.` and
/// `..`, which URL parsers collapse even when encoded.
pub fn move_path(session_id: &str) -> Option<String> {
    if matches!(session_id, "" | "." | "..") {
        return None;
    }
    let encoded = utf8_percent_encode(session_id, SEGMENT);
    Some(format!("/tictactoe/{}/move", encoded))
}
