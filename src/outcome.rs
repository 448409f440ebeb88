//! Edge-triggered outcome notification.

use std::sync::Arc;

use meta_tictactoe_protocol::{GameState, Outcome};
use tracing::{debug, instrument};

use crate::session::BoardId;

/// Receives one call per transition of a board into a finished game.
pub trait OutcomeObserver: Send + Sync {
    /// Called when `board` finishes with `outcome`.
    fn on_outcome(&self, board: BoardId, outcome: Outcome);
}

impl<F> OutcomeObserver for F
where
    F: Fn(BoardId, Outcome) + Send + Sync,
{
    fn on_outcome(&self, board: BoardId, outcome: Outcome) {
        self(board, outcome)
    }
}

/// Shared handle to an observer.
pub type SharedObserver = Arc<dyn OutcomeObserver>;

/// Tracks the last seen `(winner, is_draw)` pair and reports changes into a
/// terminal state.
///
/// Feeding the same terminal snapshot twice reports it once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeWatcher {
    last: Option<Outcome>,
}

impl OutcomeWatcher {
    /// Creates a watcher that has seen nothing yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `state` and returns its outcome if it differs from the last
    /// one seen and the game is over.
    #[instrument(skip(self, state), fields(session_id = %state.id))]
    pub fn observe(&mut self, state: &GameState) -> Option<Outcome> {
        let current = state.outcome();
        if current == self.last {
            return None;
        }
        debug!(previous = ?self.last, current = ?current, "Outcome changed");
        self.last = current;
        current
    }

    /// Last outcome seen.
    pub fn last(&self) -> Option<Outcome> {
        self.last
    }
}
