//! Per-board session state.
//!
//! A [`BoardSession`] never performs I/O. It decides whether a request may
//! go out, hands the caller a [`Ticket`] describing it, and later folds the
//! matching [`Resolution`] back into its snapshot. All mutation happens on
//! the caller's thread, so one event loop can own all nine boards.

use derive_getters::Getters;
use derive_more::Display;
use meta_tictactoe_protocol::{CellIndex, GameState, Outcome, Player};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::api::GameApi;
use crate::error::ClientError;
use crate::outcome::{OutcomeWatcher, SharedObserver};

/// Position of a board inside the meta board (0-8, row-major).
pub type BoardId = usize;

/// Why a click did not produce a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Suppressed {
    /// No session has been created yet.
    #[display("No active session")]
    NoActiveSession,
    /// A previous request is still pending.
    #[display("Waiting for the server")]
    InFlight,
    /// The error banner covers the grid until it is retried.
    #[display("Press r to dismiss the error")]
    ErrorShown,
    /// The game is already over.
    #[display("Game is over")]
    Terminal,
    /// The index is not a cell.
    #[display("Cell {} does not exist", _0)]
    OutOfRange(usize),
    /// The cell already holds a mark.
    #[display("Cell {} is occupied", _0)]
    Occupied(CellIndex),
}

/// Request a session authorised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Create a new session.
    Create {
        /// Who moves first.
        starting_player: Player,
    },
    /// Submit a move.
    Move {
        /// Session to move in.
        session_id: String,
        /// Target cell.
        index: CellIndex,
    },
}

/// A request together with the board and mount it belongs to.
#[derive(Debug, Clone, Getters)]
pub struct Ticket {
    board: BoardId,
    request: Request,
    token: CancellationToken,
}

impl Ticket {
    /// Performs the request against `api`.
    #[instrument(skip(self, api), fields(board = self.board))]
    pub async fn execute(&self, api: &dyn GameApi) -> Result<GameState, ClientError> {
        match &self.request {
            Request::Create { starting_player } => api.create_session(*starting_player).await,
            Request::Move { session_id, index } => api.submit_move(session_id, *index).await,
        }
    }

    /// Performs the request and packages the result for [`BoardSession::apply`].
    pub async fn run(self, api: &dyn GameApi) -> Resolution {
        let result = self.execute(api).await;
        Resolution::new(self, result)
    }
}

/// Completed request, ready to be applied on the owning thread.
#[derive(Debug, derive_new::new)]
pub struct Resolution {
    /// The ticket that was executed.
    pub ticket: Ticket,
    /// What the service answered.
    pub result: Result<GameState, ClientError>,
}

/// Effect of applying a [`Resolution`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// The resolution belonged to a cancelled mount and was dropped.
    Discarded,
    /// A new snapshot replaced the old one.
    Updated,
    /// A new snapshot replaced the old one and finished the game.
    Finished(Outcome),
    /// The request failed; the message is now displayed.
    Failed(String),
}

/// Read-only view handed to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    /// Last accepted snapshot.
    pub state: Option<&'a GameState>,
    /// A request is in flight.
    pub loading: bool,
    /// Message of the last failure.
    pub error: Option<&'a str>,
}

/// Client-side state of one board's session.
#[derive(Getters)]
pub struct BoardSession {
    /// Position in the meta board.
    board: BoardId,
    /// Sent with every creation request.
    starting_player: Player,
    /// Last accepted snapshot.
    state: Option<GameState>,
    /// A request is in flight.
    loading: bool,
    /// Message of the last failure.
    error: Option<String>,
    #[getter(skip)]
    token: CancellationToken,
    #[getter(skip)]
    watcher: OutcomeWatcher,
    #[getter(skip)]
    observer: Option<SharedObserver>,
}

impl std::fmt::Debug for BoardSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardSession")
            .field("board", &self.board)
            .field("starting_player", &self.starting_player)
            .field("state", &self.state)
            .field("loading", &self.loading)
            .field("error", &self.error)
            .field("has_observer", &self.observer.is_some())
            .finish()
    }
}

impl BoardSession {
    /// Creates an unmounted session for `board`.
    #[instrument]
    pub fn new(board: BoardId, starting_player: Player) -> Self {
        debug!("Creating board session");
        let token = CancellationToken::new();
        token.cancel();
        Self {
            board,
            starting_player,
            state: None,
            loading: false,
            error: None,
            token,
            watcher: OutcomeWatcher::new(),
            observer: None,
        }
    }

    /// Registers an observer for finished games.
    pub fn with_observer(mut self, observer: SharedObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Starts a new session, abandoning the current one.
    ///
    /// Any request still pending for the old session is cancelled and its
    /// result will be discarded.
    #[instrument(skip(self), fields(board = self.board))]
    pub fn mount(&mut self) -> Ticket {
        self.token.cancel();
        self.token = CancellationToken::new();
        self.state = None;
        self.error = None;
        self.loading = true;
        self.watcher = OutcomeWatcher::new();

        info!(starting_player = %self.starting_player, "Mounting board");
        self.ticket(Request::Create {
            starting_player: self.starting_player,
        })
    }

    /// Tears the board down; later resolutions are discarded.
    #[instrument(skip(self), fields(board = self.board))]
    pub fn unmount(&mut self) {
        debug!("Unmounting board");
        self.token.cancel();
    }

    /// Checks whether the board is mounted.
    pub fn is_mounted(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Translates a click on `index` into a move request.
    ///
    /// Returns why nothing was sent when the click is not allowed; in that
    /// case no state changes.
    #[instrument(skip(self), fields(board = self.board))]
    pub fn click(&mut self, index: usize) -> Result<Ticket, Suppressed> {
        let Some(state) = self.state.as_ref().filter(|_| self.is_mounted()) else {
            debug!("Click ignored: no session");
            return Err(Suppressed::NoActiveSession);
        };
        if self.loading {
            debug!("Click ignored: request in flight");
            return Err(Suppressed::InFlight);
        }
        if self.error.is_some() {
            debug!("Click ignored: error shown");
            return Err(Suppressed::ErrorShown);
        }
        if state.is_terminal() {
            debug!("Click ignored: game over");
            return Err(Suppressed::Terminal);
        }
        let cell = CellIndex::new(index).ok_or(Suppressed::OutOfRange(index))?;
        if state.is_occupied(cell) {
            debug!(index, "Click ignored: cell occupied");
            return Err(Suppressed::Occupied(cell));
        }

        let session_id = state.id.clone();
        self.loading = true;

        info!(session_id = %session_id, index, "Submitting move");
        Ok(self.ticket(Request::Move {
            session_id,
            index: cell,
        }))
    }

    /// Folds a completed request back into the session.
    #[instrument(skip(self, resolution), fields(board = self.board))]
    pub fn apply(&mut self, resolution: Resolution) -> Applied {
        let Resolution { ticket, result } = resolution;
        if ticket.token.is_cancelled() || ticket.board != self.board {
            debug!("Discarding stale resolution");
            return Applied::Discarded;
        }

        self.loading = false;
        match result {
            Ok(state) => {
                debug!(
                    session_id = %state.id,
                    current_player = %state.current_player,
                    status = %state.status,
                    "Accepted snapshot"
                );
                let outcome = self.watcher.observe(&state);
                self.state = Some(state);

                match outcome {
                    Some(outcome) => {
                        info!(outcome = %outcome, "Game finished");
                        if let Some(observer) = &self.observer {
                            observer.on_outcome(self.board, outcome);
                        }
                        Applied::Finished(outcome)
                    }
                    None => Applied::Updated,
                }
            }
            Err(e) => {
                warn!(error = %e, file = e.file, line = e.line, "Request failed");
                let message = e.to_string();
                self.error = Some(message.clone());
                Applied::Failed(message)
            }
        }
    }

    /// Recovers from the error banner.
    ///
    /// Without a snapshot the session is re-created; with one the error is
    /// cleared so the grid is usable again. Does nothing while a request is
    /// in flight or when there is no error.
    #[instrument(skip(self), fields(board = self.board))]
    pub fn retry(&mut self) -> Option<Ticket> {
        if self.loading || self.error.is_none() {
            return None;
        }
        if self.state.is_none() {
            return Some(self.mount());
        }
        debug!("Clearing error");
        self.error = None;
        None
    }

    /// Borrowed view for rendering.
    pub fn view(&self) -> BoardView<'_> {
        BoardView {
            state: self.state.as_ref(),
            loading: self.loading,
            error: self.error.as_deref(),
        }
    }

    /// Outcome of the current game, if finished.
    pub fn outcome(&self) -> Option<Outcome> {
        self.state.as_ref().and_then(GameState::outcome)
    }

    fn ticket(&self, request: Request) -> Ticket {
        Ticket {
            board: self.board,
            request,
            token: self.token.clone(),
        }
    }
}
