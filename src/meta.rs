//! The 3×3 grid of independent boards.

use std::sync::{Arc, Mutex};

use derive_getters::Getters;
use meta_tictactoe_protocol::{Outcome, Player};
use tracing::{debug, info, instrument, warn};

use crate::outcome::OutcomeObserver;
use crate::session::{Applied, BoardId, BoardSession, Resolution, Ticket};

/// Number of boards in the meta board.
pub const META_BOARDS: usize = 9;

/// Finished boards by outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters)]
pub struct Tally {
    /// Boards won by X.
    x_wins: usize,
    /// Boards won by O.
    o_wins: usize,
    /// Boards drawn.
    draws: usize,
}

impl Tally {
    /// Counts one finished board.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Won(Player::X) => self.x_wins += 1,
            Outcome::Won(Player::O) => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    /// Boards finished so far.
    pub fn finished(&self) -> usize {
        self.x_wins + self.o_wins + self.draws
    }
}

/// Observer that feeds a shared [`Tally`].
#[derive(Debug, Clone, Default)]
pub struct TallyObserver {
    tally: Arc<Mutex<Tally>>,
}

impl TallyObserver {
    /// Current counts.
    pub fn snapshot(&self) -> Tally {
        match self.tally.lock() {
            Ok(tally) => *tally,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Zeroes the counts.
    pub fn reset(&self) {
        match self.tally.lock() {
            Ok(mut tally) => *tally = Tally::default(),
            Err(poisoned) => *poisoned.into_inner() = Tally::default(),
        }
    }
}

impl OutcomeObserver for TallyObserver {
    fn on_outcome(&self, board: BoardId, outcome: Outcome) {
        info!(board, outcome = %outcome, "Board finished");
        match self.tally.lock() {
            Ok(mut tally) => tally.record(outcome),
            Err(poisoned) => poisoned.into_inner().record(outcome),
        }
    }
}

/// Nine boards, each with its own session on the service.
#[derive(Debug, Getters)]
pub struct MetaBoard {
    /// The boards, row-major.
    boards: Vec<BoardSession>,
    /// Starting player for every new session.
    starting_player: Player,
    /// Player shown in the "{player}'s turn" header.
    turn: Player,
    /// Feedback for the last user action.
    status_message: String,
    #[getter(skip)]
    tally: TallyObserver,
}

impl MetaBoard {
    /// Creates nine unmounted boards.
    #[instrument]
    pub fn new(starting_player: Player) -> Self {
        let tally = TallyObserver::default();
        let boards = (0..META_BOARDS)
            .map(|board| {
                BoardSession::new(board, starting_player).with_observer(Arc::new(tally.clone()))
            })
            .collect();

        Self {
            boards,
            starting_player,
            turn: starting_player,
            status_message: "Connecting…".to_string(),
            tally,
        }
    }

    /// Mounts every board, returning the creation requests to run.
    #[instrument(skip(self))]
    pub fn mount_all(&mut self) -> Vec<Ticket> {
        info!("Mounting all boards");
        self.boards.iter_mut().map(BoardSession::mount).collect()
    }

    /// Starts a fresh game on every board.
    ///
    /// Old sessions are abandoned; their pending responses are discarded.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) -> Vec<Ticket> {
        info!("Starting new game");
        self.turn = self.starting_player;
        self.tally.reset();
        self.status_message = "New game".to_string();
        self.mount_all()
    }

    /// Tears down every board.
    pub fn unmount_all(&mut self) {
        self.boards.iter_mut().for_each(BoardSession::unmount);
    }

    /// Clicks `cell` on `board`.
    #[instrument(skip(self))]
    pub fn click(&mut self, board: BoardId, cell: usize) -> Option<Ticket> {
        let session = self.boards.get_mut(board)?;
        match session.click(cell) {
            Ok(ticket) => {
                self.status_message = format!("Board {}: playing cell {}", board + 1, cell);
                Some(ticket)
            }
            Err(reason) => {
                debug!(reason = %reason, "Click suppressed");
                self.status_message = format!("Board {}: {}", board + 1, reason);
                None
            }
        }
    }

    /// Retries `board` after an error.
    #[instrument(skip(self))]
    pub fn retry(&mut self, board: BoardId) -> Option<Ticket> {
        self.boards.get_mut(board)?.retry()
    }

    /// Routes a completed request to its board.
    #[instrument(skip(self, resolution), fields(board = *resolution.ticket.board()))]
    pub fn apply(&mut self, resolution: Resolution) -> Applied {
        let board = *resolution.ticket.board();
        let Some(session) = self.boards.get_mut(board) else {
            warn!("Resolution for unknown board");
            return Applied::Discarded;
        };

        let applied = session.apply(resolution);
        match &applied {
            Applied::Updated => {
                if let Some(state) = session.state() {
                    self.turn = state.current_player;
                }
            }
            Applied::Finished(outcome) => {
                if let Some(state) = session.state() {
                    self.turn = state.current_player;
                }
                self.status_message = match outcome {
                    Outcome::Won(player) => format!("Board {}: {} wins", board + 1, player),
                    Outcome::Draw => format!("Board {}: draw", board + 1),
                };
            }
            Applied::Failed(message) => {
                self.status_message = format!("Board {}: {}", board + 1, message);
            }
            Applied::Discarded => {}
        }
        applied
    }

    /// Board at `board`.
    pub fn board(&self, board: BoardId) -> Option<&BoardSession> {
        self.boards.get(board)
    }

    /// Finished boards so far in this game.
    pub fn tally(&self) -> Tally {
        self.tally.snapshot()
    }
}
