//! Runs tickets on the tokio runtime.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

use crate::api::GameApi;
use crate::session::{Resolution, Ticket};

/// Spawns one task per ticket and posts each result to the UI thread.
///
/// A task whose ticket is cancelled before the service answers posts
/// nothing. Results that race the cancellation are still dropped by
/// [`BoardSession::apply`](crate::BoardSession::apply).
#[derive(Clone)]
pub struct Dispatcher {
    api: Arc<dyn GameApi>,
    results: mpsc::UnboundedSender<Resolution>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("closed", &self.results.is_closed())
            .finish()
    }
}

impl Dispatcher {
    /// Creates a dispatcher and the receiver its results arrive on.
    pub fn new(api: Arc<dyn GameApi>) -> (Self, mpsc::UnboundedReceiver<Resolution>) {
        let (results, rx) = mpsc::unbounded_channel();
        (Self { api, results }, rx)
    }

    /// Runs `ticket` in the background.
    #[instrument(skip(self, ticket), fields(board = *ticket.board()))]
    pub fn dispatch(&self, ticket: Ticket) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let results = self.results.clone();
        tokio::spawn(async move {
            let board = *ticket.board();
            let token = ticket.token().clone();
            let result = tokio::select! {
                _ = token.cancelled() => {
                    debug!(board, "Request abandoned after cancellation");
                    return;
                }
                result = ticket.execute(api.as_ref()) => result,
            };
            if token.is_cancelled() {
                debug!(board, "Dropping late response");
                return;
            }
            if results.send(Resolution::new(ticket, result)).is_err() {
                debug!("Result receiver closed");
            }
        })
    }

    /// Runs every ticket in `tickets`.
    pub fn dispatch_all(&self, tickets: impl IntoIterator<Item = Ticket>) -> Vec<JoinHandle<()>> {
        tickets.into_iter().map(|ticket| self.dispatch(ticket)).collect()
    }
}
