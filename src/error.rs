//! Client error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong talking to the game service.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ClientErrorKind {
    /// The request did not complete, or came back non-2xx without a usable
    /// reason.
    #[display("{}", _0)]
    NetworkFailure(String),

    /// The service refused the move and said why.
    #[display("{}", _0)]
    MoveRejected(String),

    /// A move was attempted before any session existed.
    #[display("No active session")]
    NoActiveSession,
}

/// Client error with location tracking.
///
/// `Display` is the user-facing message only; the location is kept for logs.
#[derive(Debug, Clone, Display, Error)]
#[display("{}", kind)]
pub struct ClientError {
    /// Error category and message.
    pub kind: ClientErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ClientError {
    /// Creates a new client error with caller location tracking.
    #[track_caller]
    #[instrument(skip(kind))]
    pub fn new(kind: ClientErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for a [`ClientErrorKind::NetworkFailure`].
    #[track_caller]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::NetworkFailure(message.into()))
    }

    /// Shorthand for a [`ClientErrorKind::MoveRejected`].
    #[track_caller]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::MoveRejected(reason.into()))
    }

    /// Checks whether the service refused a move with a reason.
    pub fn is_rejection(&self) -> bool {
        matches!(self.kind, ClientErrorKind::MoveRejected(_))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
