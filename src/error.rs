use thiserror::Error;

use crate::game::clock::ClockError;

/// Failures that end the current session but never the process.
///
/// The controller logs these, abandons the match in progress and goes back
/// to the invitation stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("malformed coordinate move {0:?}")]
    MalformedMove(String),
    #[error("move {uci} is not legal in the current position")]
    IllegalMove { uci: String },
    #[error("invalid starting position {fen:?}: {reason}")]
    InvalidPosition { fen: String, reason: String },
    #[error(transparent)]
    Clock(#[from] ClockError),
    #[error("game event arrived before the full setup record")]
    MissingSetup,
    #[error("engine returned no candidate moves")]
    NoCandidateMove,
}
