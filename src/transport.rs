use async_trait::async_trait;
use futures::Stream;
use thiserror::Error;

use crate::models::{GameEvent, PlatformEvent};

/// Errors surfaced by the transport collaborator.
///
/// API failures are the only error kind the session core's retry logic
/// reacts to; everything below this boundary (connections, reconnects,
/// decoding) is the transport's own business.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("platform API call failed: {0}")]
    Api(String),
    #[error("network I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Boundary to the remote game platform.
///
/// Implementations own the wire protocol and hand the session core decoded
/// records. Streams are pulled strictly sequentially by a single consumer,
/// so none of this needs to be `Send`.
#[async_trait(?Send)]
pub trait Platform {
    type EventStream: Stream<Item = PlatformEvent> + Unpin;
    type GameStream: Stream<Item = GameEvent> + Unpin;

    /// Open the top-level invitation stream.
    fn event_stream(&self) -> Self::EventStream;

    /// Open the event stream for one accepted game.
    fn game_stream(&self, game_id: &str) -> Self::GameStream;

    /// Accept a pending challenge. Fire-and-forget; no retry at this layer.
    async fn accept_challenge(&self, challenge_id: &str) -> Result<(), TransportError>;

    /// Submit a move in coordinate notation for the given game.
    async fn submit_move(&self, game_id: &str, uci: &str) -> Result<(), TransportError>;
}
