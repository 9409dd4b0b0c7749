use std::time::Duration;

use chess::Color;
use thiserror::Error;

use crate::models::GameStateUpdate;

/// A clock field that cannot be turned into a thinking budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("clock field {0}ms precedes the platform epoch")]
    BeforeEpoch(i64),
}

/// Thinking time left for the side about to move, floored to whole seconds.
///
/// Pure computation over the event's per-side clock fields; no retry path.
/// A malformed field is the caller's problem and ends the session.
pub fn remaining_time(state: &GameStateUpdate, side: Color) -> Result<Duration, ClockError> {
    let millis = match side {
        Color::White => state.wtime,
        Color::Black => state.btime,
    };
    if millis < 0 {
        return Err(ClockError::BeforeEpoch(millis));
    }
    Ok(Duration::from_secs(millis as u64 / 1000))
}
