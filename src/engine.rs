use std::time::Duration;

use chess::Color;

/// Boundary to the external move-selection engine.
///
/// The session core never looks inside the search; it passes the current
/// position, the thinking budget it is willing to spend and the side to
/// move, and plays the first candidate returned.
pub trait MoveEngine {
    /// Rank candidate moves for the position, best first, in coordinate
    /// notation. An empty list means the engine found nothing to play.
    fn evaluate(&mut self, position: &str, budget: Duration, side: Color) -> Vec<String>;
}
