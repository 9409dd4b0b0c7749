use std::fmt;

use chess::Color;

/// State for the one match currently being played.
///
/// Created when a challenge is accepted and dropped when the match reaches a
/// terminal status; the board it pairs with is scoped the same way, so
/// nothing leaks between sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub game_id: String,
    /// The automated side's colour, known once the full setup record arrives.
    pub colour: Option<Color>,
}

impl Session {
    pub fn new(game_id: impl Into<String>) -> Self {
        Session {
            game_id: game_id.into(),
            colour: None,
        }
    }
}

/// Where the controller is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Consuming the invitation stream, no match underway.
    #[default]
    Idle,
    /// Consuming one accepted match's event stream.
    MatchActive,
    /// The match ended; the controller is about to go idle again.
    MatchOver,
}

impl SessionPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionPhase::Idle)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SessionPhase::MatchActive)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::Idle => write!(f, "idle"),
            SessionPhase::MatchActive => write!(f, "match active"),
            SessionPhase::MatchOver => write!(f, "match over"),
        }
    }
}
