use std::fmt;
use std::time::Duration;

use chess::Color;
use serde::Deserialize;

/// A record from the top-level invitation stream.
///
/// The stream never ends on its own; anything that is not a challenge
/// notification is ignored by the session core.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlatformEvent {
    Challenge { challenge: ChallengeNotice },
    #[serde(other)]
    Other,
}

/// An incoming match invitation, consumed by the challenge filter exactly once.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeNotice {
    pub id: String,
    pub variant: Variant,
    /// Absent for correspondence-style challenges without a clock.
    pub time_control: Option<TimeControl>,
    pub challenger: Option<Account>,
    pub dest_user: Option<Account>,
}

/// Rule-set family of a match.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Variant {
    pub name: String,
}

/// Time control as the platform encodes it: whole seconds on the wire.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeControl {
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub increment: u64,
}

impl TimeControl {
    /// Base thinking time granted to each side.
    pub fn base_time(&self) -> Duration {
        Duration::from_secs(self.limit)
    }

    /// Time added back after every move.
    pub fn increment_time(&self) -> Duration {
        Duration::from_secs(self.increment)
    }
}

/// An account identity involved in a challenge or seated in a game.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Account {
    pub id: String,
}

/// A record from the per-game event stream of one accepted match.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    GameFull(GameFull),
    GameState(GameStateUpdate),
    #[serde(other)]
    Other,
}

impl GameEvent {
    /// Status carried by this event, wherever the platform put it.
    pub fn status(&self) -> Option<GameStatus> {
        match self {
            GameEvent::GameFull(full) => full.status(),
            GameEvent::GameState(state) => state.status,
            GameEvent::Other => None,
        }
    }
}

/// The one-time full setup record sent when a game stream opens.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameFull {
    pub white: Account,
    pub black: Account,
    /// Starting position, or the `startpos` sentinel for the standard start.
    pub initial_fen: Option<String>,
    /// Snapshot of the game so far; carries moves when (re)joining mid-game.
    pub state: Option<GameStateUpdate>,
}

impl GameFull {
    /// Colour of the given account in this game. The platform guarantees the
    /// account occupies one of the two seats.
    pub fn seat_of(&self, account_id: &str) -> Color {
        if self.white.id == account_id {
            Color::White
        } else {
            Color::Black
        }
    }

    pub fn status(&self) -> Option<GameStatus> {
        self.state.as_ref().and_then(|state| state.status)
    }
}

/// A repeated state update: the ordered move list so far plus both clocks.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameStateUpdate {
    /// All moves played so far in coordinate notation, space separated.
    #[serde(default)]
    pub moves: String,
    /// White's clock field in milliseconds, as encoded by the platform.
    pub wtime: i64,
    /// Black's clock field in milliseconds, as encoded by the platform.
    pub btime: i64,
    pub status: Option<GameStatus>,
}

impl GameStateUpdate {
    pub fn move_list(&self) -> impl Iterator<Item = &str> {
        self.moves.split_whitespace()
    }
}

/// Lifecycle status reported by the platform inside game events.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    Created,
    Started,
    Aborted,
    Mate,
    Resign,
    Stalemate,
    Timeout,
    Draw,
    Outoftime,
    Cheat,
    NoStart,
    UnknownFinish,
    VariantEnd,
}

impl GameStatus {
    /// Anything past the in-progress statuses ends the session.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Created | GameStatus::Started)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameStatus::Created => "created",
            GameStatus::Started => "started",
            GameStatus::Aborted => "aborted",
            GameStatus::Mate => "checkmate",
            GameStatus::Resign => "resignation",
            GameStatus::Stalemate => "stalemate",
            GameStatus::Timeout => "timeout",
            GameStatus::Draw => "draw",
            GameStatus::Outoftime => "out of time",
            GameStatus::Cheat => "cheat detected",
            GameStatus::NoStart => "no start",
            GameStatus::UnknownFinish => "finished",
            GameStatus::VariantEnd => "variant end",
        };
        write!(f, "{}", label)
    }
}
