//! Session core for an automated participant on an online chess platform.
//!
//! The crate consumes the platform's invitation stream, filters challenges,
//! mirrors one active game from its event stream, works out when it is the
//! bot's turn and with what time budget, and submits the chosen move with
//! bounded retry. The streaming transport and the move-selection engine are
//! trait boundaries ([`transport::Platform`] and [`engine::MoveEngine`])
//! supplied by the embedding application.
//!
//! Consumption is strictly sequential and single-threaded: one loop pulls
//! invitations, and an accepted match is played to completion on a nested
//! loop before the next invitation is even looked at. Nothing is shared, so
//! nothing needs a lock.
//!
//! # Example
//!
//! ```no_run
//! use chess_bot::{BotConfig, SessionController};
//! # use std::time::Duration;
//! # use chess_bot::{Platform, MoveEngine, TransportError};
//! # use chess_bot::models::{GameEvent, PlatformEvent};
//! # use async_trait::async_trait;
//! # use futures::stream;
//! # struct MyTransport;
//! # #[async_trait(?Send)]
//! # impl Platform for MyTransport {
//! #     type EventStream = stream::Iter<std::vec::IntoIter<PlatformEvent>>;
//! #     type GameStream = stream::Iter<std::vec::IntoIter<GameEvent>>;
//! #     fn event_stream(&self) -> Self::EventStream { stream::iter(Vec::new()) }
//! #     fn game_stream(&self, _: &str) -> Self::GameStream { stream::iter(Vec::new()) }
//! #     async fn accept_challenge(&self, _: &str) -> Result<(), TransportError> { Ok(()) }
//! #     async fn submit_move(&self, _: &str, _: &str) -> Result<(), TransportError> { Ok(()) }
//! # }
//! # struct MyEngine;
//! # impl MoveEngine for MyEngine {
//! #     fn evaluate(&mut self, _: &str, _: Duration, _: chess::Color) -> Vec<String> { Vec::new() }
//! # }
//!
//! #[actix_rt::main]
//! async fn main() {
//!     let config = BotConfig::from_env().expect("bot configuration");
//!     let mut controller =
//!         SessionController::new(MyTransport, MyEngine, rand::thread_rng(), config);
//!     controller.run().await;
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod models;
pub mod session;
pub mod transport;

pub use config::BotConfig;
pub use engine::MoveEngine;
pub use error::SessionError;
pub use game::BoardSynchronizer;
pub use models::{GameEvent, GameStatus, PlatformEvent, SessionPhase};
pub use session::{ChallengePolicy, RetryPolicy, SessionController, SubmitOutcome};
pub use transport::{Platform, TransportError};
