use std::time::Duration;

use chess::Color;
use futures::StreamExt;
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::BotConfig;
use crate::engine::MoveEngine;
use crate::error::SessionError;
use crate::game::board::BoardSynchronizer;
use crate::game::clock;
use crate::game::utils::color_to_string;
use crate::models::{
    GameEvent, GameStateUpdate, GameStatus, PlatformEvent, Session, SessionPhase,
};
use crate::session::filter::ChallengeFilter;
use crate::session::submitter::MoveSubmitter;
use crate::transport::Platform;

/// What the state machine wants done after consuming one game event.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Continue,
    Play(String),
    Finished(GameStatus),
}

/// Top-level state machine of the bot.
///
/// Consumes the invitation stream and, once a challenge is accepted, the
/// per-game event stream, driving the filter, board, clock and submitter.
/// Exactly one match is active at a time; invitations arriving mid-match
/// wait in the stream until the controller is idle again. Failures inside a
/// match abandon that match only; the outer loop always resumes.
pub struct SessionController<P, E, R> {
    platform: P,
    engine: E,
    rng: R,
    config: BotConfig,
    filter: ChallengeFilter,
    submitter: MoveSubmitter,
    phase: SessionPhase,
}

impl<P, E, R> SessionController<P, E, R>
where
    P: Platform,
    E: MoveEngine,
    R: Rng,
{
    pub fn new(platform: P, engine: E, rng: R, config: BotConfig) -> Self {
        let filter = ChallengeFilter::new(config.challenge.clone());
        let submitter = MoveSubmitter::new(config.retry);
        SessionController {
            platform,
            engine,
            rng,
            config,
            filter,
            submitter,
            phase: SessionPhase::Idle,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Consume the invitation stream until the transport ends it.
    pub async fn run(&mut self) {
        info!("listening for challenges as {}", self.config.account_id);
        let mut events = self.platform.event_stream();
        while let Some(event) = events.next().await {
            let PlatformEvent::Challenge { challenge } = event else {
                continue;
            };
            if !self.filter.accepts(&challenge) {
                info!("declining challenge {}", challenge.id);
                continue;
            }
            let from = challenge
                .challenger
                .as_ref()
                .map(|account| account.id.as_str())
                .unwrap_or("unknown");
            if let Err(err) = self.platform.accept_challenge(&challenge.id).await {
                warn!("could not accept challenge {} from {}: {}", challenge.id, from, err);
                continue;
            }
            info!("accepted challenge {} from {}", challenge.id, from);
            self.play_match(challenge.id.clone()).await;
            self.phase = SessionPhase::Idle;
        }
        info!("invitation stream closed, shutting down");
    }

    /// Nested loop for one accepted match; returns when the match reaches a
    /// terminal status, its stream ends, or the session fails.
    async fn play_match(&mut self, game_id: String) {
        self.phase = SessionPhase::MatchActive;
        debug!("session phase: {}", self.phase);
        let mut session = Session::new(game_id.as_str());
        let mut board = BoardSynchronizer::new();
        let mut events = self.platform.game_stream(&game_id);
        while let Some(event) = events.next().await {
            match self.advance(&mut session, &mut board, event) {
                Ok(Step::Continue) => {}
                Ok(Step::Play(uci)) => {
                    let outcome = self.submitter.submit(&self.platform, &game_id, &uci).await;
                    if !outcome.is_sent() {
                        warn!("move {} for game {} was never delivered", uci, game_id);
                    }
                }
                Ok(Step::Finished(status)) => {
                    info!("game {} over: {}", game_id, status);
                    break;
                }
                Err(err) => {
                    warn!("abandoning game {}: {}", game_id, err);
                    break;
                }
            }
        }
        self.phase = SessionPhase::MatchOver;
        debug!("session phase: {}", self.phase);
    }

    /// Pure transition over one game event: no stream or transport I/O.
    /// The returned step tells the caller what effect to perform.
    fn advance(
        &mut self,
        session: &mut Session,
        board: &mut BoardSynchronizer,
        event: GameEvent,
    ) -> Result<Step, SessionError> {
        if let Some(status) = event.status() {
            if status.is_terminal() {
                return Ok(Step::Finished(status));
            }
        }
        match event {
            GameEvent::GameFull(full) => {
                board.initialize(full.initial_fen.as_deref())?;
                let colour = full.seat_of(&self.config.account_id);
                session.colour = Some(colour);
                info!(
                    "game {}: playing as {}",
                    session.game_id,
                    color_to_string(colour)
                );
                if let Some(state) = &full.state {
                    board.catch_up(state.move_list())?;
                }
                self.consider_move(colour, board, full.state.as_ref())
            }
            GameEvent::GameState(state) => {
                let colour = session.colour.ok_or(SessionError::MissingSetup)?;
                if board.catch_up(state.move_list())? == 0 {
                    // duplicate or empty update, nothing to react to
                    return Ok(Step::Continue);
                }
                self.consider_move(colour, board, Some(&state))
            }
            GameEvent::Other => Ok(Step::Continue),
        }
    }

    /// Decide whether, and what, to play now that the board is current.
    fn consider_move(
        &mut self,
        colour: Color,
        board: &BoardSynchronizer,
        state: Option<&GameStateUpdate>,
    ) -> Result<Step, SessionError> {
        if board.side_to_move() != colour {
            return Ok(Step::Continue);
        }
        if board.moves_applied() == 0 {
            if let Some(opening) = self.config.opening_moves.choose(&mut self.rng) {
                info!("opening with {}", opening);
                return Ok(Step::Play(opening.clone()));
            }
        }
        // The first move as the second mover goes out instantly so the
        // opponent does not abandon the fresh match while we think.
        let budget = match state {
            Some(state) if board.moves_applied() > 1 => clock::remaining_time(state, colour)?,
            _ => Duration::ZERO,
        };
        let position = board.position();
        let mut candidates = self.engine.evaluate(&position, budget, colour);
        if candidates.is_empty() {
            return Err(SessionError::NoCandidateMove);
        }
        Ok(Step::Play(candidates.remove(0)))
    }
}
