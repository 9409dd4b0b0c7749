//! End-to-end scenarios: the controller consuming scripted invitation and
//! game streams, with a recording transport and engine standing in for the
//! external collaborators.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use chess::Color;
use futures::stream;
use rand::rngs::StdRng;
use rand::SeedableRng;

use chess_bot::models::{
    Account, ChallengeNotice, GameEvent, GameFull, GameStateUpdate, GameStatus, PlatformEvent,
    TimeControl, Variant,
};
use chess_bot::{BotConfig, MoveEngine, Platform, SessionController, TransportError};

const BOT: &str = "garntbot";

/// Everything the scripted transport records, shared with the test body.
#[derive(Default)]
struct Ledger {
    accepted: RefCell<Vec<String>>,
    sent: RefCell<Vec<(String, String)>>,
    submit_failures: Cell<u32>,
}

/// Transport double replaying scripted streams and recording every call.
struct ScriptedPlatform {
    lobby: Vec<PlatformEvent>,
    games: HashMap<String, Vec<GameEvent>>,
    ledger: Rc<Ledger>,
}

impl ScriptedPlatform {
    fn new(lobby: Vec<PlatformEvent>, games: Vec<(&str, Vec<GameEvent>)>) -> (Self, Rc<Ledger>) {
        let ledger = Rc::new(Ledger::default());
        let platform = ScriptedPlatform {
            lobby,
            games: games
                .into_iter()
                .map(|(id, events)| (id.to_string(), events))
                .collect(),
            ledger: Rc::clone(&ledger),
        };
        (platform, ledger)
    }
}

#[async_trait(?Send)]
impl Platform for ScriptedPlatform {
    type EventStream = stream::Iter<std::vec::IntoIter<PlatformEvent>>;
    type GameStream = stream::Iter<std::vec::IntoIter<GameEvent>>;

    fn event_stream(&self) -> Self::EventStream {
        stream::iter(self.lobby.clone())
    }

    fn game_stream(&self, game_id: &str) -> Self::GameStream {
        stream::iter(self.games.get(game_id).cloned().unwrap_or_default())
    }

    async fn accept_challenge(&self, challenge_id: &str) -> Result<(), TransportError> {
        self.ledger
            .accepted
            .borrow_mut()
            .push(challenge_id.to_string());
        Ok(())
    }

    async fn submit_move(&self, game_id: &str, uci: &str) -> Result<(), TransportError> {
        if self.ledger.submit_failures.get() > 0 {
            self.ledger
                .submit_failures
                .set(self.ledger.submit_failures.get() - 1);
            return Err(TransportError::Api("simulated outage".to_string()));
        }
        self.ledger
            .sent
            .borrow_mut()
            .push((game_id.to_string(), uci.to_string()));
        Ok(())
    }
}

/// Engine double handing out scripted candidates and recording its budgets.
struct ScriptedEngine {
    candidates: Vec<&'static str>,
    budgets: Rc<RefCell<Vec<Duration>>>,
}

impl ScriptedEngine {
    fn new(candidates: Vec<&'static str>) -> (Self, Rc<RefCell<Vec<Duration>>>) {
        let budgets = Rc::new(RefCell::new(Vec::new()));
        let engine = ScriptedEngine {
            candidates,
            budgets: Rc::clone(&budgets),
        };
        (engine, budgets)
    }
}

impl MoveEngine for ScriptedEngine {
    fn evaluate(&mut self, _position: &str, budget: Duration, _side: Color) -> Vec<String> {
        self.budgets.borrow_mut().push(budget);
        if self.candidates.is_empty() {
            return Vec::new();
        }
        vec![self.candidates.remove(0).to_string()]
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn challenge_event(id: &str, variant: &str, limit: u64, increment: u64) -> PlatformEvent {
    PlatformEvent::Challenge {
        challenge: ChallengeNotice {
            id: id.to_string(),
            variant: Variant {
                name: variant.to_string(),
            },
            time_control: Some(TimeControl { limit, increment }),
            challenger: Some(Account {
                id: "somebody".to_string(),
            }),
            dest_user: Some(Account {
                id: BOT.to_string(),
            }),
        },
    }
}

fn full_setup(white: &str, black: &str) -> GameEvent {
    GameEvent::GameFull(GameFull {
        white: Account {
            id: white.to_string(),
        },
        black: Account {
            id: black.to_string(),
        },
        initial_fen: None,
        state: None,
    })
}

fn state(moves: &str, wtime: i64, btime: i64, status: Option<GameStatus>) -> GameEvent {
    GameEvent::GameState(GameStateUpdate {
        moves: moves.to_string(),
        wtime,
        btime,
        status,
    })
}

fn config_with_openings(openings: &[&str]) -> BotConfig {
    let mut config = BotConfig::new(BOT);
    config.opening_moves = openings.iter().map(|uci| uci.to_string()).collect();
    config.retry.base_delay = Duration::from_millis(1);
    config
}

#[actix_rt::test]
async fn off_variant_challenges_are_declined_silently() {
    init_logging();
    let (platform, ledger) = ScriptedPlatform::new(
        vec![
            challenge_event("ch1", "Chess960", 900, 5),
            challenge_event("ch2", "Standard", 5, 0),
        ],
        Vec::new(),
    );
    let (engine, _) = ScriptedEngine::new(Vec::new());
    let mut controller = SessionController::new(
        platform,
        engine,
        StdRng::seed_from_u64(1),
        BotConfig::new(BOT),
    );

    controller.run().await;

    assert!(ledger.accepted.borrow().is_empty());
    assert!(ledger.sent.borrow().is_empty());
    assert!(controller.phase().is_idle());
}

#[actix_rt::test]
async fn accepted_challenge_as_white_opens_from_the_book() {
    init_logging();
    let (platform, ledger) = ScriptedPlatform::new(
        vec![challenge_event("abc123", "Standard", 900, 5)],
        vec![(
            "abc123",
            vec![
                full_setup(BOT, "somebody"),
                state("", 900_000, 900_000, Some(GameStatus::Aborted)),
            ],
        )],
    );
    let (engine, budgets) = ScriptedEngine::new(Vec::new());
    let mut controller = SessionController::new(
        platform,
        engine,
        StdRng::seed_from_u64(7),
        BotConfig::new(BOT),
    );

    controller.run().await;

    assert_eq!(*ledger.accepted.borrow(), vec!["abc123".to_string()]);
    let sent = ledger.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "abc123");
    let book = ["e2e4", "d2d4", "g1f3"];
    assert!(book.contains(&sent[0].1.as_str()), "{} not in the opening book", sent[0].1);
    // the opening bypassed the engine
    assert!(budgets.borrow().is_empty());
}

#[actix_rt::test]
async fn full_game_as_white_runs_to_the_terminal_status() {
    init_logging();
    let (platform, ledger) = ScriptedPlatform::new(
        vec![challenge_event("abc123", "Standard", 900, 5)],
        vec![(
            "abc123",
            vec![
                full_setup(BOT, "somebody"),
                // our opening echoed back, then the reply
                state("e2e4", 900_000, 900_000, None),
                state("e2e4 c7c5", 898_000, 897_000, None),
                // opponent answers our second move, then resigns
                state("e2e4 c7c5 g1f3", 898_000, 895_000, None),
                state("e2e4 c7c5 g1f3 d7d6", 898_000, 894_000, Some(GameStatus::Resign)),
            ],
        )],
    );
    let (engine, budgets) = ScriptedEngine::new(vec!["g1f3"]);
    let mut controller = SessionController::new(
        platform,
        engine,
        StdRng::seed_from_u64(3),
        config_with_openings(&["e2e4"]),
    );

    controller.run().await;

    assert_eq!(
        *ledger.sent.borrow(),
        vec![
            ("abc123".to_string(), "e2e4".to_string()),
            ("abc123".to_string(), "g1f3".to_string()),
        ]
    );
    // one engine consultation, on white's remaining clock
    assert_eq!(*budgets.borrow(), vec![Duration::from_secs(898)]);
    assert!(controller.phase().is_idle());
}

#[actix_rt::test]
async fn second_mover_replies_on_a_zero_budget() {
    init_logging();
    let (platform, ledger) = ScriptedPlatform::new(
        vec![challenge_event("g77", "Standard", 900, 5)],
        vec![(
            "g77",
            vec![
                full_setup("somebody", BOT),
                state("e2e4", 900_000, 900_000, None),
                state("e2e4 e7e5", 899_000, 900_000, Some(GameStatus::Draw)),
            ],
        )],
    );
    let (engine, budgets) = ScriptedEngine::new(vec!["e7e5"]);
    let mut controller = SessionController::new(
        platform,
        engine,
        StdRng::seed_from_u64(3),
        BotConfig::new(BOT),
    );

    controller.run().await;

    assert_eq!(
        *ledger.sent.borrow(),
        vec![("g77".to_string(), "e7e5".to_string())]
    );
    assert_eq!(*budgets.borrow(), vec![Duration::ZERO]);
}

#[actix_rt::test]
async fn transient_submit_failures_are_retried_through() {
    init_logging();
    let (platform, ledger) = ScriptedPlatform::new(
        vec![challenge_event("r1", "Standard", 900, 5)],
        vec![(
            "r1",
            vec![
                full_setup(BOT, "somebody"),
                state("", 900_000, 900_000, Some(GameStatus::Timeout)),
            ],
        )],
    );
    ledger.submit_failures.set(2);
    let (engine, _) = ScriptedEngine::new(Vec::new());
    let mut controller = SessionController::new(
        platform,
        engine,
        StdRng::seed_from_u64(5),
        config_with_openings(&["d2d4"]),
    );

    controller.run().await;

    // two simulated outages, then the move lands
    assert_eq!(
        *ledger.sent.borrow(),
        vec![("r1".to_string(), "d2d4".to_string())]
    );
}

#[actix_rt::test]
async fn a_poisoned_game_does_not_stop_the_bot() {
    init_logging();
    let (platform, ledger) = ScriptedPlatform::new(
        vec![
            challenge_event("bad1", "Standard", 900, 5),
            challenge_event("ok2", "Standard", 900, 5),
        ],
        vec![
            (
                "bad1",
                vec![
                    full_setup("somebody", BOT),
                    // the platform would never send this; the session dies,
                    // the bot must not
                    state("zz99", 900_000, 900_000, None),
                ],
            ),
            (
                "ok2",
                vec![
                    full_setup("somebody", BOT),
                    state("e2e4", 900_000, 900_000, None),
                    state("e2e4 e7e5", 899_000, 900_000, Some(GameStatus::Mate)),
                ],
            ),
        ],
    );
    let (engine, _) = ScriptedEngine::new(vec!["e7e5"]);
    let mut controller = SessionController::new(
        platform,
        engine,
        StdRng::seed_from_u64(9),
        BotConfig::new(BOT),
    );

    controller.run().await;

    assert_eq!(
        *ledger.accepted.borrow(),
        vec!["bad1".to_string(), "ok2".to_string()]
    );
    // nothing sent for the poisoned game, the next one played out normally
    assert_eq!(
        *ledger.sent.borrow(),
        vec![("ok2".to_string(), "e7e5".to_string())]
    );
    assert!(controller.phase().is_idle());
}
