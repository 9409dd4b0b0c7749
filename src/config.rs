use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::session::filter::ChallengePolicy;
use crate::session::submitter::RetryPolicy;

/// Opening moves the bot may play instantly as the first mover.
const DEFAULT_OPENING_MOVES: [&str; 3] = ["e2e4", "d2d4", "g1f3"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}

/// Everything the session core needs to know about the account it plays for
/// and how it should behave. Transport credentials are the embedding
/// application's concern and never appear here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    /// Account identity on the platform, compared against the seats in the
    /// full setup record to find our colour.
    pub account_id: String,
    pub challenge: ChallengePolicy,
    pub retry: RetryPolicy,
    /// Candidate first moves, drawn from uniformly at random.
    pub opening_moves: Vec<String>,
}

impl BotConfig {
    pub fn new(account_id: impl Into<String>) -> Self {
        BotConfig {
            account_id: account_id.into(),
            challenge: ChallengePolicy::default(),
            retry: RetryPolicy::default(),
            opening_moves: DEFAULT_OPENING_MOVES
                .iter()
                .map(|uci| uci.to_string())
                .collect(),
        }
    }

    /// Read configuration from the process environment. `BOT_ACCOUNT` is
    /// required; everything else falls back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let account_id =
            env::var("BOT_ACCOUNT").map_err(|_| ConfigError::Missing("BOT_ACCOUNT"))?;
        let mut config = BotConfig::new(account_id);
        if let Some(secs) = env_parse::<u64>("BOT_MIN_INITIAL_SECS")? {
            config.challenge.min_initial = Duration::from_secs(secs);
        }
        if let Some(secs) = env_parse::<u64>("BOT_MIN_INCREMENT_SECS")? {
            config.challenge.min_increment = Duration::from_secs(secs);
        }
        if let Ok(variant) = env::var("BOT_VARIANT") {
            if !variant.trim().is_empty() {
                config.challenge.variant = variant.trim().to_string();
            }
        }
        if let Some(attempts) = env_parse::<u32>("BOT_MOVE_RETRIES")? {
            config.retry.max_attempts = attempts;
        }
        if let Ok(raw) = env::var("BOT_OPENING_MOVES") {
            let moves: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|uci| !uci.is_empty())
                .map(str::to_string)
                .collect();
            if !moves.is_empty() {
                config.opening_moves = moves;
            }
        }
        Ok(config)
    }
}

fn env_parse<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Err(_) => Ok(None),
        Ok(value) => match value.trim().parse::<T>() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(ConfigError::Invalid { name, value }),
        },
    }
}
