use std::time::Duration;

use log::{debug, warn};

use crate::transport::Platform;

/// Bounded-retry parameters for move submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, the first try included.
    pub max_attempts: u32,
    /// Delay unit; a failure on attempt `n` (zero-based) waits
    /// `base_delay * 2^n` before the next try.
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// What became of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The platform took the move after `attempts` tries.
    Sent { attempts: u32 },
    /// Every attempt failed; the move was never recorded as sent.
    Exhausted { attempts: u32 },
}

impl SubmitOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, SubmitOutcome::Sent { .. })
    }
}

/// Pushes moves through the transport, absorbing transient API failures.
///
/// Exhaustion is an outcome value, not an error: callers must look at it,
/// and nothing here can take the controller's loop down.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveSubmitter {
    policy: RetryPolicy,
}

impl MoveSubmitter {
    pub fn new(policy: RetryPolicy) -> Self {
        MoveSubmitter { policy }
    }

    pub async fn submit<P: Platform>(
        &self,
        platform: &P,
        game_id: &str,
        uci: &str,
    ) -> SubmitOutcome {
        for attempt in 0..self.policy.max_attempts {
            match platform.submit_move(game_id, uci).await {
                Ok(()) => {
                    debug!(
                        "move {} for game {} sent on attempt {}",
                        uci,
                        game_id,
                        attempt + 1
                    );
                    return SubmitOutcome::Sent {
                        attempts: attempt + 1,
                    };
                }
                Err(err) => {
                    warn!(
                        "attempt {} of {} to send {} for game {} failed: {}",
                        attempt + 1,
                        self.policy.max_attempts,
                        uci,
                        game_id,
                        err
                    );
                    if attempt + 1 < self.policy.max_attempts {
                        actix_rt::time::sleep(self.policy.backoff_delay(attempt)).await;
                    }
                }
            }
        }
        warn!(
            "failed to send move {} for game {} after {} attempts",
            uci, game_id, self.policy.max_attempts
        );
        SubmitOutcome::Exhausted {
            attempts: self.policy.max_attempts,
        }
    }
}
