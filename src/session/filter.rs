use std::time::Duration;

use log::debug;

use crate::models::ChallengeNotice;

/// Acceptance thresholds for incoming challenges.
///
/// The wire carries the time control in whole seconds; the thresholds here
/// are durations so the unit can never drift silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengePolicy {
    /// Rule-set family the bot is willing to play.
    pub variant: String,
    /// Minimum base thinking time.
    pub min_initial: Duration,
    /// Minimum per-move increment.
    pub min_increment: Duration,
}

impl Default for ChallengePolicy {
    fn default() -> Self {
        ChallengePolicy {
            variant: "Standard".to_string(),
            min_initial: Duration::from_secs(15),
            min_increment: Duration::from_secs(1),
        }
    }
}

/// Pure accept/decline decision over an invitation. No side effects and no
/// external calls; declining is silent.
#[derive(Debug, Clone, Default)]
pub struct ChallengeFilter {
    policy: ChallengePolicy,
}

impl ChallengeFilter {
    pub fn new(policy: ChallengePolicy) -> Self {
        ChallengeFilter { policy }
    }

    pub fn accepts(&self, challenge: &ChallengeNotice) -> bool {
        if challenge.variant.name != self.policy.variant {
            debug!(
                "challenge {}: variant {} is not playable",
                challenge.id, challenge.variant.name
            );
            return false;
        }
        let Some(clock) = &challenge.time_control else {
            debug!("challenge {}: no clock", challenge.id);
            return false;
        };
        clock.base_time() >= self.policy.min_initial
            && clock.increment_time() >= self.policy.min_increment
    }
}
