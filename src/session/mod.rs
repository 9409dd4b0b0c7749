pub mod controller;
pub mod filter;
pub mod submitter;

pub use controller::SessionController;
pub use filter::{ChallengeFilter, ChallengePolicy};
pub use submitter::{MoveSubmitter, RetryPolicy, SubmitOutcome};
