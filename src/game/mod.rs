pub mod board;
pub mod clock;
pub mod utils;

pub use board::BoardSynchronizer;
pub use clock::{remaining_time, ClockError};
