pub mod events;
pub mod session;

// Re-export important types
pub use events::*;
pub use session::*;
