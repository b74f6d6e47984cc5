//! CLI command handlers

pub mod evaluate;
pub mod session;

pub use evaluate::EvaluateArgs;
pub use session::{SessionCommand, SessionReport};
