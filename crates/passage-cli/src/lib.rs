//! Passage operator CLI
//!
//! Evaluates the route gate against captured snapshots and inspects the
//! file-backed session store.

pub mod commands;
