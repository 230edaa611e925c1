//! Terminal input module (session-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]s and keeps the
//! held / just-pressed state the game session polls through
//! [`blockfall_core::ActionInput`].

pub mod map;
pub mod tracker;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use map::{map_code, map_key, should_quit};
pub use tracker::{KeyTracker, DEFAULT_RELEASE_TIMEOUT_MS};
