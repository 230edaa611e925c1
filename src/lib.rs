//! blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under `blockfall::{core,input,term,types}`
//! and holds the pieces only the binary needs: configuration and logger setup.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod config;
pub mod logging;
