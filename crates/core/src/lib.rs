//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the playfield model and everything that decides whether a
//! piece may move. It has no dependencies on terminals, input devices or I/O.
//!
//! # Module Structure
//!
//! - [`shapes`]: the 7 x 4 tetromino shape table (bitmask encoded)
//! - [`grid`]: settled-cell occupancy, collision test and lock-in
//! - [`piece`]: the falling piece value
//! - [`timer`]: tick counters for gravity and input repeat
//! - [`rng`]: fixed or seeded-random piece selection
//! - [`session`]: the game session and command resolution
//!
//! # Rules
//!
//! - Moves and rotations that collide with a wall, the floor or a settled cell
//!   are silently rejected.
//! - Rotation is one clockwise step, no wall kicks.
//! - Locking merges the piece into the grid; there is no line clearing.
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameSession, SessionSettings, SpawnPolicy};
//! use blockfall_core::types::{GameAction, PieceKind};
//!
//! let mut session = GameSession::new(SessionSettings {
//!     spawn: SpawnPolicy::Fixed(PieceKind::I),
//!     ..SessionSettings::default()
//! })
//! .unwrap();
//!
//! assert!(session.apply_action(GameAction::MoveLeft));
//! assert!(session.apply_action(GameAction::RotateCw));
//! session.apply_action(GameAction::Lock);
//! assert_eq!(session.grid().occupied_count(), 4);
//! ```

pub mod grid;
pub mod piece;
pub mod rng;
pub mod session;
pub mod shapes;
pub mod timer;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use grid::{Grid, GridError};
pub use piece::Tetromino;
pub use rng::{SimpleRng, SpawnPolicy, Spawner};
pub use session::{
    trigger_of, ActionInput, ControlBinding, GameSession, SessionSettings, Trigger, CONTROLS,
};
pub use shapes::{is_cell_occupied, occupied_offsets};
pub use timer::TickCounter;
