//! Terminal rendering for the game session.
//!
//! A small, game-oriented rendering layer: the session is drawn into a plain
//! framebuffer with rectangle, outline and line primitives, and the
//! framebuffer is flushed to the terminal through `crossterm`.
//!
//! - [`fb`]: framebuffer, styles and drawing primitives
//! - [`game_view`]: board, piece and side-panel layout
//! - [`renderer`]: terminal setup/teardown and diffed output

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, BoardLayout, GameView, Viewport};
pub use renderer::{changed_runs, encode_frame, Run, TerminalRenderer};
