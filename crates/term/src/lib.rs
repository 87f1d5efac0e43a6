//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget toolkits and instead renders an [`EngineSnapshot`] into a
//! simple framebuffer that is diffed and flushed to the terminal.
//!
//! - `game_view` is pure and unit-tested
//! - `renderer` owns all terminal I/O
//! - Board cells are 2 columns wide to keep blocks roughly square
//!
//! [`EngineSnapshot`]: crate::core::EngineSnapshot

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, Run, TerminalRenderer};
