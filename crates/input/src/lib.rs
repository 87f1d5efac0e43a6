//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`]. The mapping is
//! stateless apart from the session flags passed in; key repeat timing is left
//! to the terminal.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit, InputContext};
