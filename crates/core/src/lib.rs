//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has no dependencies on terminal I/O or persistence, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Piece sequences can be scripted through [`PieceSource`]
//! - **Portable**: Can run in any host loop (terminal, headless, benchmarks)
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 game board with collision detection and line clearing
//! - [`events`]: Stats and game-over notifications delivered to listeners
//! - [`game_state`]: The engine: active and next piece, scoring, gravity, lifecycle
//! - [`pieces`]: Tetromino matrices and clockwise rotation with wall kicks
//! - [`rng`]: Seeded uniform piece generation
//! - [`scoring`]: Line-clear table, drop points, level and gravity curves
//! - [`snapshot`]: Owned per-frame view for renderers
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every spawn is an independent draw over the 7 kinds
//! - **Rotation**: clockwise matrix rotation, kicks tried in a fixed order
//!   `(0,0), (-1,0), (1,0), (0,-1), (-2,0), (2,0)`
//! - **No lock delay**: a piece locks when gravity cannot move it down, or
//!   immediately on hard drop
//! - **Ghost Piece**: Shows where the current piece will land
//! - **Scoring**: Classic Nintendo table times level, +1 per soft-drop row,
//!   +2 per hard-drop row
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameEngine;
//! use blockfall_types::Command;
//!
//! // Create and start a game
//! let mut game = GameEngine::new(12345);
//! game.start();
//!
//! // Apply game commands
//! game.apply(Command::MoveRight);
//! game.apply(Command::RotateCw);
//! game.apply(Command::HardDrop);
//!
//! // Check game state
//! assert!(game.stats().score > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! The engine has no clock of its own. The host calls
//! [`GameEngine::update`](game_state::GameEngine::update) every frame with the
//! elapsed milliseconds; one row falls each time the accumulated time reaches
//! the drop interval (1000ms at level 1).

pub mod board;
pub mod events;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardGrid};
pub use events::{EngineEvent, EngineListener};
pub use game_state::{EngineConfig, GameEngine};
pub use pieces::{shape, try_rotate, ActivePiece, Orientation, PieceShape};
pub use rng::{PieceSource, RandomSource, ScriptedSource, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_line_score};
pub use snapshot::EngineSnapshot;
