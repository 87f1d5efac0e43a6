//! Shared types module - data structures and constants used across the workspace
//!
//! Everything here is plain data with no I/O, so the same types flow through the
//! engine, the renderer, the input mapping and the persistence layer.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! Pieces may sit partly above row 0 (negative rows); those cells are never
//! written into the board.
//!
//! # Gravity
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Host loop frame budget (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity period at level 1 |
//! | `START_SPEED_STEP_MS` | 100 | Per-level speed-up applied when a game starts |
//! | `LEVEL_SPEED_STEP_MS` | 50 | Per-level speed-up applied on level-up |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Gravity never gets faster than this |
//!
//! The start-of-game and level-up curves use different per-level steps; the
//! engine's scoring module owns both formulas.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(kind.color().to_string(), "#800080");
//!
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Host loop frame budget in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Per-level reduction used for the interval set when a game starts
pub const START_SPEED_STEP_MS: u32 = 100;

/// Per-level reduction used for the interval recomputed on level-up
pub const LEVEL_SPEED_STEP_MS: u32 = 50;

/// Absolute minimum drop interval (100ms)
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Lines needed per level step
pub const LINES_PER_LEVEL: u32 = 10;

/// Highest level a game may be started at
pub const MAX_STARTING_LEVEL: u32 = 10;

/// Number of entries kept in the high-score table
pub const HIGH_SCORE_LIMIT: usize = 10;

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines simultaneously, multiplied by the current
/// level (1-based):
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Points per row for a successful soft drop
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per row descended by a hard drop
pub const HARD_DROP_POINTS_PER_CELL: u32 = 2;

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in canonical order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("L"), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Display color of the kind.
    ///
    /// - **I**: cyan, **O**: yellow, **T**: purple, **S**: green,
    ///   **Z**: red, **J**: blue, **L**: orange
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color(0x00FFFF),
            PieceKind::O => Color(0xFFFF00),
            PieceKind::T => Color(0x800080),
            PieceKind::S => Color(0x00FF00),
            PieceKind::Z => Color(0xFF0000),
            PieceKind::J => Color(0x0000FF),
            PieceKind::L => Color(0xFFA500),
        }
    }
}

/// Opaque color token stored in locked board cells (24-bit `0xRRGGBB`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    /// Split into `(r, g, b)` channels.
    pub fn rgb(&self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            (self.0 & 0xFF) as u8,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0 & 0xFF_FFFF)
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell filled by a locked block of that color
pub type Cell = Option<Color>;

/// Player and host commands accepted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (+1 point)
    SoftDrop,
    /// Drop piece to the lowest valid row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise with wall kicks
    RotateCw,
    /// Toggle pause state
    Pause,
    /// Start a new game (resets board and stats)
    Start,
}

impl Command {
    /// Parse command from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("ROTATECW"), Some(Command::RotateCw));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "rotatecw" => Some(Command::RotateCw),
            "pause" => Some(Command::Pause),
            "start" => Some(Command::Start),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::RotateCw => "rotateCw",
            Command::Pause => "pause",
            Command::Start => "start",
        }
    }
}

/// Run statistics reported to listeners after every state change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunStats {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

impl RunStats {
    /// Fresh statistics for a game started at `level`.
    pub fn new(level: u32) -> Self {
        Self {
            score: 0,
            level,
            lines: 0,
        }
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Final result of a game, persisted by the high-score table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub date: NaiveDate,
}

impl HighScoreEntry {
    pub fn from_stats(stats: RunStats, date: NaiveDate) -> Self {
        Self {
            score: stats.score,
            level: stats.level,
            lines: stats.lines,
            date,
        }
    }

    pub fn stats(&self) -> RunStats {
        RunStats {
            score: self.score,
            level: self.level,
            lines: self.lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_formats_as_hex() {
        assert_eq!(PieceKind::L.color().to_string(), "#FFA500");
        assert_eq!(PieceKind::I.color().rgb(), (0, 255, 255));
    }

    #[test]
    fn command_names_round_trip() {
        for cmd in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::SoftDrop,
            Command::HardDrop,
            Command::RotateCw,
            Command::Pause,
            Command::Start,
        ] {
            assert_eq!(Command::from_str(cmd.as_str()), Some(cmd));
        }
    }

    #[test]
    fn piece_kinds_have_distinct_colors() {
        for (i, a) in PieceKind::ALL.iter().enumerate() {
            for b in &PieceKind::ALL[i + 1..] {
                assert_ne!(a.color(), b.color());
            }
        }
    }
}
