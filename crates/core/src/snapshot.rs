use crate::board::BoardGrid;
use crate::pieces::ActivePiece;
use crate::types::{RunStats, BOARD_HEIGHT, BOARD_WIDTH};

/// Read-only view of an engine frame, owned by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineSnapshot {
    /// Locked cells, with the active piece composited while playable
    pub board: BoardGrid,
    pub active: Option<ActivePiece>,
    pub ghost: Option<ActivePiece>,
    pub next: Option<ActivePiece>,
    pub stats: RunStats,
    pub running: bool,
    pub paused: bool,
    pub game_over: bool,
    pub drop_interval_ms: u32,
}

impl EngineSnapshot {
    pub fn playable(&self) -> bool {
        self.running && !self.paused
    }

    /// Number of non-empty cells in the composited board
    pub fn filled_cells(&self) -> usize {
        self.board
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_some())
            .count()
    }
}

impl Default for EngineSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost: None,
            next: None,
            stats: RunStats::default(),
            running: false,
            paused: false,
            game_over: false,
            drop_interval_ms: 0,
        }
    }
}
