//! Game state module - the engine state machine
//!
//! Ties together the board, pieces, piece source and scoring. Owns the active
//! and next piece, run statistics and the session flags, and notifies
//! registered listeners when stats change or the game ends.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::board::{Board, BoardGrid};
use crate::events::{EngineEvent, EngineListener, Listeners};
use crate::pieces::{try_rotate, ActivePiece, Orientation};
use crate::rng::{PieceSource, RandomSource};
use crate::scoring::{
    calculate_drop_score, calculate_level, calculate_line_score, level_up_drop_interval_ms,
    start_drop_interval_ms,
};
use crate::snapshot::EngineSnapshot;
use crate::types::{Command, HighScoreEntry, RunStats, MAX_STARTING_LEVEL};

/// Engine settings applied at every `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub starting_level: u32,
}

impl EngineConfig {
    /// Starting level is clamped to `1..=MAX_STARTING_LEVEL`
    pub fn new(starting_level: u32) -> Self {
        Self {
            starting_level: starting_level.clamp(1, MAX_STARTING_LEVEL),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(1)
    }
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Complete game state
#[derive(Debug)]
pub struct GameEngine<S: PieceSource = RandomSource> {
    board: Board,
    active: Option<ActivePiece>,
    next: Option<ActivePiece>,
    source: S,
    stats: RunStats,
    config: EngineConfig,
    running: bool,
    paused: bool,
    game_over: bool,
    drop_accumulator_ms: u32,
    drop_interval_ms: u32,
    listeners: Listeners,
    today: fn() -> NaiveDate,
}

impl GameEngine<RandomSource> {
    /// Create an idle engine drawing uniform random pieces from `seed`
    pub fn new(seed: u32) -> Self {
        Self::with_source(RandomSource::new(seed), EngineConfig::default())
    }
}

impl Default for GameEngine<RandomSource> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<S: PieceSource> GameEngine<S> {
    /// Create an idle engine; nothing spawns until `start`
    pub fn with_source(source: S, config: EngineConfig) -> Self {
        Self {
            board: Board::new(),
            active: None,
            next: None,
            source,
            stats: RunStats::new(config.starting_level),
            config,
            running: false,
            paused: false,
            game_over: false,
            drop_accumulator_ms: 0,
            drop_interval_ms: start_drop_interval_ms(config.starting_level),
            listeners: Listeners::new(),
            today: local_today,
        }
    }

    /// Replace the date source stamped on high-score entries
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Register a listener for stats and game-over events
    pub fn subscribe(&mut self, listener: impl EngineListener + 'static) {
        self.listeners.push(listener);
    }

    /// Level used by the next `start` (clamped to `1..=MAX_STARTING_LEVEL`)
    pub fn set_starting_level(&mut self, level: u32) {
        self.config = EngineConfig::new(level);
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Reset board and stats, spawn the active and next piece, begin running
    pub fn start(&mut self) {
        self.board.clear();
        self.stats = RunStats::new(self.config.starting_level);
        self.running = true;
        self.paused = false;
        self.game_over = false;
        self.drop_accumulator_ms = 0;
        self.drop_interval_ms = start_drop_interval_ms(self.stats.level);

        self.active = Some(ActivePiece::spawn(self.source.next_kind()));
        self.next = Some(ActivePiece::spawn(self.source.next_kind()));

        info!(
            target: "engine",
            level = self.stats.level,
            drop_interval_ms = self.drop_interval_ms,
            "game started"
        );
        self.emit_stats();
    }

    /// Toggle pause; only meaningful while a game is running
    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.paused = !self.paused;
        debug!(target: "engine", paused = self.paused, "pause toggled");
        self.emit_stats();
        true
    }

    // ---------------------------------------------------------------------
    // Player commands
    // ---------------------------------------------------------------------

    /// Shift the active piece by (dx, dy) if the new position is valid
    pub fn move_piece(&mut self, dx: i32, dy: i32) -> bool {
        if !self.accepts_commands() {
            return false;
        }
        let moved = self.try_move(dx, dy);
        if moved {
            self.emit_stats();
        }
        moved
    }

    /// Rotate the active piece clockwise, trying wall kicks in order
    pub fn rotate_clockwise(&mut self) -> bool {
        if !self.accepts_commands() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let result = try_rotate(&active.orientation, |candidate, dx, dy| {
            self.is_valid_position(&active, dx, dy, Some(candidate))
        });

        let Some((orientation, (dx, dy))) = result else {
            return false;
        };
        self.active = Some(ActivePiece {
            orientation,
            x: active.x + dx,
            y: active.y + dy,
            ..active
        });
        self.emit_stats();
        true
    }

    /// Move down one row; +1 point on success
    pub fn soft_drop(&mut self) -> bool {
        if !self.accepts_commands() {
            return false;
        }
        if !self.try_move(0, 1) {
            return false;
        }
        self.stats.score = self
            .stats
            .score
            .saturating_add(calculate_drop_score(1, false));
        self.emit_stats();
        true
    }

    /// Drop to the lowest valid row, +2 points per row, and lock immediately
    pub fn hard_drop(&mut self) -> bool {
        if !self.accepts_commands() {
            return false;
        }

        let mut distance: u32 = 0;
        while self.try_move(0, 1) {
            distance += 1;
        }
        self.stats.score = self
            .stats
            .score
            .saturating_add(calculate_drop_score(distance, true));

        self.lock_active();
        self.emit_stats();
        true
    }

    /// Advance gravity by `delta_ms` milliseconds
    pub fn update(&mut self, delta_ms: u32) {
        if !self.accepts_commands() {
            return;
        }

        self.drop_accumulator_ms = self.drop_accumulator_ms.saturating_add(delta_ms);
        if self.drop_accumulator_ms < self.drop_interval_ms {
            return;
        }

        if !self.try_move(0, 1) {
            self.lock_active();
        }
        self.drop_accumulator_ms = 0;
        self.emit_stats();
    }

    /// Dispatch a command to the matching operation
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_piece(-1, 0),
            Command::MoveRight => self.move_piece(1, 0),
            Command::SoftDrop => self.soft_drop(),
            Command::HardDrop => self.hard_drop(),
            Command::RotateCw => self.rotate_clockwise(),
            Command::Pause => self.pause(),
            Command::Start => {
                self.start();
                true
            }
        }
    }

    // ---------------------------------------------------------------------
    // Rules
    // ---------------------------------------------------------------------

    /// Whether `piece`, shifted by (dx, dy) and optionally given another
    /// orientation, fits on the board
    pub fn is_valid_position(
        &self,
        piece: &ActivePiece,
        dx: i32,
        dy: i32,
        orientation: Option<&Orientation>,
    ) -> bool {
        let orientation = orientation.unwrap_or(&piece.orientation);
        self.board.fits(orientation, piece.x + dx, piece.y + dy)
    }

    fn accepts_commands(&self) -> bool {
        self.running && !self.paused && self.active.is_some()
    }

    fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if !self.is_valid_position(&active, dx, dy, None) {
            return false;
        }
        self.active = Some(ActivePiece {
            x: active.x + dx,
            y: active.y + dy,
            ..active
        });
        true
    }

    /// Write the active piece into the board, clear lines, promote the next
    /// piece and check whether it can spawn
    fn lock_active(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board
            .lock_cells(&active.orientation, active.x, active.y, active.color);

        let cleared = self.board.clear_full_rows();
        let lines_cleared = cleared.len();
        debug!(
            target: "engine",
            kind = active.kind.as_str(),
            x = active.x,
            y = active.y,
            lines_cleared,
            "piece locked"
        );

        if lines_cleared > 0 {
            let points = calculate_line_score(lines_cleared, self.stats.level);
            self.stats.score = self.stats.score.saturating_add(points);
            self.stats.lines = self.stats.lines.saturating_add(lines_cleared as u32);
            debug!(target: "engine", rows = ?cleared.as_slice(), points, "lines cleared");

            let new_level = calculate_level(self.stats.lines);
            if new_level > self.stats.level {
                self.stats.level = new_level;
                self.drop_interval_ms = level_up_drop_interval_ms(new_level);
                debug!(
                    target: "engine",
                    level = new_level,
                    drop_interval_ms = self.drop_interval_ms,
                    "level up"
                );
            }
        }

        let promoted = match self.next.take() {
            Some(piece) => piece,
            None => ActivePiece::spawn(self.source.next_kind()),
        };
        self.next = Some(ActivePiece::spawn(self.source.next_kind()));
        self.active = Some(promoted);

        if !self.is_valid_position(&promoted, 0, 0, None) {
            self.end_game();
        }
    }

    fn end_game(&mut self) {
        self.running = false;
        self.game_over = true;

        let entry = HighScoreEntry::from_stats(self.stats, (self.today)());
        info!(
            target: "engine",
            score = entry.score,
            level = entry.level,
            lines = entry.lines,
            "game over"
        );
        self.listeners.emit(&EngineEvent::GameOver(entry));
    }

    fn emit_stats(&mut self) {
        self.listeners.emit(&EngineEvent::StatsChanged(self.stats));
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Active piece projected down to its deepest valid row
    ///
    /// None when there is no piece or the game is paused.
    pub fn ghost(&self) -> Option<ActivePiece> {
        if self.paused {
            return None;
        }
        let active = self.active?;

        let mut distance = 0;
        while self.is_valid_position(&active, 0, distance + 1, None) {
            distance += 1;
        }

        Some(ActivePiece {
            y: active.y + distance,
            ..active
        })
    }

    /// Board grid with the active piece composited while running and unpaused
    pub fn board_state(&self) -> BoardGrid {
        let mut grid = self.board.to_grid();
        if !(self.running && !self.paused) {
            return grid;
        }
        if let Some(active) = self.active {
            for (x, y) in active.cells() {
                if let (Ok(col), Ok(row)) = (usize::try_from(x), usize::try_from(y)) {
                    if let Some(cell) = grid.get_mut(row).and_then(|r| r.get_mut(col)) {
                        *cell = Some(active.color);
                    }
                }
            }
        }
        grid
    }

    /// Copy of everything a renderer needs for one frame
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            board: self.board_state(),
            active: self.active,
            ghost: self.ghost(),
            next: self.next,
            stats: self.stats,
            running: self.running,
            paused: self.paused,
            game_over: self.game_over,
            drop_interval_ms: self.drop_interval_ms,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access for setting up positions (tests, puzzles)
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_piece(&self) -> Option<ActivePiece> {
        self.next
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn drop_accumulator_ms(&self) -> u32 {
        self.drop_accumulator_ms
    }
}
