use std::time::Duration;

use crate::snake::Position;

/// Side length of the reference square grid.
pub const DEFAULT_GRID_SIZE: u16 = 19;

/// Smallest grid side accepted from the command line.
pub const MIN_GRID_SIZE: u16 = 8;

/// Largest grid side accepted from the command line.
pub const MAX_GRID_SIZE: u16 = 64;

/// Tick interval at score zero, in milliseconds.
pub const BASE_TICK_INTERVAL_MS: u64 = 150;

/// Interval reduction per scored point, in milliseconds.
pub const TICK_DECAY_PER_POINT_MS: u64 = 5;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 50;

/// Number of entries kept in the best-scores list.
pub const MAX_HIGH_SCORES: usize = 5;

/// Durable store key holding the JSON-encoded best-scores list.
pub const HIGH_SCORES_KEY: &str = "hgscores";

/// Head position of a fresh run on the reference grid.
pub const DEFAULT_START: Position = Position { x: 10, y: 10 };

/// Item position of a fresh run on the reference grid.
pub const DEFAULT_FIRST_ITEM: Position = Position { x: 5, y: 5 };

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns an `n` by `n` grid.
    #[must_use]
    pub const fn square(side: u16) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::square(DEFAULT_GRID_SIZE)
    }
}

/// Score-driven tick pacing: `max(floor, base - score * decay)`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TickTiming {
    pub base_ms: u64,
    pub decay_per_point_ms: u64,
    pub floor_ms: u64,
}

impl TickTiming {
    /// Returns the delay before the next tick at `score`.
    #[must_use]
    pub fn interval_for_score(self, score: u32) -> Duration {
        let penalty_ms = u64::from(score).saturating_mul(self.decay_per_point_ms);
        let clamped_ms = self.base_ms.saturating_sub(penalty_ms).max(self.floor_ms);
        Duration::from_millis(clamped_ms)
    }
}

impl Default for TickTiming {
    fn default() -> Self {
        Self {
            base_ms: BASE_TICK_INTERVAL_MS,
            decay_per_point_ms: TICK_DECAY_PER_POINT_MS,
            floor_ms: MIN_TICK_INTERVAL_MS,
        }
    }
}

/// Everything a `SimulationEngine` needs to lay out and pace a run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EngineConfig {
    pub grid: GridSize,
    pub start: Position,
    pub first_item: Position,
    pub timing: TickTiming,
    pub high_score_capacity: usize,
}

impl EngineConfig {
    /// Builds a config for a square grid of side `side`.
    ///
    /// `side` is clamped to `MIN_GRID_SIZE..=MAX_GRID_SIZE`. The head starts
    /// in the centre and the first item sits at the upper-left quarter point.
    /// Use `EngineConfig::default()` for the reference layout.
    #[must_use]
    pub fn with_grid_size(side: u16) -> Self {
        let side = side.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        let center = i32::from(side / 2);
        let quarter = i32::from(side / 4);

        Self {
            grid: GridSize::square(side),
            start: Position::new(center, center),
            first_item: Position::new(quarter, quarter),
            ..Self::default()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            start: DEFAULT_START,
            first_item: DEFAULT_FIRST_ITEM,
            timing: TickTiming::default(),
            high_score_capacity: MAX_HIGH_SCORES,
        }
    }
}
