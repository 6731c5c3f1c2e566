use crate::snake::Position;

/// Notifications the engine pushes to the shell.
///
/// Events are buffered in emission order and handed out by
/// `SimulationEngine::drain_events`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum GameEvent {
    /// Emitted once, on the first start of a run.
    IntroRequested,
    /// Emitted when the head reaches the item, before any render of that tick.
    ItemConsumed { new_score: u32 },
    /// Emitted after every tick that did not end the run.
    Rendered { body: Vec<Position>, item: Position },
    /// Terminal event; `high_scores` is read after `final_score` was recorded.
    RunEnded {
        final_score: u32,
        high_scores: Vec<u32>,
    },
}
