use std::time::Duration;

use crate::config::EngineConfig;
use crate::events::GameEvent;
use crate::input::{Axis, Direction, Sign, Velocity};
use crate::item::{Item, RandomSource};
use crate::scheduler::{TickScheduler, TimerHandle};
use crate::score::ScoreLedger;
use crate::snake::{Position, Snake};
use crate::storage::KeyValueStore;

/// Lifecycle phase of the current run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RunState {
    NotStarted,
    Running,
    Paused,
    Ended,
}

impl RunState {
    /// Caption for the single start/pause control.
    #[must_use]
    pub fn control_label(self) -> &'static str {
        match self {
            Self::NotStarted => "Start",
            Self::Running => "Pause",
            Self::Paused => "Resume",
            Self::Ended => "Game Over",
        }
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    WallCollision,
    SelfCollision,
}

/// Board contents a run begins with.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RunSetup {
    pub snake: Snake,
    pub velocity: Velocity,
    pub item: Item,
}

impl RunSetup {
    /// One-cell snake heading right, item at the configured first spot.
    #[must_use]
    pub fn initial(config: &EngineConfig) -> Self {
        Self {
            snake: Snake::new(config.start),
            velocity: Velocity::default(),
            item: Item::new(config.first_item),
        }
    }
}

/// Discrete-time simulation of one run.
///
/// The engine owns the body, velocity, item, score and lifecycle, and talks
/// to the outside only through its injected ports and the event buffer.
#[derive(Debug)]
pub struct SimulationEngine<S, R, K> {
    config: EngineConfig,
    snake: Snake,
    velocity: Velocity,
    item: Item,
    score: u32,
    tick_count: u64,
    state: RunState,
    end_reason: Option<EndReason>,
    pending_tick: Option<TimerHandle>,
    events: Vec<GameEvent>,
    scheduler: S,
    rng: R,
    ledger: ScoreLedger<K>,
}

impl<S, R, K> SimulationEngine<S, R, K>
where
    S: TickScheduler,
    R: RandomSource,
    K: KeyValueStore,
{
    /// Creates an engine with the configured initial layout.
    #[must_use]
    pub fn new(config: EngineConfig, scheduler: S, rng: R, store: K) -> Self {
        let setup = RunSetup::initial(&config);
        Self::with_setup(config, setup, scheduler, rng, store)
    }

    /// Creates an engine starting from an explicit board layout.
    #[must_use]
    pub fn with_setup(
        config: EngineConfig,
        setup: RunSetup,
        scheduler: S,
        rng: R,
        store: K,
    ) -> Self {
        Self {
            config,
            snake: setup.snake,
            velocity: setup.velocity,
            item: setup.item,
            score: 0,
            tick_count: 0,
            state: RunState::NotStarted,
            end_reason: None,
            pending_tick: None,
            events: Vec::new(),
            scheduler,
            rng,
            ledger: ScoreLedger::with_capacity(store, config.high_score_capacity),
        }
    }

    /// Begins or resumes the run and requests an immediate first tick.
    ///
    /// Ignored unless the run is `NotStarted` or `Paused`.
    pub fn start(&mut self) {
        match self.state {
            RunState::NotStarted => self.events.push(GameEvent::IntroRequested),
            RunState::Paused => {}
            RunState::Running | RunState::Ended => {
                log::debug!("start ignored while {:?}", self.state);
                return;
            }
        }

        log::debug!("run {:?} -> Running", self.state);
        self.state = RunState::Running;
        self.schedule_next(Duration::ZERO);
    }

    /// Suspends a running run and cancels its pending tick.
    pub fn pause(&mut self) {
        if self.state != RunState::Running {
            log::debug!("pause ignored while {:?}", self.state);
            return;
        }

        self.state = RunState::Paused;
        self.cancel_pending_tick();
        log::debug!("run paused at tick {}", self.tick_count);
    }

    /// Single start/pause/resume control.
    pub fn toggle(&mut self) {
        match self.state {
            RunState::NotStarted | RunState::Paused => self.start(),
            RunState::Running => self.pause(),
            RunState::Ended => {}
        }
    }

    /// Requests a unit move along `axis`; a no-op while `axis` is in motion.
    ///
    /// Accepted in every run state, so the body can be aimed before the
    /// first tick.
    pub fn set_direction(&mut self, axis: Axis, sign: Sign) {
        if !self.velocity.steer(axis, sign) {
            log::debug!(
                "direction {:?} rejected on locked axis",
                Direction::from_axis(axis, sign)
            );
        }
    }

    /// Convenience wrapper over [`SimulationEngine::set_direction`].
    pub fn steer(&mut self, direction: Direction) {
        self.set_direction(direction.axis(), direction.sign());
    }

    /// Advances the run by one tick. Does nothing unless `Running`.
    pub fn step(&mut self) {
        if self.state != RunState::Running {
            return;
        }

        self.cancel_pending_tick();
        self.tick_count += 1;

        let new_head = self.snake.head().offset(self.velocity);
        self.snake.push_head(new_head);

        if new_head == self.item.position {
            self.score += 1;
            self.item = Item::spawn(&mut self.rng, self.config.grid);
            self.events.push(GameEvent::ItemConsumed {
                new_score: self.score,
            });
        } else {
            self.snake.drop_tail();
        }

        // Runs against the already grown or shrunk body: a tail cell vacated
        // this tick is free.
        if let Some(reason) = self.collision(new_head) {
            self.end_run(reason);
            return;
        }

        self.events.push(GameEvent::Rendered {
            body: self.snake.to_vec(),
            item: self.item.position,
        });
        self.schedule_next(self.tick_interval());
    }

    /// Current best scores, best first.
    #[must_use]
    pub fn high_scores(&self) -> Vec<u32> {
        self.ledger.snapshot()
    }

    /// Delay the next tick will be scheduled with at the current score.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.config.timing.interval_for_score(self.score)
    }

    /// Hands out buffered events in emission order.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn run_state(&self) -> RunState {
        self.state
    }

    /// Items eaten this run.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Body segments, head first.
    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// The consumable currently on the board.
    #[must_use]
    pub fn item(&self) -> Item {
        self.item
    }

    /// Displacement applied on the next tick.
    #[must_use]
    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Ticks performed since construction.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Why the run ended, once it has.
    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    /// Layout and pacing this engine was built with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The injected tick scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access for the driver that fires scheduled ticks.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn collision(&self, head: Position) -> Option<EndReason> {
        if !head.is_within_bounds(self.config.grid) {
            return Some(EndReason::WallCollision);
        }

        if self.snake.head_overlaps_body() {
            return Some(EndReason::SelfCollision);
        }

        None
    }

    fn end_run(&mut self, reason: EndReason) {
        self.state = RunState::Ended;
        self.end_reason = Some(reason);
        self.cancel_pending_tick();

        self.ledger.record(self.score);
        let high_scores = self.ledger.snapshot();
        log::info!(
            "run ended by {reason:?} after {} ticks with score {}",
            self.tick_count,
            self.score
        );

        self.events.push(GameEvent::RunEnded {
            final_score: self.score,
            high_scores,
        });
    }

    fn schedule_next(&mut self, delay: Duration) {
        self.cancel_pending_tick();
        self.pending_tick = Some(self.scheduler.schedule_once(delay));
    }

    fn cancel_pending_tick(&mut self) {
        if let Some(handle) = self.pending_tick.take() {
            self.scheduler.cancel(handle);
        }
    }
}
