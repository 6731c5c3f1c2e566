use rand::Rng;

use crate::events::GameEvent;
use crate::game::SimulationEngine;
use crate::item::RandomSource;
use crate::scheduler::TickScheduler;
use crate::snake::Position;
use crate::storage::KeyValueStore;

/// Ticks the intro banner stays on screen.
pub const INTRO_BANNER_TICKS: u8 = 12;

/// Ticks the eat cue stays on screen.
pub const EAT_CUE_TICKS: u8 = 4;

/// Look of the item; re-rolled every time one is eaten.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Fruit {
    Cherry,
    Banana,
    Apple,
}

impl Fruit {
    pub const ALL: [Self; 3] = [Self::Cherry, Self::Banana, Self::Apple];

    #[must_use]
    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Cherry => "cherry",
            Self::Banana => "banana",
            Self::Apple => "apple",
        }
    }
}

/// Everything the terminal draws, rebuilt only from engine events.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ShellView {
    pub body: Vec<Position>,
    pub item: Position,
    pub fruit: Fruit,
    pub score: u32,
    pub high_scores: Vec<u32>,
    pub final_score: Option<u32>,
    pub intro_ticks: u8,
    pub eat_cue_ticks: u8,
}

impl ShellView {
    /// Seeds the view from the engine's pre-start board and scoreboard.
    #[must_use]
    pub fn from_engine<S, R, K>(engine: &SimulationEngine<S, R, K>) -> Self
    where
        S: TickScheduler,
        R: RandomSource,
        K: KeyValueStore,
    {
        Self {
            body: engine.snake().to_vec(),
            item: engine.item().position,
            fruit: Fruit::Cherry,
            score: engine.score(),
            high_scores: engine.high_scores(),
            final_score: None,
            intro_ticks: 0,
            eat_cue_ticks: 0,
        }
    }

    /// Folds one engine event into the view.
    pub fn apply<G: Rng + ?Sized>(&mut self, event: GameEvent, rng: &mut G) {
        match event {
            GameEvent::IntroRequested => {
                log::debug!("playing intro");
                self.intro_ticks = INTRO_BANNER_TICKS;
            }
            GameEvent::ItemConsumed { new_score } => {
                self.score = new_score;
                self.fruit = Fruit::pick(rng);
                self.eat_cue_ticks = EAT_CUE_TICKS;
            }
            GameEvent::Rendered { body, item } => {
                self.body = body;
                self.item = item;
                self.intro_ticks = self.intro_ticks.saturating_sub(1);
                self.eat_cue_ticks = self.eat_cue_ticks.saturating_sub(1);
            }
            GameEvent::RunEnded {
                final_score,
                high_scores,
            } => {
                self.final_score = Some(final_score);
                self.high_scores = high_scores;
                self.intro_ticks = 0;
                self.eat_cue_ticks = 0;
            }
        }
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.final_score.is_some()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::EngineConfig;
    use crate::events::GameEvent;
    use crate::game::SimulationEngine;
    use crate::item::ScriptedRandom;
    use crate::scheduler::ManualScheduler;
    use crate::snake::Position;
    use crate::storage::MemoryStore;

    use super::{EAT_CUE_TICKS, INTRO_BANNER_TICKS, ShellView};

    fn fresh_view() -> ShellView {
        let engine = SimulationEngine::new(
            EngineConfig::default(),
            ManualScheduler::new(),
            ScriptedRandom::new([0]),
            MemoryStore::new(),
        );
        ShellView::from_engine(&engine)
    }

    #[test]
    fn view_starts_from_reference_board() {
        let view = fresh_view();

        assert_eq!(view.body, vec![Position::new(10, 10)]);
        assert_eq!(view.item, Position::new(5, 5));
        assert!(view.high_scores.is_empty());
        assert!(!view.is_game_over());
    }

    #[test]
    fn intro_banner_counts_down_per_render() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut view = fresh_view();

        view.apply(GameEvent::IntroRequested, &mut rng);
        view.apply(
            GameEvent::Rendered {
                body: vec![Position::new(11, 10)],
                item: Position::new(5, 5),
            },
            &mut rng,
        );

        assert_eq!(view.intro_ticks, INTRO_BANNER_TICKS - 1);
        assert_eq!(view.body, vec![Position::new(11, 10)]);
    }

    #[test]
    fn consumption_updates_score_and_cue() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut view = fresh_view();

        view.apply(GameEvent::ItemConsumed { new_score: 3 }, &mut rng);

        assert_eq!(view.score, 3);
        assert_eq!(view.eat_cue_ticks, EAT_CUE_TICKS);
    }

    #[test]
    fn run_end_shows_final_score_and_board() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut view = fresh_view();

        view.apply(
            GameEvent::RunEnded {
                final_score: 12,
                high_scores: vec![40, 12],
            },
            &mut rng,
        );

        assert!(view.is_game_over());
        assert_eq!(view.final_score, Some(12));
        assert_eq!(view.high_scores, vec![40, 12]);
    }
}
