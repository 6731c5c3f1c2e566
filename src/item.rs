use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::StdRng;

use crate::config::GridSize;
use crate::snake::Position;

/// Uniform integer source the engine draws item coordinates from.
pub trait RandomSource {
    /// Returns a value in `[0, upper)`. `upper` is never zero.
    fn below(&mut self, upper: u16) -> u16;
}

impl RandomSource for StdRng {
    fn below(&mut self, upper: u16) -> u16 {
        self.gen_range(0..upper)
    }
}

/// Replays a fixed script of draws, cycling when exhausted.
///
/// Each scripted value is reduced modulo the requested bound.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    script: VecDeque<u16>,
}

impl ScriptedRandom {
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = u16>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn below(&mut self, upper: u16) -> u16 {
        let Some(value) = self.script.pop_front() else {
            return 0;
        };
        self.script.push_back(value);
        value % upper
    }
}

/// The single consumable on the board.
///
/// Placement ignores the body: an item may legally land on a segment.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Item {
    pub position: Position,
}

impl Item {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Places a new item uniformly at random inside `bounds`.
    #[must_use]
    pub fn spawn<R: RandomSource + ?Sized>(rng: &mut R, bounds: GridSize) -> Self {
        Self::new(spawn_position(rng, bounds))
    }
}

/// Draws x then y uniformly over the grid.
#[must_use]
pub fn spawn_position<R: RandomSource + ?Sized>(rng: &mut R, bounds: GridSize) -> Position {
    let x = rng.below(bounds.width);
    let y = rng.below(bounds.height);

    Position::new(i32::from(x), i32::from(y))
}
