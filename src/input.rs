use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Grid axis a velocity component lives on.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Sign of a unit step along one axis.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Sign {
    Negative,
    Positive,
}

impl Sign {
    #[must_use]
    pub fn unit(self) -> i32 {
        match self {
            Self::Negative => -1,
            Self::Positive => 1,
        }
    }
}

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    #[must_use]
    pub fn axis(self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }

    #[must_use]
    pub fn sign(self) -> Sign {
        match self {
            Self::Up | Self::Left => Sign::Negative,
            Self::Down | Self::Right => Sign::Positive,
        }
    }

    #[must_use]
    pub fn from_axis(axis: Axis, sign: Sign) -> Self {
        match (axis, sign) {
            (Axis::Horizontal, Sign::Negative) => Self::Left,
            (Axis::Horizontal, Sign::Positive) => Self::Right,
            (Axis::Vertical, Sign::Negative) => Self::Up,
            (Axis::Vertical, Sign::Positive) => Self::Down,
        }
    }
}

/// Per-tick head displacement.
///
/// Always a unit vector along exactly one axis; the only way to change it is
/// [`Velocity::steer`], which refuses to touch the axis already in motion.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Velocity {
    dx: i32,
    dy: i32,
}

impl Velocity {
    /// Returns the unit vector along `axis` with `sign`.
    #[must_use]
    pub fn unit(axis: Axis, sign: Sign) -> Self {
        match axis {
            Axis::Horizontal => Self {
                dx: sign.unit(),
                dy: 0,
            },
            Axis::Vertical => Self {
                dx: 0,
                dy: sign.unit(),
            },
        }
    }

    #[must_use]
    pub fn dx(self) -> i32 {
        self.dx
    }

    #[must_use]
    pub fn dy(self) -> i32 {
        self.dy
    }

    /// Returns the component along `axis`.
    #[must_use]
    pub fn component(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.dx,
            Axis::Vertical => self.dy,
        }
    }

    /// Switches to the unit vector `(axis, sign)` unless `axis` is already in
    /// motion. Returns whether the change was applied.
    pub fn steer(&mut self, axis: Axis, sign: Sign) -> bool {
        if self.component(axis) != 0 {
            return false;
        }

        *self = Self::unit(axis, sign);
        true
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Self::from(Direction::Right)
    }
}

impl From<Direction> for Velocity {
    fn from(direction: Direction) -> Self {
        Self::unit(direction.axis(), direction.sign())
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    /// Start / pause / resume control.
    Toggle,
    Confirm,
    Quit,
}

/// Waits up to `timeout` for one key press and maps it to a game input.
pub fn poll_input(timeout: Duration) -> io::Result<Option<GameInput>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key(key)),
        _ => Ok(None),
    }
}

fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d' | 'D') => {
            Some(GameInput::Direction(Direction::Right))
        }
        KeyCode::Char(' ' | 'p' | 'P') => Some(GameInput::Toggle),
        KeyCode::Enter => Some(GameInput::Confirm),
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(GameInput::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::{map_key, Axis, Direction, GameInput, Sign, Velocity};

    #[test]
    fn steer_rejects_same_axis() {
        let mut velocity = Velocity::from(Direction::Right);

        assert!(!velocity.steer(Axis::Horizontal, Sign::Negative));
        assert!(!velocity.steer(Axis::Horizontal, Sign::Positive));
        assert_eq!(velocity, Velocity::from(Direction::Right));
    }

    #[test]
    fn steer_accepts_perpendicular_axis() {
        let mut velocity = Velocity::from(Direction::Right);

        assert!(velocity.steer(Axis::Vertical, Sign::Negative));
        assert_eq!((velocity.dx(), velocity.dy()), (0, -1));
        assert_eq!(velocity, Velocity::from(Direction::Up));
    }

    #[test]
    fn direction_round_trips_through_axis_and_sign() {
        for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_eq!(
                Direction::from_axis(direction.axis(), direction.sign()),
                direction
            );
            assert_eq!(
                Velocity::from(direction),
                Velocity::unit(direction.axis(), direction.sign())
            );
        }
    }

    #[test]
    fn arrow_and_wasd_keys_map_to_directions() {
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(
            map_key(press(KeyCode::Up)),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('a'))),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(map_key(press(KeyCode::Char(' '))), Some(GameInput::Toggle));
        assert_eq!(map_key(press(KeyCode::Char('x'))), None);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameInput::Quit)
        );
    }
}
