//! Grid snake: a deterministic simulation core plus a thin terminal shell.
//!
//! [`game::SimulationEngine`] advances the run one tick at a time and talks to
//! the outside only through ports ([`scheduler::TickScheduler`],
//! [`item::RandomSource`], [`storage::KeyValueStore`]) and a buffer of
//! [`events::GameEvent`]s. The terminal shell folds those events into a
//! [`ui::view::ShellView`] and draws it with ratatui.

pub mod config;
pub mod events;
pub mod game;
pub mod input;
pub mod item;
pub mod renderer;
pub mod scheduler;
pub mod score;
pub mod snake;
pub mod storage;
pub mod terminal_runtime;
pub mod ui;
