use std::time::Duration;

use grid_snake::config::EngineConfig;
use grid_snake::events::GameEvent;
use grid_snake::game::{RunSetup, RunState, SimulationEngine};
use grid_snake::input::{Axis, Direction, Sign, Velocity};
use grid_snake::item::{Item, ScriptedRandom};
use grid_snake::scheduler::ManualScheduler;
use grid_snake::score::ScoreLedger;
use grid_snake::snake::{Position, Snake};
use grid_snake::storage::MemoryStore;

type TestEngine = SimulationEngine<ManualScheduler, ScriptedRandom, MemoryStore>;

fn engine(setup: RunSetup, store: MemoryStore, script: &[u16]) -> TestEngine {
    SimulationEngine::with_setup(
        EngineConfig::default(),
        setup,
        ManualScheduler::new(),
        ScriptedRandom::new(script.iter().copied()),
        store,
    )
}

/// Fires the pending timer the way the shell does, then steps.
fn fire_and_step(engine: &mut TestEngine) {
    assert!(engine.scheduler_mut().fire(), "a tick should be pending");
    engine.step();
}

#[test]
fn eating_from_the_reference_start() {
    let setup = RunSetup {
        snake: Snake::new(Position::new(10, 10)),
        velocity: Velocity::from(Direction::Right),
        item: Item::new(Position::new(11, 10)),
    };
    let mut engine = engine(setup, MemoryStore::new(), &[4, 7]);

    engine.start();
    fire_and_step(&mut engine);

    assert_eq!(
        engine.snake().to_vec(),
        vec![Position::new(11, 10), Position::new(10, 10)]
    );
    assert_eq!(engine.score(), 1);
    assert_eq!(engine.item().position, Position::new(4, 7));
    assert_eq!(
        engine.drain_events(),
        vec![
            GameEvent::IntroRequested,
            GameEvent::ItemConsumed { new_score: 1 },
            GameEvent::Rendered {
                body: vec![Position::new(11, 10), Position::new(10, 10)],
                item: Position::new(4, 7),
            },
        ]
    );
    assert_eq!(engine.run_state(), RunState::Running);
}

#[test]
fn walking_off_the_left_edge_ends_without_render() {
    let setup = RunSetup {
        snake: Snake::from_segments(vec![Position::new(0, 5), Position::new(1, 5)]),
        velocity: Velocity::from(Direction::Left),
        item: Item::new(Position::new(9, 9)),
    };
    let mut engine = engine(setup, MemoryStore::new(), &[0]);

    engine.start();
    let _ = engine.drain_events();
    fire_and_step(&mut engine);

    let events = engine.drain_events();
    assert_eq!(
        events,
        vec![GameEvent::RunEnded {
            final_score: 0,
            high_scores: vec![0],
        }]
    );
    assert!(!events
        .iter()
        .any(|event| matches!(event, GameEvent::Rendered { .. })));
    assert_eq!(engine.scheduler().pending_delay(), None);
}

#[test]
fn full_run_scores_speeds_up_turns_and_hits_the_wall() {
    // Items sit in a row ahead of the head; the script relocates each eaten
    // item one cell further right.
    let setup = RunSetup {
        snake: Snake::new(Position::new(10, 10)),
        velocity: Velocity::from(Direction::Right),
        item: Item::new(Position::new(11, 10)),
    };
    let mut engine = engine(setup, MemoryStore::new(), &[12, 10, 13, 10, 14, 10]);

    engine.start();
    for expected_score in 1..=3 {
        fire_and_step(&mut engine);
        assert_eq!(engine.score(), expected_score);
        assert_eq!(engine.snake().len(), expected_score as usize + 1);
    }
    assert_eq!(
        engine.scheduler().pending_delay(),
        Some(Duration::from_millis(135))
    );

    engine.set_direction(Axis::Vertical, Sign::Negative);
    engine.set_direction(Axis::Vertical, Sign::Positive);
    assert_eq!(engine.velocity(), Velocity::from(Direction::Up));

    for _ in 0..10 {
        fire_and_step(&mut engine);
    }
    assert_eq!(engine.snake().head(), Position::new(13, 0));
    assert_eq!(engine.run_state(), RunState::Running);

    fire_and_step(&mut engine);
    assert_eq!(engine.run_state(), RunState::Ended);
    assert_eq!(engine.high_scores(), vec![3]);
    assert!(!engine.scheduler_mut().fire());
}

#[test]
fn paused_run_ignores_steps_until_resumed() {
    let mut engine = engine(
        RunSetup::initial(&EngineConfig::default()),
        MemoryStore::new(),
        &[0],
    );

    engine.start();
    fire_and_step(&mut engine);
    engine.pause();
    assert!(!engine.scheduler_mut().fire());

    let head = engine.snake().head();
    engine.step();
    assert_eq!(engine.snake().head(), head);

    engine.start();
    fire_and_step(&mut engine);
    assert_eq!(engine.snake().head(), Position::new(head.x + 1, head.y));
    assert_eq!(engine.tick_count(), 2);
}

#[test]
fn high_scores_survive_a_store_restart() {
    let mut ledger = ScoreLedger::new(MemoryStore::new());
    ledger.record(10);
    ledger.record(30);
    ledger.record(5);
    assert_eq!(ledger.snapshot(), vec![30, 10, 5]);

    let restarted = ScoreLedger::new(ledger.into_store());
    assert_eq!(restarted.snapshot(), vec![30, 10, 5]);

    let setup = RunSetup {
        snake: Snake::new(Position::new(18, 0)),
        velocity: Velocity::from(Direction::Right),
        item: Item::new(Position::new(0, 0)),
    };
    let mut engine = engine(setup, restarted.into_store(), &[0]);
    assert_eq!(engine.high_scores(), vec![30, 10, 5]);

    engine.start();
    fire_and_step(&mut engine);
    assert_eq!(engine.high_scores(), vec![30, 10, 5, 0]);
}
