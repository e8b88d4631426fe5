//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use keysend::config::KeysendConfig;
use keysend::keys::{EventTarget, KeyKind, RawKeyEvent};
use keysend::scenario::{EntitySpec, Replay, Step};
use keysend::send::{Artifact, UiEvent};

/// Entity 1: 1000 energy, 200 silver, one wormhole artifact
pub fn rich_entity() -> EntitySpec {
    EntitySpec {
        id: 1,
        energy: 1000.0,
        silver: 200.0,
        artifacts: vec![Artifact::new(7, "Wormhole")],
    }
}

/// Entity 2: energy only
pub fn poor_entity() -> EntitySpec {
    EntitySpec {
        id: 2,
        energy: 300.0,
        silver: 0.0,
        artifacts: Vec::new(),
    }
}

/// A wired replay with both test entities and default config, nothing selected
pub fn test_replay() -> Replay {
    test_replay_with(&KeysendConfig::default())
}

pub fn test_replay_with(config: &KeysendConfig) -> Replay {
    Replay::new(config, &[rich_entity(), poor_entity()])
}

/// A wired replay with entity 1 selected
pub fn selected_replay() -> Replay {
    let replay = test_replay();
    step(&replay, Step::Select(1));
    replay
}

pub fn step(replay: &Replay, step: Step) {
    replay.step(0, &step).unwrap();
}

/// Key down then key up on the document
pub fn press(replay: &Replay, key: &str) {
    press_on(replay, key, EventTarget::document());
}

/// Key down then key up with focus on `target`
pub fn press_on(replay: &Replay, key: &str, target: EventTarget) {
    let event = RawKeyEvent::new(key, target);
    replay.keys().handle(KeyKind::Down, &event);
    replay.keys().handle(KeyKind::Up, &event);
}

pub fn press_all(replay: &Replay, keys: &[&str]) {
    for key in keys {
        press(replay, key);
    }
}

/// Events minus completions, which the harness itself publishes
pub fn emitted(replay: &Replay) -> Vec<UiEvent> {
    replay
        .events()
        .into_iter()
        .filter(|e| *e != UiEvent::SendCompleted)
        .collect()
}
