//! Benchmarks for key dispatch through the broadcaster and bindings
//!
//! Run with: cargo bench dispatch

use keysend::config::KeysendConfig;
use keysend::keys::{
    CanonicalKey, EventTarget, KeyBroadcaster, KeyKind, RawKeyEvent, ShortcutBinding,
};
use keysend::scenario::{EntitySpec, Replay, Step};
use keysend::settings::Settings;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

// ============================================================================
// Key normalization
// ============================================================================

#[divan::bench(args = ["q", "Q", "escape", "Escape", " "])]
fn normalize(raw: &str) -> CanonicalKey {
    CanonicalKey::normalize(divan::black_box(raw))
}

// ============================================================================
// Broadcast fan-out
// Cost of one key-up reaching N bindings, only one of which matches
// ============================================================================

#[divan::bench(args = [1, 24, 100])]
fn key_up_fan_out(bencher: divan::Bencher, bindings: usize) {
    let keys = KeyBroadcaster::new();
    keys.start();
    let settings = Settings::new();
    let _bindings: Vec<_> = (0..bindings)
        .map(|i| ShortcutBinding::key_up(&keys, format!("k{i}"), || {}, &settings))
        .collect();
    let event = RawKeyEvent::on_document("k0");

    bencher.bench_local(|| keys.handle(KeyKind::Up, divan::black_box(&event)));
}

#[divan::bench]
fn filtered_text_input(bencher: divan::Bencher) {
    let keys = KeyBroadcaster::new();
    keys.start();
    let event = RawKeyEvent::new("q", EventTarget::text_input());

    bencher.bench_local(|| keys.handle(KeyKind::Up, divan::black_box(&event)));
}

// ============================================================================
// Full send pane
// Digit presses and targeting toggles through every layer
// ============================================================================

fn wired_pane() -> Replay {
    let entity = EntitySpec {
        id: 1,
        energy: 1000.0,
        silver: 200.0,
        artifacts: Vec::new(),
    };
    let replay = Replay::new(&KeysendConfig::default(), &[entity]);
    let _ = replay.step(0, &Step::Select(1));
    replay
}

#[divan::bench(args = [100, 1000])]
fn pane_digit_presses(iterations: usize) {
    let replay = wired_pane();
    let digits = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "0"];

    for i in 0..iterations {
        let event = RawKeyEvent::on_document(digits[i % digits.len()]);
        replay.keys().handle(KeyKind::Down, &event);
        replay.keys().handle(KeyKind::Up, &event);
    }

    divan::black_box(replay.controller().energy_sending());
}

#[divan::bench(args = [100, 1000])]
fn pane_toggle_send(iterations: usize) {
    let replay = wired_pane();
    let event = RawKeyEvent::on_document("q");

    for _ in 0..iterations {
        replay.keys().handle(KeyKind::Up, &event);
    }

    divan::black_box(replay.controller().is_targeting());
}
