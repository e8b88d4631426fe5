//! Fixed keyboard table for the send pane

use crate::keys::{CanonicalKey, SpecialKey};

/// Enter / leave send targeting
pub const TOGGLE_SEND: &str = "q";
/// Cancel targeting, or close the pane
pub const EXIT_PANE: SpecialKey = SpecialKey::Escape;

pub const DECREASE_ENERGY: &str = "-";
pub const INCREASE_ENERGY: &str = "+";
/// Step applied by the `-` / `+` keys
pub const ENERGY_STEP: i32 = 10;

/// Digit row: `1`..`9` pick 10%..90%, `0` picks 100%
pub const ENERGY_KEYS: [(&str, u8); 10] = [
    ("1", 10),
    ("2", 20),
    ("3", 30),
    ("4", 40),
    ("5", 50),
    ("6", 60),
    ("7", 70),
    ("8", 80),
    ("9", 90),
    ("0", 100),
];

/// Shifted digit row, same percentages applied to silver
pub const SILVER_KEYS: [(&str, u8); 10] = [
    ("!", 10),
    ("@", 20),
    ("#", 30),
    ("$", 40),
    ("%", 50),
    ("^", 60),
    ("&", 70),
    ("*", 80),
    ("(", 90),
    (")", 100),
];

/// What a send-pane shortcut does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendAction {
    SetEnergy(u8),
    SetSilver(u8),
    /// Add to the energy percentage (negative to subtract)
    StepEnergy(i32),
    ToggleSend,
    Exit,
}

/// Every send-pane shortcut, in binding order
pub fn send_bindings() -> Vec<(CanonicalKey, SendAction)> {
    let mut bindings = vec![
        (CanonicalKey::from(TOGGLE_SEND), SendAction::ToggleSend),
        (CanonicalKey::from(EXIT_PANE), SendAction::Exit),
    ];
    bindings.extend(
        ENERGY_KEYS
            .iter()
            .map(|&(key, percent)| (CanonicalKey::from(key), SendAction::SetEnergy(percent))),
    );
    bindings.extend(
        SILVER_KEYS
            .iter()
            .map(|&(key, percent)| (CanonicalKey::from(key), SendAction::SetSilver(percent))),
    );
    bindings.push((
        CanonicalKey::from(DECREASE_ENERGY),
        SendAction::StepEnergy(-ENERGY_STEP),
    ));
    bindings.push((
        CanonicalKey::from(INCREASE_ENERGY),
        SendAction::StepEnergy(ENERGY_STEP),
    ));
    bindings
}

/// Look up the action bound to `key`
pub fn action_for(key: &CanonicalKey) -> Option<SendAction> {
    send_bindings()
        .into_iter()
        .find(|(bound, _)| bound == key)
        .map(|(_, action)| action)
}
