//! Process-wide cursor mode and the claim protocol around it
//!
//! Exactly one [`CursorMode`] is active at a time. Features claim a mode with
//! [`CursorModeGateway::request`], which hands back a [`ClaimId`], and return
//! it with [`CursorModeGateway::release`]. A claim fails with
//! [`CursorError::Conflict`] whenever the cursor is not Normal, even when the
//! current mode is the one requested, so two features never share a claim.

use std::cell::Cell;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::emitter::Emitter;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorMode {
    #[default]
    Normal,
    /// Owned by the explorer-move feature
    TargetingExplorer,
    /// Owned by the send controller while a send is being aimed
    TargetingForces,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CursorError {
    #[error("cursor is in {current:?} mode, cannot switch to {requested:?}")]
    Conflict {
        current: CursorMode,
        requested: CursorMode,
    },
}

/// Token for a granted cursor claim
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClaimId(u64);

/// Window/cursor manager as seen by cursor-mode features
pub trait CursorModeGateway {
    fn cursor_mode(&self) -> CursorMode;

    /// Unconditional write. Voids any outstanding claim.
    fn set_cursor_mode(&self, mode: CursorMode);

    /// Claim `mode`. Only succeeds from Normal.
    fn request(&self, mode: CursorMode) -> Result<ClaimId, CursorError>;

    /// Hand back a claim, returning the cursor to Normal. Returns false,
    /// changing nothing, when `claim` is not the live claim.
    fn release(&self, claim: ClaimId) -> bool;

    /// Whether `claim` is the live claim and its mode is still active
    fn holds(&self, claim: ClaimId) -> bool;
}

/// In-process cursor manager
#[derive(Debug, Default)]
pub struct WindowManager {
    mode: Cell<CursorMode>,
    claim: Cell<Option<ClaimId>>,
    next_claim: Cell<u64>,
    changes: Emitter<CursorMode>,
}

impl WindowManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Published after every actual mode change
    pub fn mode_changes(&self) -> &Emitter<CursorMode> {
        &self.changes
    }

    fn switch(&self, mode: CursorMode) {
        let previous = self.mode.replace(mode);
        if previous != mode {
            tracing::debug!(?previous, ?mode, "cursor mode");
            self.changes.publish(mode);
        }
    }
}

impl CursorModeGateway for WindowManager {
    fn cursor_mode(&self) -> CursorMode {
        self.mode.get()
    }

    fn set_cursor_mode(&self, mode: CursorMode) {
        if let Some(claim) = self.claim.take() {
            tracing::debug!(?claim, ?mode, "cursor claim overridden");
        }
        self.switch(mode);
    }

    fn request(&self, mode: CursorMode) -> Result<ClaimId, CursorError> {
        let current = self.mode.get();
        if current != CursorMode::Normal {
            return Err(CursorError::Conflict {
                current,
                requested: mode,
            });
        }
        let id = self.next_claim.get();
        self.next_claim.set(id + 1);
        let claim = ClaimId(id);
        self.claim.set(Some(claim));
        self.switch(mode);
        Ok(claim)
    }

    fn release(&self, claim: ClaimId) -> bool {
        if self.claim.get() != Some(claim) {
            return false;
        }
        self.claim.set(None);
        self.switch(CursorMode::Normal);
        true
    }

    fn holds(&self, claim: ClaimId) -> bool {
        self.claim.get() == Some(claim)
    }
}
