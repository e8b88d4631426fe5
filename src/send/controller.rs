//! Send interaction state machine
//!
//! ```text
//!            toggle_send (cursor claimed)
//!   ┌──────┐ ───────────────────────────► ┌───────────┐
//!   │ Idle │                              │ Targeting │
//!   └──────┘ ◄─────────────────────────── └───────────┘
//!      │      toggle_send / on_exit /
//!      │      on_send_completed / select
//!      ▼
//!   on_exit: deselect
//! ```
//!
//! Every operation is scoped to the selected entity and silently does
//! nothing when there is no selection or no store attached.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Serialize;

use super::context::{Artifact, ArtifactId, Entity, EntityId, EntityStore, UiEmitter, UiEvent};
use super::cursor::{ClaimId, CursorMode, CursorModeGateway};
use super::percent::{clamp_percent, portion};
use super::shortcuts::SendAction;

/// Serializable view of the controller, for status output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendState {
    pub entity: Option<EntityId>,
    pub energy_percent: Option<u8>,
    pub silver_percent: Option<u8>,
    pub pending_artifact: Option<ArtifactId>,
    pub targeting: bool,
    pub cursor_mode: CursorMode,
}

pub struct SendController {
    store: Option<Rc<dyn EntityStore>>,
    cursor: Rc<dyn CursorModeGateway>,
    ui: UiEmitter,
    selected: RefCell<Option<Entity>>,
    /// Live cursor claim while targeting
    claim: Cell<Option<ClaimId>>,
}

impl SendController {
    pub fn new(
        store: Rc<dyn EntityStore>,
        cursor: Rc<dyn CursorModeGateway>,
        ui: UiEmitter,
    ) -> Self {
        Self {
            store: Some(store),
            cursor,
            ui,
            selected: RefCell::new(None),
            claim: Cell::new(None),
        }
    }

    /// A controller with no store; every entity operation is a no-op
    pub fn detached(cursor: Rc<dyn CursorModeGateway>, ui: UiEmitter) -> Self {
        Self {
            store: None,
            cursor,
            ui,
            selected: RefCell::new(None),
            claim: Cell::new(None),
        }
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn selected(&self) -> Option<Entity> {
        self.selected.borrow().clone()
    }

    fn selected_id(&self) -> Option<EntityId> {
        self.selected.borrow().as_ref().map(|e| e.id)
    }

    /// Store and selected entity, when both exist
    fn scope(&self) -> Option<(&dyn EntityStore, EntityId)> {
        let store = self.store.as_deref()?;
        Some((store, self.selected_id()?))
    }

    /// Follow a selection change
    ///
    /// A new entity (or none) cancels any targeting in progress. Re-selecting
    /// the same entity only refreshes the resource snapshot.
    pub fn select(&self, entity: Option<Entity>) {
        let previous = self.selected_id();
        let next = entity.as_ref().map(|e| e.id);
        *self.selected.borrow_mut() = entity;

        if previous != next {
            tracing::debug!(?previous, ?next, "send selection changed");
            self.cancel_send();
        }
    }

    // ========================================================================
    // Percentages
    // ========================================================================

    pub fn energy_sending(&self) -> Option<u8> {
        self.scope().map(|(store, id)| store.forces_sending(id))
    }

    /// Set the energy percentage, clamped to `0..=100`
    pub fn set_energy_sending(&self, percent: i32) {
        if let Some((store, id)) = self.scope() {
            store.set_forces_sending(id, clamp_percent(percent));
        }
    }

    /// Add `delta` to the energy percentage, clamped
    pub fn nudge_energy(&self, delta: i32) {
        if let Some(current) = self.energy_sending() {
            self.set_energy_sending(i32::from(current).saturating_add(delta));
        }
    }

    pub fn silver_sending(&self) -> Option<u8> {
        self.scope().map(|(store, id)| store.silver_sending(id))
    }

    /// Set the silver percentage, clamped to `0..=100`
    pub fn set_silver_sending(&self, percent: i32) {
        if let Some((store, id)) = self.scope() {
            store.set_silver_sending(id, clamp_percent(percent));
        }
    }

    pub fn nudge_silver(&self, delta: i32) {
        if let Some(current) = self.silver_sending() {
            self.set_silver_sending(i32::from(current).saturating_add(delta));
        }
    }

    /// Energy the current percentage would send
    pub fn energy_amount(&self) -> Option<f64> {
        let energy = self.selected.borrow().as_ref()?.energy;
        Some(portion(energy, self.energy_sending()?))
    }

    /// Silver the current percentage would send
    pub fn silver_amount(&self) -> Option<f64> {
        let silver = self.selected.borrow().as_ref()?.silver;
        Some(portion(silver, self.silver_sending()?))
    }

    /// Silver controls only apply to entities that hold silver
    pub fn shows_silver_row(&self) -> bool {
        self.selected
            .borrow()
            .as_ref()
            .is_some_and(|e| e.silver > 0.0)
    }

    // ========================================================================
    // Artifacts
    // ========================================================================

    pub fn artifact_sending(&self) -> Option<Artifact> {
        let (store, id) = self.scope()?;
        store.artifact_sending(id)
    }

    pub fn set_artifact_sending(&self, artifact: Artifact) {
        if let Some((store, id)) = self.scope() {
            tracing::debug!(entity = %id, artifact = artifact.id.0, "artifact queued");
            store.set_artifact_sending(id, Some(artifact));
        }
    }

    /// Stop sending the pending artifact
    pub fn clear_artifact_sending(&self) {
        if let Some((store, id)) = self.scope() {
            store.set_artifact_sending(id, None);
        }
    }

    pub fn is_artifact_pending(&self, artifact: ArtifactId) -> bool {
        self.artifact_sending().is_some_and(|a| a.id == artifact)
    }

    /// Artifacts that may be attached to a send from the selected entity
    pub fn sendable_artifacts(&self) -> Vec<Artifact> {
        self.scope()
            .map(|(store, id)| store.inactive_artifacts(id))
            .unwrap_or_default()
    }

    // ========================================================================
    // Targeting
    // ========================================================================

    /// True while this controller holds the forces-targeting cursor
    pub fn is_targeting(&self) -> bool {
        self.claim.get().is_some_and(|claim| self.cursor.holds(claim))
    }

    /// Enter targeting, or leave it if already targeting
    ///
    /// Entering is refused while any other claim or forced mode is active.
    pub fn toggle_send(&self) {
        if self.is_targeting() {
            self.cancel_send();
            return;
        }
        if self.scope().is_none() {
            tracing::debug!("toggle_send without selection");
            return;
        }

        // A claim we no longer hold was overridden; close it out first.
        if self.claim.get().is_some() {
            tracing::debug!("send targeting was overridden");
            self.cancel_send();
        }

        match self.cursor.request(CursorMode::TargetingForces) {
            Ok(claim) => {
                self.claim.set(Some(claim));
                let snapshot = self.selected();
                tracing::debug!(entity = ?snapshot.as_ref().map(|e| e.id), "send initiated");
                self.ui.publish(UiEvent::SendInitiated(snapshot));
            }
            Err(err) => {
                tracing::warn!(%err, "send targeting refused");
            }
        }
    }

    /// Leave targeting without sending. No-op unless this controller
    /// initiated a send.
    pub fn cancel_send(&self) {
        let Some(claim) = self.claim.take() else {
            return;
        };
        self.cursor.release(claim);
        tracing::debug!("send cancelled");
        self.ui.publish(UiEvent::SendCancelled);
    }

    /// Exit key: cancel targeting if active, otherwise deselect
    pub fn on_exit(&self) {
        if self.is_targeting() {
            self.cancel_send();
            return;
        }
        let Some((store, _)) = self.scope() else {
            return;
        };
        store.clear_selection();
        self.select(None);
    }

    /// The transfer finished: back to idle, ready for another send
    ///
    /// Only this controller's own claim is released. Percentages are kept so
    /// repeat sends reuse the last split.
    pub fn on_send_completed(&self) {
        if let Some(claim) = self.claim.take() {
            self.cursor.release(claim);
        }
        if let Some((store, id)) = self.scope() {
            store.set_artifact_sending(id, None);
        }
        tracing::debug!("send completed");
    }

    /// Run a shortcut action
    pub fn apply(&self, action: SendAction) {
        match action {
            SendAction::SetEnergy(percent) => self.set_energy_sending(percent.into()),
            SendAction::SetSilver(percent) => self.set_silver_sending(percent.into()),
            SendAction::StepEnergy(delta) => self.nudge_energy(delta),
            SendAction::ToggleSend => self.toggle_send(),
            SendAction::Exit => self.on_exit(),
        }
    }

    pub fn state(&self) -> SendState {
        SendState {
            entity: self.selected_id(),
            energy_percent: self.energy_sending(),
            silver_percent: self.silver_sending(),
            pending_artifact: self.artifact_sending().map(|a| a.id),
            targeting: self.is_targeting(),
            cursor_mode: self.cursor.cursor_mode(),
        }
    }
}
