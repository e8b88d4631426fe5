//! Collaborators the send controller works against
//!
//! The per-entity store and the notification bus live outside the
//! controller. [`MemoryStore`] is the in-process store used by the replay
//! binary and the tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::emitter::Emitter;

use super::percent::clamp_percent;

/// Identifier of a selectable entity (a planet, a base, ...)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(pub u64);

/// Snapshot of a selected entity's resources
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    #[serde(default)]
    pub energy: f64,
    #[serde(default)]
    pub silver: f64,
}

impl Entity {
    pub fn new(id: u64, energy: f64, silver: f64) -> Self {
        Self {
            id: EntityId(id),
            energy,
            silver,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub id: ArtifactId,
    pub name: String,
}

impl Artifact {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: ArtifactId(id),
            name: name.into(),
        }
    }
}

/// Notifications exchanged with the rest of the UI
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", content = "entity", rename_all = "snake_case")]
pub enum UiEvent {
    /// Targeting started; carries the selection at that moment
    SendInitiated(Option<Entity>),
    SendCancelled,
    /// The underlying transfer finished
    SendCompleted,
}

pub type UiEmitter = Emitter<UiEvent>;

/// Per-entity send configuration store
///
/// Percentages passed to setters are already clamped to `0..=100`.
pub trait EntityStore {
    fn forces_sending(&self, entity: EntityId) -> u8;
    fn set_forces_sending(&self, entity: EntityId, percent: u8);
    fn silver_sending(&self, entity: EntityId) -> u8;
    fn set_silver_sending(&self, entity: EntityId, percent: u8);
    fn artifact_sending(&self, entity: EntityId) -> Option<Artifact>;
    fn set_artifact_sending(&self, entity: EntityId, artifact: Option<Artifact>);
    /// Artifacts on `entity` that may travel with a send, in display order
    fn inactive_artifacts(&self, entity: EntityId) -> Vec<Artifact>;
    /// Deselect whatever entity is selected
    fn clear_selection(&self);
}

#[derive(Clone, Debug, Default)]
struct StoredSend {
    energy: Option<u8>,
    silver: Option<u8>,
    artifact: Option<Artifact>,
}

/// In-memory [`EntityStore`]
#[derive(Debug)]
pub struct MemoryStore {
    default_energy: u8,
    default_silver: u8,
    sends: RefCell<HashMap<EntityId, StoredSend>>,
    artifacts: RefCell<HashMap<EntityId, Vec<Artifact>>>,
    selected: Cell<Option<EntityId>>,
}

impl MemoryStore {
    pub fn new(default_energy: u8, default_silver: u8) -> Self {
        Self {
            default_energy: clamp_percent(default_energy.into()),
            default_silver: clamp_percent(default_silver.into()),
            sends: RefCell::new(HashMap::new()),
            artifacts: RefCell::new(HashMap::new()),
            selected: Cell::new(None),
        }
    }

    /// Register the inactive artifacts on an entity
    pub fn set_inactive_artifacts(&self, entity: EntityId, artifacts: Vec<Artifact>) {
        self.artifacts.borrow_mut().insert(entity, artifacts);
    }

    pub fn select(&self, entity: Option<EntityId>) {
        self.selected.set(entity);
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.selected.get()
    }

    fn update(&self, entity: EntityId, f: impl FnOnce(&mut StoredSend)) {
        f(self.sends.borrow_mut().entry(entity).or_default());
    }

    fn read<T>(&self, entity: EntityId, f: impl FnOnce(&StoredSend) -> Option<T>) -> Option<T> {
        self.sends.borrow().get(&entity).and_then(f)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        let config = crate::config::KeysendConfig::default();
        Self::new(config.default_energy_percent, config.default_silver_percent)
    }
}

impl EntityStore for MemoryStore {
    fn forces_sending(&self, entity: EntityId) -> u8 {
        self.read(entity, |s| s.energy)
            .unwrap_or(self.default_energy)
    }

    fn set_forces_sending(&self, entity: EntityId, percent: u8) {
        self.update(entity, |s| s.energy = Some(percent));
    }

    fn silver_sending(&self, entity: EntityId) -> u8 {
        self.read(entity, |s| s.silver)
            .unwrap_or(self.default_silver)
    }

    fn set_silver_sending(&self, entity: EntityId, percent: u8) {
        self.update(entity, |s| s.silver = Some(percent));
    }

    fn artifact_sending(&self, entity: EntityId) -> Option<Artifact> {
        self.read(entity, |s| s.artifact.clone())
    }

    fn set_artifact_sending(&self, entity: EntityId, artifact: Option<Artifact>) {
        self.update(entity, |s| s.artifact = artifact);
    }

    fn inactive_artifacts(&self, entity: EntityId) -> Vec<Artifact> {
        self.artifacts
            .borrow()
            .get(&entity)
            .cloned()
            .unwrap_or_default()
    }

    fn clear_selection(&self) {
        if let Some(previous) = self.selected.take() {
            tracing::debug!(entity = %previous, "selection cleared");
        }
    }
}
