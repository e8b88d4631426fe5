//! Scripted key replays
//!
//! A scenario file describes entities and a list of steps. [`Replay`] wires a
//! broadcaster, a settings store, an in-memory entity store, a cursor manager
//! and a mounted [`SendPane`], then feeds the steps through them exactly as a
//! host UI would.
//!
//! ```yaml
//! entities:
//!   - id: 1
//!     energy: 1000
//!     silver: 200
//!     artifacts:
//!       - { id: 7, name: Wormhole }
//! steps:
//!   - select: 1
//!   - press: "5"
//!   - press: "+"
//!   - press: { key: "q", target: { tag: input, type: text } }
//!   - press: q
//!   - press: Escape
//!   - send_completed
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::KeysendConfig;
use crate::emitter::Subscription;
use crate::keys::{EventTarget, KeyBroadcaster, KeyKind, RawKeyEvent};
use crate::send::{
    Artifact, ArtifactId, CursorMode, CursorModeGateway, Entity, EntityId, MemoryStore,
    SendController, SendPane, SendState, UiEmitter, UiEvent, WindowManager,
};
use crate::settings::Settings;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("step {step}: unknown entity {entity}")]
    UnknownEntity { step: usize, entity: u64 },

    #[error("step {step}: entity {entity} has no artifact {artifact}")]
    UnknownArtifact {
        step: usize,
        entity: u64,
        artifact: u64,
    },

    #[error("step {step}: nothing selected")]
    NoSelection { step: usize },
}

/// A key named either by label alone or with the focused element
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum KeyInput {
    Plain(String),
    Targeted {
        key: String,
        #[serde(default)]
        target: EventTarget,
    },
}

impl KeyInput {
    pub fn to_event(&self) -> RawKeyEvent {
        match self {
            KeyInput::Plain(key) => RawKeyEvent::on_document(key.as_str()),
            KeyInput::Targeted { key, target } => RawKeyEvent::new(key.as_str(), target.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Select an entity by id
    Select(u64),
    Deselect,
    /// Key-down followed by key-up
    Press(KeyInput),
    Down(KeyInput),
    Up(KeyInput),
    /// Slider input for the energy percentage
    SetEnergy(i32),
    SetSilver(i32),
    /// Click an artifact thumbnail
    QueueArtifact(u64),
    ClearArtifact,
    DisableShortcuts(bool),
    /// Another feature takes the cursor
    ForceCursor(CursorMode),
    /// The transfer pipeline reports completion
    SendCompleted,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntitySpec {
    pub id: u64,
    #[serde(default)]
    pub energy: f64,
    #[serde(default)]
    pub silver: f64,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

impl EntitySpec {
    pub fn entity(&self) -> Entity {
        Entity::new(self.id, self.energy, self.silver)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    /// Overrides the loaded configuration for this run
    #[serde(default)]
    pub config: Option<KeysendConfig>,
    #[serde(default)]
    pub entities: Vec<EntitySpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn parse(yaml: &str) -> Result<Self, ScenarioError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }
}

/// Result of a replay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub steps: usize,
    pub state: SendState,
    pub events: Vec<UiEvent>,
}

/// A fully wired send pane driven by scenario steps
pub struct Replay {
    keys: KeyBroadcaster,
    settings: Settings,
    store: Rc<MemoryStore>,
    cursor: Rc<WindowManager>,
    ui: UiEmitter,
    pane: SendPane,
    entities: HashMap<u64, EntitySpec>,
    events: Rc<RefCell<Vec<UiEvent>>>,
    _recorder: Subscription,
}

impl Replay {
    pub fn new(config: &KeysendConfig, entities: &[EntitySpec]) -> Self {
        let keys = KeyBroadcaster::new();
        keys.start();

        let settings = Settings::from_config(config);
        let store = Rc::new(MemoryStore::new(
            config.default_energy_percent,
            config.default_silver_percent,
        ));
        for spec in entities {
            store.set_inactive_artifacts(EntityId(spec.id), spec.artifacts.clone());
        }

        let cursor = Rc::new(WindowManager::new());
        let ui = UiEmitter::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let recorder = {
            let events = Rc::clone(&events);
            ui.subscribe(move |event| events.borrow_mut().push(event.clone()))
        };

        let controller = Rc::new(SendController::new(store.clone(), cursor.clone(), ui.clone()));
        let pane = SendPane::mount(controller, &keys, &settings, &ui);

        Self {
            keys,
            settings,
            store,
            cursor,
            ui,
            pane,
            entities: entities.iter().map(|e| (e.id, e.clone())).collect(),
            events,
            _recorder: recorder,
        }
    }

    pub fn controller(&self) -> &SendController {
        self.pane.controller()
    }

    pub fn keys(&self) -> &KeyBroadcaster {
        &self.keys
    }

    /// Run one step; `index` is only used in error messages
    pub fn step(&self, index: usize, step: &Step) -> Result<(), ScenarioError> {
        tracing::debug!(index, ?step, "replay step");
        match step {
            Step::Select(id) => {
                let spec = self.entities.get(id).ok_or(ScenarioError::UnknownEntity {
                    step: index,
                    entity: *id,
                })?;
                self.store.select(Some(EntityId(*id)));
                self.controller().select(Some(spec.entity()));
            }
            Step::Deselect => {
                self.store.select(None);
                self.controller().select(None);
            }
            Step::Press(key) => {
                let event = key.to_event();
                self.keys.handle(KeyKind::Down, &event);
                self.keys.handle(KeyKind::Up, &event);
            }
            Step::Down(key) => {
                self.keys.handle(KeyKind::Down, &key.to_event());
            }
            Step::Up(key) => {
                self.keys.handle(KeyKind::Up, &key.to_event());
            }
            Step::SetEnergy(percent) => self.controller().set_energy_sending(*percent),
            Step::SetSilver(percent) => self.controller().set_silver_sending(*percent),
            Step::QueueArtifact(artifact) => {
                let artifact = self.find_artifact(index, ArtifactId(*artifact))?;
                self.controller().set_artifact_sending(artifact);
            }
            Step::ClearArtifact => self.controller().clear_artifact_sending(),
            Step::DisableShortcuts(disabled) => self.settings.set_shortcuts_disabled(*disabled),
            Step::ForceCursor(mode) => self.cursor.set_cursor_mode(*mode),
            Step::SendCompleted => self.ui.publish(UiEvent::SendCompleted),
        }
        Ok(())
    }

    fn find_artifact(&self, index: usize, artifact: ArtifactId) -> Result<Artifact, ScenarioError> {
        let entity = self
            .controller()
            .selected()
            .ok_or(ScenarioError::NoSelection { step: index })?
            .id;
        self.controller()
            .sendable_artifacts()
            .into_iter()
            .find(|a| a.id == artifact)
            .ok_or(ScenarioError::UnknownArtifact {
                step: index,
                entity: entity.0,
                artifact: artifact.0,
            })
    }

    /// Notifications seen so far, `SendCompleted` included
    pub fn events(&self) -> Vec<UiEvent> {
        self.events.borrow().clone()
    }

    pub fn report(&self, steps: usize) -> ReplayReport {
        ReplayReport {
            steps,
            state: self.controller().state(),
            events: self.events(),
        }
    }
}

/// Run a whole scenario
pub fn run(scenario: &Scenario, config: &KeysendConfig) -> Result<ReplayReport, ScenarioError> {
    let config = scenario.config.as_ref().unwrap_or(config);
    let replay = Replay::new(config, &scenario.entities);
    for (index, step) in scenario.steps.iter().enumerate() {
        replay.step(index, step)?;
    }
    tracing::info!(steps = scenario.steps.len(), "scenario replayed");
    Ok(replay.report(scenario.steps.len()))
}
