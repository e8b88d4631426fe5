//! Send-resources interaction
//!
//! Percentage controls, an optional artifact, and a targeting state machine
//! for sending energy/silver from the selected entity, driven by the key
//! shortcuts in [`shortcuts`].
//!
//! # Architecture
//!
//! ```text
//! KeyBroadcaster ─► SendPane bindings ─► SendController ─► EntityStore
//!                                              │
//!                                              ├─► CursorModeGateway (claim / release)
//!                                              └─► UiEmitter (initiated / cancelled)
//! UiEmitter(SendCompleted) ─► SendPane ─► SendController::on_send_completed
//! ```

mod context;
mod controller;
mod cursor;
mod pane;
mod percent;
pub mod shortcuts;

pub use context::{
    Artifact, ArtifactId, Entity, EntityId, EntityStore, MemoryStore, UiEmitter, UiEvent,
};
pub use controller::{SendController, SendState};
pub use cursor::{ClaimId, CursorError, CursorMode, CursorModeGateway, WindowManager};
pub use pane::SendPane;
pub use percent::{clamp_percent, MAX_PERCENT, MIN_PERCENT};
pub use shortcuts::SendAction;
