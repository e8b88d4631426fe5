//! Wires a [`SendController`] to the key bus and the notification bus

use std::rc::{Rc, Weak};

use crate::emitter::Subscription;
use crate::keys::{KeyBroadcaster, ShortcutBinding};
use crate::settings::Settings;

use super::context::{UiEmitter, UiEvent};
use super::controller::SendController;
use super::shortcuts::{send_bindings, SendAction};

/// The send pane's live bindings
///
/// While mounted, every key in the send table drives the controller and a
/// `SendCompleted` notification resets it. Dropping the pane removes all of
/// its subscriptions.
pub struct SendPane {
    controller: Rc<SendController>,
    ui: UiEmitter,
    bindings: Vec<ShortcutBinding>,
    completed: Subscription,
}

impl SendPane {
    pub fn mount(
        controller: Rc<SendController>,
        keys: &KeyBroadcaster,
        settings: &Settings,
        ui: &UiEmitter,
    ) -> Self {
        let bindings = send_bindings()
            .into_iter()
            .map(|(key, action)| {
                ShortcutBinding::key_up(keys, key, action_callback(&controller, action), settings)
            })
            .collect::<Vec<_>>();
        let completed = completion_listener(ui, &controller);

        tracing::debug!(bindings = bindings.len(), "send pane mounted");
        Self {
            controller,
            ui: ui.clone(),
            bindings,
            completed,
        }
    }

    pub fn controller(&self) -> &Rc<SendController> {
        &self.controller
    }

    pub fn bindings(&self) -> &[ShortcutBinding] {
        &self.bindings
    }

    /// Point every binding and the completion listener at a new controller
    pub fn replace_controller(&mut self, controller: Rc<SendController>) {
        for (binding, (_, action)) in self.bindings.iter_mut().zip(send_bindings()) {
            binding.rebind_callback(action_callback(&controller, action));
        }
        // Assigning drops the old listener before the new one can fire.
        self.completed = completion_listener(&self.ui, &controller);
        self.controller = controller;
    }

    /// Read the disabled flag from another settings store
    pub fn rebind_settings(&mut self, settings: &Settings) {
        for binding in &mut self.bindings {
            binding.rebind_settings(settings);
        }
    }
}

fn action_callback(controller: &Rc<SendController>, action: SendAction) -> impl Fn() + 'static {
    let controller: Weak<SendController> = Rc::downgrade(controller);
    move || {
        if let Some(controller) = controller.upgrade() {
            controller.apply(action);
        }
    }
}

fn completion_listener(ui: &UiEmitter, controller: &Rc<SendController>) -> Subscription {
    let controller = Rc::downgrade(controller);
    ui.subscribe(move |event| {
        if *event == UiEvent::SendCompleted {
            if let Some(controller) = controller.upgrade() {
                controller.on_send_completed();
            }
        }
    })
}
