//! Commands sent to a client view.

use super::action::{DomEvent, HandlerRegistration};
use super::element::ElementId;
use super::mutation::ViewMutation;

/// One operation on a client's view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCommand {
    /// Replace the whole content container with `markup`.
    ReplaceContent { markup: String },
    /// Attach a handler that reports `event` on `element` back to the server.
    RegisterHandler { element: ElementId, event: DomEvent },
    Mutate(ViewMutation),
    /// The view is fully built; clear the loading indicator.
    Ready,
}

/// Commands collected inside a batching scope and transmitted together.
#[derive(Debug, Default)]
pub struct CommandBatch {
    commands: Vec<ViewCommand>,
}

impl CommandBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a deferred registration by queueing its client-side hook.
    pub fn register(&mut self, registration: &HandlerRegistration) {
        self.commands.push(ViewCommand::RegisterHandler {
            element: registration.element.clone(),
            event: registration.event,
        });
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn into_commands(self) -> Vec<ViewCommand> {
        self.commands
    }
}
