//! Event-handler registrations collected while a page is built.
//!
//! Instead of capturing live behavior in closures, the builder records which
//! element reacts to which client event and what the server should do when
//! it fires. The commit turns each record into one client-side registration.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DeviceId, GroupId, SceneId};

use super::element::ElementId;

/// Client-side event a handler listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomEvent {
    Click,
    /// A click that reports the horizontal position as a 0.0-1.0 fraction.
    ClickPosition,
}

/// What the server does when a registered handler fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Rebuild the whole view from fresh state.
    Refresh,
    ToggleAllLights,
    ActivateScene(SceneId),
    ToggleGroupLights(GroupId),
    /// Show or hide the group's member tiles for this user.
    ToggleGroupExpanded(GroupId),
    ToggleLight(DeviceId),
    SetBrightness(DeviceId),
}

/// One deferred handler registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerRegistration {
    pub element: ElementId,
    pub event: DomEvent,
    pub action: UserAction,
}

impl HandlerRegistration {
    pub fn click(element: ElementId, action: UserAction) -> Self {
        Self {
            element,
            event: DomEvent::Click,
            action,
        }
    }

    pub fn click_position(element: ElementId, action: UserAction) -> Self {
        Self {
            element,
            event: DomEvent::ClickPosition,
            action,
        }
    }
}
