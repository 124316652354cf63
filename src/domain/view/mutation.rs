//! Targeted view mutations derived from light updates.

use std::time::Duration;

use serde::Serialize;

use crate::domain::foundation::Percentage;
use crate::domain::lights::{LightEnvelope, LightUpdate};

use super::element::{ElementId, ElementRole};

/// Opacity of a tile whose light, group or aggregate is on.
pub const ENABLED_OPACITY: f64 = 1.0;

/// Opacity of a tile whose light, group or aggregate is off.
pub const DISABLED_OPACITY: f64 = 0.3;

/// Style properties a mutation may set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleProperty {
    Width,
    Background,
}

/// An idempotent change to one element of a client's view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewMutation {
    /// Animate an element's opacity toward `opacity`.
    Animate {
        element: ElementId,
        opacity: f64,
        duration: Duration,
    },
    SetStyle {
        element: ElementId,
        property: StyleProperty,
        value: String,
    },
    SetText { element: ElementId, text: String },
}

impl ViewMutation {
    pub fn target(&self) -> &ElementId {
        match self {
            ViewMutation::Animate { element, .. }
            | ViewMutation::SetStyle { element, .. }
            | ViewMutation::SetText { element, .. } => element,
        }
    }
}

fn fade(element: ElementId, on: bool, duration: Duration) -> ViewMutation {
    ViewMutation::Animate {
        element,
        opacity: if on { ENABLED_OPACITY } else { DISABLED_OPACITY },
        duration,
    }
}

/// Translates one envelope into the mutations every view needs.
pub fn mutations_for(envelope: &LightEnvelope, fade_duration: Duration) -> Vec<ViewMutation> {
    let light = &envelope.light_id;
    match &envelope.update {
        LightUpdate::OnOff(on) => vec![fade(
            ElementId::light(light, ElementRole::Tile),
            *on,
            fade_duration,
        )],
        LightUpdate::LastOff => vec![fade(ElementId::all_lights(), false, fade_duration)],
        LightUpdate::FirstOn => vec![fade(ElementId::all_lights(), true, fade_duration)],
        LightUpdate::GroupLastOff(group) => vec![fade(
            ElementId::group(group, ElementRole::Switch),
            false,
            fade_duration,
        )],
        LightUpdate::GroupFirstOn(group) => vec![fade(
            ElementId::group(group, ElementRole::Switch),
            true,
            fade_duration,
        )],
        LightUpdate::Brightness(level) => {
            let percent = Percentage::from_brightness(*level).to_string();
            vec![
                ViewMutation::SetStyle {
                    element: ElementId::light(light, ElementRole::Brightness),
                    property: StyleProperty::Width,
                    value: percent.clone(),
                },
                ViewMutation::SetText {
                    element: ElementId::light(light, ElementRole::Percentage),
                    text: percent,
                },
            ]
        }
        LightUpdate::Color(color) => vec![ViewMutation::SetStyle {
            element: ElementId::light(light, ElementRole::Swatch),
            property: StyleProperty::Background,
            value: color.to_css(),
        }],
    }
}
