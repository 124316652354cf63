//! State-change notifications published by the domain producer.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DeviceId, GroupId};

use super::records::LightColor;

/// A single light state transition.
///
/// Consumers match on this exhaustively; adding a variant must break every
/// dispatcher at compile time rather than be silently ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LightUpdate {
    /// The addressed light switched on (`true`) or off (`false`).
    OnOff(bool),
    /// The last light that was on has been switched off.
    LastOff,
    /// The first light has been switched on while all were off.
    FirstOn,
    /// The last member of the group has been switched off.
    GroupLastOff(GroupId),
    /// The first member of the group has been switched on.
    GroupFirstOn(GroupId),
    /// New raw brightness level, 0-255.
    Brightness(u8),
    Color(LightColor),
}

/// A published [`LightUpdate`] together with the light that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightEnvelope {
    pub light_id: DeviceId,
    pub update: LightUpdate,
}

impl LightEnvelope {
    pub fn new(light_id: DeviceId, update: LightUpdate) -> Self {
        Self { light_id, update }
    }
}
