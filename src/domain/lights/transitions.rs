//! Deriving published updates from a direct light switch.
//!
//! When the dashboard itself switches a light (rather than observing the
//! producer do it), the aggregate and group transitions have to be worked
//! out here so every viewer sees the same sequence the producer would send.

use crate::domain::foundation::{DeviceId, DomainError, ErrorCode};

use super::registry::Registries;
use super::update::{LightEnvelope, LightUpdate};

impl Registries {
    /// Switches one light and returns the updates describing the change.
    ///
    /// Emits nothing when the light is already in the requested state. The
    /// order is the light itself, then each affected group in insertion
    /// order, then the all-lights aggregate.
    pub fn switch_light(&mut self, id: &DeviceId, on: bool) -> Result<Vec<LightEnvelope>, DomainError> {
        let was_any_on = self.lights.values().any(|light| light.on);

        let light = self.lights.get_mut(id).ok_or_else(|| {
            DomainError::new(ErrorCode::LightNotFound, format!("Light {} not found", id))
        })?;
        if light.on == on {
            return Ok(Vec::new());
        }
        light.on = on;

        let mut envelopes = vec![LightEnvelope::new(id.clone(), LightUpdate::OnOff(on))];

        let affected: Vec<_> = self
            .groups
            .in_insertion_order()
            .into_iter()
            .filter(|group| group.contains(id))
            .collect();
        for group in affected {
            let now_any_on = group
                .lights
                .iter()
                .any(|member| self.lights.get(member).is_some_and(|light| light.on));
            if now_any_on == group.any_on {
                continue;
            }
            if let Some(stored) = self.groups.get_mut(&group.id) {
                stored.any_on = now_any_on;
            }
            let update = if now_any_on {
                LightUpdate::GroupFirstOn(group.id.clone())
            } else {
                LightUpdate::GroupLastOff(group.id.clone())
            };
            envelopes.push(LightEnvelope::new(id.clone(), update));
        }

        let now_any_on = self.lights.values().any(|light| light.on);
        if now_any_on != was_any_on {
            let update = if now_any_on {
                LightUpdate::FirstOn
            } else {
                LightUpdate::LastOff
            };
            envelopes.push(LightEnvelope::new(id.clone(), update));
        }

        Ok(envelopes)
    }
}
