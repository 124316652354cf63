//! Loopback light controller.
//!
//! Stands in for a device bridge: every command is applied straight to the
//! registries and the resulting updates are published exactly as a bridge
//! would report them back.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::SharedStateStore;
use crate::domain::foundation::{DeviceId, DomainError, ErrorCode, GroupId, SceneId};
use crate::domain::lights::{LightEnvelope, LightUpdate};
use crate::ports::{LightController, LightUpdatePublisher};

pub struct LoopbackLightController {
    store: Arc<SharedStateStore>,
    publisher: Arc<dyn LightUpdatePublisher>,
}

impl LoopbackLightController {
    pub fn new(store: Arc<SharedStateStore>, publisher: Arc<dyn LightUpdatePublisher>) -> Self {
        Self { store, publisher }
    }

    /// Switches every light in `lights` and publishes the resulting updates
    /// inside one transaction.
    ///
    /// Members missing from the light registry are skipped.
    fn switch_many(&self, lights: &[DeviceId], on: bool) {
        let (delivered, skipped) = self.store.transact(|state| {
            let mut delivered = 0;
            let mut skipped = Vec::new();
            for id in lights {
                match state.registries.switch_light(id, on) {
                    Ok(changes) => delivered += self.publish_all(changes),
                    Err(_) => skipped.push(id.clone()),
                }
            }
            (delivered, skipped)
        });
        for id in skipped {
            tracing::debug!(light = %id, "Skipping member missing from registry");
        }
        tracing::trace!(delivered, "Loopback updates published");
    }

    /// Publishes `envelopes` in order. Called with the store lock held so
    /// cursors observe updates in the order they were applied.
    fn publish_all(&self, envelopes: Vec<LightEnvelope>) -> usize {
        envelopes
            .into_iter()
            .map(|envelope| self.publisher.publish(envelope))
            .sum()
    }
}

#[async_trait]
impl LightController for LoopbackLightController {
    async fn set_light_on(&self, light: &DeviceId, on: bool) -> Result<(), DomainError> {
        let delivered = self.store.transact(|state| {
            let envelopes = state.registries.switch_light(light, on)?;
            Ok::<_, DomainError>(self.publish_all(envelopes))
        })?;
        tracing::trace!(delivered, "Loopback updates published");
        Ok(())
    }

    async fn set_brightness(&self, light: &DeviceId, level: u8) -> Result<(), DomainError> {
        let envelope = LightEnvelope::new(light.clone(), LightUpdate::Brightness(level));
        let delivered = self
            .store
            .apply_and_publish(envelope, self.publisher.as_ref())?;
        tracing::trace!(delivered, "Loopback updates published");
        Ok(())
    }

    async fn set_group_on(&self, group: &GroupId, on: bool) -> Result<(), DomainError> {
        let members = self
            .store
            .group(group)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::GroupNotFound, format!("Group {} not found", group))
            })?
            .lights;
        self.switch_many(&members, on);
        Ok(())
    }

    async fn set_all_on(&self, on: bool) -> Result<(), DomainError> {
        let all: Vec<DeviceId> = self
            .store
            .transact(|state| state.registries.lights.in_insertion_order())
            .into_iter()
            .map(|light| light.id)
            .collect();
        self.switch_many(&all, on);
        Ok(())
    }

    async fn activate_scene(&self, scene: &SceneId) -> Result<(), DomainError> {
        let members = self
            .store
            .transact(|state| state.registries.scenes.get(scene).map(|s| s.lights.clone()))
            .ok_or_else(|| {
                DomainError::new(ErrorCode::SceneNotFound, format!("Scene {} not found", scene))
            })?;
        self.switch_many(&members, true);
        Ok(())
    }
}
