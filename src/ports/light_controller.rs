//! LightController port - Commands sent toward the lights.
//!
//! Handlers registered on the page end up here. The resulting state changes
//! come back through the broadcast stream like any other update.

use async_trait::async_trait;

use crate::domain::foundation::{DeviceId, DomainError, GroupId, SceneId};

#[async_trait]
pub trait LightController: Send + Sync {
    async fn set_light_on(&self, light: &DeviceId, on: bool) -> Result<(), DomainError>;

    async fn set_brightness(&self, light: &DeviceId, level: u8) -> Result<(), DomainError>;

    async fn set_group_on(&self, group: &GroupId, on: bool) -> Result<(), DomainError>;

    async fn set_all_on(&self, on: bool) -> Result<(), DomainError>;

    async fn activate_scene(&self, scene: &SceneId) -> Result<(), DomainError>;
}
