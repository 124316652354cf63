//! HandleUserActionHandler - Runs the action behind a fired client event.

use std::sync::Arc;

use crate::application::handlers::persistence::StatePersister;
use crate::application::SharedStateStore;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::session::SessionError;
use crate::domain::view::{build_page, BuildOptions, UserAction};
use crate::ports::LightController;

use super::super::view::CommitPageHandler;
use super::open_connection::LiveConnection;

/// Command carrying one fired action.
#[derive(Debug, Clone)]
pub struct UserActionCommand {
    pub action: UserAction,
    /// Horizontal click position as a 0.0-1.0 fraction, for position events.
    pub position: Option<f64>,
}

/// Handler for user actions.
///
/// Light, group, scene and all-lights actions go to the [`LightController`];
/// their effects come back through the broadcast stream like any other
/// update. Expansion toggles are per user and rebuild the view directly.
pub struct HandleUserActionHandler {
    store: Arc<SharedStateStore>,
    controller: Arc<dyn LightController>,
    commit: Arc<CommitPageHandler>,
    persister: StatePersister,
}

impl HandleUserActionHandler {
    pub fn new(
        store: Arc<SharedStateStore>,
        controller: Arc<dyn LightController>,
        commit: Arc<CommitPageHandler>,
        persister: StatePersister,
    ) -> Self {
        Self {
            store,
            controller,
            commit,
            persister,
        }
    }

    pub async fn handle(
        &self,
        connection: &LiveConnection,
        cmd: UserActionCommand,
    ) -> Result<(), SessionError> {
        tracing::debug!(connection = %connection.id(), action = ?cmd.action, "User action");

        match cmd.action {
            UserAction::Refresh => self.rebuild(connection).await,
            UserAction::ToggleAllLights => {
                let on = !self.store.snapshot().any_light_on;
                Ok(self.controller.set_all_on(on).await?)
            }
            UserAction::ActivateScene(scene) => Ok(self.controller.activate_scene(&scene).await?),
            UserAction::ToggleGroupLights(group) => {
                let current = self.store.group(&group).ok_or_else(|| {
                    DomainError::new(ErrorCode::GroupNotFound, format!("Group {} not found", group))
                })?;
                Ok(self.controller.set_group_on(&group, !current.any_on).await?)
            }
            UserAction::ToggleGroupExpanded(group) => {
                let expanded = self.store.toggle_group(connection.token(), &group);
                tracing::debug!(group = %group, expanded, "Group expansion toggled");
                self.persister.persist_in_background();
                self.rebuild(connection).await
            }
            UserAction::ToggleLight(light) => {
                let current = self.store.light(&light).ok_or_else(|| {
                    DomainError::new(ErrorCode::LightNotFound, format!("Light {} not found", light))
                })?;
                Ok(self.controller.set_light_on(&light, !current.on).await?)
            }
            UserAction::SetBrightness(light) => {
                let position = cmd.position.ok_or_else(|| {
                    DomainError::validation("position", "Brightness click carried no position")
                })?;
                Ok(self
                    .controller
                    .set_brightness(&light, brightness_from_position(position))
                    .await?)
            }
        }
    }

    /// Rebuilds the connection's whole view from fresh state.
    pub async fn rebuild(&self, connection: &LiveConnection) -> Result<(), SessionError> {
        let opening = self.store.open_session(connection.token());
        let options = BuildOptions::for_host(&opening.settings.title, opening.settings.diagnostics);
        let page = build_page(&opening.snapshot, &opening.user_data, &options);

        let index = self.commit.handle(&page, connection.client().as_ref()).await?;
        connection.replace_view(index);
        Ok(())
    }
}

/// Maps a 0.0-1.0 click position onto a raw brightness level.
fn brightness_from_position(position: f64) -> u8 {
    let clamped = if position.is_finite() {
        position.clamp(0.0, 1.0)
    } else {
        0.0
    };
    (clamped * 255.0).round() as u8
}
