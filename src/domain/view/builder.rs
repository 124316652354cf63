//! Single-pass page builder.
//!
//! Walks a registry snapshot and a user's preferences once and fills a
//! [`Page`]. Nothing is rendered or sent here; the commit does that.
//!
//! Section order is part of the display contract:
//!
//! ```text
//! navigation
//! all lights
//! scenes header, scenes..., imported scenes placeholder
//! per group: header/switch, member lights... (only if expanded)
//! schedules header, schedules...
//! diagnostics (optional)
//! ```

use crate::domain::lights::{Group, RegistrySnapshot};
use crate::domain::session::UserData;

use super::action::{HandlerRegistration, UserAction};
use super::element::{ElementId, ElementRole};
use super::page::Page;
use super::tile::Tile;

/// Per-build presentation options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub title: String,
    /// Platform label for the diagnostics tile; `None` omits the tile.
    pub diagnostics: Option<String>,
}

impl BuildOptions {
    /// Options for the host this process runs on.
    ///
    /// The diagnostics tile is only offered on Linux hosts.
    pub fn for_host(title: impl Into<String>, diagnostics_enabled: bool) -> Self {
        let diagnostics = (diagnostics_enabled && cfg!(target_os = "linux"))
            .then(|| format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH));
        Self {
            title: title.into(),
            diagnostics,
        }
    }
}

/// Builds the page for one session.
pub fn build_page(snapshot: &RegistrySnapshot, user: &UserData, options: &BuildOptions) -> Page {
    let mut page = Page::new();

    page.push(Tile::Navigation {
        title: options.title.clone(),
    });
    page.register(HandlerRegistration::click(
        ElementId::navigation(),
        UserAction::Refresh,
    ));

    page.push(Tile::AllLights {
        any_on: snapshot.any_light_on,
    });
    page.register(HandlerRegistration::click(
        ElementId::all_lights(),
        UserAction::ToggleAllLights,
    ));

    page.push(Tile::ScenesHeader);
    for scene in &snapshot.scenes {
        page.push(Tile::Scene(scene.clone()));
        page.register(HandlerRegistration::click(
            ElementId::scene(&scene.id),
            UserAction::ActivateScene(scene.id.clone()),
        ));
    }
    page.push(Tile::ImportedScenes);

    for group in &snapshot.groups {
        add_group(&mut page, snapshot, group, user.is_expanded(&group.id));
    }

    page.push(Tile::SchedulesHeader);
    for schedule in &snapshot.schedules {
        page.push(Tile::Schedule(schedule.clone()));
    }

    if let Some(platform) = &options.diagnostics {
        page.push(Tile::Diagnostics {
            platform: platform.clone(),
        });
    }

    page
}

fn add_group(page: &mut Page, snapshot: &RegistrySnapshot, group: &Group, expanded: bool) {
    page.push(Tile::GroupHeader {
        group: group.clone(),
        expanded,
    });
    page.register(HandlerRegistration::click(
        ElementId::group(&group.id, ElementRole::Switch),
        UserAction::ToggleGroupLights(group.id.clone()),
    ));
    page.register(HandlerRegistration::click(
        ElementId::group(&group.id, ElementRole::Expand),
        UserAction::ToggleGroupExpanded(group.id.clone()),
    ));

    if !expanded {
        return;
    }

    // Snapshot lights are already name-sorted.
    for light in snapshot.lights.iter().filter(|light| group.contains(&light.id)) {
        page.push(Tile::Light(light.clone()));
        page.register(HandlerRegistration::click(
            ElementId::light(&light.id, ElementRole::Tile),
            UserAction::ToggleLight(light.id.clone()),
        ));
        // The track, not the bar: the bar's width is the current level.
        page.register(HandlerRegistration::click_position(
            ElementId::light(&light.id, ElementRole::Track),
            UserAction::SetBrightness(light.id.clone()),
        ));
    }
}
