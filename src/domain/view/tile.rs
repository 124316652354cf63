//! Descriptions of the visual units that make up a page.
//!
//! A [`Tile`] is what the page builder accumulates instead of markup: it is
//! turned into markup only during the commit, by a
//! [`TileRenderer`](crate::ports::TileRenderer).

use crate::domain::lights::{Group, Light, Scene, Schedule};

use super::element::{ElementId, ElementRole};

/// One renderable fragment of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tile {
    Navigation { title: String },
    AllLights { any_on: bool },
    ScenesHeader,
    Scene(Scene),
    ImportedScenes,
    /// Group switch with its expand control; members follow only if expanded.
    GroupHeader { group: Group, expanded: bool },
    Light(Light),
    SchedulesHeader,
    Schedule(Schedule),
    Diagnostics { platform: String },
}

impl Tile {
    /// Element ids carried by this tile's markup.
    pub fn elements(&self) -> Vec<ElementId> {
        match self {
            Tile::Navigation { .. } => vec![ElementId::navigation()],
            Tile::AllLights { .. } => vec![ElementId::all_lights()],
            Tile::ScenesHeader => vec![ElementId::scenes_header()],
            Tile::Scene(scene) => vec![ElementId::scene(&scene.id)],
            Tile::ImportedScenes => vec![ElementId::imported_scenes()],
            Tile::GroupHeader { group, .. } => vec![
                ElementId::group(&group.id, ElementRole::Switch),
                ElementId::group(&group.id, ElementRole::Expand),
            ],
            Tile::Light(light) => vec![
                ElementId::light(&light.id, ElementRole::Tile),
                ElementId::light(&light.id, ElementRole::Track),
                ElementId::light(&light.id, ElementRole::Brightness),
                ElementId::light(&light.id, ElementRole::Percentage),
                ElementId::light(&light.id, ElementRole::Swatch),
            ],
            Tile::SchedulesHeader => vec![ElementId::schedules_header()],
            Tile::Schedule(schedule) => vec![ElementId::schedule(&schedule.id)],
            Tile::Diagnostics { .. } => vec![ElementId::diagnostics()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DeviceId, GroupId};

    #[test]
    fn light_tile_exposes_every_mutable_element() {
        let tile = Tile::Light(Light::new(DeviceId::new("4").unwrap(), "Desk"));
        let ids: Vec<String> = tile.elements().iter().map(|e| e.to_string()).collect();
        assert_eq!(
            ids,
            vec![
                "light-4-tile",
                "light-4-track",
                "light-4-brightness",
                "light-4-percentage",
                "light-4-swatch",
            ]
        );
    }

    #[test]
    fn group_header_exposes_switch_and_expand() {
        let tile = Tile::GroupHeader {
            group: Group::new(GroupId::new("g1").unwrap(), "Kitchen", vec![]),
            expanded: false,
        };
        let ids: Vec<String> = tile.elements().iter().map(|e| e.to_string()).collect();
        assert_eq!(ids, vec!["group-g1-switch", "group-g1-expand"]);
    }
}
