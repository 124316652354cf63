//! Deterministic client element identifiers.
//!
//! Every element the server later mutates is addressed by an id of the form
//! `<category>-<id>-<role>`. The same constructor is used when the page is
//! rendered and when a worker targets a mutation, so the two always agree.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::domain::foundation::{DeviceId, GroupId, SceneId, ScheduleId};

/// Element category, the first id segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementCategory {
    Nav,
    All,
    Section,
    Scene,
    Group,
    Light,
    Schedule,
    Diagnostics,
}

impl ElementCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementCategory::Nav => "nav",
            ElementCategory::All => "all",
            ElementCategory::Section => "section",
            ElementCategory::Scene => "scene",
            ElementCategory::Group => "group",
            ElementCategory::Light => "light",
            ElementCategory::Schedule => "schedule",
            ElementCategory::Diagnostics => "diagnostics",
        }
    }
}

/// Element role, the last id segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    Menu,
    Tile,
    Header,
    Placeholder,
    Switch,
    Expand,
    /// Full-width brightness track; clicks on it set the level.
    Track,
    Brightness,
    Percentage,
    Swatch,
}

impl ElementRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementRole::Menu => "menu",
            ElementRole::Tile => "tile",
            ElementRole::Header => "header",
            ElementRole::Placeholder => "placeholder",
            ElementRole::Switch => "switch",
            ElementRole::Expand => "expand",
            ElementRole::Track => "track",
            ElementRole::Brightness => "brightness",
            ElementRole::Percentage => "percentage",
            ElementRole::Swatch => "swatch",
        }
    }
}

/// Identifier of one element in a client's view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    fn compose(category: ElementCategory, id: &str, role: ElementRole) -> Self {
        Self(format!("{}-{}-{}", category.as_str(), id, role.as_str()))
    }

    pub fn navigation() -> Self {
        Self::compose(ElementCategory::Nav, "main", ElementRole::Menu)
    }

    /// The synthetic tile aggregating every light.
    pub fn all_lights() -> Self {
        Self::compose(ElementCategory::All, "lights", ElementRole::Tile)
    }

    pub fn scenes_header() -> Self {
        Self::compose(ElementCategory::Section, "scenes", ElementRole::Header)
    }

    pub fn imported_scenes() -> Self {
        Self::compose(ElementCategory::Section, "imported", ElementRole::Placeholder)
    }

    pub fn schedules_header() -> Self {
        Self::compose(ElementCategory::Section, "schedules", ElementRole::Header)
    }

    pub fn diagnostics() -> Self {
        Self::compose(ElementCategory::Diagnostics, "server", ElementRole::Tile)
    }

    pub fn scene(id: &SceneId) -> Self {
        Self::compose(ElementCategory::Scene, id.as_str(), ElementRole::Tile)
    }

    pub fn group(id: &GroupId, role: ElementRole) -> Self {
        Self::compose(ElementCategory::Group, id.as_str(), role)
    }

    pub fn light(id: &DeviceId, role: ElementRole) -> Self {
        Self::compose(ElementCategory::Light, id.as_str(), role)
    }

    pub fn schedule(id: &ScheduleId) -> Self {
        Self::compose(ElementCategory::Schedule, id.as_str(), ElementRole::Tile)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ElementId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
