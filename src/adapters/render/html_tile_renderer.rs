//! Minimal HTML markup for dashboard tiles.
//!
//! Styling is left to the client stylesheet; this renderer only guarantees
//! that every element a later mutation may target carries its derived id and
//! starts in the state the snapshot describes.

use crate::domain::foundation::{DomainError, Percentage};
use crate::domain::lights::Light;
use crate::domain::view::{ElementId, ElementRole, Tile, DISABLED_OPACITY, ENABLED_OPACITY};
use crate::ports::TileRenderer;

/// Renders tiles as small, escaped HTML fragments.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlTileRenderer;

impl HtmlTileRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TileRenderer for HtmlTileRenderer {
    fn render(&self, tile: &Tile) -> Result<String, DomainError> {
        let markup = match tile {
            Tile::Navigation { title } => format!(
                r#"<nav class="menu" id="{id}">{title}</nav>"#,
                id = ElementId::navigation(),
                title = html_escape(title),
            ),
            Tile::AllLights { any_on } => format!(
                r#"<div class="tile all" id="{id}" style="opacity:{opacity}">All lights</div>"#,
                id = ElementId::all_lights(),
                opacity = opacity(*any_on),
            ),
            Tile::ScenesHeader => section_header(&ElementId::scenes_header(), "Scenes"),
            Tile::Scene(scene) => format!(
                r#"<div class="tile scene" id="{id}">{name}</div>"#,
                id = ElementId::scene(&scene.id),
                name = html_escape(&scene.name),
            ),
            Tile::ImportedScenes => format!(
                r#"<div class="placeholder" id="{id}">Imported scenes</div>"#,
                id = ElementId::imported_scenes(),
            ),
            Tile::GroupHeader { group, expanded } => format!(
                r#"<h2 class="group"><span class="tile switch" id="{switch}" style="opacity:{opacity}">{name}</span><button class="expand" id="{expand}" aria-expanded="{expanded}">{arrow}</button></h2>"#,
                switch = ElementId::group(&group.id, ElementRole::Switch),
                expand = ElementId::group(&group.id, ElementRole::Expand),
                opacity = opacity(group.any_on),
                name = html_escape(&group.name),
                expanded = expanded,
                arrow = if *expanded { "&#9662;" } else { "&#9656;" },
            ),
            Tile::Light(light) => render_light(light),
            Tile::SchedulesHeader => section_header(&ElementId::schedules_header(), "Schedules"),
            Tile::Schedule(schedule) => format!(
                r#"<div class="tile schedule" id="{id}" style="opacity:{opacity}">{name}<small>{time}</small></div>"#,
                id = ElementId::schedule(&schedule.id),
                opacity = opacity(schedule.enabled),
                name = html_escape(&schedule.name),
                time = html_escape(&schedule.time),
            ),
            Tile::Diagnostics { platform } => format!(
                r#"<div class="tile diagnostics" id="{id}">Server: {platform}</div>"#,
                id = ElementId::diagnostics(),
                platform = html_escape(platform),
            ),
        };
        Ok(markup)
    }
}

fn render_light(light: &Light) -> String {
    let percent = Percentage::from_brightness(light.brightness);
    let swatch = light
        .color
        .map(|color| color.to_css())
        .unwrap_or_else(|| "transparent".to_string());
    format!(
        concat!(
            r#"<div class="tile light" id="{tile}" style="opacity:{opacity}">"#,
            r#"<span class="swatch" id="{swatch_id}" style="background:{swatch}"></span>"#,
            r#"<span class="name">{name}</span>"#,
            r#"<div class="track" id="{track}"><div class="bar" id="{bar}" style="width:{percent}"></div></div>"#,
            r#"<span class="label" id="{label}">{percent}</span>"#,
            "</div>"
        ),
        tile = ElementId::light(&light.id, ElementRole::Tile),
        opacity = opacity(light.on),
        swatch_id = ElementId::light(&light.id, ElementRole::Swatch),
        swatch = swatch,
        name = html_escape(&light.name),
        track = ElementId::light(&light.id, ElementRole::Track),
        bar = ElementId::light(&light.id, ElementRole::Brightness),
        label = ElementId::light(&light.id, ElementRole::Percentage),
        percent = percent,
    )
}

fn section_header(id: &ElementId, text: &str) -> String {
    format!(r#"<h2 class="section" id="{id}">{text}</h2>"#)
}

fn opacity(on: bool) -> f64 {
    if on {
        ENABLED_OPACITY
    } else {
        DISABLED_OPACITY
    }
}

/// Escape HTML special characters.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
