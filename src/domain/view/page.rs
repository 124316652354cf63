//! Page accumulator and the index of a committed view.

use std::collections::{HashMap, HashSet};

use super::action::HandlerRegistration;
use super::element::ElementId;
use super::tile::Tile;

/// Output of one builder pass: fragments and registrations, both in
/// traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    fragments: Vec<Tile>,
    registrations: Vec<HandlerRegistration>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tile: Tile) {
        self.fragments.push(tile);
    }

    pub fn register(&mut self, registration: HandlerRegistration) {
        self.registrations.push(registration);
    }

    pub fn fragments(&self) -> &[Tile] {
        &self.fragments
    }

    pub fn registrations(&self) -> &[HandlerRegistration] {
        &self.registrations
    }

    /// Index of every element and handler this page puts on the client.
    pub fn view_index(&self) -> ViewIndex {
        let elements = self
            .fragments
            .iter()
            .flat_map(|tile| tile.elements())
            .collect();
        let handlers = self
            .registrations
            .iter()
            .map(|registration| (registration.element.clone(), registration.clone()))
            .collect();
        ViewIndex { elements, handlers }
    }
}

/// What a connection's client currently shows.
///
/// Workers consult it before targeting an element; the connection consults
/// it to map a fired client event back to its [`UserAction`](super::UserAction).
#[derive(Debug, Clone, Default)]
pub struct ViewIndex {
    elements: HashSet<ElementId>,
    handlers: HashMap<ElementId, HandlerRegistration>,
}

impl ViewIndex {
    pub fn contains(&self, element: &ElementId) -> bool {
        self.elements.contains(element)
    }

    pub fn handler(&self, element: &str) -> Option<&HandlerRegistration> {
        self.handlers.get(element)
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::view::UserAction;

    #[test]
    fn view_index_maps_handlers_by_element_string() {
        let mut page = Page::new();
        page.push(Tile::AllLights { any_on: false });
        page.register(HandlerRegistration::click(
            ElementId::all_lights(),
            UserAction::ToggleAllLights,
        ));

        let index = page.view_index();
        assert!(index.contains(&ElementId::all_lights()));
        assert_eq!(
            index.handler("all-lights-tile").map(|h| h.action.clone()),
            Some(UserAction::ToggleAllLights)
        );
        assert!(index.handler("nav-main-menu").is_none());
    }
}
