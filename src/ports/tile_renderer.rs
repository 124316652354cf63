//! TileRenderer port - Turns a tile description into markup.

use crate::domain::foundation::DomainError;
use crate::domain::view::Tile;

/// Port for rendering individual tiles.
///
/// Rendering is a pure function of the tile; it must embed the tile's
/// [`elements`](Tile::elements) ids so later mutations can find them.
pub trait TileRenderer: Send + Sync {
    fn render(&self, tile: &Tile) -> Result<String, DomainError>;
}
