//! Render adapters - Implementations of the TileRenderer port.

mod html_tile_renderer;

pub use html_tile_renderer::HtmlTileRenderer;
pub(crate) use html_tile_renderer::html_escape;
