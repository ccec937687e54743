/// Widgets of the browser window
///
/// - `grid.rs` - preview grid, the surface render instructions are applied to
/// - `overlay.rs` - detail, search and settings overlays
/// - `theme.rs` - day/night color schemes

pub mod grid;
pub mod overlay;
pub mod theme;
