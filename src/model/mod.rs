pub mod color;
pub mod item;
pub mod timeline;

pub use color::{item_color, palette_color, Rgba, DEFAULT_PALETTE};
pub use item::{overlaps, span, validate_items, Endpoint, Item, YearMonth};
pub use timeline::{TimelineBounds, YearTick};
