pub mod conflicts;
pub mod geometry;
pub mod levels;

pub use conflicts::ConflictSet;
pub use geometry::{ItemPlacement, TimelineLayout, AXIS_HEIGHT};
pub use levels::{assign_levels, placement_order, LevelAssignment};
