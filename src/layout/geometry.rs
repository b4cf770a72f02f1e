use super::conflicts::ConflictSet;
use super::levels::{assign_levels, LevelAssignment};
use crate::config::LayoutConfig;
use crate::error::{Diagnostic, Result, TimelineError};
use crate::model::{item_color, validate_items, Item, Rgba, TimelineBounds, YearTick};

/// Height of the year axis strip below the rows, in pixels.
pub const AXIS_HEIGHT: f32 = 21.0;

/// Stacking hint of the front row; each row behind it is one lower.
const FRONT_Z_INDEX: i32 = 10;

/// Where one item is drawn.
///
/// The horizontal extent is given as left and right insets so a renderer
/// can anchor both edges instead of computing a width.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPlacement {
    pub index: usize,
    pub row: usize,
    /// Distance from the container's left edge, in percent.
    pub left_pct: f64,
    /// Distance from the container's right edge, in percent.
    pub right_pct: f64,
    /// Offset from the top of the timeline strip, in pixels. The front row
    /// sits lowest.
    pub top_px: f32,
    pub z_index: i32,
    pub color: Rgba,
}

impl ItemPlacement {
    /// Right edge measured from the left, in percent.
    pub fn right_edge_pct(&self) -> f64 {
        100.0 - self.right_pct
    }

    pub fn width_pct(&self) -> f64 {
        self.right_edge_pct() - self.left_pct
    }

    pub fn midpoint_pct(&self) -> f64 {
        (self.left_pct + self.right_edge_pct()) / 2.0
    }
}

/// Derived layout for one item list.
///
/// Pure function of the items and the layout config; recompute it whenever
/// the item list changes.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLayout {
    pub bounds: TimelineBounds,
    pub conflicts: ConflictSet,
    pub levels: LevelAssignment,
    /// Placements in row order, front row first.
    pub placements: Vec<ItemPlacement>,
    pub row_gap: f32,
    pub container_height: f32,
    pub diagnostics: Vec<Diagnostic>,
    by_item: Vec<Option<usize>>,
}

impl TimelineLayout {
    /// Lay out `items`.
    ///
    /// An empty list is rejected with [`TimelineError::EmptyTimeline`];
    /// callers should treat it as "nothing to render". Validation warnings
    /// and a hit iteration cap are recorded in `diagnostics`, and items the
    /// cap left unplaced get no placement.
    pub fn compute(items: &[Item], config: &LayoutConfig) -> Result<Self> {
        let bounds = TimelineBounds::from_items(items).ok_or(TimelineError::EmptyTimeline)?;
        let mut diagnostics = validate_items(items);

        let conflicts = ConflictSet::build(items);
        let levels = assign_levels(items, &conflicts, config.max_iterations);
        diagnostics.extend(levels.capacity_diagnostic());

        let row_count = levels.rows.len();
        let mut placements = Vec::with_capacity(levels.placed());
        let mut by_item = vec![None; items.len()];
        for (row, indices) in levels.rows.iter().enumerate() {
            for &index in indices {
                let item = &items[index];
                by_item[index] = Some(placements.len());
                placements.push(ItemPlacement {
                    index,
                    row,
                    left_pct: bounds.left_pct(item.start),
                    right_pct: bounds.right_inset_pct(item.end),
                    top_px: config.event_gap * (row_count - row - 1) as f32,
                    z_index: FRONT_Z_INDEX - row as i32,
                    color: item_color(item.color, index, &config.palette),
                });
            }
        }

        tracing::debug!(
            items = items.len(),
            conflicts = conflicts.edge_count(),
            rows = row_count,
            first_year = bounds.first_year,
            last_year = bounds.last_year,
            "timeline layout computed"
        );

        Ok(Self {
            bounds,
            conflicts,
            levels,
            placements,
            row_gap: config.event_gap,
            container_height: row_count as f32 * config.event_gap + AXIS_HEIGHT,
            diagnostics,
            by_item,
        })
    }

    pub fn first_year(&self) -> i32 {
        self.bounds.first_year
    }

    pub fn last_year(&self) -> i32 {
        self.bounds.last_year
    }

    pub fn total_months(&self) -> i64 {
        self.bounds.total_months()
    }

    pub fn row_count(&self) -> usize {
        self.levels.rows.len()
    }

    /// Placement of item `index`, if it was placed.
    pub fn placement(&self, index: usize) -> Option<&ItemPlacement> {
        self.by_item
            .get(index)
            .copied()
            .flatten()
            .map(|slot| &self.placements[slot])
    }

    pub fn year_ticks(&self, sub_segments: u32) -> Vec<YearTick> {
        self.bounds.year_ticks(sub_segments)
    }

    /// Height of the row area above the axis.
    pub fn rows_height(&self) -> f32 {
        self.container_height - AXIS_HEIGHT
    }
}
