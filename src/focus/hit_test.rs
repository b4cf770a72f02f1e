use super::state::{FocusEvent, ItemDisplay};
use crate::layout::TimelineLayout;

/// Maps a point inside the timeline strip to the item under it.
///
/// Coordinates are pixels relative to the strip's top-left corner.
pub trait HitTest {
    fn hit_test(&self, x: f32, y: f32) -> Option<usize>;
}

impl<F> HitTest for F
where
    F: Fn(f32, f32) -> Option<usize>,
{
    fn hit_test(&self, x: f32, y: f32) -> Option<usize> {
        self(x, y)
    }
}

/// Hit testing against a computed layout.
///
/// Each row owns a horizontal band starting at its top offset. When bands
/// overlap (a line thicker than the row gap) the front row wins.
#[derive(Debug, Clone, Copy)]
pub struct LayoutHitTest<'a> {
    layout: &'a TimelineLayout,
    container_width: f32,
    band_height: f32,
}

impl<'a> LayoutHitTest<'a> {
    pub fn new(layout: &'a TimelineLayout, container_width: f32, line_thickness: f32) -> Self {
        Self {
            layout,
            container_width,
            band_height: layout.row_gap.max(line_thickness),
        }
    }
}

impl HitTest for LayoutHitTest<'_> {
    fn hit_test(&self, x: f32, y: f32) -> Option<usize> {
        if self.container_width <= 0.0 {
            return None;
        }
        let pct = f64::from(x / self.container_width * 100.0);
        self.layout
            .placements
            .iter()
            .find(|p| {
                y >= p.top_px
                    && y < p.top_px + self.band_height
                    && pct >= p.left_pct
                    && pct < p.right_edge_pct()
            })
            .map(|p| p.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// Translate a touch into a focus event.
///
/// Touching an item enters it; lifting or cancelling the touch leaves.
/// Moving over empty space produces nothing, keeping the current hover.
pub fn touch_event<H: HitTest + ?Sized>(
    hit_test: &H,
    layout: &TimelineLayout,
    phase: TouchPhase,
    x: f32,
    y: f32,
    now_ms: u64,
) -> Option<FocusEvent> {
    match phase {
        TouchPhase::Start | TouchPhase::Move => {
            let index = hit_test.hit_test(x, y)?;
            let placement = layout.placement(index)?;
            Some(FocusEvent::Enter {
                target: ItemDisplay::from(placement),
                now_ms,
            })
        }
        TouchPhase::End | TouchPhase::Cancel => Some(FocusEvent::Leave { now_ms }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::model::{Item, YearMonth};

    fn layout() -> TimelineLayout {
        let items = vec![
            Item::new(YearMonth::new(2012, 8), YearMonth::new(2013, 12)),
            Item::new(YearMonth::new(2014, 5), YearMonth::new(2015, 12)),
            Item::new(YearMonth::new(2013, 8), YearMonth::new(2015, 4)),
            Item::new(YearMonth::new(2012, 2), YearMonth::new(2016, 8)),
        ];
        TimelineLayout::compute(&items, &LayoutConfig::default()).unwrap()
    }

    #[test]
    fn finds_item_in_its_row_band() {
        let layout = layout();
        let hit = LayoutHitTest::new(&layout, 600.0, 6.0);
        // Row 0 (items 0 and 1) is the lowest band, 30..45 px.
        assert_eq!(hit.hit_test(120.0, 35.0), Some(0));
        assert_eq!(hit.hit_test(300.0, 35.0), Some(1));
        // Row 2 (item 3) is the top band.
        assert_eq!(hit.hit_test(300.0, 2.0), Some(3));
        // Gap between item 0 and item 1 in the front row.
        assert_eq!(hit.hit_test(245.0, 35.0), None);
        // Below every row.
        assert_eq!(hit.hit_test(300.0, 50.0), None);
    }

    #[test]
    fn unmeasured_container_hits_nothing() {
        let layout = layout();
        assert_eq!(LayoutHitTest::new(&layout, 0.0, 6.0).hit_test(10.0, 35.0), None);
    }

    #[test]
    fn touch_move_enters_and_end_leaves() {
        let layout = layout();
        let hit = LayoutHitTest::new(&layout, 600.0, 6.0);
        let event = touch_event(&hit, &layout, TouchPhase::Move, 120.0, 35.0, 7).unwrap();
        match event {
            FocusEvent::Enter { target, now_ms } => {
                assert_eq!(target.index, 0);
                assert_eq!(now_ms, 7);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            touch_event(&hit, &layout, TouchPhase::Move, 245.0, 35.0, 8),
            None
        );
        assert_eq!(
            touch_event(&hit, &layout, TouchPhase::End, 0.0, 0.0, 9),
            Some(FocusEvent::Leave { now_ms: 9 })
        );
    }

    #[test]
    fn closures_are_hit_tests() {
        let layout = layout();
        let always_two = |_x: f32, _y: f32| Some(2);
        let event = touch_event(&always_two, &layout, TouchPhase::Start, 0.0, 0.0, 0);
        assert!(matches!(event, Some(FocusEvent::Enter { target, .. }) if target.index == 2));
    }
}
