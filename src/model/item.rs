use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::color::Rgba;
use crate::error::Diagnostic;

/// A month-granularity point on the timeline.
///
/// `month` is expected in `[0, 12]` but is not clamped; out-of-range values
/// are reported by [`validate_items`] and otherwise used as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: i32,
}

impl YearMonth {
    pub const fn new(year: i32, month: i32) -> Self {
        Self { year, month }
    }

    /// Absolute month index (`year * 12 + month`).
    pub fn month_index(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month)
    }
}

impl From<NaiveDate> for YearMonth {
    /// Uses the 1-based calendar month.
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month() as i32)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Which end of an item a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// A single date-ranged entry on the timeline.
///
/// Items are identified by their position in the input list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub start: YearMonth,
    pub end: YearMonth,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Overrides the palette colour when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba>,
}

impl Item {
    pub fn new(start: YearMonth, end: YearMonth) -> Self {
        Self {
            start,
            end,
            title: None,
            summary: None,
            color: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    /// Duration in months. Negative for an inverted range.
    pub fn span(&self) -> i64 {
        span(self)
    }

    pub fn overlaps(&self, other: &Item) -> bool {
        overlaps(self, other)
    }
}

/// Whether two items share at least one month.
///
/// Ranges are half-open `[start, end)`, so an item ending in the month the
/// other starts does not overlap it. When both start together the one
/// ending first is taken as first, so argument order never matters and an
/// empty range overlaps nothing.
pub fn overlaps(a: &Item, b: &Item) -> bool {
    let key = |i: &Item| (i.start.month_index(), i.end.month_index());
    let (first, second) = if key(b) < key(a) { (b, a) } else { (a, b) };
    let s1 = first.start.month_index();
    let e1 = first.end.month_index();
    let s2 = second.start.month_index();
    s2 >= s1 && s2 < e1
}

/// End month index minus start month index.
pub fn span(item: &Item) -> i64 {
    item.end.month_index() - item.start.month_index()
}

/// Check every item for out-of-range months and inverted ranges.
///
/// Nothing is rejected or corrected.
pub fn validate_items(items: &[Item]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for (index, item) in items.iter().enumerate() {
        for (endpoint, ym) in [(Endpoint::Start, item.start), (Endpoint::End, item.end)] {
            if !(0..=12).contains(&ym.month) {
                tracing::warn!(index, %endpoint, month = ym.month, "item month outside [0, 12]");
                diagnostics.push(Diagnostic::MonthOutOfRange {
                    index,
                    endpoint,
                    month: ym.month,
                });
            }
        }
        let span = span(item);
        if span < 0 {
            tracing::warn!(index, span, "item ends before it starts");
            diagnostics.push(Diagnostic::InvertedRange { index, span });
        }
    }
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(sy: i32, sm: i32, ey: i32, em: i32) -> Item {
        Item::new(YearMonth::new(sy, sm), YearMonth::new(ey, em))
    }

    #[test]
    fn touching_ranges_do_not_overlap() {
        let a = item(2012, 8, 2013, 12);
        let b = item(2013, 12, 2014, 6);
        assert!(!overlaps(&a, &b));
        assert!(!overlaps(&b, &a));
    }

    #[test]
    fn nested_and_partial_ranges_overlap() {
        let outer = item(2012, 2, 2016, 8);
        let inner = item(2014, 5, 2015, 12);
        let partial = item(2013, 8, 2015, 4);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
        assert!(overlaps(&partial, &inner));
        assert!(overlaps(&inner, &partial));
    }

    #[test]
    fn same_start_overlaps() {
        let a = item(2020, 1, 2020, 3);
        let b = item(2020, 1, 2021, 1);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));

        let shorter = item(2020, 1, 2020, 2);
        assert!(overlaps(&shorter, &b));
        assert!(overlaps(&b, &shorter));
    }

    #[test]
    fn empty_item_touching_next_does_not_overlap() {
        let empty = item(2020, 3, 2020, 3);
        let next = item(2020, 3, 2020, 9);
        assert!(!overlaps(&empty, &next));
        assert!(!overlaps(&next, &empty));
        assert!(!overlaps(&empty, &empty));
    }

    #[test]
    fn year_boundary_months_line_up() {
        // December of one year is the same index as month 0 of the next.
        assert_eq!(
            YearMonth::new(2013, 12).month_index(),
            YearMonth::new(2014, 0).month_index()
        );
    }

    #[test]
    fn span_counts_months() {
        assert_eq!(span(&item(2012, 8, 2013, 12)), 16);
        assert_eq!(span(&item(2015, 1, 2014, 1)), -12);
    }

    #[test]
    fn validation_warns_without_rejecting() {
        let items = vec![item(2010, 0, 2011, 12), item(2010, 13, 2009, -1)];
        let diags = validate_items(&items);
        assert_eq!(
            diags,
            vec![
                Diagnostic::MonthOutOfRange {
                    index: 1,
                    endpoint: Endpoint::Start,
                    month: 13
                },
                Diagnostic::MonthOutOfRange {
                    index: 1,
                    endpoint: Endpoint::End,
                    month: -1
                },
                Diagnostic::InvertedRange { index: 1, span: -26 },
            ]
        );
    }

    #[test]
    fn chrono_dates_use_calendar_month() {
        let date = NaiveDate::from_ymd_opt(2014, 5, 17).unwrap();
        assert_eq!(YearMonth::from(date), YearMonth::new(2014, 5));
    }

    #[test]
    fn item_json_shape() {
        let json = r##"{"start":{"year":2012,"month":8},"end":{"year":2013,"month":12},"title":"Employment1","color":"#ff0000"}"##;
        let parsed: Item = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.title.as_deref(), Some("Employment1"));
        assert_eq!(parsed.summary, None);
        assert_eq!(parsed.color, Some(Rgba::rgb(255, 0, 0)));
    }
}
