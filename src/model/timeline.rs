use super::item::{Item, YearMonth};

/// Whole-year extent of a timeline.
///
/// The axis always covers complete years: from January of `first_year`
/// through the end of `last_year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineBounds {
    /// Smallest start year across all items.
    pub first_year: i32,
    /// Largest end year across all items, never less than `first_year`.
    pub last_year: i32,
}

/// One labelled year on the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct YearTick {
    pub year: i32,
    /// Left edge of the year as a percentage of the axis.
    pub left_pct: f64,
    pub width_pct: f64,
    /// Interior sub-segment boundaries, as percentages of the axis.
    pub minor_pct: Vec<f64>,
}

impl TimelineBounds {
    /// Bounds spanning every item. `None` for an empty list.
    pub fn from_items(items: &[Item]) -> Option<Self> {
        let first_year = items.iter().map(|i| i.start.year).min()?;
        let last_year = items.iter().map(|i| i.end.year).max()?;
        Some(Self {
            first_year,
            last_year: last_year.max(first_year),
        })
    }

    pub fn num_years(&self) -> i64 {
        i64::from(self.last_year) - i64::from(self.first_year) + 1
    }

    /// Total months on the axis. Always positive.
    pub fn total_months(&self) -> i64 {
        self.num_years() * 12
    }

    /// Months from the start of `first_year` to `ym`.
    pub fn month_offset(&self, ym: YearMonth) -> i64 {
        (i64::from(ym.year) - i64::from(self.first_year)) * 12 + i64::from(ym.month)
    }

    /// Distance of `ym` from the left edge, in percent.
    pub fn left_pct(&self, ym: YearMonth) -> f64 {
        self.month_offset(ym) as f64 / self.total_months() as f64 * 100.0
    }

    /// Distance of `ym` from the right edge, in percent.
    pub fn right_inset_pct(&self, ym: YearMonth) -> f64 {
        let total = self.total_months();
        (total - self.month_offset(ym)) as f64 / total as f64 * 100.0
    }

    /// Year ticks with `sub_segments` equal segments per year.
    pub fn year_ticks(&self, sub_segments: u32) -> Vec<YearTick> {
        let years = self.num_years();
        let width_pct = 100.0 / years as f64;
        let segments = sub_segments.max(1);
        (0..years)
            .map(|i| {
                let left_pct = i as f64 * width_pct;
                let minor_pct = (1..segments)
                    .map(|k| left_pct + width_pct * f64::from(k) / f64::from(segments))
                    .collect();
                YearTick {
                    year: self.first_year + i as i32,
                    left_pct,
                    width_pct,
                    minor_pct,
                }
            })
            .collect()
    }
}
