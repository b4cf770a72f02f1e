//! Greedy row packing.
//!
//! Items are placed shortest-first. Each row is filled by repeatedly taking
//! the first unplaced item (in that order) that conflicts with nothing already
//! in the row; when no item fits, the next row is opened. Short items end up
//! in the front rows. The result is not guaranteed to use the minimum number
//! of rows.

use super::conflicts::ConflictSet;
use crate::error::Diagnostic;
use crate::model::{span, Item};

/// Rows of mutually non-conflicting item indices, front row first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelAssignment {
    pub rows: Vec<Vec<usize>>,
    /// Items left unplaced because the iteration cap was hit, in placement
    /// order. Empty on success.
    pub unassigned: Vec<usize>,
    pub iterations: usize,
}

impl LevelAssignment {
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }

    pub fn placed(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Row holding `index`, if it was placed.
    pub fn row_of(&self, index: usize) -> Option<usize> {
        self.rows.iter().position(|row| row.contains(&index))
    }

    pub fn capacity_diagnostic(&self) -> Option<Diagnostic> {
        if self.is_complete() {
            return None;
        }
        Some(Diagnostic::CapacityExceeded {
            iterations: self.iterations,
            placed: self.placed(),
            total: self.placed() + self.unassigned.len(),
        })
    }
}

/// Item indices sorted by ascending span. Ties keep input order.
pub fn placement_order(items: &[Item]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by_key(|&i| span(&items[i]));
    order
}

/// Pack items into rows.
///
/// Every loop iteration either places one item or advances to the next row.
/// Once `max_iterations` is exceeded the loop stops and whatever has been
/// placed so far is returned, with the rest listed in `unassigned`.
pub fn assign_levels(
    items: &[Item],
    conflicts: &ConflictSet,
    max_iterations: usize,
) -> LevelAssignment {
    let order = placement_order(items);
    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut added = vec![false; items.len()];
    let mut added_count = 0;
    let mut row = 0;
    let mut iterations = 0;

    while added_count < items.len() {
        iterations += 1;
        if iterations > max_iterations {
            tracing::error!(
                max_iterations,
                placed = added_count,
                total = items.len(),
                "level assignment exceeded its iteration cap; dropping unplaced items"
            );
            break;
        }
        if rows.len() <= row {
            rows.push(Vec::new());
        }

        let current = &rows[row];
        let next = order.iter().copied().find(|&candidate| {
            !added[candidate]
                && (current.is_empty() || !conflicts.conflicts_with_any(candidate, current))
        });

        match next {
            Some(index) => {
                rows[row].push(index);
                added[index] = true;
                added_count += 1;
            }
            None => row += 1,
        }
    }

    let unassigned = order.into_iter().filter(|&i| !added[i]).collect();
    LevelAssignment {
        rows,
        unassigned,
        iterations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::YearMonth;

    fn item(sy: i32, sm: i32, ey: i32, em: i32) -> Item {
        Item::new(YearMonth::new(sy, sm), YearMonth::new(ey, em))
    }

    fn career() -> Vec<Item> {
        vec![
            item(2012, 8, 2013, 12),
            item(2014, 5, 2015, 12),
            item(2013, 8, 2015, 4),
            item(2012, 2, 2016, 8),
        ]
    }

    #[test]
    fn career_items_stack_into_three_rows() {
        let items = career();
        let levels = assign_levels(&items, &ConflictSet::build(&items), 5000);
        assert_eq!(levels.rows, vec![vec![0, 1], vec![2], vec![3]]);
        assert!(levels.is_complete());
        assert_eq!(levels.iterations, 6);
        assert_eq!(levels.capacity_diagnostic(), None);
    }

    #[test]
    fn shortest_items_are_placed_first() {
        let items = vec![
            item(2000, 0, 2005, 0),
            item(2001, 0, 2001, 6),
            item(2003, 0, 2004, 0),
        ];
        assert_eq!(placement_order(&items), vec![1, 2, 0]);
        let levels = assign_levels(&items, &ConflictSet::build(&items), 5000);
        assert_eq!(levels.rows, vec![vec![1, 2], vec![0]]);
    }

    #[test]
    fn equal_spans_keep_input_order() {
        let items = vec![
            item(2010, 0, 2011, 0),
            item(2000, 0, 2001, 0),
            item(2010, 6, 2011, 6),
        ];
        assert_eq!(placement_order(&items), vec![0, 1, 2]);
        let levels = assign_levels(&items, &ConflictSet::build(&items), 5000);
        assert_eq!(levels.rows, vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn cap_keeps_partial_rows() {
        let items = career();
        let levels = assign_levels(&items, &ConflictSet::build(&items), 3);
        assert_eq!(levels.rows, vec![vec![0, 1]]);
        assert_eq!(levels.unassigned, vec![2, 3]);
        assert_eq!(
            levels.capacity_diagnostic(),
            Some(Diagnostic::CapacityExceeded {
                iterations: 4,
                placed: 2,
                total: 4
            })
        );
    }

    #[test]
    fn no_items_no_rows() {
        let levels = assign_levels(&[], &ConflictSet::default(), 5000);
        assert!(levels.rows.is_empty());
        assert!(levels.is_complete());
    }

    #[test]
    fn row_of_finds_placed_items() {
        let items = career();
        let levels = assign_levels(&items, &ConflictSet::build(&items), 5000);
        assert_eq!(levels.row_of(1), Some(0));
        assert_eq!(levels.row_of(3), Some(2));
        assert_eq!(levels.row_of(9), None);
    }
}
