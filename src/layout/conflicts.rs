use std::collections::BTreeSet;

use crate::model::{overlaps, Item};

/// Pairwise temporal conflicts between items, keyed by item index.
///
/// Symmetric by construction: `j` is in `neighbors(i)` exactly when `i` is
/// in `neighbors(j)`. An item never conflicts with itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictSet {
    adjacency: Vec<BTreeSet<usize>>,
}

impl ConflictSet {
    /// Compare every pair of items. O(n²).
    pub fn build(items: &[Item]) -> Self {
        let mut adjacency = vec![BTreeSet::new(); items.len()];
        for i in 0..items.len() {
            for j in (i + 1)..items.len() {
                if overlaps(&items[i], &items[j]) {
                    adjacency[i].insert(j);
                    adjacency[j].insert(i);
                }
            }
        }
        Self { adjacency }
    }

    /// Indices overlapping item `index`. Empty for out-of-range indices.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency.get(index).into_iter().flatten().copied()
    }

    pub fn conflicts(&self, a: usize, b: usize) -> bool {
        self.adjacency.get(a).is_some_and(|set| set.contains(&b))
    }

    /// Whether `candidate` conflicts with any of `placed`.
    pub fn conflicts_with_any(&self, candidate: usize, placed: &[usize]) -> bool {
        placed.iter().any(|&p| self.conflicts(p, candidate))
    }

    /// Number of conflicting pairs.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2
    }
}
