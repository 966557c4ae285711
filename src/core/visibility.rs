use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::types::Point;

/// Variations currently selected for display.
///
/// Once non-empty the set never becomes empty: removing the last member is
/// refused. Iteration follows selection order, which is not meant for color
/// assignment; index into the sorted variation list for that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilitySet {
    selected: IndexSet<String>,
}

impl VisibilitySet {
    /// Selects the first `count` identifiers in lexicographic order.
    #[must_use]
    pub fn initial<S: AsRef<str>>(identifiers: &[S], count: usize) -> Self {
        let mut sorted: Vec<&str> = identifiers.iter().map(AsRef::as_ref).collect();
        sorted.sort_unstable();
        sorted.dedup();
        Self {
            selected: sorted.into_iter().take(count).map(str::to_owned).collect(),
        }
    }

    /// Adds `id` when absent, removes it when present.
    ///
    /// Returns `false` when the call was refused because `id` is the only
    /// selected variation.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.selected.contains(id) {
            if self.selected.len() == 1 {
                trace!(variation = id, "refusing to hide last visible variation");
                return false;
            }
            self.selected.shift_remove(id);
        } else {
            self.selected.insert(id.to_owned());
        }
        true
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    /// Keeps only points of selected variations, preserving order.
    #[must_use]
    pub fn filter_points(&self, points: &[Point]) -> Vec<Point> {
        points
            .iter()
            .filter(|point| self.contains(point.variation()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_selection_takes_first_two_sorted() {
        let set = VisibilitySet::initial(&["treatment", "control", "alt"], 2);
        let selected: Vec<&str> = set.iter().collect();
        assert_eq!(selected, vec!["alt", "control"]);

        let single = VisibilitySet::initial(&["only"], 2);
        assert_eq!(single.len(), 1);
        assert!(VisibilitySet::initial::<&str>(&[], 2).is_empty());
    }

    #[test]
    fn last_member_cannot_be_hidden() {
        let mut set = VisibilitySet::initial(&["a", "b"], 2);
        assert!(set.toggle("a"));
        assert!(!set.toggle("b"));
        assert!(set.contains("b"));
        assert!(set.toggle("c"));
        assert_eq!(set.len(), 2);
    }
}
