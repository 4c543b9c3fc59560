//! Expand/collapse state of the movement table.
//!
//! The state is a set of expanded movement ids. Toggling returns a new value
//! and leaves the previous one untouched, so every screen state is a plain
//! snapshot that can be compared or thrown away.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Ids of the movements whose line items are shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedRows(BTreeSet<String>);

impl ExpandedRows {
    pub fn new() -> Self {
        Self::default()
    }

    /// State with every given id expanded.
    pub fn all<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self(ids.into_iter().map(str::to_string).collect())
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    /// Flips one row. Every other row keeps its state.
    #[must_use]
    pub fn toggled(&self, id: &str) -> Self {
        let mut next = self.0.clone();
        if !next.remove(id) {
            next.insert(id.to_string());
        }
        Self(next)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
