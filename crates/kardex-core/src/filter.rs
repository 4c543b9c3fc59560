//! # Filter & Sort
//!
//! Narrows the movement list by type, store and date range, then orders it
//! most recent first.
//!
//! ## Predicate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A movement is visible when ALL of these hold:                         │
//! │                                                                         │
//! │  (a) type     filter is "all", or equals the movement's kind           │
//! │  (b) store    unset, or                                                 │
//! │                 sale           → sale.store == store                    │
//! │                 transfer       → origin == store OR destination == store│
//! │                 purchase order → always passes                          │
//! │  (c) dates    both bounds empty → no date exclusion                     │
//! │               otherwise the movement needs a parsed date with           │
//! │                 start-of-day(from) <= date < start-of-day(to + 1 day)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering
//! Stable sort on the parsed date, descending. Movements without a usable
//! date sort after every dated movement and keep their input order.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::dates::{end_of_day_exclusive, start_of_day};
use crate::error::ValidationError;
use crate::labels::Labels;
use crate::movement::{Movement, MovementDetail, MovementKind};
use crate::validation::parse_type_filter;

// =============================================================================
// Type Filter
// =============================================================================

/// Movement type selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TypeFilter {
    #[default]
    All,
    Only(MovementKind),
}

impl TypeFilter {
    pub fn matches(&self, kind: MovementKind) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(selected) => *selected == kind,
        }
    }

    /// Selector label: "All", "Sales", "Transfers" or "Purchase Orders".
    pub fn label(&self, labels: &Labels) -> &'static str {
        match self {
            TypeFilter::All => labels.all_types,
            TypeFilter::Only(kind) => kind.plural_label(labels),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_type_filter(s)
    }
}

// =============================================================================
// Date Range
// =============================================================================

/// Calendar-day range, inclusive on both ends. An empty side is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// True when neither bound is set.
    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Checks a movement date against the range.
    ///
    /// With any bound set, a movement without a parsed date is excluded.
    pub fn contains(&self, date: Option<&DateTime<FixedOffset>>, offset: FixedOffset) -> bool {
        if self.is_open() {
            return true;
        }

        let Some(date) = date else {
            return false;
        };

        if let Some(lower) = self.start.and_then(|start| start_of_day(start, offset)) {
            if *date < lower {
                return false;
            }
        }

        if let Some(upper) = self.end.and_then(|end| end_of_day_exclusive(end, offset)) {
            if *date >= upper {
                return false;
            }
        }

        true
    }
}

// =============================================================================
// Movement Filter
// =============================================================================

/// The three filter inputs of the report screen.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MovementFilter {
    pub kind: TypeFilter,
    pub store_id: Option<String>,
    pub dates: DateRange,
}

impl MovementFilter {
    /// True when any input differs from "show everything".
    pub fn is_active(&self) -> bool {
        self.kind != TypeFilter::All || self.store_id.is_some() || !self.dates.is_open()
    }

    /// Resets every input.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, movement: &Movement, offset: FixedOffset) -> bool {
        self.kind.matches(movement.kind)
            && self.matches_store(movement)
            && self.dates.contains(movement.date.as_ref(), offset)
    }

    fn matches_store(&self, movement: &Movement) -> bool {
        let Some(store) = self.store_id.as_deref() else {
            return true;
        };

        match &movement.detail {
            MovementDetail::Sale { store_id, .. } => store_id.as_deref() == Some(store),
            MovementDetail::Transfer {
                from_store_id,
                to_store_id,
                ..
            } => from_store_id.as_deref() == Some(store) || to_store_id.as_deref() == Some(store),
            MovementDetail::PurchaseOrder { .. } => true,
        }
    }
}

// =============================================================================
// Apply
// =============================================================================

/// Filters the movement list and sorts the result most recent first.
pub fn apply_filter<'a>(
    movements: &'a [Movement],
    filter: &MovementFilter,
    offset: FixedOffset,
) -> Vec<&'a Movement> {
    let mut visible: Vec<&Movement> = movements
        .iter()
        .filter(|movement| filter.matches(movement, offset))
        .collect();

    sort_by_date_desc(&mut visible);
    visible
}

/// Stable date-descending sort; undated movements go last.
pub fn sort_by_date_desc(movements: &mut [&Movement]) {
    movements.sort_by(|a, b| match (&a.date, &b.date) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

// =============================================================================
// Unit Tests
// =============================================================================
