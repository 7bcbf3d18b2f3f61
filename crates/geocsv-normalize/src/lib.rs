#![deny(unsafe_code)]

//! Streaming add-to-100 normalization.
//!
//! Rows sharing a geography and all non-leaf dimension values form a group
//! whose totals are expected to sum to 100. The normalizer enforces that
//! invariant incrementally, in row-arrival order, holding nothing but one
//! running total per distinct group: O(1) memory per group, O(1) time per
//! row, no lookahead, no buffering.
//!
//! When a group's running total passes 100, the whole excess is subtracted
//! from the row that pushed it over; earlier rows are never revisited and
//! the accumulator keeps its over-100 value. A group that never reaches 100
//! is left untouched. The correction is not clamped at zero, so a row whose
//! own value exceeds the remaining budget comes out negative.

use std::collections::HashMap;

use tracing::debug;

use geocsv_model::{Geography, RowRecord};

/// Identifies a normalization group: a geography plus every dimension value
/// except the leaf.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    geography: Geography,
    prefix: Vec<String>,
}

impl GroupKey {
    pub fn for_row(row: &RowRecord) -> Self {
        Self {
            geography: row.geography.clone(),
            prefix: row.group_prefix().to_vec(),
        }
    }
}

/// Per-run normalizer state.
///
/// Owns its running-total map outright; construct one per import run and
/// drop it when the run ends. Nothing here is shared or global.
#[derive(Debug, Default)]
pub struct AddTo100 {
    totals: HashMap<GroupKey, f64>,
}

impl AddTo100 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate the row's total into its group and subtract any excess
    /// over 100 from the row itself.
    ///
    /// Missing totals are skipped entirely: not accumulated, not adjusted.
    /// Returns the excess that was subtracted, if any.
    pub fn adjust(&mut self, row: &mut RowRecord) -> Option<f64> {
        let value = row.total.as_f64()?;
        let key = GroupKey::for_row(row);
        let running = self.totals.entry(key).or_insert(0.0);
        *running += value;
        if *running <= 100.0 {
            return None;
        }
        let excess = *running - 100.0;
        debug!(
            geography = %row.geography,
            running = *running,
            excess,
            "group total exceeds 100, correcting current row"
        );
        row.total = row.total.subtract_excess(excess);
        Some(excess)
    }

    /// Number of distinct groups seen so far.
    pub fn group_count(&self) -> usize {
        self.totals.len()
    }
}
