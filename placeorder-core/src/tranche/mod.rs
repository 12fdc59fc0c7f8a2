//! Take-profit tranche engine.
//!
//! Keeps a list of profit targets consistent with the entry tuple. Callers
//! pick one of two recompute bases explicitly:
//!
//! - [`rebalance_equal`]: every row gets `100 / N` percent. Used when the
//!   list is created, on add and on remove; manual allocations are lost.
//! - [`recompute_from_manual_allocations`]: allocations are kept as the
//!   user set them, only target price and projected profit are re-derived.
//!   Used on row edits and when side, price or amount change.
//!
//! All operations return a new list; nothing mutates in place.

pub mod validation;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::TakeProfitLimits;
use crate::domain::{EntryContext, OrderSide, Tranche, TrancheField, TrancheId};

pub use validation::{
    validate, IssueKind, IssueTarget, ValidationIssue, ValidationReport, ALLOCATION_TOLERANCE,
};

/// Errors from list mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrancheError {
    #[error("take-profit already has the maximum of {0} targets")]
    RowLimit(usize),

    #[error("tranche {0} not found")]
    NotFound(TrancheId),

    #[error("row {index} out of range ({len} rows)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Entry price moved `profit_percent` in the side's favourable direction.
pub fn target_price(side: OrderSide, entry_price: f64, profit_percent: f64) -> f64 {
    match side {
        OrderSide::Buy => entry_price * (1.0 + profit_percent / 100.0),
        OrderSide::Sell => entry_price * (1.0 - profit_percent / 100.0),
    }
}

/// Gain from closing `allocation_amount` at `target_price`.
pub fn projected_profit(
    side: OrderSide,
    entry_price: f64,
    target_price: f64,
    allocation_amount: f64,
) -> f64 {
    match side {
        OrderSide::Buy => allocation_amount * (target_price - entry_price),
        OrderSide::Sell => allocation_amount * (entry_price - target_price),
    }
}

fn derive(row: &Tranche, allocation_percent: f64, entry: &EntryContext) -> Tranche {
    let target = target_price(entry.side, entry.price, row.profit_percent);
    let amount = entry.amount * allocation_percent / 100.0;
    Tranche {
        id: row.id,
        profit_percent: row.profit_percent,
        allocation_percent,
        target_price: target,
        projected_profit: projected_profit(entry.side, entry.price, target, amount),
    }
}

/// Split the allocation equally over all rows and re-derive each row.
pub fn rebalance_equal(rows: &[Tranche], entry: &EntryContext) -> Vec<Tranche> {
    if rows.is_empty() {
        return Vec::new();
    }
    let share = 100.0 / rows.len() as f64;
    rows.iter().map(|row| derive(row, share, entry)).collect()
}

/// Re-derive target price and projected profit, keeping each row's own
/// allocation.
pub fn recompute_from_manual_allocations(rows: &[Tranche], entry: &EntryContext) -> Vec<Tranche> {
    rows.iter()
        .map(|row| derive(row, row.allocation_percent, entry))
        .collect()
}

/// Ordered take-profit rows plus the id sequence that names them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrancheList {
    rows: Vec<Tranche>,
    next_id: u64,
}

impl TrancheList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Tranche] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tranche> {
        self.rows.iter()
    }

    pub fn get(&self, id: TrancheId) -> Option<&Tranche> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn position(&self, id: TrancheId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    /// Aggregate projected profit over all rows.
    pub fn projected_profit(&self) -> f64 {
        self.rows.iter().map(|row| row.projected_profit).sum()
    }

    pub fn allocation_sum(&self) -> f64 {
        self.rows.iter().map(|row| row.allocation_percent).sum()
    }

    pub fn profit_sum(&self) -> f64 {
        self.rows.iter().map(|row| row.profit_percent).sum()
    }

    /// Profit for the next added row: last row's profit plus one step, or
    /// one step on an empty list.
    pub fn next_profit(&self, step: f64) -> f64 {
        self.rows.last().map_or(step, |last| last.profit_percent + step)
    }

    pub fn can_add(&self, limits: &TakeProfitLimits) -> bool {
        self.rows.len() < limits.max_rows
    }

    fn with_rows(&self, rows: Vec<Tranche>) -> Self {
        Self {
            rows,
            next_id: self.next_id,
        }
    }

    pub fn rebalance_equal(&self, entry: &EntryContext) -> Self {
        self.with_rows(rebalance_equal(&self.rows, entry))
    }

    pub fn recompute_from_manual_allocations(&self, entry: &EntryContext) -> Self {
        self.with_rows(recompute_from_manual_allocations(&self.rows, entry))
    }

    /// Append a row one profit step above the last and re-split equally.
    pub fn add(&self, entry: &EntryContext, limits: &TakeProfitLimits) -> Result<Self, TrancheError> {
        if !self.can_add(limits) {
            return Err(TrancheError::RowLimit(limits.max_rows));
        }
        let id = TrancheId(self.next_id);
        let profit = self.next_profit(limits.profit_step);
        let mut rows = self.rows.clone();
        rows.push(Tranche::new(id, profit, 0.0));
        tracing::debug!(%id, profit, rows = rows.len(), "tranche added");
        Ok(Self {
            rows: rebalance_equal(&rows, entry),
            next_id: self.next_id + 1,
        })
    }

    /// Drop the row with `id` and re-split the remainder equally.
    pub fn remove(&self, id: TrancheId, entry: &EntryContext) -> Result<Self, TrancheError> {
        let index = self.position(id).ok_or(TrancheError::NotFound(id))?;
        let mut rows = self.rows.clone();
        rows.remove(index);
        tracing::debug!(%id, rows = rows.len(), "tranche removed");
        Ok(self.with_rows(rebalance_equal(&rows, entry)))
    }

    /// Replace one field of the row at `index`, keeping manual allocations.
    pub fn edit(
        &self,
        index: usize,
        field: TrancheField,
        value: f64,
        entry: &EntryContext,
    ) -> Result<Self, TrancheError> {
        let mut rows = self.rows.clone();
        let len = rows.len();
        let row = rows
            .get_mut(index)
            .ok_or(TrancheError::IndexOutOfRange { index, len })?;
        match field {
            TrancheField::ProfitPercent => row.profit_percent = value,
            TrancheField::AllocationPercent => row.allocation_percent = value,
        }
        tracing::debug!(index, ?field, value, "tranche edited");
        Ok(self.with_rows(recompute_from_manual_allocations(&rows, entry)))
    }

    pub fn validate(&self, limits: &TakeProfitLimits) -> ValidationReport {
        validate(&self.rows, limits)
    }
}

impl<'a> IntoIterator for &'a TrancheList {
    type Item = &'a Tranche;
    type IntoIter = std::slice::Iter<'a, Tranche>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
