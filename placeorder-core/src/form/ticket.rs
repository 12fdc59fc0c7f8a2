//! Submission output of the order form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{OrderSide, Tranche};
use crate::tranche::ValidationReport;

/// Everything needed to place the order, captured at submit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTicket {
    pub side: OrderSide,
    pub price: f64,
    pub amount: f64,
    pub total: f64,
    /// Empty when take-profit is off.
    pub take_profit: Vec<Tranche>,
    pub projected_profit: f64,
    pub created_at: DateTime<Utc>,
}

impl OrderTicket {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("take-profit has {} validation issue(s)", .0.len())]
    Blocked(ValidationReport),
}
