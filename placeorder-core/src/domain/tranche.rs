//! Take-profit row and the entry tuple it is priced against.

use serde::{Deserialize, Serialize};

use super::ids::TrancheId;
use super::side::OrderSide;

/// Which editable column of a tranche an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrancheField {
    ProfitPercent,
    AllocationPercent,
}

/// One profit target: close `allocation_percent` of the position once the
/// price has moved `profit_percent` in the favourable direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tranche {
    pub id: TrancheId,
    pub profit_percent: f64,
    pub allocation_percent: f64,
    /// Derived from the entry price, side and `profit_percent`.
    pub target_price: f64,
    /// Derived: gain if the target is reached with this row's allocation.
    pub projected_profit: f64,
}

impl Tranche {
    pub fn new(id: TrancheId, profit_percent: f64, allocation_percent: f64) -> Self {
        Self {
            id,
            profit_percent,
            allocation_percent,
            target_price: 0.0,
            projected_profit: 0.0,
        }
    }

    /// Position amount assigned to this row.
    pub fn allocation_amount(&self, entry_amount: f64) -> f64 {
        entry_amount * self.allocation_percent / 100.0
    }

    pub fn field(&self, field: TrancheField) -> f64 {
        match field {
            TrancheField::ProfitPercent => self.profit_percent,
            TrancheField::AllocationPercent => self.allocation_percent,
        }
    }
}

/// Entry side, price and amount shared by the order form and the tranche
/// engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryContext {
    pub side: OrderSide,
    pub price: f64,
    pub amount: f64,
}

impl EntryContext {
    pub fn new(side: OrderSide, price: f64, amount: f64) -> Self {
        Self { side, price, amount }
    }

    /// Take-profit needs both a price and an amount to price against.
    pub fn is_priced(&self) -> bool {
        self.price != 0.0 && self.amount != 0.0
    }
}
