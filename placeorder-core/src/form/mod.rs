//! Order form state and its reducer.
//!
//! The form is an immutable record: every UI event goes through
//! [`OrderForm::apply`], which returns the next form with all derived state
//! (tranche prices and profits, validation report) already recomputed.
//! Nothing is recomputed implicitly; the event that changes a value
//! triggers its dependents directly.

pub mod ticket;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::TakeProfitLimits;
use crate::domain::{EntryContext, OrderSide, TrancheField, TrancheId};
use crate::tranche::{TrancheError, TrancheList, ValidationReport};

pub use ticket::{OrderTicket, SubmitError};

/// A discrete UI event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum OrderEvent {
    SetSide { side: OrderSide },
    SetPrice { price: f64 },
    SetAmount { amount: f64 },
    /// Derives the amount from the price; zero when no price is set.
    SetTotal { total: f64 },
    ToggleTakeProfit,
    AddTranche,
    RemoveTranche { id: TrancheId },
    EditTranche {
        index: usize,
        field: TrancheField,
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderForm {
    side: OrderSide,
    price: f64,
    amount: f64,
    take_profit_active: bool,
    tranches: TrancheList,
    report: ValidationReport,
    limits: TakeProfitLimits,
}

impl Default for OrderForm {
    fn default() -> Self {
        Self::new(TakeProfitLimits::default())
    }
}

impl OrderForm {
    pub fn new(limits: TakeProfitLimits) -> Self {
        Self {
            side: OrderSide::Buy,
            price: 0.0,
            amount: 0.0,
            take_profit_active: false,
            tranches: TrancheList::new(),
            report: ValidationReport::default(),
            limits,
        }
    }

    pub fn side(&self) -> OrderSide {
        self.side
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn total(&self) -> f64 {
        self.price * self.amount
    }

    pub fn entry(&self) -> EntryContext {
        EntryContext::new(self.side, self.price, self.amount)
    }

    pub fn take_profit_active(&self) -> bool {
        self.take_profit_active
    }

    pub fn tranches(&self) -> &TrancheList {
        &self.tranches
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn limits(&self) -> &TakeProfitLimits {
        &self.limits
    }

    pub fn projected_profit(&self) -> f64 {
        self.tranches.projected_profit()
    }

    /// Take-profit can only be switched on against a priced entry.
    pub fn can_toggle_take_profit(&self) -> bool {
        self.take_profit_active || self.entry().is_priced()
    }

    pub fn can_add_tranche(&self) -> bool {
        self.take_profit_active && self.tranches.can_add(&self.limits)
    }

    /// Submit is disabled while take-profit is on and has issues.
    pub fn submit_inactive(&self) -> bool {
        self.take_profit_active && !self.report.is_empty()
    }

    /// Produce the next form for `event`.
    pub fn apply(&self, event: OrderEvent) -> Result<Self, TrancheError> {
        tracing::debug!(?event, "order form event");
        let mut next = self.clone();
        let entry = next.entry();
        match event {
            OrderEvent::SetSide { side } => {
                next.side = side;
                next.entry_changed();
            }
            OrderEvent::SetPrice { price } => {
                next.price = price;
                next.entry_changed();
            }
            OrderEvent::SetAmount { amount } => {
                next.amount = amount;
                next.entry_changed();
            }
            OrderEvent::SetTotal { total } => {
                next.amount = if next.price > 0.0 { total / next.price } else { 0.0 };
                next.entry_changed();
            }
            OrderEvent::ToggleTakeProfit => {
                if next.take_profit_active {
                    next.take_profit_active = false;
                    next.tranches = TrancheList::new();
                } else if entry.is_priced() {
                    next.tranches = TrancheList::new().add(&entry, &next.limits)?;
                    next.take_profit_active = true;
                }
            }
            OrderEvent::AddTranche => {
                if next.take_profit_active {
                    next.tranches = next.tranches.add(&entry, &next.limits)?;
                }
            }
            OrderEvent::RemoveTranche { id } => {
                next.tranches = next.tranches.remove(id, &entry)?;
            }
            OrderEvent::EditTranche {
                index,
                field,
                value,
            } => {
                next.tranches = next.tranches.edit(index, field, value, &entry)?;
            }
        }
        next.revalidate();
        Ok(next)
    }

    /// Build the order ticket, or refuse while validation issues stand.
    pub fn submit(&self) -> Result<OrderTicket, SubmitError> {
        if self.submit_inactive() {
            tracing::warn!(issues = self.report.len(), "submit blocked by take-profit validation");
            return Err(SubmitError::Blocked(self.report.clone()));
        }
        let take_profit = if self.take_profit_active {
            self.tranches.rows().to_vec()
        } else {
            Vec::new()
        };
        let ticket = OrderTicket {
            side: self.side,
            price: self.price,
            amount: self.amount,
            total: self.total(),
            take_profit,
            projected_profit: self.projected_profit(),
            created_at: Utc::now(),
        };
        tracing::info!(
            side = %ticket.side,
            price = ticket.price,
            amount = ticket.amount,
            targets = ticket.take_profit.len(),
            "order submitted"
        );
        Ok(ticket)
    }

    /// Side, price or amount changed: an unpriced entry drops take-profit,
    /// otherwise rows are re-derived without touching allocations.
    fn entry_changed(&mut self) {
        let entry = self.entry();
        if !entry.is_priced() {
            self.take_profit_active = false;
            self.tranches = TrancheList::new();
        } else if !self.tranches.is_empty() {
            self.tranches = self.tranches.recompute_from_manual_allocations(&entry);
        }
    }

    fn revalidate(&mut self) {
        self.report = if self.take_profit_active {
            self.tranches.validate(&self.limits)
        } else {
            ValidationReport::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced() -> OrderForm {
        OrderForm::default()
            .apply(OrderEvent::SetPrice { price: 100.0 })
            .unwrap()
            .apply(OrderEvent::SetAmount { amount: 10.0 })
            .unwrap()
    }

    #[test]
    fn total_is_price_times_amount() {
        assert_eq!(priced().total(), 1000.0);
    }

    #[test]
    fn set_total_derives_amount() {
        let form = priced().apply(OrderEvent::SetTotal { total: 250.0 }).unwrap();
        assert_eq!(form.amount(), 2.5);
    }

    #[test]
    fn set_total_without_price_zeroes_amount() {
        let form = OrderForm::default()
            .apply(OrderEvent::SetTotal { total: 250.0 })
            .unwrap();
        assert_eq!(form.amount(), 0.0);
    }

    #[test]
    fn toggle_needs_priced_entry() {
        let form = OrderForm::default().apply(OrderEvent::ToggleTakeProfit).unwrap();
        assert!(!form.take_profit_active());
        assert!(form.tranches().is_empty());
    }

    #[test]
    fn toggle_on_creates_first_row() {
        let form = priced().apply(OrderEvent::ToggleTakeProfit).unwrap();
        assert!(form.take_profit_active());
        assert_eq!(form.tranches().len(), 1);
        assert!(form.report().is_empty());
        assert!(!form.submit_inactive());
    }

    #[test]
    fn toggle_off_clears_rows_and_issues() {
        let form = priced()
            .apply(OrderEvent::ToggleTakeProfit)
            .unwrap()
            .apply(OrderEvent::EditTranche {
                index: 0,
                field: TrancheField::AllocationPercent,
                value: 40.0,
            })
            .unwrap();
        assert!(form.submit_inactive());
        let form = form.apply(OrderEvent::ToggleTakeProfit).unwrap();
        assert!(!form.take_profit_active());
        assert!(form.tranches().is_empty());
        assert!(form.report().is_empty());
    }

    #[test]
    fn zero_price_drops_take_profit() {
        let form = priced()
            .apply(OrderEvent::ToggleTakeProfit)
            .unwrap()
            .apply(OrderEvent::SetPrice { price: 0.0 })
            .unwrap();
        assert!(!form.take_profit_active());
        assert!(form.tranches().is_empty());
    }

    #[test]
    fn add_ignored_while_inactive() {
        let form = priced().apply(OrderEvent::AddTranche).unwrap();
        assert!(form.tranches().is_empty());
    }

    #[test]
    fn submit_blocked_with_issues() {
        let form = priced()
            .apply(OrderEvent::ToggleTakeProfit)
            .unwrap()
            .apply(OrderEvent::EditTranche {
                index: 0,
                field: TrancheField::ProfitPercent,
                value: 0.0,
            })
            .unwrap();
        assert!(matches!(form.submit(), Err(SubmitError::Blocked(_))));
    }

    #[test]
    fn submit_without_take_profit_has_no_targets() {
        let ticket = priced().submit().unwrap();
        assert_eq!(ticket.side, OrderSide::Buy);
        assert_eq!(ticket.total, 1000.0);
        assert!(ticket.take_profit.is_empty());
    }
}
