//! Application state. Single owner, main thread only.
//!
//! The order form itself is an immutable [`OrderForm`]; every change goes
//! through [`AppState::dispatch`], after which the input fields are synced
//! from the new form.

use placeorder_core::config::FormConfig;
use placeorder_core::domain::{OrderSide, TrancheField, TrancheId};
use placeorder_core::form::{OrderEvent, OrderForm, OrderTicket, SubmitError};
use placeorder_core::mask::Commit;

use crate::field::NumberField;

/// Which control has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Side,
    Price,
    Amount,
    Total,
    TakeProfit,
    Profit(TrancheId),
    Allocation(TrancheId),
    AddTarget,
    Submit,
}

impl Focus {
    /// Row the focus sits on, if any.
    pub fn tranche(self) -> Option<TrancheId> {
        match self {
            Focus::Profit(id) | Focus::Allocation(id) => Some(id),
            _ => None,
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Input fields of one take-profit row, keyed by the row's id.
#[derive(Debug, Clone)]
pub struct RowFields {
    pub id: TrancheId,
    pub profit: NumberField,
    pub allocation: NumberField,
}

pub struct AppState {
    pub config: FormConfig,
    pub form: OrderForm,
    pub price: NumberField,
    pub amount: NumberField,
    pub total: NumberField,
    pub rows: Vec<RowFields>,
    pub focus: Focus,
    pub status_message: Option<(String, StatusLevel)>,
    pub last_ticket: Option<OrderTicket>,
    pub running: bool,
}

/// Zero renders as an empty field.
fn shown(value: f64) -> Option<f64> {
    (value != 0.0).then_some(value)
}

impl AppState {
    pub fn new(config: FormConfig) -> Self {
        let currency = &config.currency;
        let fields = &config.fields;
        let price = NumberField::new(format!("Price, {}", currency.quote), fields.price.clone(), None);
        let amount = NumberField::new(format!("Amount, {}", currency.base), fields.amount.clone(), None);
        let total = NumberField::new(format!("Total, {}", currency.quote), fields.total.clone(), None);
        let form = OrderForm::new(config.take_profit.clone());

        Self {
            config,
            form,
            price,
            amount,
            total,
            rows: Vec::new(),
            focus: Focus::Side,
            status_message: None,
            last_ticket: None,
            running: true,
        }
    }

    /// Feed one event to the form. Engine errors land in the status bar.
    pub fn dispatch(&mut self, event: OrderEvent) {
        self.apply(event, true);
    }

    /// Values a field clamped while syncing are written back to the form
    /// once. A clamped value is inside the field's range, so a second sync
    /// clamps nothing.
    fn apply(&mut self, event: OrderEvent, write_back: bool) {
        match self.form.apply(event) {
            Ok(next) => {
                self.form = next;
                let clamped = self.sync_fields();
                if !write_back {
                    return;
                }
                for (focus, commit) in clamped {
                    tracing::debug!(?focus, ?commit, "field clamped pushed value");
                    if let Some(event) = self.event_for(focus, commit) {
                        self.apply(event, false);
                    }
                }
            }
            Err(e) => {
                tracing::warn!(?event, error = %e, "order event refused");
                self.set_error(e.to_string());
            }
        }
    }

    /// Push form values into the fields. Focused fields buffer the value
    /// until they lose focus. Returns the commits of fields that clamped
    /// the pushed value.
    fn sync_fields(&mut self) -> Vec<(Focus, Commit)> {
        let mut clamped = vec![
            (Focus::Price, self.price.set_value(shown(self.form.price()))),
            (Focus::Amount, self.amount.set_value(shown(self.form.amount()))),
            (Focus::Total, self.total.set_value(shown(self.form.total()))),
        ];

        let mut previous = std::mem::take(&mut self.rows);
        for tranche in self.form.tranches() {
            let mut fields = match previous.iter().position(|row| row.id == tranche.id) {
                Some(i) => previous.swap_remove(i),
                None => RowFields {
                    id: tranche.id,
                    profit: NumberField::new("Profit", self.config.fields.profit.clone(), None),
                    allocation: NumberField::new(
                        "Allocation",
                        self.config.fields.allocation.clone(),
                        None,
                    ),
                },
            };
            clamped.push((
                Focus::Profit(tranche.id),
                fields.profit.set_value(Some(tranche.profit_percent)),
            ));
            clamped.push((
                Focus::Allocation(tranche.id),
                fields.allocation.set_value(Some(tranche.allocation_percent)),
            ));
            self.rows.push(fields);
        }

        if !self.focus_order().contains(&self.focus) {
            self.focus = Focus::TakeProfit;
        }
        clamped.retain(|(_, commit)| *commit != Commit::Unchanged);
        clamped
    }

    /// Focusable controls in display order.
    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![
            Focus::Side,
            Focus::Price,
            Focus::Amount,
            Focus::Total,
            Focus::TakeProfit,
        ];
        if self.form.take_profit_active() {
            for row in &self.rows {
                order.push(Focus::Profit(row.id));
                order.push(Focus::Allocation(row.id));
            }
            if self.form.can_add_tranche() {
                order.push(Focus::AddTarget);
            }
        }
        order.push(Focus::Submit);
        order
    }

    pub fn focus_next(&mut self) {
        self.step_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.step_focus(-1);
    }

    fn step_focus(&mut self, step: isize) {
        let order = self.focus_order();
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = (current as isize + step).rem_euclid(order.len() as isize) as usize;
        self.set_focus(order[next]);
    }

    /// Move focus, blurring the field being left and focusing the new one.
    pub fn set_focus(&mut self, focus: Focus) {
        if focus == self.focus {
            return;
        }
        let left = self.focus;
        if let Some(commit) = self.field_mut(left).map(|field| field.blur()) {
            self.commit(left, commit);
        }
        // the commit may have removed the target row
        self.focus = if self.focus_order().contains(&focus) {
            focus
        } else {
            Focus::TakeProfit
        };
        if let Some(field) = self.field_mut(self.focus) {
            field.focus();
        }
    }

    pub fn field_mut(&mut self, focus: Focus) -> Option<&mut NumberField> {
        match focus {
            Focus::Price => Some(&mut self.price),
            Focus::Amount => Some(&mut self.amount),
            Focus::Total => Some(&mut self.total),
            Focus::Profit(id) => self.row_mut(id).map(|row| &mut row.profit),
            Focus::Allocation(id) => self.row_mut(id).map(|row| &mut row.allocation),
            _ => None,
        }
    }

    pub fn row(&self, id: TrancheId) -> Option<&RowFields> {
        self.rows.iter().find(|row| row.id == id)
    }

    fn row_mut(&mut self, id: TrancheId) -> Option<&mut RowFields> {
        self.rows.iter_mut().find(|row| row.id == id)
    }

    /// Turn a field commit into the matching form event. A cleared field
    /// counts as zero.
    pub fn commit(&mut self, focus: Focus, commit: Commit) {
        if let Some(event) = self.event_for(focus, commit) {
            self.dispatch(event);
        }
    }

    fn event_for(&self, focus: Focus, commit: Commit) -> Option<OrderEvent> {
        let value = commit.emitted()?.unwrap_or(0.0);
        let event = match focus {
            Focus::Price => OrderEvent::SetPrice { price: value },
            Focus::Amount => OrderEvent::SetAmount { amount: value },
            Focus::Total => OrderEvent::SetTotal { total: value },
            Focus::Profit(id) | Focus::Allocation(id) => {
                let index = self.form.tranches().position(id)?;
                let field = match focus {
                    Focus::Profit(_) => TrancheField::ProfitPercent,
                    _ => TrancheField::AllocationPercent,
                };
                OrderEvent::EditTranche {
                    index,
                    field,
                    value,
                }
            }
            _ => return None,
        };
        Some(event)
    }

    pub fn set_side(&mut self, side: OrderSide) {
        if side != self.form.side() {
            self.dispatch(OrderEvent::SetSide { side });
        }
    }

    pub fn toggle_take_profit(&mut self) {
        if !self.form.can_toggle_take_profit() {
            self.set_warning("Enter price and amount to set take profit");
            return;
        }
        self.dispatch(OrderEvent::ToggleTakeProfit);
    }

    pub fn add_target(&mut self) {
        if self.form.can_add_tranche() {
            self.dispatch(OrderEvent::AddTranche);
        }
    }

    /// Remove the row under the focus and move focus to the next control.
    pub fn remove_focused_target(&mut self) {
        let Some(id) = self.focus.tranche() else {
            return;
        };
        let order = self.focus_order();
        let fallback = order
            .iter()
            .skip_while(|f| f.tranche() != Some(id))
            .find(|f| f.tranche() != Some(id))
            .copied()
            .unwrap_or(Focus::TakeProfit);
        self.set_focus(fallback);
        self.dispatch(OrderEvent::RemoveTranche { id });
    }

    pub fn submit(&mut self) {
        match self.form.submit() {
            Ok(ticket) => {
                self.set_status(format!(
                    "{} {} {} @ {} {} submitted",
                    ticket.side,
                    ticket.amount,
                    self.config.currency.base,
                    ticket.price,
                    self.config.currency.quote,
                ));
                self.last_ticket = Some(ticket);
            }
            Err(SubmitError::Blocked(report)) => {
                let first = report.messages().first().map(|m| m.to_string());
                self.set_error(first.unwrap_or_else(|| "Take profit is invalid".into()));
            }
        }
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced_app() -> AppState {
        let mut app = AppState::new(FormConfig::default());
        app.dispatch(OrderEvent::SetPrice { price: 100.0 });
        app.dispatch(OrderEvent::SetAmount { amount: 10.0 });
        app
    }

    #[test]
    fn starts_on_side_switch() {
        let app = AppState::new(FormConfig::default());
        assert_eq!(app.focus, Focus::Side);
        assert_eq!(app.price.label, "Price, USDT");
        assert_eq!(app.amount.label, "Amount, BTC");
        assert_eq!(app.price.text(), "");
    }

    #[test]
    fn focus_cycle_wraps() {
        let mut app = AppState::new(FormConfig::default());
        app.focus_prev();
        assert_eq!(app.focus, Focus::Submit);
        app.focus_next();
        assert_eq!(app.focus, Focus::Side);
    }

    #[test]
    fn fields_follow_form() {
        let app = priced_app();
        assert_eq!(app.price.text(), "100");
        assert_eq!(app.total.text(), "1000");
    }

    #[test]
    fn toggle_creates_row_fields() {
        let mut app = priced_app();
        app.toggle_take_profit();
        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.rows[0].profit.text(), "2%");
        assert_eq!(app.rows[0].allocation.text(), "100%");
        assert!(app.focus_order().contains(&Focus::AddTarget));
    }

    #[test]
    fn toggle_without_price_warns() {
        let mut app = AppState::new(FormConfig::default());
        app.toggle_take_profit();
        assert!(!app.form.take_profit_active());
        assert!(matches!(app.status_message, Some((_, StatusLevel::Warning))));
    }

    #[test]
    fn clamped_row_value_reaches_the_form() {
        let mut config = FormConfig::default();
        config.fields.profit.max = Some(5.0);
        let mut app = AppState::new(config);
        app.dispatch(OrderEvent::SetPrice { price: 100.0 });
        app.dispatch(OrderEvent::SetAmount { amount: 10.0 });
        app.toggle_take_profit();
        app.add_target();
        app.add_target();

        let last = &app.form.tranches().rows()[2];
        assert_eq!(app.rows[2].profit.text(), "5%");
        assert_eq!(last.profit_percent, 5.0);
        assert!((last.target_price - 105.0).abs() < 1e-9);
        assert_eq!(app.form.tranches().rows()[1].profit_percent, 4.0);
    }

    #[test]
    fn removing_focused_row_moves_focus() {
        let mut app = priced_app();
        app.toggle_take_profit();
        app.add_target();
        let first = app.rows[0].id;
        app.set_focus(Focus::Allocation(first));
        app.remove_focused_target();
        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.focus, Focus::Profit(app.rows[0].id));
        assert_eq!(app.rows[0].allocation.text(), "100%");
    }

    #[test]
    fn cleared_amount_turns_take_profit_off() {
        let mut app = priced_app();
        app.toggle_take_profit();
        app.set_focus(Focus::Profit(app.rows[0].id));
        app.commit(Focus::Amount, Commit::Cleared);
        assert!(!app.form.take_profit_active());
        assert!(app.rows.is_empty());
        assert_eq!(app.focus, Focus::TakeProfit);
    }

    #[test]
    fn blocked_submit_reports_first_message() {
        let mut app = priced_app();
        app.toggle_take_profit();
        let id = app.rows[0].id;
        app.commit(Focus::Allocation(id), Commit::Value(90.0));
        app.submit();
        let (msg, level) = app.status_message.clone().unwrap();
        assert_eq!(level, StatusLevel::Error);
        assert_eq!(msg, "90 out of 100% selected. Please increase by 10%.");
        assert!(app.last_ticket.is_none());
    }

    #[test]
    fn submit_keeps_ticket() {
        let mut app = priced_app();
        app.submit();
        let ticket = app.last_ticket.as_ref().unwrap();
        assert_eq!(ticket.side, OrderSide::Buy);
        assert_eq!(ticket.total, 1000.0);
        assert!(matches!(app.status_message, Some((_, StatusLevel::Info))));
    }
}
