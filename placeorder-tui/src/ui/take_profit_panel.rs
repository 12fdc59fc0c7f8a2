//! Take-profit section: switch, target table, error block, add action and
//! projected profit.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use placeorder_core::domain::OrderSide;

use crate::app::{AppState, Focus};
use crate::theme;
use crate::ui::field_spans;

const PROFIT_WIDTH: usize = 10;
const TARGET_WIDTH: usize = 18;

/// Allocation column header for `side`.
pub fn amount_header(side: OrderSide) -> &'static str {
    match side {
        OrderSide::Buy => "Amount to buy",
        OrderSide::Sell => "Amount to sell",
    }
}

/// `Add profit target n/max`, or `None` once the row cap is reached.
pub fn add_label(app: &AppState) -> Option<String> {
    app.form.can_add_tranche().then(|| {
        format!(
            "Add profit target {}/{}",
            app.form.tranches().len(),
            app.form.limits().max_rows
        )
    })
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let form = &app.form;
    let quote = &app.config.currency.quote;
    let mut lines: Vec<Line> = Vec::new();

    let switch = if form.take_profit_active() { "[ON] " } else { "[OFF]" };
    let switch_style = if form.can_toggle_take_profit() {
        theme::accent()
    } else {
        theme::muted()
    };
    lines.push(Line::from(vec![
        Span::styled("Take profit", theme::focus(app.focus == Focus::TakeProfit)),
        Span::raw("  "),
        Span::styled(switch, switch_style),
    ]));

    if !form.take_profit_active() {
        f.render_widget(Paragraph::new(lines), area);
        return;
    }

    // Column headers
    lines.push(Line::from(Span::styled(
        format!(
            "{:<pw$} {:<tw$} {}",
            "Profit",
            "Target price",
            amount_header(form.side()),
            pw = PROFIT_WIDTH,
            tw = TARGET_WIDTH,
        ),
        theme::accent_bold(),
    )));

    for tranche in form.tranches() {
        let Some(row) = app.row(tranche.id) else {
            continue;
        };
        let marker = if form.report().row_has_issue(tranche.id) {
            Span::styled("! ", theme::negative())
        } else {
            Span::raw("  ")
        };
        let mut spans = vec![marker];
        spans.extend(field_spans(&row.profit, PROFIT_WIDTH - 2));
        spans.push(Span::styled(
            format!(" {:<tw$}", format!("{:.1} {quote}", tranche.target_price), tw = TARGET_WIDTH),
            theme::secondary(),
        ));
        spans.push(Span::raw(" "));
        spans.extend(field_spans(&row.allocation, 0));
        if app.focus.tranche() == Some(tranche.id) {
            spans.push(Span::styled("  ^D remove", theme::muted()));
        }
        lines.push(Line::from(spans));
    }

    // Error block: each distinct message once
    for message in form.report().messages() {
        lines.push(Line::from(Span::styled(message.to_string(), theme::negative())));
    }

    if let Some(label) = add_label(app) {
        lines.push(Line::from(Span::styled(
            format!("+ {label}"),
            theme::focus(app.focus == Focus::AddTarget),
        )));
    }

    let profit = form.projected_profit();
    lines.push(Line::from(vec![
        Span::styled("Projected profit ", theme::secondary()),
        Span::styled(format!("{profit:.2} {quote}"), theme::pnl(profit)),
    ]));

    f.render_widget(Paragraph::new(lines), area);
}
