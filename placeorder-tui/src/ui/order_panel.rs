//! Entry section: market direction switch and the price/amount/total fields.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use placeorder_core::domain::OrderSide;

use crate::app::{AppState, Focus};
use crate::field::NumberField;
use crate::theme;
use crate::ui::{field_spans, LABEL_WIDTH};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        "Market direction",
        theme::focus(app.focus == Focus::Side),
    )));
    lines.push(side_switch(app.form.side()));
    lines.push(field_line(&app.price, app.focus == Focus::Price));
    lines.push(field_line(&app.amount, app.focus == Focus::Amount));
    lines.push(field_line(&app.total, app.focus == Focus::Total));

    f.render_widget(Paragraph::new(lines), area);
}

fn side_switch(active: OrderSide) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for side in [OrderSide::Buy, OrderSide::Sell] {
        let style = if side == active {
            theme::side(side).add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            theme::muted()
        };
        spans.push(Span::styled(format!(" {side} "), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn field_line(field: &NumberField, focused: bool) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("{:<width$}", field.label, width = LABEL_WIDTH),
        theme::focus(focused),
    )];
    spans.push(Span::raw(" "));
    spans.extend(field_spans(field, 0));
    Line::from(spans)
}
