//! Submit button: "Buy BTC" / "Sell BTC", dimmed while take-profit has issues.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, Focus};
use crate::theme;

/// Button caption for the current side.
pub fn label(app: &AppState) -> String {
    format!("{} {}", app.form.side(), app.config.currency.base)
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut style = if app.form.submit_inactive() {
        theme::muted()
    } else {
        theme::side(app.form.side()).add_modifier(Modifier::BOLD)
    };
    if app.focus == Focus::Submit {
        style = style.add_modifier(Modifier::REVERSED);
    }

    let button = Paragraph::new(label(app))
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(style));
    f.render_widget(button, area);
}
