//! Top-level UI layout: order form frame with status bar.

pub mod order_panel;
pub mod status_bar;
pub mod submit_button;
pub mod take_profit_panel;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders};

use crate::app::AppState;
use crate::field::NumberField;
use crate::theme::{self, Theme};

/// Width the label column is padded to.
pub const LABEL_WIDTH: usize = 16;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .style(Style::default().bg(Theme::default().background))
        .title(" Place order ")
        .title_style(theme::panel_title(true));
    let inner = block.inner(chunks[0]);
    f.render_widget(block, chunks[0]);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(inner);

    order_panel::render(f, sections[0], app);
    take_profit_panel::render(f, sections[1], app);
    submit_button::render(f, sections[2], app);
    status_bar::render(f, chunks[1], app);
}

/// Spans for a field's text, with the caret drawn reversed while focused
/// and padding up to `width` columns.
pub fn field_spans(field: &NumberField, width: usize) -> Vec<Span<'static>> {
    let text: Vec<char> = field.text().chars().collect();
    let mut spans = Vec::new();
    let mut used = text.len();

    if field.is_focused() {
        let caret = field.caret();
        let (start, end) = caret.range();
        let start = start.min(text.len());
        let end = if caret.is_collapsed() {
            (start + 1).min(text.len())
        } else {
            end.min(text.len())
        };
        let before: String = text[..start].iter().collect();
        let under: String = text[start..end].iter().collect();
        let after: String = text[end..].iter().collect();
        let under = if under.is_empty() {
            used += 1;
            " ".to_string()
        } else {
            under
        };
        spans.push(Span::styled(before, theme::text()));
        spans.push(Span::styled(under, theme::accent().add_modifier(Modifier::REVERSED)));
        spans.push(Span::styled(after, theme::text()));
    } else {
        spans.push(Span::styled(field.text().to_string(), theme::text()));
    }

    spans.push(Span::raw(" ".repeat(width.saturating_sub(used))));
    spans
}
