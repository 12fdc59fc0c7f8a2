//! Parrot/neon theme tokens for the order form.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, highlights)
//! - **Positive**: Neon green (buy side, profit)
//! - **Negative**: Hot pink (sell side, validation errors)
//! - **Warning**: Neon orange (rejected keystrokes, hints)
//! - **Muted**: Steel blue (disabled controls, secondary text)

use ratatui::style::{Color, Modifier, Style};

use placeorder_core::domain::OrderSide;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Near-black background (primary surface)
    pub background: Color,
    /// Electric cyan accent (focus, highlights)
    pub accent: Color,
    /// Neon green (buy, gains)
    pub positive: Color,
    /// Hot pink (sell, losses, errors)
    pub negative: Color,
    /// Neon orange (warnings)
    pub warning: Color,
    /// Steel blue (muted text, disabled)
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    /// Get color for PnL value (positive = green, negative = pink)
    pub fn pnl_color(&self, value: f64) -> Color {
        if value >= 0.0 {
            self.positive
        } else {
            self.negative
        }
    }

    pub fn side_color(&self, side: OrderSide) -> Color {
        match side {
            OrderSide::Buy => self.positive,
            OrderSide::Sell => self.negative,
        }
    }
}

fn fg(color: fn(&Theme) -> Color) -> Style {
    Style::default().fg(color(&Theme::default()))
}

pub fn accent() -> Style {
    fg(|t| t.accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn negative() -> Style {
    fg(|t| t.negative)
}

pub fn warning() -> Style {
    fg(|t| t.warning)
}

pub fn muted() -> Style {
    fg(|t| t.muted)
}

pub fn text() -> Style {
    fg(|t| t.text_primary)
}

pub fn secondary() -> Style {
    fg(|t| t.text_secondary)
}

pub fn pnl(value: f64) -> Style {
    Style::default().fg(Theme::default().pnl_color(value))
}

pub fn side(side: OrderSide) -> Style {
    Style::default().fg(Theme::default().side_color(side))
}

/// Style for a control label, highlighted while focused.
pub fn focus(focused: bool) -> Style {
    if focused {
        accent().add_modifier(Modifier::REVERSED)
    } else {
        secondary()
    }
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_creation() {
        let theme = Theme::default();
        assert_eq!(theme.background, Color::Rgb(18, 18, 20));
        assert_eq!(theme.accent, Color::Rgb(0, 255, 255));
    }

    #[test]
    fn test_pnl_color() {
        let theme = Theme::default();
        assert_eq!(theme.pnl_color(100.0), theme.positive);
        assert_eq!(theme.pnl_color(-50.0), theme.negative);
        assert_eq!(theme.pnl_color(0.0), theme.positive);
    }

    #[test]
    fn test_side_color() {
        let theme = Theme::default();
        assert_eq!(theme.side_color(OrderSide::Buy), theme.positive);
        assert_eq!(theme.side_color(OrderSide::Sell), theme.negative);
    }

    #[test]
    fn focused_label_is_reversed() {
        assert!(focus(true).add_modifier.contains(Modifier::REVERSED));
        assert!(!focus(false).add_modifier.contains(Modifier::REVERSED));
    }
}
