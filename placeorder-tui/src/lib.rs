//! PlaceOrder TUI: terminal order-placement form.
//!
//! - Market direction switch with price, amount and total fields
//! - Take-profit targets: editable profit and allocation per row
//! - Validation messages, projected profit, submit button

pub mod app;
pub mod field;
pub mod input;
pub mod theme;
pub mod ui;

pub use app::AppState;
pub use input::handle_key;
pub use theme::Theme;
