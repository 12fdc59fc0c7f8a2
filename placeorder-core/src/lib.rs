//! PlaceOrder Core: the engines behind an order-placement form.
//!
//! - Domain types (order side, take-profit rows, entry tuple)
//! - Tranche engine: equal-split and manual-allocation recompute, add/remove/edit,
//!   validation with per-row and aggregate issues
//! - Numeric mask: format, keystroke parsing, range clamping, caret correction
//! - Order form reducer: explicit events in, next form out
//! - TOML configuration

pub mod config;
pub mod domain;
pub mod form;
pub mod mask;
pub mod tranche;

pub use config::FormConfig;
pub use domain::{EntryContext, OrderSide, Tranche, TrancheField, TrancheId};
pub use form::{OrderEvent, OrderForm, OrderTicket, SubmitError};
pub use mask::{Caret, Commit, MaskOptions, MaskRejection, NumericMask};
pub use tranche::{TrancheError, TrancheList, ValidationReport};
