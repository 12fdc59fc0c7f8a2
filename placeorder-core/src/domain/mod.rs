//! Domain types for the order form

pub mod ids;
pub mod side;
pub mod tranche;

pub use ids::TrancheId;
pub use side::OrderSide;
pub use tranche::{EntryContext, Tranche, TrancheField};
