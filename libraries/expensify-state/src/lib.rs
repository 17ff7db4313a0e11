//! Expensify State - the subscriber side of expense sync
//!
//! Sync operations publish [`ExpenseEvent`]s only after the remote store has
//! acknowledged a write. This crate folds those events into a local view:
//!
//! - [`ExpenseState`] applies events to an in-memory collection
//! - [`StateStore`] runs that fold on a background task and exposes
//!   snapshots plus a revision counter callers can wait on
//! - [`ExpenseFilters`] and the selector functions derive the visible list
//!   and its totals
//!
//! [`ExpenseEvent`]: expensify_core::ExpenseEvent

mod filters;
mod state;
mod store;

pub use filters::{
    expenses_total, format_amount, format_date, visible_expenses, ExpenseFilters, ExpenseSummary,
    SortBy,
};
pub use state::ExpenseState;
pub use store::StateStore;
