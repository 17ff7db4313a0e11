//! Expensify Sync
//!
//! The asynchronous state-synchronization layer. Each operation performs one
//! remote read or write against the session user's partition, waits for the
//! store to acknowledge it, and only then publishes an [`ExpenseEvent`] on the
//! event channel. Local state therefore never shows anything the remote store
//! has not confirmed.
//!
//! | Operation | Remote call | Event on success |
//! |-----------|-------------|------------------|
//! | [`ExpenseSync::start_add_expense`] | push to `users/{uid}/expenses` | `Added` |
//! | [`ExpenseSync::start_edit_expense`] | update `users/{uid}/expenses/{id}` | `Edited` |
//! | [`ExpenseSync::start_remove_expense`] | remove `users/{uid}/expenses/{id}` | `Removed` |
//! | [`ExpenseSync::start_set_expenses`] | read `users/{uid}/expenses` once | `Set` |
//!
//! On failure no event is published and the returned future resolves to a
//! [`SyncError`].
//!
//! [`ExpenseEvent`]: expensify_core::ExpenseEvent

mod error;
mod events;
mod manager;

// Public exports
pub use error::{Result, SyncError, SyncOperation};
pub use events::{EventPublisher, EventReceiver};
pub use manager::ExpenseSync;
