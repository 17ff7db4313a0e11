//! Expensify Core
//!
//! Platform-agnostic types, traits, and error handling for Expensify.
//!
//! This crate provides the building blocks shared by the remote store client,
//! the synchronization layer, and the state container.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Expense`, `NewExpense`, `ExpenseUpdate`, ids
//! - **Change Events**: `ExpenseEvent`, the payload published after a remote
//!   operation has been acknowledged
//! - **Remote Store Contract**: `RemoteStore`, `StorePath`, `Snapshot`
//! - **Session**: `SessionContext`, the explicit per-call user scope
//! - **Error Handling**: Unified `ExpensifyError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use expensify_core::{NewExpense, SessionContext, StorePath};
//!
//! let session = SessionContext::new("user-1").unwrap();
//! let path = StorePath::user_expenses(session.user_id());
//! assert_eq!(path.as_str(), "users/user-1/expenses");
//!
//! let data = NewExpense::new().description("Coffee").amount(300).into_data();
//! assert_eq!(data.note, "");
//! assert_eq!(data.created_at, 0);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod path;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{ExpensifyError, Result};
pub use path::StorePath;
pub use session::SessionContext;
pub use snapshot::Snapshot;
pub use store::RemoteStore;

pub use types::{
    Expense, ExpenseData, ExpenseEvent, ExpenseId, ExpenseUpdate, NewExpense, RemoveExpense,
    UserId,
};
