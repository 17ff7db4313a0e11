//! Domain types for Expensify

mod event;
mod expense;
mod ids;

pub use event::ExpenseEvent;
pub use expense::{Expense, ExpenseData, ExpenseUpdate, NewExpense, RemoveExpense};
pub use ids::{ExpenseId, UserId};
