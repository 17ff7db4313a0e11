use expensify_core::{Expense, ExpenseEvent, ExpenseId};
use serde::{Deserialize, Serialize};

/// Local copy of the user's expenses, updated only from confirmed events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseState {
    expenses: Vec<Expense>,
}

impl ExpenseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the collection
    ///
    /// Edits and removals for ids that are not present are ignored.
    pub fn apply(&mut self, event: &ExpenseEvent) {
        match event {
            ExpenseEvent::Added { expense } => self.expenses.push(expense.clone()),
            ExpenseEvent::Edited { id, updates } => {
                if let Some(expense) = self.expenses.iter_mut().find(|e| &e.id == id) {
                    expense.apply_update(updates);
                }
            }
            ExpenseEvent::Removed { id } => self.expenses.retain(|e| &e.id != id),
            ExpenseEvent::Set { expenses } => self.expenses.clone_from(expenses),
        }
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn get(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| &e.id == id)
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}
