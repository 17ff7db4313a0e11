//! Expense change events
//!
//! An `ExpenseEvent` describes a mutation that the remote store has already
//! acknowledged. Events are published by the sync layer and folded into local
//! state by a subscriber:
//! - `Added` after a push returned its generated key
//! - `Edited` after a partial update was accepted
//! - `Removed` after a delete was accepted
//! - `Set` after the whole partition was read

use crate::types::{Expense, ExpenseId, ExpenseUpdate};
use serde::{Deserialize, Serialize};

/// Change description published after a confirmed remote operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExpenseEvent {
    /// A new record was created
    #[serde(rename = "ADD_EXPENSE")]
    Added {
        /// The full record, id included
        expense: Expense,
    },

    /// An existing record received a partial update
    #[serde(rename = "EDIT_EXPENSE")]
    Edited {
        /// Record that was updated
        id: ExpenseId,
        /// Exactly the fields that were sent to the store
        updates: ExpenseUpdate,
    },

    /// A record was deleted
    #[serde(rename = "REMOVE_EXPENSE")]
    Removed {
        /// Record that was deleted
        id: ExpenseId,
    },

    /// The whole collection was loaded and replaces local state
    #[serde(rename = "SET_EXPENSES")]
    Set {
        /// Records in the order the store returned them
        expenses: Vec<Expense>,
    },
}

impl ExpenseEvent {
    pub fn added(expense: Expense) -> Self {
        Self::Added { expense }
    }

    pub fn edited(id: ExpenseId, updates: ExpenseUpdate) -> Self {
        Self::Edited { id, updates }
    }

    pub fn removed(id: ExpenseId) -> Self {
        Self::Removed { id }
    }

    pub fn set(expenses: Vec<Expense>) -> Self {
        Self::Set { expenses }
    }

    /// Action name, matching the serialized `type` tag
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Added { .. } => "ADD_EXPENSE",
            Self::Edited { .. } => "EDIT_EXPENSE",
            Self::Removed { .. } => "REMOVE_EXPENSE",
            Self::Set { .. } => "SET_EXPENSES",
        }
    }
}
