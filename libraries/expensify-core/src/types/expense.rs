/// Expense domain types
use crate::error::Result;
use crate::types::ExpenseId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single expense record, as held in local state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Key assigned by the remote store at creation time
    pub id: ExpenseId,

    /// Short description
    pub description: String,

    /// Free-form note
    pub note: String,

    /// Amount in the smallest currency unit
    pub amount: i64,

    /// Creation time as epoch milliseconds
    pub created_at: i64,
}

impl Expense {
    /// Combine a store-assigned key with the stored fields
    pub fn from_data(id: ExpenseId, data: ExpenseData) -> Self {
        Self {
            id,
            description: data.description,
            note: data.note,
            amount: data.amount,
            created_at: data.created_at,
        }
    }

    /// The fields written to the remote store (everything but the id)
    pub fn data(&self) -> ExpenseData {
        ExpenseData {
            description: self.description.clone(),
            note: self.note.clone(),
            amount: self.amount,
            created_at: self.created_at,
        }
    }

    /// Overlay the fields present in `updates`; absent fields are left alone
    pub fn apply_update(&mut self, updates: &ExpenseUpdate) {
        if let Some(description) = &updates.description {
            self.description.clone_from(description);
        }
        if let Some(note) = &updates.note {
            self.note.clone_from(note);
        }
        if let Some(amount) = updates.amount {
            self.amount = amount;
        }
        if let Some(created_at) = updates.created_at {
            self.created_at = created_at;
        }
    }
}

/// The value stored under an expense key
///
/// Missing fields deserialize to their defaults so partially written records
/// still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpenseData {
    pub description: String,
    pub note: String,
    pub amount: i64,
    pub created_at: i64,
}

/// Raw form input for creating an expense
///
/// Every field is optional; [`NewExpense::into_data`] fills in the defaults
/// (empty strings, zero amount, zero timestamp).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewExpense {
    pub description: Option<String>,
    pub note: Option<String>,
    pub amount: Option<i64>,
    pub created_at: Option<i64>,
}

impl NewExpense {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn amount(mut self, amount: i64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn created_at(mut self, created_at: i64) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Apply defaults for every field that was not supplied
    pub fn into_data(self) -> ExpenseData {
        ExpenseData {
            description: self.description.unwrap_or_default(),
            note: self.note.unwrap_or_default(),
            amount: self.amount.unwrap_or(0),
            created_at: self.created_at.unwrap_or(0),
        }
    }
}

/// Field -> new value mapping for an existing expense
///
/// Only the fields that are `Some` are sent to the store and carried in the
/// resulting change event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpenseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl ExpenseUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn amount(mut self, amount: i64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn created_at(mut self, created_at: i64) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.note.is_none()
            && self.amount.is_none()
            && self.created_at.is_none()
    }

    /// The JSON object sent as a partial update
    pub fn to_map(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }
}

/// Input for removing an expense
///
/// The id is optional so callers can pass whatever they have; without an id
/// the removal does nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveExpense {
    #[serde(default)]
    pub id: Option<ExpenseId>,
}

impl RemoveExpense {
    pub fn new(id: impl Into<ExpenseId>) -> Self {
        Self {
            id: Some(id.into()),
        }
    }
}
