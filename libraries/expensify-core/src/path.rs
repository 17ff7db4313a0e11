//! Hierarchical paths into the remote store
//!
//! Expense data lives under `users/{uid}/expenses`. The constructors here are
//! the only way the rest of the workspace builds expense paths, so every read
//! and write is scoped to a single user's partition.

use crate::error::{ExpensifyError, Result};
use crate::types::{ExpenseId, UserId};
use std::fmt;

const USERS: &str = "users";
const EXPENSES: &str = "expenses";

/// Characters the realtime database does not accept inside a key
const FORBIDDEN_KEY_CHARS: &[char] = &['.', '$', '#', '[', ']', '/'];

/// Slash-separated location in the remote tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorePath(String);

impl StorePath {
    /// `users/{uid}/expenses`
    pub fn user_expenses(uid: &UserId) -> Self {
        Self(format!("{}/{}/{}", USERS, uid, EXPENSES))
    }

    /// `users/{uid}/expenses/{id}`
    ///
    /// Fails when the id is not a valid store key.
    pub fn expense(uid: &UserId, id: &ExpenseId) -> Result<Self> {
        Self::user_expenses(uid).child(id.as_str())
    }

    /// Parse a path from its string form, validating each segment
    pub fn parse(path: &str) -> Result<Self> {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Err(ExpensifyError::invalid_input("Path cannot be empty"));
        }
        for segment in trimmed.split('/') {
            validate_key(segment)?;
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Append a single key
    pub fn child(&self, key: &str) -> Result<Self> {
        validate_key(key)?;
        Ok(Self(format!("{}/{}", self.0, key)))
    }

    /// Last segment of the path
    pub fn key(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Check that `key` can be used as a single path segment
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(ExpensifyError::invalid_input("Key cannot be empty"));
    }
    if let Some(c) = key
        .chars()
        .find(|c| FORBIDDEN_KEY_CHARS.contains(c) || c.is_control())
    {
        return Err(ExpensifyError::invalid_input(format!(
            "Key {:?} contains forbidden character {:?}",
            key, c
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_expenses_path_is_scoped_by_uid() {
        let path = StorePath::user_expenses(&UserId::new("u1"));
        assert_eq!(path.as_str(), "users/u1/expenses");
    }

    #[test]
    fn expense_path_appends_id() {
        let path = StorePath::expense(&UserId::new("u1"), &ExpenseId::new("-Abc123")).unwrap();
        assert_eq!(path.as_str(), "users/u1/expenses/-Abc123");
        assert_eq!(path.key(), "-Abc123");
    }

    #[test]
    fn expense_path_rejects_slash_in_id() {
        let result = StorePath::expense(&UserId::new("u1"), &ExpenseId::new("a/b"));
        assert!(matches!(result, Err(ExpensifyError::InvalidInput(_))));
    }

    #[test]
    fn validate_key_rejects_forbidden_characters() {
        for key in ["", "a.b", "a$", "#", "[x]", "a/b", "tab\t"] {
            assert!(validate_key(key).is_err(), "{:?} should be rejected", key);
        }
        assert!(validate_key("-NxYz_09").is_ok());
    }

    #[test]
    fn parse_trims_slashes_and_validates() {
        let path = StorePath::parse("/users/u1/expenses/").unwrap();
        assert_eq!(path.as_str(), "users/u1/expenses");
        assert_eq!(path.segments().count(), 3);
        assert!(StorePath::parse("users//x").is_err());
        assert!(StorePath::parse("/").is_err());
    }
}
