/// Authenticated session scope
use crate::error::{ExpensifyError, Result};
use crate::path::{validate_key, StorePath};
use crate::types::UserId;

/// The identity every sync operation runs under
///
/// Passed explicitly into each operation. The operation reads the user id
/// once when it starts, so replacing the session later does not redirect an
/// operation that is already in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    user_id: UserId,
}

impl SessionContext {
    /// Create a session for `uid`
    ///
    /// The uid becomes a path segment, so it must be a valid store key.
    pub fn new(uid: impl Into<String>) -> Result<Self> {
        let uid = uid.into();
        validate_key(&uid)
            .map_err(|_| ExpensifyError::invalid_input(format!("Invalid session uid {:?}", uid)))?;
        Ok(Self {
            user_id: UserId::new(uid),
        })
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Root of this user's expense partition
    pub fn expenses_path(&self) -> StorePath {
        StorePath::user_expenses(&self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_exposes_uid_and_partition() {
        let session = SessionContext::new("abc").unwrap();
        assert_eq!(session.user_id().as_str(), "abc");
        assert_eq!(session.expenses_path().as_str(), "users/abc/expenses");
    }

    #[test]
    fn session_rejects_empty_uid() {
        assert!(SessionContext::new("").is_err());
    }

    #[test]
    fn session_rejects_uid_that_would_escape_partition() {
        assert!(SessionContext::new("other/expenses").is_err());
        assert!(SessionContext::new("a.b").is_err());
    }
}
