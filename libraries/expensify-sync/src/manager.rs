use crate::error::{Result, SyncError, SyncOperation};
use crate::events::{EventPublisher, EventReceiver};
use expensify_core::{
    Expense, ExpenseData, ExpenseEvent, ExpenseId, ExpenseUpdate, NewExpense, RemoteStore,
    RemoveExpense, SessionContext, StorePath,
};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Coordinates remote expense mutations with local change events
///
/// Every operation follows the same lifecycle: it is *pending* while the
/// remote call is in flight, then either *succeeds* (the event is published
/// and the future resolves `Ok`) or *fails* (nothing is published and the
/// future resolves `Err`). Operations do not retry, time out, or coordinate
/// with each other; any number may run concurrently on clones of the same
/// `ExpenseSync`.
#[derive(Clone)]
pub struct ExpenseSync {
    store: Arc<dyn RemoteStore>,
    events: EventPublisher,
}

impl ExpenseSync {
    /// Create a sync handle and the receiver its events are published on
    pub fn new(store: Arc<dyn RemoteStore>) -> (Self, EventReceiver) {
        let (events, rx) = EventPublisher::channel();
        (Self { store, events }, rx)
    }

    /// Create a new expense from raw form input
    ///
    /// Missing fields are defaulted, the record is pushed under the user's
    /// expense collection, and the store-generated key becomes its id.
    pub async fn start_add_expense(
        &self,
        session: &SessionContext,
        expense: NewExpense,
    ) -> Result<Expense> {
        let uid = session.user_id().clone();
        let path = StorePath::user_expenses(&uid);

        let data = expense.into_data();
        let value = serde_json::to_value(&data)
            .map_err(|e| SyncError::write(SyncOperation::Create, e))?;

        debug!(path = %path, "Creating expense");
        let key = self.store.push(&path, value).await.map_err(|e| {
            error!(user = %uid, error = %e, "Failed to create expense");
            SyncError::write(SyncOperation::Create, e)
        })?;

        let expense = Expense::from_data(ExpenseId::new(key), data);
        info!(user = %uid, id = %expense.id, "Expense created");

        self.events.publish(ExpenseEvent::added(expense.clone()));
        Ok(expense)
    }

    /// Apply a partial update to an existing expense
    ///
    /// Only the fields present in `updates` are sent, and the published event
    /// carries `id` and `updates` exactly as given.
    pub async fn start_edit_expense(
        &self,
        session: &SessionContext,
        id: ExpenseId,
        updates: ExpenseUpdate,
    ) -> Result<()> {
        let uid = session.user_id().clone();
        let path = StorePath::expense(&uid, &id)
            .map_err(|e| SyncError::write(SyncOperation::Update, e))?;
        let fields = updates
            .to_map()
            .map_err(|e| SyncError::write(SyncOperation::Update, e))?;

        debug!(path = %path, fields = fields.len(), "Updating expense");
        self.store.update(&path, fields).await.map_err(|e| {
            error!(user = %uid, id = %id, error = %e, "Failed to update expense");
            SyncError::write(SyncOperation::Update, e)
        })?;

        info!(user = %uid, id = %id, "Expense updated");
        self.events.publish(ExpenseEvent::edited(id, updates));
        Ok(())
    }

    /// Delete an expense
    ///
    /// Without an id nothing is sent and nothing is published; the result is
    /// `Ok(None)`. Otherwise resolves with the removed id.
    pub async fn start_remove_expense(
        &self,
        session: &SessionContext,
        input: RemoveExpense,
    ) -> Result<Option<ExpenseId>> {
        let Some(id) = input.id else {
            debug!("Remove requested without an expense id, nothing to do");
            return Ok(None);
        };

        let uid = session.user_id().clone();
        let path = StorePath::expense(&uid, &id)
            .map_err(|e| SyncError::write(SyncOperation::Delete, e))?;

        debug!(path = %path, "Removing expense");
        self.store.remove(&path).await.map_err(|e| {
            error!(user = %uid, id = %id, error = %e, "Failed to remove expense");
            SyncError::write(SyncOperation::Delete, e)
        })?;

        info!(user = %uid, id = %id, "Expense removed");
        self.events.publish(ExpenseEvent::removed(id.clone()));
        Ok(Some(id))
    }

    /// Load the user's whole expense collection
    ///
    /// Records keep the order the store yields them in. A missing collection
    /// loads as empty. Any unreadable record fails the whole load.
    pub async fn start_set_expenses(&self, session: &SessionContext) -> Result<Vec<Expense>> {
        let uid = session.user_id().clone();
        let path = StorePath::user_expenses(&uid);

        debug!(path = %path, "Loading expenses");
        let snapshot = self.store.once(&path).await.map_err(|e| {
            error!(user = %uid, error = %e, "Failed to load expenses");
            SyncError::read(e)
        })?;

        let mut expenses = Vec::with_capacity(snapshot.num_children());
        for child in snapshot.children() {
            let id = ExpenseId::new(child.key().unwrap_or_default());
            let data: ExpenseData = child.deserialize().map_err(|e| {
                error!(user = %uid, id = %id, error = %e, "Stored expense is malformed");
                SyncError::read(e)
            })?;
            expenses.push(Expense::from_data(id, data));
        }

        info!(user = %uid, count = expenses.len(), "Expenses loaded");
        self.events.publish(ExpenseEvent::set(expenses.clone()));
        Ok(expenses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expensify_core::{RemoteStore, UserId};
    use expensify_remote::MemoryRemoteStore;
    use serde_json::json;

    fn setup() -> (ExpenseSync, EventReceiver, MemoryRemoteStore, SessionContext) {
        let store = MemoryRemoteStore::new();
        let (sync, rx) = ExpenseSync::new(Arc::new(store.clone()));
        let session = SessionContext::new("u1").unwrap();
        (sync, rx, store, session)
    }

    #[tokio::test]
    async fn test_add_publishes_record_with_generated_id() {
        let (sync, mut rx, store, session) = setup();

        let created = sync
            .start_add_expense(&session, NewExpense::new().description("Coffee").amount(300))
            .await
            .unwrap();

        assert_eq!(rx.try_recv().unwrap(), ExpenseEvent::added(created.clone()));
        assert_eq!(created.note, "");
        assert_eq!(created.created_at, 0);

        let stored = store.once(&session.expenses_path()).await.unwrap();
        assert_eq!(
            stored.val()[created.id.as_str()],
            json!({ "description": "Coffee", "note": "", "amount": 300, "createdAt": 0 })
        );
    }

    #[tokio::test]
    async fn test_edit_publishes_supplied_updates() {
        let (sync, mut rx, store, session) = setup();
        let created = sync
            .start_add_expense(&session, NewExpense::new().amount(300))
            .await
            .unwrap();
        rx.try_recv().unwrap();

        let updates = ExpenseUpdate::new().amount(350);
        sync.start_edit_expense(&session, created.id.clone(), updates.clone())
            .await
            .unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            ExpenseEvent::edited(created.id.clone(), updates)
        );

        let stored = store
            .once(&StorePath::expense(session.user_id(), &created.id).unwrap())
            .await
            .unwrap();
        assert_eq!(stored.val()["amount"], 350);
    }

    #[tokio::test]
    async fn test_edit_with_invalid_id_fails_without_event() {
        let (sync, mut rx, _store, session) = setup();

        let err = sync
            .start_edit_expense(&session, ExpenseId::new("a/b"), ExpenseUpdate::new().amount(1))
            .await
            .unwrap_err();

        assert!(err.is_write());
        assert_eq!(err.operation(), SyncOperation::Update);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_remove_without_id_is_noop() {
        let (sync, mut rx, store, session) = setup();
        store.set_offline(true).await;

        let removed = sync
            .start_remove_expense(&session, RemoveExpense::default())
            .await
            .unwrap();

        assert!(removed.is_none());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_remove_publishes_id() {
        let (sync, mut rx, store, session) = setup();
        let created = sync
            .start_add_expense(&session, NewExpense::new())
            .await
            .unwrap();
        rx.try_recv().unwrap();

        let removed = sync
            .start_remove_expense(&session, RemoveExpense::new(created.id.clone()))
            .await
            .unwrap();

        assert_eq!(removed, Some(created.id.clone()));
        assert_eq!(rx.try_recv().unwrap(), ExpenseEvent::removed(created.id));
        assert!(!store.once(&session.expenses_path()).await.unwrap().exists());
    }

    #[tokio::test]
    async fn test_set_expenses_on_empty_partition() {
        let (sync, mut rx, _store, session) = setup();

        let loaded = sync.start_set_expenses(&session).await.unwrap();

        assert!(loaded.is_empty());
        assert_eq!(rx.try_recv().unwrap(), ExpenseEvent::set(Vec::new()));
    }

    #[tokio::test]
    async fn test_set_expenses_fills_missing_fields() {
        let (sync, mut rx, store, session) = setup();
        store
            .set(
                &session.expenses_path(),
                json!({ "-a": { "description": "Gum" } }),
            )
            .await;

        let loaded = sync.start_set_expenses(&session).await.unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, ExpenseId::new("-a"));
        assert_eq!(loaded[0].description, "Gum");
        assert_eq!(loaded[0].amount, 0);
        assert_eq!(rx.try_recv().unwrap(), ExpenseEvent::set(loaded));
    }

    #[tokio::test]
    async fn test_set_expenses_rejects_malformed_record() {
        let (sync, mut rx, store, session) = setup();
        store
            .set(&session.expenses_path(), json!({ "-a": "not an expense" }))
            .await;

        let err = sync.start_set_expenses(&session).await.unwrap_err();

        assert!(err.is_read());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_set_expenses_rejects_fractional_amount() {
        let (sync, mut rx, store, session) = setup();
        store
            .set(
                &session.expenses_path(),
                json!({
                    "-a": { "description": "Gum", "amount": 195 },
                    "-b": { "description": "Tea", "amount": 28.999999999999996 }
                }),
            )
            .await;

        let err = sync.start_set_expenses(&session).await.unwrap_err();

        assert!(err.is_read());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_operations_stay_in_session_partition() {
        let (sync, _rx, store, session) = setup();
        let other = SessionContext::new("u2").unwrap();

        sync.start_add_expense(&session, NewExpense::new().amount(1))
            .await
            .unwrap();
        sync.start_add_expense(&other, NewExpense::new().amount(2))
            .await
            .unwrap();

        let mine = sync.start_set_expenses(&session).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].amount, 1);

        let tree = store.dump().await;
        let users: Vec<&String> = tree["users"].as_object().unwrap().keys().collect();
        assert_eq!(users, vec!["u1", "u2"]);
        assert!(tree["users"]["u1"].get("expenses").is_some());
    }

    #[tokio::test]
    async fn test_publisher_without_subscriber_still_resolves() {
        let store = MemoryRemoteStore::new();
        let (sync, rx) = ExpenseSync::new(Arc::new(store));
        drop(rx);
        let session = SessionContext::new(UserId::generate().as_str()).unwrap();

        assert!(sync
            .start_add_expense(&session, NewExpense::new())
            .await
            .is_ok());
    }
}
