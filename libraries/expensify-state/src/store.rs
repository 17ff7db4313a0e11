use crate::state::ExpenseState;
use expensify_core::ExpenseEvent;
use std::sync::Arc;
use tokio::sync::{mpsc, watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Shared expense state kept current by a background task
///
/// The task drains the event receiver handed to [`StateStore::spawn`] and
/// bumps a revision counter after every applied event. It finishes once every
/// publisher has been dropped.
#[derive(Clone)]
pub struct StateStore {
    state: Arc<RwLock<ExpenseState>>,
    revision: watch::Receiver<u64>,
}

impl StateStore {
    /// Start folding events from `events` into a fresh state
    pub fn spawn(events: mpsc::UnboundedReceiver<ExpenseEvent>) -> (Self, JoinHandle<()>) {
        Self::spawn_with(ExpenseState::new(), events)
    }

    /// Start from an existing state
    pub fn spawn_with(
        initial: ExpenseState,
        mut events: mpsc::UnboundedReceiver<ExpenseEvent>,
    ) -> (Self, JoinHandle<()>) {
        let state = Arc::new(RwLock::new(initial));
        let (revision_tx, revision) = watch::channel(0u64);

        let task_state = Arc::clone(&state);
        let handle = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let len = {
                    let mut state = task_state.write().await;
                    state.apply(&event);
                    state.len()
                };
                revision_tx.send_modify(|rev| *rev += 1);
                debug!(event = event.kind(), expenses = len, "Applied expense event");
            }
            info!("Expense event stream closed");
        });

        (Self { state, revision }, handle)
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> ExpenseState {
        self.state.read().await.clone()
    }

    /// Number of events applied so far
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Receiver that changes after every applied event
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.revision.clone()
    }

    /// Wait until at least `revision` events have been applied
    ///
    /// Returns `false` if the event stream closed first.
    pub async fn wait_for(&self, revision: u64) -> bool {
        self.changes()
            .wait_for(|rev| *rev >= revision)
            .await
            .is_ok()
    }
}
