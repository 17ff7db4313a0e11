//! Runs one command against the remote store

use crate::cli::{Commands, ExpenseArgs, ListArgs};
use crate::error::{CliError, Result};
use expensify_core::{Expense, ExpenseId, RemoteStore, RemoveExpense, SessionContext};
use expensify_state::{
    format_amount, format_date, visible_expenses, ExpenseState, ExpenseSummary, StateStore,
};
use expensify_sync::ExpenseSync;
use std::fmt::Write;
use std::sync::Arc;
use tracing::{debug, info};

/// Sync layer plus the state it feeds, for one signed-in user
pub struct App {
    sync: ExpenseSync,
    state: StateStore,
    session: SessionContext,
    published: u64,
}

impl App {
    /// Connect to `store` and load the user's expenses
    ///
    /// A failed initial load is returned as an error; nothing else can run
    /// without it.
    pub async fn start(store: Arc<dyn RemoteStore>, session: SessionContext) -> Result<Self> {
        let (sync, events) = ExpenseSync::new(store);
        let (state, _handle) = StateStore::spawn(events);

        let mut app = Self {
            sync,
            state,
            session,
            published: 0,
        };

        let loaded = app.sync.start_set_expenses(&app.session).await?;
        app.confirmed().await?;
        info!(user = %app.session.user_id(), count = loaded.len(), "Expenses loaded");

        Ok(app)
    }

    /// Run `command` and return what should be printed
    pub async fn run(&mut self, command: Commands) -> Result<String> {
        match command {
            Commands::List(args) => self.list(&args).await,
            Commands::Add(fields) => self.add(&fields).await,
            Commands::Edit { id, fields } => self.edit(id, &fields).await,
            Commands::Remove { id } => self.remove(id).await,
            Commands::Summary(args) => self.summary(&args).await,
        }
    }

    /// Current local view of the user's expenses
    pub async fn snapshot(&self) -> ExpenseState {
        self.state.snapshot().await
    }

    async fn list(&self, args: &ListArgs) -> Result<String> {
        let state = self.snapshot().await;
        let visible = visible_expenses(state.expenses(), &args.filters());

        let mut out = String::new();
        if visible.is_empty() {
            out.push_str("No expenses\n");
        }
        for expense in &visible {
            let _ = writeln!(out, "{}", render(expense));
        }
        let _ = write!(out, "{}", ExpenseSummary::of(&visible));
        Ok(out)
    }

    async fn summary(&self, args: &ListArgs) -> Result<String> {
        let state = self.snapshot().await;
        let visible = visible_expenses(state.expenses(), &args.filters());
        Ok(ExpenseSummary::of(&visible).to_string())
    }

    async fn add(&mut self, fields: &ExpenseArgs) -> Result<String> {
        let created = self
            .sync
            .start_add_expense(&self.session, fields.new_expense())
            .await?;
        self.confirmed().await?;

        Ok(format!("Added {}", render(&created)))
    }

    async fn edit(&mut self, id: String, fields: &ExpenseArgs) -> Result<String> {
        let id = ExpenseId::new(id);
        let updates = fields.update();
        if updates.is_empty() {
            return Err(CliError::InvalidInput(
                "Nothing to change (pass --description, --note, --amount or --created-at)".into(),
            ));
        }
        if self.snapshot().await.get(&id).is_none() {
            return Err(CliError::InvalidInput(format!("No expense with id {}", id)));
        }

        self.sync
            .start_edit_expense(&self.session, id.clone(), updates)
            .await?;
        self.confirmed().await?;

        let state = self.snapshot().await;
        Ok(match state.get(&id) {
            Some(expense) => format!("Updated {}", render(expense)),
            None => format!("Updated {}", id),
        })
    }

    async fn remove(&mut self, id: String) -> Result<String> {
        let removed = self
            .sync
            .start_remove_expense(&self.session, RemoveExpense::new(id))
            .await?;

        match removed {
            Some(id) => {
                self.confirmed().await?;
                Ok(format!("Removed {}", id))
            }
            None => Ok("Nothing removed".to_string()),
        }
    }

    /// Wait for the state store to apply the event the last operation published
    async fn confirmed(&mut self) -> Result<()> {
        self.published += 1;
        debug!(revision = self.published, "Waiting for state to catch up");
        if self.state.wait_for(self.published).await {
            Ok(())
        } else {
            Err(CliError::StateClosed)
        }
    }
}

fn render(expense: &Expense) -> String {
    let mut line = format!(
        "{}  {}  {:>12}  {}",
        expense.id,
        format_date(expense.created_at),
        format_amount(expense.amount),
        expense.description
    );
    if !expense.note.is_empty() {
        let _ = write!(line, " ({})", expense.note);
    }
    line
}
