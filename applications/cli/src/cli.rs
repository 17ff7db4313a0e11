//! Command-line arguments

use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use expensify_core::{ExpenseUpdate, NewExpense};
use expensify_state::{ExpenseFilters, SortBy};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "expensify")]
#[command(version, about = "Track expenses kept in a realtime database", long_about = None)]
pub struct Cli {
    /// Configuration file path (defaults to ./expensify.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// List expenses, newest first by default
    List(ListArgs),
    /// Record a new expense
    Add(ExpenseArgs),
    /// Change fields of an existing expense
    Edit {
        /// Expense id (push keys start with '-')
        #[arg(allow_hyphen_values = true)]
        id: String,
        #[command(flatten)]
        fields: ExpenseArgs,
    },
    /// Delete an expense
    Remove {
        /// Expense id (push keys start with '-')
        #[arg(allow_hyphen_values = true)]
        id: String,
    },
    /// Show the number of expenses and their total
    Summary(ListArgs),
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ListArgs {
    /// Only expenses whose description contains this text
    #[arg(short, long, default_value = "")]
    pub text: String,

    /// Sort order: date or amount
    #[arg(short, long, default_value = "date")]
    pub sort: SortBy,

    /// First day to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

impl ListArgs {
    pub fn filters(&self) -> ExpenseFilters {
        ExpenseFilters::new()
            .text(self.text.clone())
            .sort_by(self.sort)
            .between_days(self.from, self.to)
    }
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ExpenseArgs {
    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(short, long)]
    pub note: Option<String>,

    /// Amount in dollars, e.g. 12.50
    #[arg(short, long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub amount: Option<i64>,

    /// Day the expense happened (YYYY-MM-DD)
    #[arg(long)]
    pub created_at: Option<NaiveDate>,
}

impl ExpenseArgs {
    /// Form input for a new expense; the date defaults to now
    pub fn new_expense(&self) -> NewExpense {
        NewExpense {
            description: self.description.clone(),
            note: self.note.clone(),
            amount: self.amount,
            created_at: Some(
                self.created_at
                    .and_then(day_millis)
                    .unwrap_or_else(|| Utc::now().timestamp_millis()),
            ),
        }
    }

    pub fn update(&self) -> ExpenseUpdate {
        ExpenseUpdate {
            description: self.description.clone(),
            note: self.note.clone(),
            amount: self.amount,
            created_at: self.created_at.and_then(day_millis),
        }
    }
}

fn day_millis(day: NaiveDate) -> Option<i64> {
    day.and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc().timestamp_millis())
}

/// Parse a dollar amount with at most two decimals into cents
pub fn parse_amount(input: &str) -> Result<i64, String> {
    let trimmed = input.trim().trim_start_matches('$');
    let invalid = || format!("Invalid amount {:?} (expected e.g. 12.50)", input);

    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if fraction.len() > 2
        || !whole.bytes().all(|b| b.is_ascii_digit())
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    let fraction: i64 = format!("{:0<2}", fraction).parse().map_err(|_| invalid())?;

    let cents = whole
        .checked_mul(100)
        .and_then(|c| c.checked_add(fraction))
        .ok_or_else(invalid)?;
    Ok(if negative { -cents } else { cents })
}
