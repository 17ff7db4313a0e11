//! Filtering, sorting and totals over the expense list

use chrono::{DateTime, NaiveDate, Utc};
use expensify_core::{Expense, ExpensifyError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordering of the visible list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Newest first
    #[default]
    Date,
    /// Largest first
    Amount,
}

impl FromStr for SortBy {
    type Err = ExpensifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "date" => Ok(SortBy::Date),
            "amount" => Ok(SortBy::Amount),
            other => Err(ExpensifyError::invalid_input(format!(
                "Unknown sort order {:?} (expected date or amount)",
                other
            ))),
        }
    }
}

/// What the expense list is currently narrowed to
///
/// Dates are epoch milliseconds and both bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpenseFilters {
    pub text: String,
    pub sort_by: SortBy,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
}

impl ExpenseFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn start_date(mut self, start_date: i64) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn end_date(mut self, end_date: i64) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Restrict to the calendar days `from..=to` (UTC)
    pub fn between_days(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.start_date = from.and_then(start_of_day);
        self.end_date = to
            .and_then(|day| day.succ_opt())
            .and_then(start_of_day)
            .map(|next| next - 1);
        self
    }

    fn matches(&self, expense: &Expense) -> bool {
        let after_start = self.start_date.map_or(true, |start| expense.created_at >= start);
        let before_end = self.end_date.map_or(true, |end| expense.created_at <= end);
        let text_match = self.text.is_empty()
            || expense
                .description
                .to_lowercase()
                .contains(&self.text.to_lowercase());

        after_start && before_end && text_match
    }
}

fn start_of_day(day: NaiveDate) -> Option<i64> {
    day.and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc().timestamp_millis())
}

/// The expenses `filters` lets through, in display order
pub fn visible_expenses(expenses: &[Expense], filters: &ExpenseFilters) -> Vec<Expense> {
    let mut visible: Vec<Expense> = expenses
        .iter()
        .filter(|e| filters.matches(e))
        .cloned()
        .collect();

    match filters.sort_by {
        SortBy::Date => visible.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortBy::Amount => visible.sort_by(|a, b| b.amount.cmp(&a.amount)),
    }
    visible
}

/// Sum of amounts, in minor units
///
/// Widened to `i128` so any number of stored `i64` amounts sums exactly.
pub fn expenses_total(expenses: &[Expense]) -> i128 {
    expenses.iter().map(|e| i128::from(e.amount)).sum()
}

/// Count and total of a list of expenses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    pub count: usize,
    pub total: i128,
}

impl ExpenseSummary {
    pub fn of(expenses: &[Expense]) -> Self {
        Self {
            count: expenses.len(),
            total: expenses_total(expenses),
        }
    }
}

impl fmt::Display for ExpenseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.count == 1 { "expense" } else { "expenses" };
        write!(
            f,
            "Viewing {} {} totalling {}",
            self.count,
            noun,
            format_amount(self.total)
        )
    }
}

/// Render minor units as dollars with thousands separators, e.g. `$1,234.50`
pub fn format_amount(amount: impl Into<i128>) -> String {
    let amount = amount.into();
    let sign = if amount < 0 { "-" } else { "" };
    let cents = amount.unsigned_abs();
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// Render an epoch-millisecond timestamp as a calendar day
pub fn format_date(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| millis.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use expensify_core::ExpenseId;

    fn expense(id: &str, description: &str, amount: i64, created_at: i64) -> Expense {
        Expense {
            id: ExpenseId::new(id),
            description: description.into(),
            note: String::new(),
            amount,
            created_at,
        }
    }

    fn fixtures() -> Vec<Expense> {
        vec![
            expense("1", "Gum", 195, 0),
            expense("2", "Rent", 109500, -4 * 86_400_000),
            expense("3", "Credit Card", 4500, 4 * 86_400_000),
        ]
    }

    fn ids(expenses: &[Expense]) -> Vec<&str> {
        expenses.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_default_filters_sort_by_date_newest_first() {
        let visible = visible_expenses(&fixtures(), &ExpenseFilters::new());
        assert_eq!(ids(&visible), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_sort_by_amount_largest_first() {
        let filters = ExpenseFilters::new().sort_by(SortBy::Amount);
        let visible = visible_expenses(&fixtures(), &filters);
        assert_eq!(ids(&visible), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_text_filter_is_case_insensitive() {
        let filters = ExpenseFilters::new().text("e");
        let visible = visible_expenses(&fixtures(), &filters);
        assert_eq!(ids(&visible), vec!["3", "2"]);

        let filters = ExpenseFilters::new().text("GUM");
        assert_eq!(ids(&visible_expenses(&fixtures(), &filters)), vec!["1"]);
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let filters = ExpenseFilters::new().start_date(0).end_date(4 * 86_400_000);
        let visible = visible_expenses(&fixtures(), &filters);
        assert_eq!(ids(&visible), vec!["3", "1"]);

        let filters = ExpenseFilters::new().end_date(0);
        assert_eq!(ids(&visible_expenses(&fixtures(), &filters)), vec!["1", "2"]);
    }

    #[test]
    fn test_between_days_covers_whole_days() {
        let day = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let filters = ExpenseFilters::new().between_days(Some(day), Some(day));

        assert_eq!(filters.start_date, Some(0));
        assert_eq!(filters.end_date, Some(86_400_000 - 1));
    }

    #[test]
    fn test_sort_by_parses_names() {
        assert_eq!("date".parse::<SortBy>().unwrap(), SortBy::Date);
        assert_eq!("Amount".parse::<SortBy>().unwrap(), SortBy::Amount);
        assert!("size".parse::<SortBy>().is_err());
    }

    #[test]
    fn test_totals() {
        assert_eq!(expenses_total(&[]), 0);
        assert_eq!(expenses_total(&fixtures()), 195 + 109500 + 4500);

        let summary = ExpenseSummary::of(&fixtures()[..1]);
        assert_eq!(summary, ExpenseSummary { count: 1, total: 195 });
        assert_eq!(summary.to_string(), "Viewing 1 expense totalling $1.95");
    }

    #[test]
    fn test_total_past_i64_range_is_exact() {
        let expenses = vec![expense("a", "Big", i64::MAX, 0), expense("b", "Small", 1, 0)];

        let summary = ExpenseSummary::of(&expenses);

        assert_eq!(summary.total, i128::from(i64::MAX) + 1);
        assert_eq!(
            summary.to_string(),
            "Viewing 2 expenses totalling $92,233,720,368,547,758.08"
        );
        assert_eq!(format_amount(i64::MIN), "-$92,233,720,368,547,758.08");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0), "$0.00");
        assert_eq!(format_amount(5), "$0.05");
        assert_eq!(format_amount(109500), "$1,095.00");
        assert_eq!(format_amount(123456789), "$1,234,567.89");
        assert_eq!(format_amount(-250), "-$2.50");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(0), "1970-01-01");
        assert_eq!(format_date(4 * 86_400_000), "1970-01-05");
    }
}
