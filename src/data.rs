use chrono::{Local, NaiveDate};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub type ExpenseId = u32;

/// Column names of the store, in the order they are written.
pub const HEADER: [&str; 4] = ["ID", "Amount", "Category", "Date"];

/// Range `Expense::new` draws identifiers from.
pub const ID_RANGE: std::ops::RangeInclusive<ExpenseId> = 1000..=9999;

/// One spending event, as stored in a row of the expense file.
///
/// The `id` is a random draw, not a key: two expenses may well share one and
/// nothing checks for it. Likewise `amount` may be negative or zero and
/// `category` may be empty; the model records what it's given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Expense {
    #[serde(rename = "ID")]
    pub id: ExpenseId,
    #[serde(rename = "Amount")]
    pub amount: Decimal,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
}

impl Expense {
    /// Builds a new expense; a missing `date` means today, as seen right now.
    pub fn new(amount: Decimal, category: impl Into<String>, date: Option<NaiveDate>) -> Self {
        Self {
            id: rand::thread_rng().gen_range(ID_RANGE),
            amount,
            category: category.into(),
            date: date.unwrap_or_else(|| Local::now().date_naive()),
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {}: {}",
            self.id, self.date, self.category, self.amount
        )
    }
}

/// Everything that can go wrong while storing, reading or reporting expenses.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Malformed expense on line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid amount {0:?}")]
    InvalidAmount(String),
    #[error("Totals overflow when adding a {0:?} expense")]
    Overflow(String),
}
