use crate::{
    data::{Error, Expense},
    read::ExpenseUser,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Spending per category plus the overall total, computed from the full set of
/// expenses. Categories are kept sorted so the report comes out in the same
/// order every time.
///
/// Only the per-category totals end up in the report file; see
/// `AnalysisSerializer`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "AnalysisSerializer")]
pub(crate) struct Analysis {
    pub totals: BTreeMap<String, Decimal>,
    pub grand_total: Decimal,
}

impl Analysis {
    pub fn of(expenses: &[Expense]) -> Result<Self, Error> {
        let mut analysis = Self::default();
        for expense in expenses {
            analysis.add(expense)?;
        }
        Ok(analysis)
    }

    /// Folds one more expense in. Nothing is changed if either sum would
    /// overflow.
    fn add(&mut self, expense: &Expense) -> Result<(), Error> {
        let overflow = || Error::Overflow(expense.category.clone());
        let grand_total = self
            .grand_total
            .checked_add(expense.amount)
            .ok_or_else(overflow)?;
        let total = self
            .totals
            .get(&expense.category)
            .copied()
            .unwrap_or_default()
            .checked_add(expense.amount)
            .ok_or_else(overflow)?;
        self.totals.insert(expense.category.clone(), total);
        self.grand_total = grand_total;
        Ok(())
    }
}

impl ExpenseUser for Analysis {
    fn use_expense(&mut self, expense: Expense) -> Result<(), Error> {
        self.add(&expense)
    }
}

/// Proxy for serializing `Analysis`: a flat `category -> number` object. The
/// decimals go out as exact JSON numbers rather than strings.
#[derive(Serialize)]
#[serde(transparent)]
pub(crate) struct AnalysisSerializer(BTreeMap<String, ReportTotal>);

#[derive(Serialize)]
pub(crate) struct ReportTotal(
    #[serde(with = "rust_decimal::serde::arbitrary_precision")] Decimal,
);

impl From<Analysis> for AnalysisSerializer {
    fn from(analysis: Analysis) -> Self {
        Self(
            analysis
                .totals
                .into_iter()
                .map(|(category, total)| (category, ReportTotal(total)))
                .collect(),
        )
    }
}

/// The single biggest expense. Ties go to the one seen first.
pub(crate) fn top_expense(expenses: &[Expense]) -> Option<&Expense> {
    expenses.iter().fold(None, |top, expense| match top {
        Some(top) if top.amount >= expense.amount => Some(top),
        _ => Some(expense),
    })
}
