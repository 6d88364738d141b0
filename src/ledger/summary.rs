//! Pure aggregation over transaction and budget lists.
//!
//! Everything here is a deterministic function of its inputs; callers
//! recompute on demand whenever the cached lists change.

use super::budget::Budget;
use super::transaction::{Transaction, TransactionKind};

/// Categories offered before any transaction exists.
pub const STOCK_CATEGORIES: [&str; 4] = ["Salary", "Food", "Transport", "Entertainment"];

const TREND_LABEL_FORMAT: &str = "%m-%d";

/// Summed amount for one category, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Overall income, expense, and what is left of the former.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub savings: f64,
}

/// One chart point per transaction; `net` is positive for spending and
/// negative for income.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub label: String,
    pub net: f64,
}

/// Spend measured against one budget's limit.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub budget: Budget,
    pub spent: f64,
    /// Filled share of the limit, clamped to 0..=100.
    pub percentage: u8,
    pub over_limit: bool,
}

/// Sums amounts per category over transactions of the given kind. The
/// category set is derived from the data; categories appear in the order
/// they are first seen.
pub fn category_totals(transactions: &[Transaction], kind: TransactionKind) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for txn in transactions.iter().filter(|t| t.kind == kind) {
        match totals.iter_mut().find(|c| c.category == txn.category) {
            Some(existing) => existing.total += txn.amount,
            None => totals.push(CategoryTotal {
                category: txn.category.clone(),
                total: txn.amount,
            }),
        }
    }
    totals
}

/// Overall totals; `savings` may be negative.
pub fn income_expense_totals(transactions: &[Transaction]) -> Totals {
    let mut totals = Totals::default();
    for txn in transactions {
        match txn.kind {
            TransactionKind::Income => totals.income += txn.amount,
            TransactionKind::Expense => totals.expense += txn.amount,
        }
    }
    totals.savings = totals.income - totals.expense;
    totals
}

/// Chronological net-flow series with one point per transaction.
///
/// Transactions are stable-sorted by date, so same-day records keep their
/// original relative order and yield separate points with the same label.
pub fn trend_series(transactions: &[Transaction]) -> Vec<TrendPoint> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|txn| txn.date);
    sorted
        .into_iter()
        .map(|txn| TrendPoint {
            label: txn.date.format(TREND_LABEL_FORMAT).to_string(),
            net: match txn.kind {
                TransactionKind::Expense => txn.amount,
                TransactionKind::Income => -txn.amount,
            },
        })
        .collect()
}

/// Measures expense totals against every budget's limit. A zero limit never
/// divides: the percentage denominator is floored at one.
pub fn budget_utilization(budgets: &[Budget], transactions: &[Transaction]) -> Vec<BudgetStatus> {
    let spend = category_totals(transactions, TransactionKind::Expense);
    budgets
        .iter()
        .map(|budget| {
            let spent = spend
                .iter()
                .find(|c| c.category == budget.category)
                .map(|c| c.total)
                .unwrap_or(0.0);
            let percentage = ((spent / budget.limit.max(1.0)) * 100.0).round().min(100.0) as u8;
            BudgetStatus {
                budget: budget.clone(),
                spent,
                percentage,
                over_limit: spent > budget.limit,
            }
        })
        .collect()
}

/// Stock category labels followed by every category seen in the data,
/// deduplicated, order preserved.
pub fn known_categories(transactions: &[Transaction]) -> Vec<String> {
    let mut categories: Vec<String> = STOCK_CATEGORIES.iter().map(|c| c.to_string()).collect();
    for txn in transactions {
        if !categories.iter().any(|c| c == &txn.category) {
            categories.push(txn.category.clone());
        }
    }
    categories
}
