use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TrackerError};

/// Direction of money flow for a single transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// A single income or expense record.
///
/// The identifier is assigned by the remote service; records built locally
/// carry `None` until the service confirms them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        category: impl Into<String>,
        amount: f64,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            kind,
            category: category.into(),
            amount,
            date,
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Checks the fields required before the record may be persisted.
    pub fn validate(&self) -> Result<()> {
        if self.category.trim().is_empty() {
            return Err(TrackerError::InvalidInput(
                "transaction category is required".into(),
            ));
        }
        if self.amount < 0.0 {
            return Err(TrackerError::InvalidInput(
                "transaction amount must not be negative".into(),
            ));
        }
        Ok(())
    }
}

/// Criteria for narrowing a transaction listing. Empty criteria match
/// everything; date bounds are inclusive.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(kind) = self.kind {
            if txn.kind != kind {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &txn.category != category {
                return false;
            }
        }
        if let Some(from) = self.from {
            if txn.date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if txn.date > to {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn groceries() -> Transaction {
        Transaction::new(TransactionKind::Expense, "Food", 250.0, date(2024, 3, 12))
    }

    #[test]
    fn validate_rejects_blank_category() {
        let txn = Transaction::new(TransactionKind::Expense, "  ", 10.0, date(2024, 1, 1));
        let err = txn.validate().expect_err("blank category must fail");
        assert!(
            matches!(err, TrackerError::InvalidInput(ref message) if message.contains("category")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn validate_rejects_negative_amount() {
        let txn = Transaction::new(TransactionKind::Income, "Salary", -1.0, date(2024, 1, 1));
        assert!(txn.validate().is_err());
    }

    #[test]
    fn validate_accepts_zero_amount() {
        let txn = Transaction::new(TransactionKind::Expense, "Food", 0.0, date(2024, 1, 1));
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let mut txn = groceries();
        txn.id = Some("abc123".into());
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["_id"], "abc123");
        assert_eq!(json["type"], "expense");
        assert_eq!(json["date"], "2024-03-12");
    }

    #[test]
    fn draft_omits_unassigned_id() {
        let json = serde_json::to_value(groceries()).unwrap();
        assert!(json.get("_id").is_none());
    }

    #[test]
    fn filter_matches_kind_category_and_range() {
        let txn = groceries();
        let filter = TransactionFilter {
            kind: Some(TransactionKind::Expense),
            category: Some("Food".into()),
            from: Some(date(2024, 3, 1)),
            to: Some(date(2024, 3, 31)),
        };
        assert!(filter.matches(&txn));

        let other_kind = TransactionFilter {
            kind: Some(TransactionKind::Income),
            ..Default::default()
        };
        assert!(!other_kind.matches(&txn));

        let out_of_range = TransactionFilter {
            to: Some(date(2024, 3, 11)),
            ..Default::default()
        };
        assert!(!out_of_range.matches(&txn));
    }

    #[test]
    fn default_filter_matches_everything() {
        assert!(TransactionFilter::default().matches(&groceries()));
    }
}
