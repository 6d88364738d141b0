use serde::{Deserialize, Serialize};

use crate::errors::{Result, TrackerError};

/// A monthly spending limit for one category.
///
/// Budgets relate to transactions only by category string; a budget whose
/// category matches no expense simply shows zero spend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub category: String,
    pub limit: f64,
    /// Format: "YYYY-MM"
    pub month: String,
}

impl Budget {
    pub fn new(category: impl Into<String>, limit: f64, month: impl Into<String>) -> Self {
        Self {
            id: None,
            category: category.into(),
            limit,
            month: month.into(),
        }
    }

    /// Checks the fields required before the record may be persisted.
    pub fn validate(&self) -> Result<()> {
        if self.category.trim().is_empty() {
            return Err(TrackerError::InvalidInput(
                "budget category is required".into(),
            ));
        }
        if self.month.trim().is_empty() {
            return Err(TrackerError::InvalidInput("budget month is required".into()));
        }
        if self.limit < 0.0 {
            return Err(TrackerError::InvalidInput(
                "budget limit must not be negative".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_requires_category_and_month() {
        assert!(Budget::new("", 100.0, "2024-03").validate().is_err());
        assert!(Budget::new("Food", 100.0, " ").validate().is_err());
        assert!(Budget::new("Food", 100.0, "2024-03").validate().is_ok());
    }

    #[test]
    fn validate_allows_zero_limit() {
        assert!(Budget::new("Food", 0.0, "2024-03").validate().is_ok());
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let mut budget = Budget::new("Food", 500.0, "2024-03");
        budget.id = Some("b1".into());
        let json = serde_json::to_value(&budget).unwrap();
        assert_eq!(json["_id"], "b1");
        assert_eq!(json["limit"], 500.0);
        assert_eq!(json["month"], "2024-03");
    }
}
