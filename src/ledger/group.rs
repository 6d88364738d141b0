use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TrackerError};

use super::balance::{compute_balances, MemberBalance};

/// How an expense is divided among group members.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SplitPolicy {
    #[default]
    Equal,
}

/// A shared cost paid by one member on behalf of the whole group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub description: String,
    pub amount: f64,
    pub payer: String,
    #[serde(default)]
    pub split: SplitPolicy,
    pub date: NaiveDate,
}

impl Expense {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        payer: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            payer: payer.into(),
            split: SplitPolicy::Equal,
            date,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(TrackerError::InvalidInput(
                "expense description is required".into(),
            ));
        }
        if self.payer.trim().is_empty() {
            return Err(TrackerError::InvalidInput("expense payer is required".into()));
        }
        if self.amount <= 0.0 {
            return Err(TrackerError::InvalidInput(
                "expense amount must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// A direct repayment between two members, reducing the payer's debt and the
/// receiver's credit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settlement {
    pub from: String,
    pub to: String,
    pub amount: f64,
}

impl Settlement {
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.from.trim().is_empty() || self.to.trim().is_empty() {
            return Err(TrackerError::InvalidInput(
                "settlement requires both parties".into(),
            ));
        }
        if self.amount <= 0.0 {
            return Err(TrackerError::InvalidInput(
                "settlement amount must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// A shared-expense group. Members are identified by their literal name
/// string; renaming a member breaks historical expense and settlement
/// references, which is an accepted limitation of the data model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Group {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub members: Vec<String>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub settlements: Vec<Settlement>,
}

impl Group {
    pub fn new(name: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            members,
            expenses: Vec::new(),
            settlements: Vec::new(),
        }
    }

    /// Checks the fields required before the record may be persisted.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TrackerError::InvalidInput("group name is required".into()));
        }
        if self.members.is_empty() {
            return Err(TrackerError::InvalidInput(
                "group needs at least one member".into(),
            ));
        }
        if self.members.iter().any(|m| m.trim().is_empty()) {
            return Err(TrackerError::InvalidInput(
                "member names must not be blank".into(),
            ));
        }
        Ok(())
    }

    /// Net position of every member after all expenses and settlements.
    pub fn balances(&self) -> Result<Vec<MemberBalance>> {
        compute_balances(&self.members, &self.expenses, &self.settlements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trio() -> Group {
        Group::new(
            "Trip",
            vec!["Asha".into(), "Ben".into(), "Chitra".into()],
        )
    }

    #[test]
    fn validate_requires_name_and_members() {
        assert!(Group::new("", vec!["Asha".into()]).validate().is_err());
        assert!(Group::new("Trip", vec![]).validate().is_err());
        assert!(Group::new("Trip", vec!["Asha".into(), " ".into()])
            .validate()
            .is_err());
        assert!(trio().validate().is_ok());
    }

    #[test]
    fn expense_validate_checks_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert!(Expense::new("", 30.0, "Asha", date).validate().is_err());
        assert!(Expense::new("Dinner", 0.0, "Asha", date).validate().is_err());
        assert!(Expense::new("Dinner", 30.0, "", date).validate().is_err());
        assert!(Expense::new("Dinner", 30.0, "Asha", date).validate().is_ok());
    }

    #[test]
    fn settlement_validate_checks_fields() {
        assert!(Settlement::new("Ben", "", 10.0).validate().is_err());
        assert!(Settlement::new("Ben", "Asha", -5.0).validate().is_err());
        assert!(Settlement::new("Ben", "Asha", 10.0).validate().is_ok());
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let mut group = trio();
        group.id = Some("g1".into());
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        group.expenses.push(Expense::new("Dinner", 90.0, "Asha", date));
        group.settlements.push(Settlement::new("Ben", "Asha", 30.0));

        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(json["_id"], "g1");
        assert_eq!(json["expenses"][0]["split"], "equal");
        assert_eq!(json["settlements"][0]["from"], "Ben");
    }

    #[test]
    fn deserializes_missing_lists_as_empty() {
        let group: Group =
            serde_json::from_str(r#"{"name":"Trip","members":["Asha"]}"#).unwrap();
        assert!(group.expenses.is_empty());
        assert!(group.settlements.is_empty());
    }
}
