//! Cached application state backed by the persistence service.

use tracing::debug;

use crate::api::PersistenceBackend;
use crate::errors::{Result, TrackerError};
use crate::ledger::{
    balance, summary, Budget, BudgetStatus, CategoryTotal, Expense, Group, MemberBalance,
    Settlement, Totals, Transaction, TransactionFilter, TransactionKind, TrendPoint,
};

/// Client-side cache of every remote record plus the derived views over it.
///
/// Mutations validate first, then wait for the backend's confirmed record
/// before touching the cache; there are no optimistic updates, so a failed
/// call leaves the cache exactly as it was and the prior state stays usable.
pub struct AppStore {
    backend: Box<dyn PersistenceBackend>,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    groups: Vec<Group>,
}

impl AppStore {
    pub fn new(backend: Box<dyn PersistenceBackend>) -> Self {
        Self {
            backend,
            transactions: Vec::new(),
            budgets: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Loads all three collections, replacing the cache only once every
    /// fetch has succeeded.
    pub fn refresh(&mut self) -> Result<()> {
        let transactions = self.backend.list_transactions()?;
        let budgets = self.backend.list_budgets()?;
        let groups = self.backend.list_groups()?;
        debug!(
            transactions = transactions.len(),
            budgets = budgets.len(),
            groups = groups.len(),
            "cache refreshed"
        );
        self.transactions = transactions;
        self.budgets = budgets;
        self.groups = groups;
        Ok(())
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id.as_deref() == Some(id))
    }

    // --- transactions -----------------------------------------------------

    /// Persists a new transaction and prepends the confirmed record.
    pub fn add_transaction(&mut self, txn: Transaction) -> Result<&Transaction> {
        txn.validate()?;
        let created = self.backend.create_transaction(&txn)?;
        self.transactions.insert(0, created);
        Ok(&self.transactions[0])
    }

    /// Replaces the transaction with the service's confirmed record.
    pub fn update_transaction(&mut self, id: &str, txn: Transaction) -> Result<&Transaction> {
        txn.validate()?;
        let index = self
            .transactions
            .iter()
            .position(|t| t.id.as_deref() == Some(id))
            .ok_or_else(|| TrackerError::NotFound(format!("transaction {id}")))?;
        self.transactions[index] = self.backend.replace_transaction(id, &txn)?;
        Ok(&self.transactions[index])
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<()> {
        self.backend.delete_transaction(id)?;
        self.transactions.retain(|t| t.id.as_deref() != Some(id));
        Ok(())
    }

    // --- budgets ----------------------------------------------------------

    pub fn add_budget(&mut self, budget: Budget) -> Result<&Budget> {
        budget.validate()?;
        let created = self.backend.create_budget(&budget)?;
        self.budgets.insert(0, created);
        Ok(&self.budgets[0])
    }

    pub fn update_budget(&mut self, id: &str, budget: Budget) -> Result<&Budget> {
        budget.validate()?;
        let index = self
            .budgets
            .iter()
            .position(|b| b.id.as_deref() == Some(id))
            .ok_or_else(|| TrackerError::NotFound(format!("budget {id}")))?;
        self.budgets[index] = self.backend.replace_budget(id, &budget)?;
        Ok(&self.budgets[index])
    }

    pub fn delete_budget(&mut self, id: &str) -> Result<()> {
        self.backend.delete_budget(id)?;
        self.budgets.retain(|b| b.id.as_deref() != Some(id));
        Ok(())
    }

    // --- groups -----------------------------------------------------------

    pub fn add_group(&mut self, group: Group) -> Result<&Group> {
        group.validate()?;
        let created = self.backend.create_group(&group)?;
        self.groups.insert(0, created);
        Ok(&self.groups[0])
    }

    pub fn update_group(&mut self, id: &str, group: Group) -> Result<&Group> {
        group.validate()?;
        let index = self.group_index(id)?;
        self.groups[index] = self.backend.replace_group(id, &group)?;
        Ok(&self.groups[index])
    }

    pub fn delete_group(&mut self, id: &str) -> Result<()> {
        self.backend.delete_group(id)?;
        self.groups.retain(|g| g.id.as_deref() != Some(id));
        Ok(())
    }

    /// Appends an expense to a group. The service has no expense
    /// sub-resource, so this is a full-record replace of the parent group.
    pub fn add_expense(&mut self, group_id: &str, expense: Expense) -> Result<&Group> {
        expense.validate()?;
        let index = self.group_index(group_id)?;
        let mut updated = self.groups[index].clone();
        updated.expenses.push(expense);
        self.groups[index] = self.backend.replace_group(group_id, &updated)?;
        Ok(&self.groups[index])
    }

    /// Appends a settlement to a group via full-record replace.
    pub fn add_settlement(&mut self, group_id: &str, settlement: Settlement) -> Result<&Group> {
        settlement.validate()?;
        let index = self.group_index(group_id)?;
        let mut updated = self.groups[index].clone();
        updated.settlements.push(settlement);
        self.groups[index] = self.backend.replace_group(group_id, &updated)?;
        Ok(&self.groups[index])
    }

    fn group_index(&self, id: &str) -> Result<usize> {
        self.groups
            .iter()
            .position(|g| g.id.as_deref() == Some(id))
            .ok_or_else(|| TrackerError::NotFound(format!("group {id}")))
    }

    // --- derived views ----------------------------------------------------

    pub fn totals(&self) -> Totals {
        summary::income_expense_totals(&self.transactions)
    }

    pub fn category_totals(&self, kind: TransactionKind) -> Vec<CategoryTotal> {
        summary::category_totals(&self.transactions, kind)
    }

    pub fn trend(&self) -> Vec<TrendPoint> {
        summary::trend_series(&self.transactions)
    }

    pub fn budget_utilization(&self) -> Vec<BudgetStatus> {
        summary::budget_utilization(&self.budgets, &self.transactions)
    }

    pub fn known_categories(&self) -> Vec<String> {
        summary::known_categories(&self.transactions)
    }

    pub fn filtered_transactions(&self, filter: &TransactionFilter) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|txn| filter.matches(txn))
            .collect()
    }

    pub fn group_balances(&self, group_id: &str) -> Result<Vec<MemberBalance>> {
        let group = self
            .group(group_id)
            .ok_or_else(|| TrackerError::NotFound(format!("group {group_id}")))?;
        balance::compute_balances(&group.members, &group.expenses, &group.settlements)
    }
}
