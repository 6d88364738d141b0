//! In-process stand-in for the remote service.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

use crate::errors::{Result, TrackerError};
use crate::ledger::{Budget, Group, Transaction};

use super::PersistenceBackend;

/// Record types the backend can store. Ids are assigned on create, the way
/// the remote service assigns them.
trait Record: Clone {
    fn id(&self) -> Option<&str>;
    fn set_id(&mut self, id: String);
}

impl Record for Transaction {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

impl Record for Budget {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

impl Record for Group {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    groups: Vec<Group>,
}

/// Backend that keeps records in process memory, for tests and for wiring
/// the store without a server. Clones share state, so a handle kept outside
/// the store can inspect it or take it offline; `set_offline` makes every
/// call fail the way an unreachable service would.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
    offline: Arc<AtomicBool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn state(&self) -> Result<MutexGuard<'_, MemoryState>> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(TrackerError::Persistence("service unreachable".into()));
        }
        self.state
            .lock()
            .map_err(|_| TrackerError::Persistence("backend state poisoned".into()))
    }
}

fn create_record<T: Record>(records: &mut Vec<T>, record: &T) -> T {
    let mut created = record.clone();
    created.set_id(Uuid::new_v4().to_string());
    records.push(created.clone());
    created
}

fn replace_record<T: Record>(records: &mut [T], id: &str, record: &T, kind: &str) -> Result<T> {
    let slot = records
        .iter_mut()
        .find(|r| r.id() == Some(id))
        .ok_or_else(|| TrackerError::NotFound(format!("{kind} {id}")))?;
    let mut updated = record.clone();
    updated.set_id(id.to_string());
    *slot = updated.clone();
    Ok(updated)
}

fn delete_record<T: Record>(records: &mut Vec<T>, id: &str, kind: &str) -> Result<()> {
    let before = records.len();
    records.retain(|r| r.id() != Some(id));
    if records.len() == before {
        return Err(TrackerError::NotFound(format!("{kind} {id}")));
    }
    Ok(())
}

impl PersistenceBackend for MemoryBackend {
    fn list_transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.state()?.transactions.clone())
    }

    fn create_transaction(&self, txn: &Transaction) -> Result<Transaction> {
        Ok(create_record(&mut self.state()?.transactions, txn))
    }

    fn replace_transaction(&self, id: &str, txn: &Transaction) -> Result<Transaction> {
        replace_record(&mut self.state()?.transactions, id, txn, "transaction")
    }

    fn delete_transaction(&self, id: &str) -> Result<()> {
        delete_record(&mut self.state()?.transactions, id, "transaction")
    }

    fn list_budgets(&self) -> Result<Vec<Budget>> {
        Ok(self.state()?.budgets.clone())
    }

    fn create_budget(&self, budget: &Budget) -> Result<Budget> {
        Ok(create_record(&mut self.state()?.budgets, budget))
    }

    fn replace_budget(&self, id: &str, budget: &Budget) -> Result<Budget> {
        replace_record(&mut self.state()?.budgets, id, budget, "budget")
    }

    fn delete_budget(&self, id: &str) -> Result<()> {
        delete_record(&mut self.state()?.budgets, id, "budget")
    }

    fn list_groups(&self) -> Result<Vec<Group>> {
        Ok(self.state()?.groups.clone())
    }

    fn create_group(&self, group: &Group) -> Result<Group> {
        Ok(create_record(&mut self.state()?.groups, group))
    }

    fn replace_group(&self, id: &str, group: &Group) -> Result<Group> {
        replace_record(&mut self.state()?.groups, id, group, "group")
    }

    fn delete_group(&self, id: &str) -> Result<()> {
        delete_record(&mut self.state()?.groups, id, "group")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TransactionKind;
    use chrono::NaiveDate;

    fn sample_txn() -> Transaction {
        Transaction::new(
            TransactionKind::Expense,
            "Food",
            20.0,
            NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
        )
    }

    #[test]
    fn create_assigns_an_id() {
        let backend = MemoryBackend::new();
        let created = backend.create_transaction(&sample_txn()).unwrap();
        assert!(created.id.is_some());
        assert_eq!(backend.list_transactions().unwrap().len(), 1);
    }

    #[test]
    fn replace_unknown_id_fails() {
        let backend = MemoryBackend::new();
        let err = backend
            .replace_transaction("missing", &sample_txn())
            .expect_err("unknown id must fail");
        assert!(matches!(err, TrackerError::NotFound(_)));
    }

    #[test]
    fn replace_keeps_the_path_id() {
        let backend = MemoryBackend::new();
        let created = backend.create_transaction(&sample_txn()).unwrap();
        let id = created.id.clone().unwrap();

        let mut edited = created.clone();
        edited.id = None;
        edited.amount = 35.0;
        let updated = backend.replace_transaction(&id, &edited).unwrap();
        assert_eq!(updated.id.as_deref(), Some(id.as_str()));
        assert_eq!(updated.amount, 35.0);
    }

    #[test]
    fn delete_removes_the_record() {
        let backend = MemoryBackend::new();
        let created = backend.create_transaction(&sample_txn()).unwrap();
        backend
            .delete_transaction(created.id.as_deref().unwrap())
            .unwrap();
        assert!(backend.list_transactions().unwrap().is_empty());
    }

    #[test]
    fn offline_backend_rejects_every_call() {
        let backend = MemoryBackend::new();
        backend.set_offline(true);
        let err = backend.list_transactions().expect_err("offline must fail");
        assert!(matches!(err, TrackerError::Persistence(_)));
    }
}
