use budget_tracker_core::api::MemoryBackend;
use budget_tracker_core::ledger::{Expense, Group, Transaction, TransactionKind};
use budget_tracker_core::store::AppStore;
use chrono::NaiveDate;

/// Creates a store over a fresh in-memory backend, returning a second handle
/// to the backend so tests can inspect it or take it offline.
pub fn setup_store() -> (AppStore, MemoryBackend) {
    let backend = MemoryBackend::new();
    let store = AppStore::new(Box::new(backend.clone()));
    (store, backend)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn expense_txn(category: &str, amount: f64, day: u32) -> Transaction {
    Transaction::new(TransactionKind::Expense, category, amount, date(2024, 6, day))
}

pub fn income_txn(category: &str, amount: f64, day: u32) -> Transaction {
    Transaction::new(TransactionKind::Income, category, amount, date(2024, 6, day))
}

pub fn trip_group() -> Group {
    Group::new(
        "Goa Trip",
        vec!["Asha".into(), "Ben".into(), "Chitra".into()],
    )
}

pub fn dinner_expense(amount: f64, payer: &str) -> Expense {
    Expense::new("Dinner", amount, payer, date(2024, 6, 15))
}
