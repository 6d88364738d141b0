//! Blocking HTTP implementation of the persistence boundary.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::errors::{Result, TrackerError};
use crate::ledger::{Budget, Group, Transaction};

use super::PersistenceBackend;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for the remote budget service. One request at a time, no retries;
/// a failed call surfaces as `Persistence` and leaves nothing half-applied.
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    /// Builds a client for the given API root, e.g. `http://host:4000/api`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    fn record_url(&self, resource: &str, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, resource, id)
    }

    fn list<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>> {
        let url = self.collection_url(resource);
        debug!(%url, "GET");
        parse(self.client.get(&url).send()?)
    }

    fn create<T: Serialize + DeserializeOwned>(&self, resource: &str, record: &T) -> Result<T> {
        let url = self.collection_url(resource);
        debug!(%url, "POST");
        parse(self.client.post(&url).json(record).send()?)
    }

    fn replace<T: Serialize + DeserializeOwned>(
        &self,
        resource: &str,
        id: &str,
        record: &T,
    ) -> Result<T> {
        let url = self.record_url(resource, id);
        debug!(%url, "PUT");
        parse(self.client.put(&url).json(record).send()?)
    }

    fn delete(&self, resource: &str, id: &str) -> Result<()> {
        let url = self.record_url(resource, id);
        debug!(%url, "DELETE");
        check(self.client.delete(&url).send()?)?;
        Ok(())
    }
}

fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(TrackerError::Persistence(format!(
            "{} responded {}",
            response.url(),
            status
        )))
    }
}

fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
    Ok(check(response)?.json()?)
}

impl PersistenceBackend for RestClient {
    fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.list("transactions")
    }

    fn create_transaction(&self, txn: &Transaction) -> Result<Transaction> {
        self.create("transactions", txn)
    }

    fn replace_transaction(&self, id: &str, txn: &Transaction) -> Result<Transaction> {
        self.replace("transactions", id, txn)
    }

    fn delete_transaction(&self, id: &str) -> Result<()> {
        self.delete("transactions", id)
    }

    fn list_budgets(&self) -> Result<Vec<Budget>> {
        self.list("budgets")
    }

    fn create_budget(&self, budget: &Budget) -> Result<Budget> {
        self.create("budgets", budget)
    }

    fn replace_budget(&self, id: &str, budget: &Budget) -> Result<Budget> {
        self.replace("budgets", id, budget)
    }

    fn delete_budget(&self, id: &str) -> Result<()> {
        self.delete("budgets", id)
    }

    fn list_groups(&self) -> Result<Vec<Group>> {
        self.list("groups")
    }

    fn create_group(&self, group: &Group) -> Result<Group> {
        self.create("groups", group)
    }

    fn replace_group(&self, id: &str, group: &Group) -> Result<Group> {
        self.replace("groups", id, group)
    }

    fn delete_group(&self, id: &str) -> Result<()> {
        self.delete("groups", id)
    }
}
