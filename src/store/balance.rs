// ===============================
// src/store/balance.rs
// ===============================
use std::sync::Arc;

use crate::client::{self, RemoteClient};
use crate::domain::BalanceEnvelope;
use crate::error::TranslatedError;
use crate::store::{DomainStore, StoreCell};
use crate::translate;

/// Balance is never derived locally, always re-read from the backend.
pub struct BalanceStore {
    client: Arc<dyn RemoteClient>,
    cell: StoreCell<Option<f64>>,
}

impl BalanceStore {
    pub fn new(client: Arc<dyn RemoteClient>) -> Self {
        Self { client, cell: StoreCell::new("balance", translate::balance) }
    }

    pub async fn fetch_balance(&self) -> Result<(), TranslatedError> {
        self.cell
            .fetch(
                "fetch_balance",
                client::get::<BalanceEnvelope>(self.client.as_ref(), "balance"),
                |data, env| *data = Some(env.balance),
            )
            .await
    }
}

impl DomainStore for BalanceStore {
    type Data = Option<f64>;

    fn cell(&self) -> &StoreCell<Option<f64>> {
        &self.cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Method, RemoteError};
    use crate::test_support::FakeClient;
    use serde_json::json;

    #[tokio::test]
    async fn fetch_sets_balance() {
        let fake = FakeClient::new();
        fake.ok(Method::Get, "balance", json!({ "balance": 1520.5 }));
        let store = BalanceStore::new(fake.clone());

        store.fetch_balance().await.unwrap();

        let state = store.snapshot();
        assert_eq!(state.data, Some(1520.5));
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn last_response_to_settle_wins() {
        let fake = FakeClient::new();
        let first = fake.hold(Method::Get, "balance");
        let second = fake.hold(Method::Get, "balance");
        let store = BalanceStore::new(fake.clone());

        let release = async {
            while fake.count(Method::Get, "balance") < 2 {
                tokio::task::yield_now().await;
            }
            second.send(Ok(json!({ "balance": 2.0 }))).unwrap();
            while store.snapshot().data != Some(2.0) {
                tokio::task::yield_now().await;
            }
            first.send(Ok(json!({ "balance": 1.0 }))).unwrap();
        };

        let (a, b, ()) = tokio::join!(store.fetch_balance(), store.fetch_balance(), release);
        a.unwrap();
        b.unwrap();

        // call #1 selesai terakhir, jadi datanya yang tersisa
        assert_eq!(store.snapshot().data, Some(1.0));
    }

    #[tokio::test]
    async fn server_failure_is_translated() {
        let fake = FakeClient::new();
        fake.fail(Method::Get, "balance", RemoteError::new("db down", Some(503)));
        let store = BalanceStore::new(fake.clone());

        let err = store.fetch_balance().await.unwrap_err();
        assert_eq!(err.message, translate::SERVER_MESSAGE);
        assert_eq!(err.status, 503);
        assert_eq!(store.snapshot().error, Some(err));
    }
}
