// ===============================
// src/store/spending.rs
// ===============================
use std::sync::Arc;

use tracing::warn;

use crate::client::{self, RemoteClient};
use crate::domain::{ActionResponse, Spending, SpendingList, SpendingPayload};
use crate::error::TranslatedError;
use crate::store::{DomainStore, StoreCell};
use crate::translate;

pub struct SpendingStore {
    client: Arc<dyn RemoteClient>,
    cell: StoreCell<Option<Vec<Spending>>>,
}

impl SpendingStore {
    pub fn new(client: Arc<dyn RemoteClient>) -> Self {
        Self { client, cell: StoreCell::new("spending", translate::spending) }
    }

    pub async fn fetch_spendings(&self) -> Result<(), TranslatedError> {
        self.cell
            .fetch(
                "fetch_spendings",
                client::get::<SpendingList>(self.client.as_ref(), "spendings"),
                |data, list| *data = Some(list.spendings),
            )
            .await
    }

    pub async fn fetch_spending(&self, id: i64) -> Result<Spending, TranslatedError> {
        let path = format!("spendings/{id}");
        self.cell.request("fetch_spending", client::get(self.client.as_ref(), &path)).await
    }

    pub async fn add_spending(&self, payload: &SpendingPayload) -> Result<ActionResponse, TranslatedError> {
        let rsp = self
            .cell
            .request("add_spending", client::post(self.client.as_ref(), "spendings", payload))
            .await?;
        self.refresh_own().await;
        Ok(rsp)
    }

    pub async fn update_spending(
        &self,
        id: i64,
        payload: &SpendingPayload,
    ) -> Result<ActionResponse, TranslatedError> {
        let path = format!("spendings/{id}");
        let rsp = self
            .cell
            .request("update_spending", client::put(self.client.as_ref(), &path, Some(payload)))
            .await?;
        self.refresh_own().await;
        Ok(rsp)
    }

    pub async fn delete_spending(&self, id: i64) -> Result<ActionResponse, TranslatedError> {
        let path = format!("spendings/{id}");
        let rsp = self
            .cell
            .request("delete_spending", client::delete(self.client.as_ref(), &path))
            .await?;
        self.refresh_own().await;
        Ok(rsp)
    }

    async fn refresh_own(&self) {
        if let Err(e) = self.fetch_spendings().await {
            warn!(error = %e, "spending list refresh after mutation failed");
        }
    }
}

impl DomainStore for SpendingStore {
    type Data = Option<Vec<Spending>>;

    fn cell(&self) -> &StoreCell<Self::Data> {
        &self.cell
    }
}
