// ===============================
// src/store/credit.rs
// ===============================
use std::sync::Arc;

use tracing::warn;

use crate::client::{self, RemoteClient};
use crate::domain::{ActionResponse, Credit, CreditList, CreditPayload};
use crate::error::TranslatedError;
use crate::store::{DomainStore, StoreCell};
use crate::translate;

pub struct CreditStore {
    client: Arc<dyn RemoteClient>,
    cell: StoreCell<Option<Vec<Credit>>>,
}

impl CreditStore {
    pub fn new(client: Arc<dyn RemoteClient>) -> Self {
        Self { client, cell: StoreCell::new("credit", translate::credit) }
    }

    pub async fn fetch_credits(&self) -> Result<(), TranslatedError> {
        self.cell
            .fetch(
                "fetch_credits",
                client::get::<CreditList>(self.client.as_ref(), "credits"),
                |data, list| *data = Some(list.credits),
            )
            .await
    }

    /// Single credit for an edit form; the list is left as is.
    pub async fn fetch_credit(&self, id: i64) -> Result<Credit, TranslatedError> {
        let path = format!("credits/{id}");
        self.cell.request("fetch_credit", client::get(self.client.as_ref(), &path)).await
    }

    pub async fn add_credit(&self, payload: &CreditPayload) -> Result<ActionResponse, TranslatedError> {
        let rsp = self
            .cell
            .request("add_credit", client::post(self.client.as_ref(), "credits", payload))
            .await?;
        self.refresh_own().await;
        Ok(rsp)
    }

    pub async fn update_credit(&self, id: i64, payload: &CreditPayload) -> Result<ActionResponse, TranslatedError> {
        let path = format!("credits/{id}");
        let rsp = self
            .cell
            .request("update_credit", client::put(self.client.as_ref(), &path, Some(payload)))
            .await?;
        self.refresh_own().await;
        Ok(rsp)
    }

    pub async fn delete_credit(&self, id: i64) -> Result<ActionResponse, TranslatedError> {
        let path = format!("credits/{id}");
        let rsp = self
            .cell
            .request("delete_credit", client::delete(self.client.as_ref(), &path))
            .await?;
        self.refresh_own().await;
        Ok(rsp)
    }

    // Error sudah tercatat di state; mutasi tetap dianggap sukses
    async fn refresh_own(&self) {
        if let Err(e) = self.fetch_credits().await {
            warn!(error = %e, "credit list refresh after mutation failed");
        }
    }
}

impl DomainStore for CreditStore {
    type Data = Option<Vec<Credit>>;

    fn cell(&self) -> &StoreCell<Self::Data> {
        &self.cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Method, RemoteError};
    use crate::test_support::{credit_json, FakeClient};
    use chrono::NaiveDate;
    use serde_json::json;

    fn payload() -> CreditPayload {
        CreditPayload {
            amount: 50_000.0,
            description: "salary".into(),
            date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            is_permanent: true,
            end_date: None,
        }
    }

    #[tokio::test]
    async fn fetch_defaults_missing_list_to_empty() {
        let fake = FakeClient::new();
        fake.ok(Method::Get, "credits", json!({}));
        let store = CreditStore::new(fake.clone());

        store.fetch_credits().await.unwrap();
        assert_eq!(store.snapshot().data, Some(vec![]));
    }

    #[tokio::test]
    async fn add_returns_backend_response_and_reloads_list() {
        let fake = FakeClient::new();
        fake.ok(Method::Post, "credits", json!({ "message": "credit created", "id": 11 }));
        fake.ok(Method::Get, "credits", json!({ "credits": [credit_json(11)] }));
        let store = CreditStore::new(fake.clone());

        let rsp = store.add_credit(&payload()).await.unwrap();

        assert_eq!(rsp.message.as_deref(), Some("credit created"));
        assert_eq!(rsp.extra.get("id"), Some(&json!(11)));
        assert_eq!(store.snapshot().data.map(|c| c.len()), Some(1));
        let body = fake.last_body(Method::Post, "credits").unwrap();
        assert_eq!(body["amount"], json!(50_000.0));
        assert_eq!(body["is_permanent"], json!(true));
    }

    #[tokio::test]
    async fn field_error_reaches_caller_and_state() {
        let fake = FakeClient::new();
        fake.fail(Method::Put, "credits/4", RemoteError::new("end date before start date", Some(400)));
        let store = CreditStore::new(fake.clone());

        let err = store.update_credit(4, &payload()).await.unwrap_err();

        assert_eq!(err.field.as_deref(), Some("end_date"));
        assert_eq!(store.snapshot().error, Some(err));
        // gagal -> tidak ada refresh list
        assert_eq!(fake.count(Method::Get, "credits"), 0);
    }

    #[tokio::test]
    async fn single_fetch_does_not_touch_list() {
        let fake = FakeClient::new();
        fake.ok(Method::Get, "credits/11", credit_json(11));
        let store = CreditStore::new(fake.clone());

        let credit = store.fetch_credit(11).await.unwrap();
        assert_eq!(credit.id, 11);
        assert_eq!(store.snapshot().data, None);
    }
}
