// ===============================
// src/store/recommendations.rs
// ===============================
use std::sync::Arc;

use crate::client::{self, RemoteClient};
use crate::domain::{Recommendation, RecommendationList};
use crate::error::TranslatedError;
use crate::store::{DomainStore, StoreCell};
use crate::translate;

/// Rule-based advice computed by the backend from goals and spendings.
pub struct RecommendationsStore {
    client: Arc<dyn RemoteClient>,
    cell: StoreCell<Option<Vec<Recommendation>>>,
}

impl RecommendationsStore {
    pub fn new(client: Arc<dyn RemoteClient>) -> Self {
        Self { client, cell: StoreCell::new("recommendations", translate::recommendations) }
    }

    pub async fn fetch_recommendations(&self) -> Result<(), TranslatedError> {
        self.cell
            .fetch(
                "fetch_recommendations",
                client::get::<RecommendationList>(self.client.as_ref(), "recommendations"),
                |data, list| *data = Some(list.recommendations),
            )
            .await
    }
}

impl DomainStore for RecommendationsStore {
    type Data = Option<Vec<Recommendation>>;

    fn cell(&self) -> &StoreCell<Self::Data> {
        &self.cell
    }
}
