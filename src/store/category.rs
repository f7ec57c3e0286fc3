// ===============================
// src/store/category.rs
// ===============================
use std::sync::Arc;

use tracing::warn;

use crate::client::{self, RemoteClient};
use crate::colors::CategoryColors;
use crate::domain::{ActionResponse, Category, CategoryList, CategoryMonthList, CategoryMonthTotal, CategoryPayload};
use crate::error::TranslatedError;
use crate::store::{DomainStore, StoreCell};
use crate::translate;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryData {
    pub categories: Option<Vec<Category>>,
    /// Spending per category for the current month.
    pub month: Option<Vec<CategoryMonthTotal>>,
    pub colors: CategoryColors,
}

pub struct CategoryStore {
    client: Arc<dyn RemoteClient>,
    cell: StoreCell<CategoryData>,
}

impl CategoryStore {
    pub fn new(client: Arc<dyn RemoteClient>) -> Self {
        Self { client, cell: StoreCell::new("category", translate::category) }
    }

    pub async fn fetch_categories(&self) -> Result<(), TranslatedError> {
        self.cell
            .fetch(
                "fetch_categories",
                client::get::<CategoryList>(self.client.as_ref(), "categories"),
                |data, list| {
                    data.colors.assign(list.categories.iter().map(|c| c.name.as_str()));
                    data.categories = Some(list.categories);
                },
            )
            .await
    }

    pub async fn get_categories_month(&self) -> Result<(), TranslatedError> {
        self.cell
            .fetch(
                "get_categories_month",
                client::get::<CategoryMonthList>(self.client.as_ref(), "categories/month"),
                |data, list| {
                    data.colors.assign(list.categories.iter().map(|c| c.name.as_str()));
                    data.month = Some(list.categories);
                },
            )
            .await
    }

    pub async fn add_category(&self, payload: &CategoryPayload) -> Result<ActionResponse, TranslatedError> {
        let rsp = self
            .cell
            .request("add_category", client::post(self.client.as_ref(), "categories", payload))
            .await?;
        self.refresh_own().await;
        Ok(rsp)
    }

    pub async fn update_category(
        &self,
        id: i64,
        payload: &CategoryPayload,
    ) -> Result<ActionResponse, TranslatedError> {
        let path = format!("categories/{id}");
        let rsp = self
            .cell
            .request("update_category", client::put(self.client.as_ref(), &path, Some(payload)))
            .await?;
        self.refresh_own().await;
        Ok(rsp)
    }

    /// Backend refuses with `category_in_use` while a spending references it.
    pub async fn delete_category(&self, id: i64) -> Result<ActionResponse, TranslatedError> {
        let path = format!("categories/{id}");
        let rsp = self
            .cell
            .request("delete_category", client::delete(self.client.as_ref(), &path))
            .await?;
        self.refresh_own().await;
        Ok(rsp)
    }

    pub fn color_of(&self, name: &str) -> Option<&'static str> {
        self.cell.read(|s| s.data.colors.color_of(name))
    }

    async fn refresh_own(&self) {
        if let Err(e) = self.fetch_categories().await {
            warn!(error = %e, "category list refresh after mutation failed");
        }
    }
}

impl DomainStore for CategoryStore {
    type Data = CategoryData;

    fn cell(&self) -> &StoreCell<CategoryData> {
        &self.cell
    }
}
