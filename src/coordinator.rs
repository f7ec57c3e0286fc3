// ===============================
// src/coordinator.rs
// ===============================
//
// Data Coordinator: tidak menyimpan data, hanya orkestrasi.
//   1) cek auth (gagal cepat, tanpa network call)
//   2) jalankan action milik store
//   3) sukses -> refresh dependent resource secara paralel (best-effort), tunggu selesai
//
// Which resources follow which mutation lives in `Mutation::dependents`.
//
use std::future::Future;
use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::domain::{ActionResponse, CategoryPayload, CreditPayload, GoalPayload, SpendingPayload};
use crate::error::{SyncError, TranslatedError};
use crate::metrics::{COORDINATOR_REJECTED, DEPENDENT_REFRESH};
use crate::store::{Resource, Stores};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    AddCredit,
    UpdateCredit,
    DeleteCredit,
    AddSpending,
    UpdateSpending,
    DeleteSpending,
    AddGoal,
    UpdateGoal,
    DeleteGoal,
    SetCurrentGoal,
    AddCategory,
    UpdateCategory,
    DeleteCategory,
}

const AFTER_CREDIT: &[Resource] = &[
    Resource::Balance,
    Resource::Goals,
    Resource::CurrentGoal,
    Resource::Recommendations,
    Resource::TodayReminder,
];

const AFTER_SPENDING: &[Resource] = &[
    Resource::Balance,
    Resource::CategoriesMonth,
    Resource::Goals,
    Resource::CurrentGoal,
    Resource::Recommendations,
    Resource::TodayReminder,
];

const AFTER_GOAL: &[Resource] = &[Resource::Recommendations];

const AFTER_CATEGORY: &[Resource] = &[Resource::Spendings, Resource::CategoriesMonth];

impl Mutation {
    pub const ALL: [Mutation; 13] = [
        Mutation::AddCredit,
        Mutation::UpdateCredit,
        Mutation::DeleteCredit,
        Mutation::AddSpending,
        Mutation::UpdateSpending,
        Mutation::DeleteSpending,
        Mutation::AddGoal,
        Mutation::UpdateGoal,
        Mutation::DeleteGoal,
        Mutation::SetCurrentGoal,
        Mutation::AddCategory,
        Mutation::UpdateCategory,
        Mutation::DeleteCategory,
    ];

    /// Resources re-fetched after this mutation succeeds.
    pub fn dependents(self) -> &'static [Resource] {
        match self {
            Mutation::AddCredit | Mutation::UpdateCredit | Mutation::DeleteCredit => AFTER_CREDIT,
            Mutation::AddSpending | Mutation::UpdateSpending => AFTER_SPENDING,
            // sengaja asimetris dengan add/update
            Mutation::DeleteSpending => &[],
            Mutation::AddGoal | Mutation::UpdateGoal | Mutation::DeleteGoal | Mutation::SetCurrentGoal => {
                AFTER_GOAL
            }
            Mutation::AddCategory | Mutation::UpdateCategory => AFTER_CATEGORY,
            Mutation::DeleteCategory => &[],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mutation::AddCredit => "add_credit",
            Mutation::UpdateCredit => "update_credit",
            Mutation::DeleteCredit => "delete_credit",
            Mutation::AddSpending => "add_spending",
            Mutation::UpdateSpending => "update_spending",
            Mutation::DeleteSpending => "delete_spending",
            Mutation::AddGoal => "add_goal",
            Mutation::UpdateGoal => "update_goal",
            Mutation::DeleteGoal => "delete_goal",
            Mutation::SetCurrentGoal => "set_current_goal",
            Mutation::AddCategory => "add_category",
            Mutation::UpdateCategory => "update_category",
            Mutation::DeleteCategory => "delete_category",
        }
    }
}

/// Outcome of `load_all_data`; failures are already recorded in their stores.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub failed: Vec<(Resource, TranslatedError)>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Clone)]
pub struct Coordinator {
    stores: Arc<Stores>,
    auth: watch::Receiver<bool>,
}

impl Coordinator {
    pub fn new(stores: Arc<Stores>, auth: watch::Receiver<bool>) -> Self {
        Self { stores, auth }
    }

    fn ensure_authenticated(&self, what: &'static str) -> Result<(), SyncError> {
        if *self.auth.borrow() {
            return Ok(());
        }
        COORDINATOR_REJECTED.inc();
        warn!(action = what, "rejected: not authenticated");
        Err(SyncError::Unauthenticated)
    }

    /// Fires all refreshes at once and waits for every one of them.
    pub async fn refresh(&self, resources: &[Resource]) -> Vec<(Resource, TranslatedError)> {
        let results = join_all(resources.iter().map(|&r| async move { (r, self.stores.refresh(r).await) })).await;

        let mut failed = Vec::new();
        for (resource, result) in results {
            match result {
                Ok(()) => DEPENDENT_REFRESH.with_label_values(&[resource.as_str(), "ok"]).inc(),
                Err(e) => {
                    DEPENDENT_REFRESH.with_label_values(&[resource.as_str(), "error"]).inc();
                    warn!(resource = resource.as_str(), error = %e, "refresh failed");
                    failed.push((resource, e));
                }
            }
        }
        failed
    }

    /// Initial load after login; all resources are independent.
    pub async fn load_all_data(&self) -> Result<LoadReport, SyncError> {
        self.ensure_authenticated("load_all_data")?;
        let failed = self.refresh(&Resource::ALL).await;
        info!(resources = Resource::ALL.len(), failed = failed.len(), "initial load done");
        Ok(LoadReport { failed })
    }

    async fn mutate<F>(&self, mutation: Mutation, action: F) -> Result<ActionResponse, SyncError>
    where
        F: Future<Output = Result<ActionResponse, TranslatedError>>,
    {
        self.ensure_authenticated(mutation.as_str())?;
        let rsp = action.await?;

        let dependents = mutation.dependents();
        if !dependents.is_empty() {
            let failed = self.refresh(dependents).await;
            info!(
                mutation = mutation.as_str(),
                refreshed = dependents.len(),
                failed = failed.len(),
                "dependent refresh done"
            );
        }
        Ok(rsp)
    }

    pub async fn add_credit(&self, payload: &CreditPayload) -> Result<ActionResponse, SyncError> {
        self.mutate(Mutation::AddCredit, self.stores.credits.add_credit(payload)).await
    }

    pub async fn update_credit(&self, id: i64, payload: &CreditPayload) -> Result<ActionResponse, SyncError> {
        self.mutate(Mutation::UpdateCredit, self.stores.credits.update_credit(id, payload)).await
    }

    pub async fn delete_credit(&self, id: i64) -> Result<ActionResponse, SyncError> {
        self.mutate(Mutation::DeleteCredit, self.stores.credits.delete_credit(id)).await
    }

    pub async fn add_spending(&self, payload: &SpendingPayload) -> Result<ActionResponse, SyncError> {
        self.mutate(Mutation::AddSpending, self.stores.spendings.add_spending(payload)).await
    }

    pub async fn update_spending(&self, id: i64, payload: &SpendingPayload) -> Result<ActionResponse, SyncError> {
        self.mutate(Mutation::UpdateSpending, self.stores.spendings.update_spending(id, payload)).await
    }

    pub async fn delete_spending(&self, id: i64) -> Result<ActionResponse, SyncError> {
        self.mutate(Mutation::DeleteSpending, self.stores.spendings.delete_spending(id)).await
    }

    pub async fn add_goal(&self, payload: &GoalPayload) -> Result<ActionResponse, SyncError> {
        self.mutate(Mutation::AddGoal, self.stores.goals.add_goal(payload)).await
    }

    pub async fn update_goal(&self, id: i64, payload: &GoalPayload) -> Result<ActionResponse, SyncError> {
        self.mutate(Mutation::UpdateGoal, self.stores.goals.update_goal(id, payload)).await
    }

    pub async fn delete_goal(&self, id: i64) -> Result<ActionResponse, SyncError> {
        self.mutate(Mutation::DeleteGoal, self.stores.goals.delete_goal(id)).await
    }

    pub async fn set_current_goal_by_id(&self, id: i64) -> Result<ActionResponse, SyncError> {
        self.mutate(Mutation::SetCurrentGoal, self.stores.goals.set_current_goal_by_id(id)).await
    }

    pub async fn add_category(&self, payload: &CategoryPayload) -> Result<ActionResponse, SyncError> {
        self.mutate(Mutation::AddCategory, self.stores.categories.add_category(payload)).await
    }

    pub async fn update_category(&self, id: i64, payload: &CategoryPayload) -> Result<ActionResponse, SyncError> {
        self.mutate(Mutation::UpdateCategory, self.stores.categories.update_category(id, payload)).await
    }

    pub async fn delete_category(&self, id: i64) -> Result<ActionResponse, SyncError> {
        self.mutate(Mutation::DeleteCategory, self.stores.categories.delete_category(id)).await
    }
}
