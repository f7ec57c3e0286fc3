// ===============================
// src/store/goal.rs
// ===============================
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::client::{self, RemoteClient, RemoteError};
use crate::domain::{ActionResponse, Goal, GoalList, GoalPayload};
use crate::error::TranslatedError;
use crate::store::{DomainStore, StoreCell};
use crate::translate::{self, NO_CURRENT_GOAL, NO_CURRENT_GOAL_RU};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalData {
    pub goals: Option<Vec<Goal>>,
    /// At most one goal is current per user.
    pub current_goal: Option<Goal>,
}

/// "No current goal" is an empty answer, not a failure.
///
/// The backend only signals it through the message text, so both the raw code
/// and its translated form are accepted. Breaks if either string changes.
fn is_no_current_goal(raw: &RemoteError) -> bool {
    raw.status == Some(404) && (raw.message == NO_CURRENT_GOAL || raw.message == NO_CURRENT_GOAL_RU)
}

pub struct GoalStore {
    client: Arc<dyn RemoteClient>,
    cell: StoreCell<GoalData>,
}

impl GoalStore {
    pub fn new(client: Arc<dyn RemoteClient>) -> Self {
        Self { client, cell: StoreCell::new("goal", translate::goal) }
    }

    pub async fn fetch_goals(&self) -> Result<(), TranslatedError> {
        self.cell
            .fetch(
                "fetch_goals",
                client::get::<GoalList>(self.client.as_ref(), "goals"),
                |data, list| data.goals = Some(list.goals),
            )
            .await
    }

    pub async fn get_current_goal(&self) -> Result<Option<Goal>, TranslatedError> {
        const ACTION: &str = "get_current_goal";
        self.cell.begin(ACTION);
        match client::get::<Option<Goal>>(self.client.as_ref(), "goals/current").await {
            Ok(goal) => {
                let out = goal.clone();
                self.cell.succeed(ACTION, |data| data.current_goal = goal);
                Ok(out)
            }
            Err(raw) if is_no_current_goal(&raw) => {
                debug!("no current goal");
                self.cell.succeed(ACTION, |data| data.current_goal = None);
                Ok(None)
            }
            Err(raw) => Err(self.cell.fail(ACTION, &raw)),
        }
    }

    pub async fn add_goal(&self, payload: &GoalPayload) -> Result<ActionResponse, TranslatedError> {
        let rsp = self
            .cell
            .request("add_goal", client::post(self.client.as_ref(), "goals", payload))
            .await?;
        self.refresh_own().await;
        Ok(rsp)
    }

    pub async fn update_goal(&self, id: i64, payload: &GoalPayload) -> Result<ActionResponse, TranslatedError> {
        let path = format!("goals/{id}");
        let rsp = self
            .cell
            .request("update_goal", client::put(self.client.as_ref(), &path, Some(payload)))
            .await?;
        self.refresh_own().await;
        Ok(rsp)
    }

    pub async fn delete_goal(&self, id: i64) -> Result<ActionResponse, TranslatedError> {
        let path = format!("goals/{id}");
        let rsp = self
            .cell
            .request("delete_goal", client::delete(self.client.as_ref(), &path))
            .await?;
        self.refresh_own().await;
        Ok(rsp)
    }

    pub async fn set_current_goal_by_id(&self, id: i64) -> Result<ActionResponse, TranslatedError> {
        let path = format!("goals/{id}/current");
        let rsp = self
            .cell
            .request("set_current_goal", client::put::<_, Value>(self.client.as_ref(), &path, None))
            .await?;
        self.refresh_own().await;
        Ok(rsp)
    }

    // Daftar goal + current goal, keduanya milik store ini
    async fn refresh_own(&self) {
        let (goals, current) = tokio::join!(self.fetch_goals(), self.get_current_goal());
        if let Err(e) = goals {
            warn!(error = %e, "goal list refresh after mutation failed");
        }
        if let Err(e) = current {
            warn!(error = %e, "current goal refresh after mutation failed");
        }
    }
}

impl DomainStore for GoalStore {
    type Data = GoalData;

    fn cell(&self) -> &StoreCell<GoalData> {
        &self.cell
    }
}
