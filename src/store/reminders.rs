// ===============================
// src/store/reminders.rs
// ===============================
use std::sync::Arc;

use crate::client::{self, RemoteClient};
use crate::domain::{Reminder, ReminderList, TodayReminder};
use crate::error::TranslatedError;
use crate::store::{DomainStore, StoreCell};
use crate::translate;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReminderData {
    pub today: Option<Reminder>,
    pub reminders: Option<Vec<Reminder>>,
}

pub struct RemindersStore {
    client: Arc<dyn RemoteClient>,
    cell: StoreCell<ReminderData>,
}

impl RemindersStore {
    pub fn new(client: Arc<dyn RemoteClient>) -> Self {
        Self { client, cell: StoreCell::new("reminders", translate::reminder) }
    }

    pub async fn fetch_today_reminder(&self) -> Result<(), TranslatedError> {
        self.cell
            .fetch(
                "fetch_today_reminder",
                client::get::<TodayReminder>(self.client.as_ref(), "reminders/today"),
                |data, today| data.today = today.reminder,
            )
            .await
    }

    pub async fn fetch_reminders(&self) -> Result<(), TranslatedError> {
        self.cell
            .fetch(
                "fetch_reminders",
                client::get::<ReminderList>(self.client.as_ref(), "reminders"),
                |data, list| data.reminders = Some(list.reminders),
            )
            .await
    }
}

impl DomainStore for RemindersStore {
    type Data = ReminderData;

    fn cell(&self) -> &StoreCell<ReminderData> {
        &self.cell
    }
}
