// ===============================
// src/store/mod.rs
// ===============================
//
// Domain stores: satu store per resource, masing-masing punya
// { data, loading, error } di dalam watch channel (reactive, bisa di-subscribe UI).
//
// State machine per action:
//   begin   -> loading = true,  error = None
//   succeed -> data diupdate,   loading = false
//   fail    -> error = translated, loading = false, error dikembalikan ke caller
//
// Requests for the same store are not serialized: whichever response settles
// last is the one left in `data`. `loading` stays true until every request
// started on the store has settled.
//
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::client::{RemoteClient, RemoteError};
use crate::error::TranslatedError;
use crate::metrics::{STORE_IN_FLIGHT, STORE_REQUESTS};

pub mod balance;
pub mod category;
pub mod credit;
pub mod goal;
pub mod recommendations;
pub mod reminders;
pub mod spending;

pub use balance::BalanceStore;
pub use category::{CategoryData, CategoryStore};
pub use credit::CreditStore;
pub use goal::{GoalData, GoalStore};
pub use recommendations::RecommendationsStore;
pub use reminders::{ReminderData, RemindersStore};
pub use spending::SpendingStore;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainState<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<TranslatedError>,
}

pub struct StoreCell<T> {
    name: &'static str,
    state: watch::Sender<DomainState<T>>,
    // hanya diubah di dalam send_modify, jadi selalu konsisten dengan `loading`
    in_flight: AtomicUsize,
    translate: fn(&RemoteError) -> TranslatedError,
}

impl<T: Clone + Default> StoreCell<T> {
    pub fn new(name: &'static str, translate: fn(&RemoteError) -> TranslatedError) -> Self {
        let (state, _rx) = watch::channel(DomainState::default());
        Self { name, state, in_flight: AtomicUsize::new(0), translate }
    }

    pub fn snapshot(&self) -> DomainState<T> {
        self.state.borrow().clone()
    }

    pub fn read<R>(&self, f: impl FnOnce(&DomainState<T>) -> R) -> R {
        f(&self.state.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<DomainState<T>> {
        self.state.subscribe()
    }

    pub(crate) fn begin(&self, action: &'static str) {
        debug!(store = self.name, action, "start");
        STORE_IN_FLIGHT.with_label_values(&[self.name]).inc();
        self.state.send_modify(|s| {
            self.in_flight.fetch_add(1, Ordering::SeqCst);
            s.loading = true;
            s.error = None;
        });
    }

    pub(crate) fn succeed(&self, action: &'static str, apply: impl FnOnce(&mut T)) {
        STORE_IN_FLIGHT.with_label_values(&[self.name]).dec();
        STORE_REQUESTS.with_label_values(&[self.name, action, "ok"]).inc();
        self.state.send_modify(|s| {
            apply(&mut s.data);
            s.loading = self.settle() > 0;
        });
    }

    pub(crate) fn fail(&self, action: &'static str, raw: &RemoteError) -> TranslatedError {
        let translated = (self.translate)(raw);
        STORE_IN_FLIGHT.with_label_values(&[self.name]).dec();
        STORE_REQUESTS.with_label_values(&[self.name, action, "error"]).inc();
        warn!(
            store = self.name,
            action,
            raw = %raw.message,
            status = translated.status,
            "request failed"
        );
        let recorded = translated.clone();
        self.state.send_modify(|s| {
            s.loading = self.settle() > 0;
            s.error = Some(recorded);
        });
        translated
    }

    /// Marks one request as settled and returns how many are still running.
    fn settle(&self) -> usize {
        self.in_flight.fetch_sub(1, Ordering::SeqCst).saturating_sub(1)
    }

    /// Runs `call` and writes its payload into `data` via `apply`.
    pub async fn fetch<R, F>(
        &self,
        action: &'static str,
        call: F,
        apply: impl FnOnce(&mut T, R),
    ) -> Result<(), TranslatedError>
    where
        F: Future<Output = Result<R, RemoteError>>,
    {
        self.begin(action);
        match call.await {
            Ok(value) => {
                self.succeed(action, |data| apply(data, value));
                Ok(())
            }
            Err(raw) => Err(self.fail(action, &raw)),
        }
    }

    /// Same transitions as `fetch`, but the payload goes back to the caller and `data` is untouched.
    pub async fn request<R, F>(&self, action: &'static str, call: F) -> Result<R, TranslatedError>
    where
        F: Future<Output = Result<R, RemoteError>>,
    {
        self.begin(action);
        match call.await {
            Ok(value) => {
                self.succeed(action, |_| {});
                Ok(value)
            }
            Err(raw) => Err(self.fail(action, &raw)),
        }
    }

    pub fn reset(&self) {
        self.state.send_replace(DomainState::default());
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }
}

/// Read side + lifecycle shared by every store.
pub trait DomainStore: Send + Sync {
    type Data: Clone + Default + Send + Sync;

    fn cell(&self) -> &StoreCell<Self::Data>;

    fn snapshot(&self) -> DomainState<Self::Data> {
        self.cell().snapshot()
    }

    fn subscribe(&self) -> watch::Receiver<DomainState<Self::Data>> {
        self.cell().subscribe()
    }

    /// Back to Idle: no data, not loading, no error.
    fn reset(&self) {
        self.cell().reset()
    }

    fn clear_error(&self) {
        self.cell().clear_error()
    }
}

/// Refreshable slices of backend data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Balance,
    Credits,
    Spendings,
    Categories,
    CategoriesMonth,
    Goals,
    CurrentGoal,
    Recommendations,
    TodayReminder,
}

impl Resource {
    pub const ALL: [Resource; 9] = [
        Resource::Balance,
        Resource::Credits,
        Resource::Spendings,
        Resource::Categories,
        Resource::CategoriesMonth,
        Resource::Goals,
        Resource::CurrentGoal,
        Resource::Recommendations,
        Resource::TodayReminder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Balance => "balance",
            Resource::Credits => "credits",
            Resource::Spendings => "spendings",
            Resource::Categories => "categories",
            Resource::CategoriesMonth => "categories_month",
            Resource::Goals => "goals",
            Resource::CurrentGoal => "current_goal",
            Resource::Recommendations => "recommendations",
            Resource::TodayReminder => "today_reminder",
        }
    }
}

/// All per-user stores, built once per session.
pub struct Stores {
    pub balance: BalanceStore,
    pub credits: CreditStore,
    pub spendings: SpendingStore,
    pub categories: CategoryStore,
    pub goals: GoalStore,
    pub recommendations: RecommendationsStore,
    pub reminders: RemindersStore,
}

impl Stores {
    pub fn new(client: Arc<dyn RemoteClient>) -> Self {
        Self {
            balance: BalanceStore::new(client.clone()),
            credits: CreditStore::new(client.clone()),
            spendings: SpendingStore::new(client.clone()),
            categories: CategoryStore::new(client.clone()),
            goals: GoalStore::new(client.clone()),
            recommendations: RecommendationsStore::new(client.clone()),
            reminders: RemindersStore::new(client),
        }
    }

    /// Invokes the public fetch action that owns `resource`.
    pub async fn refresh(&self, resource: Resource) -> Result<(), TranslatedError> {
        match resource {
            Resource::Balance => self.balance.fetch_balance().await,
            Resource::Credits => self.credits.fetch_credits().await,
            Resource::Spendings => self.spendings.fetch_spendings().await,
            Resource::Categories => self.categories.fetch_categories().await,
            Resource::CategoriesMonth => self.categories.get_categories_month().await,
            Resource::Goals => self.goals.fetch_goals().await,
            Resource::CurrentGoal => self.goals.get_current_goal().await.map(|_| ()),
            Resource::Recommendations => self.recommendations.fetch_recommendations().await,
            Resource::TodayReminder => self.reminders.fetch_today_reminder().await,
        }
    }

    /// Resets every store, always in the same order.
    pub fn reset_all(&self) {
        self.balance.reset();
        self.credits.reset();
        self.spendings.reset();
        self.categories.reset();
        self.goals.reset();
        self.recommendations.reset();
        self.reminders.reset();
    }

    pub fn is_empty(&self) -> bool {
        self.balance.snapshot() == DomainState::default()
            && self.credits.snapshot() == DomainState::default()
            && self.spendings.snapshot() == DomainState::default()
            && self.categories.snapshot() == DomainState::default()
            && self.goals.snapshot() == DomainState::default()
            && self.recommendations.snapshot() == DomainState::default()
            && self.reminders.snapshot() == DomainState::default()
    }
}
