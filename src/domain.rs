// ===============================
// src/domain.rs
// ===============================
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// `null` dan field yang hilang sama-sama jadi Vec kosong
fn vec_or_null<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(de).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_delete: bool,
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// One row of the current month's spending summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMonthTotal {
    pub name: String,
    #[serde(default)]
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub wish_date: Option<NaiveDate>,
    #[serde(default)]
    pub achievement_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_achieved: bool,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub is_delete: bool,
}

/// Income entry. With `is_permanent` it recurs until `end_date` (open-ended when `None`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credit {
    pub id: i64,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_permanent: bool,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub full_amount: f64,
}

/// Expense entry, same recurrence rules as [`Credit`] plus its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spending {
    pub id: i64,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_permanent: bool,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub full_amount: f64,
    pub category_id: i64,
    #[serde(default)]
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
}

/// Daily allowance reminder towards the current goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    #[serde(default)]
    pub id: Option<i64>,
    pub date: NaiveDate,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub daily_limit: Option<f64>,
}

// ---- Request payloads ----

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditPayload {
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
    pub is_permanent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingPayload {
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
    pub is_permanent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub category_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPayload {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalPayload {
    pub amount: f64,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wish_date: Option<NaiveDate>,
}

/// Raw backend answer to add/update/delete, handed back to callers unchanged.
/// An empty body (204, or 200 with nothing) decodes as the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActionResponse {
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct ActionBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl<'de> Deserialize<'de> for ActionResponse {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        Ok(Option::<ActionBody>::deserialize(de)?
            .map(|b| ActionResponse { message: b.message, extra: b.extra })
            .unwrap_or_default())
    }
}

// ---- Response envelopes ----

#[derive(Debug, Deserialize)]
pub(crate) struct BalanceEnvelope {
    #[serde(default)]
    pub balance: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreditList {
    #[serde(default, deserialize_with = "vec_or_null")]
    pub credits: Vec<Credit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpendingList {
    #[serde(default, deserialize_with = "vec_or_null")]
    pub spendings: Vec<Spending>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryList {
    #[serde(default, deserialize_with = "vec_or_null")]
    pub categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryMonthList {
    #[serde(default, deserialize_with = "vec_or_null")]
    pub categories: Vec<CategoryMonthTotal>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GoalList {
    #[serde(default, deserialize_with = "vec_or_null")]
    pub goals: Vec<Goal>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationList {
    #[serde(default, deserialize_with = "vec_or_null")]
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReminderList {
    #[serde(default, deserialize_with = "vec_or_null")]
    pub reminders: Vec<Reminder>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TodayReminder {
    #[serde(default)]
    pub reminder: Option<Reminder>,
}
