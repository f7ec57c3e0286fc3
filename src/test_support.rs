// ===============================
// src/test_support.rs
// ===============================
//
// Scripted in-memory backend for store/coordinator tests.
//   push()  : one-shot reply (FIFO per route)
//   ok/fail : sticky reply, dipakai saat antrian kosong
//   hold()  : reply ditahan sampai test mengirim lewat oneshot
//
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::oneshot;

use crate::client::{Method, RemoteClient, RemoteError};

type Route = (Method, String);
type Outcome = Result<Value, RemoteError>;

pub(crate) enum Reply {
    Now(Outcome),
    Held(oneshot::Receiver<Outcome>),
}

#[derive(Default)]
pub(crate) struct FakeClient {
    queued: Mutex<HashMap<Route, VecDeque<Reply>>>,
    sticky: Mutex<HashMap<Route, Outcome>>,
    calls: Mutex<Vec<(Method, String, Option<Value>)>>,
}

impl FakeClient {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn push(&self, method: Method, path: &str, outcome: Outcome) {
        self.queued
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(Reply::Now(outcome));
    }

    pub(crate) fn hold(&self, method: Method, path: &str) -> oneshot::Sender<Outcome> {
        let (tx, rx) = oneshot::channel();
        self.queued
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(Reply::Held(rx));
        tx
    }

    pub(crate) fn ok(&self, method: Method, path: &str, body: Value) {
        self.sticky.lock().unwrap().insert((method, path.to_string()), Ok(body));
    }

    pub(crate) fn fail(&self, method: Method, path: &str, err: RemoteError) {
        self.sticky.lock().unwrap().insert((method, path.to_string()), Err(err));
    }

    pub(crate) fn calls(&self) -> Vec<(Method, String)> {
        self.calls.lock().unwrap().iter().map(|(m, p, _)| (*m, p.clone())).collect()
    }

    pub(crate) fn count(&self, method: Method, path: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|(m, p, _)| *m == method && p == path).count()
    }

    pub(crate) fn last_body(&self, method: Method, path: &str) -> Option<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(m, p, _)| *m == method && p == path)
            .and_then(|(_, _, body)| body.clone())
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

#[async_trait]
impl RemoteClient for FakeClient {
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, RemoteError> {
        self.calls.lock().unwrap().push((method, path.to_string(), body));
        let route = (method, path.to_string());

        let queued = self.queued.lock().unwrap().get_mut(&route).and_then(VecDeque::pop_front);
        match queued {
            Some(Reply::Now(outcome)) => outcome,
            Some(Reply::Held(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(RemoteError::new("held reply dropped", None))),
            None => {
                let sticky = self.sticky.lock().unwrap().get(&route).cloned();
                sticky.unwrap_or_else(|| Err(RemoteError::new(format!("no route {method} {path}"), Some(404))))
            }
        }
    }
}

pub(crate) fn credit_json(id: i64) -> Value {
    json!({
        "id": id,
        "amount": 50000.0,
        "description": "salary",
        "date": "2024-05-10",
        "is_permanent": true,
        "end_date": null,
        "full_amount": 150000.0
    })
}

pub(crate) fn spending_json(id: i64, category_id: i64) -> Value {
    json!({
        "id": id,
        "amount": 1200.0,
        "description": "groceries",
        "date": "2024-05-11",
        "is_permanent": false,
        "category_id": category_id
    })
}

pub(crate) fn category_json(id: i64, name: &str) -> Value {
    json!({ "id": id, "name": name, "description": "", "is_delete": false, "user_id": 1 })
}

pub(crate) fn goal_json(id: i64, is_current: bool) -> Value {
    json!({
        "id": id,
        "amount": 300000.0,
        "description": "vacation",
        "wish_date": "2025-01-01",
        "achievement_date": null,
        "is_achieved": false,
        "is_current": is_current,
        "is_delete": false
    })
}

/// Every read endpoint answers; every mutation answers `{message: "ok"}`.
pub(crate) fn happy_backend() -> Arc<FakeClient> {
    let fake = FakeClient::new();
    fake.ok(Method::Get, "balance", json!({ "balance": 48800.0 }));
    fake.ok(Method::Get, "credits", json!({ "credits": [credit_json(1)] }));
    fake.ok(Method::Get, "spendings", json!({ "spendings": [spending_json(1, 1)] }));
    fake.ok(Method::Get, "categories", json!({ "categories": [category_json(1, "food"), category_json(2, "rent")] }));
    fake.ok(Method::Get, "categories/month", json!({ "categories": [{ "name": "food", "amount": 1200.0 }] }));
    fake.ok(Method::Get, "goals", json!({ "goals": [goal_json(1, true)] }));
    fake.ok(Method::Get, "goals/current", goal_json(1, true));
    fake.ok(Method::Get, "recommendations", json!({ "recommendations": [{ "title": "Save", "text": "Keep going" }] }));
    fake.ok(Method::Get, "reminders/today", json!({ "reminder": { "date": "2024-05-11", "text": "900 left today", "daily_limit": 900.0 } }));
    fake.ok(Method::Get, "reminders", json!({ "reminders": [] }));

    let ok = json!({ "message": "ok" });
    for (method, path) in [
        (Method::Post, "credits"),
        (Method::Put, "credits/1"),
        (Method::Delete, "credits/1"),
        (Method::Post, "spendings"),
        (Method::Put, "spendings/1"),
        (Method::Delete, "spendings/1"),
        (Method::Post, "categories"),
        (Method::Put, "categories/1"),
        (Method::Delete, "categories/1"),
        (Method::Post, "goals"),
        (Method::Put, "goals/1"),
        (Method::Delete, "goals/1"),
        (Method::Put, "goals/1/current"),
    ] {
        fake.ok(method, path, ok.clone());
    }
    fake
}
