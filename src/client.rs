// ===============================
// src/client.rs
// ===============================
//
// Remote Resource Client:
// - RemoteClient : seam yang dipakai semua store (mudah di-fake di test)
// - HttpClient   : implementasi reqwest + bearer token
//
// Every failure (transport, backend, decode) collapses into RemoteError so the
// translators only ever see `{ message, status }`.
//
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (status {status:?})")]
pub struct RemoteError {
    pub message: String,
    pub status: Option<u16>,
}

impl RemoteError {
    pub fn new(message: impl Into<String>, status: Option<u16>) -> Self {
        Self { message: message.into(), status }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Performs one call; `path` is relative to the API base.
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, RemoteError>;
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, RemoteError> {
    serde_json::from_value(value)
        .map_err(|e| RemoteError::new(format!("malformed response: {e}"), None))
}

fn encode<B: Serialize>(body: &B) -> Result<Value, RemoteError> {
    serde_json::to_value(body).map_err(|e| RemoteError::new(format!("unencodable request: {e}"), None))
}

pub async fn get<T: DeserializeOwned>(client: &dyn RemoteClient, path: &str) -> Result<T, RemoteError> {
    decode(client.send(Method::Get, path, None).await?)
}

pub async fn post<T, B>(client: &dyn RemoteClient, path: &str, body: &B) -> Result<T, RemoteError>
where
    T: DeserializeOwned,
    B: Serialize,
{
    let body = encode(body)?;
    decode(client.send(Method::Post, path, Some(body)).await?)
}

pub async fn put<T, B>(client: &dyn RemoteClient, path: &str, body: Option<&B>) -> Result<T, RemoteError>
where
    T: DeserializeOwned,
    B: Serialize,
{
    let body = body.map(encode).transpose()?;
    decode(client.send(Method::Put, path, body).await?)
}

pub async fn delete<T: DeserializeOwned>(client: &dyn RemoteClient, path: &str) -> Result<T, RemoteError> {
    decode(client.send(Method::Delete, path, None).await?)
}

/// reqwest-backed client against the finance backend.
pub struct HttpClient {
    http: reqwest::Client,
    base: Url,
    token: RwLock<Option<String>>,
}

impl HttpClient {
    pub fn new(base: Url, timeout: Duration, token: Option<String>) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::new(format!("http client init failed: {e}"), None))?;
        Ok(Self { http, base, token: RwLock::new(token) })
    }

    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Backend sends `{ "error": "..." }`; some endpoints use `message` instead.
fn backend_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(body) {
        for key in ["error", "message"] {
            if let Some(msg) = v.get(key).and_then(Value::as_str) {
                return msg.to_string();
            }
        }
    }
    if !body.trim().is_empty() {
        return body.trim().to_string();
    }
    status.canonical_reason().unwrap_or("request failed").to_string()
}

#[async_trait]
impl RemoteClient for HttpClient {
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, RemoteError> {
        let url = self.url_for(path);
        let mut req = match method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Put => self.http.put(&url),
            Method::Delete => self.http.delete(&url),
        };
        if let Some(token) = self.token.read().await.as_deref() {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }

        debug!(%method, %url, "request");
        let rsp = req
            .send()
            .await
            .map_err(|e| RemoteError::new(e.to_string(), e.status().map(|s| s.as_u16())))?;

        let status = rsp.status();
        let text = rsp
            .text()
            .await
            .map_err(|e| RemoteError::new(e.to_string(), Some(status.as_u16())))?;

        if !status.is_success() {
            return Err(RemoteError::new(backend_message(&text, status), Some(status.as_u16())));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| RemoteError::new(format!("malformed response: {e}"), Some(status.as_u16())))
    }
}
