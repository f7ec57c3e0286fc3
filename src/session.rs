// ===============================
// src/session.rs
// ===============================
use std::sync::Arc;

use crate::auth::{AuthListener, AuthSignal, ResetOnLogout};
use crate::client::{HttpClient, RemoteClient};
use crate::coordinator::Coordinator;
use crate::store::Stores;

/// Everything one signed-in user needs, built once and passed around explicitly.
pub struct Session {
    stores: Arc<Stores>,
    auth: AuthSignal,
    http: Option<Arc<HttpClient>>,
}

impl Session {
    pub fn new(client: Arc<dyn RemoteClient>, authenticated: bool) -> Self {
        let stores = Arc::new(Stores::new(client));
        let reset: Arc<dyn AuthListener> = Arc::new(ResetOnLogout::new(stores.clone()));
        let auth = AuthSignal::new(authenticated, vec![reset]);
        Self { stores, auth, http: None }
    }

    /// Same as `new`, but `login`/`logout` also swap the bearer token.
    pub fn with_http(client: Arc<HttpClient>, authenticated: bool) -> Self {
        let mut session = Self::new(client.clone(), authenticated);
        session.http = Some(client);
        session
    }

    pub fn stores(&self) -> &Arc<Stores> {
        &self.stores
    }

    pub fn auth(&self) -> &AuthSignal {
        &self.auth
    }

    pub fn coordinator(&self) -> Coordinator {
        Coordinator::new(self.stores.clone(), self.auth.subscribe())
    }

    pub fn set_authenticated(&self, authenticated: bool) {
        self.auth.set(authenticated);
    }

    // Token dulu, baru flag: coordinator tidak boleh jalan dengan token lama
    pub async fn login(&self, token: String) {
        if let Some(http) = &self.http {
            http.set_token(Some(token)).await;
        }
        self.auth.set(true);
    }

    pub async fn logout(&self) {
        self.auth.set(false);
        if let Some(http) = &self.http {
            http.set_token(None).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use crate::store::DomainStore;
    use crate::test_support::happy_backend;

    #[tokio::test]
    async fn login_load_logout_cycle() {
        let fake = happy_backend();
        let session = Session::new(fake.clone(), false);
        let coord = session.coordinator();

        assert_eq!(coord.load_all_data().await.unwrap_err(), SyncError::Unauthenticated);

        session.set_authenticated(true);
        coord.load_all_data().await.unwrap();
        assert!(session.stores().credits.snapshot().data.is_some());

        session.set_authenticated(false);
        assert!(session.stores().is_empty());
        assert_eq!(coord.delete_goal(1).await.unwrap_err(), SyncError::Unauthenticated);
    }

    #[tokio::test]
    async fn login_and_logout_flip_the_signal() {
        let session = Session::new(happy_backend(), false);
        let coord = session.coordinator();

        session.login("tok".to_string()).await;
        assert!(session.auth().is_authenticated());
        coord.set_current_goal_by_id(1).await.unwrap();
        assert!(!session.stores().is_empty());

        session.logout().await;
        assert!(!session.auth().is_authenticated());
        assert!(session.stores().is_empty());
    }

    #[tokio::test]
    async fn http_session_starts_anonymous_without_touching_network() {
        let http = Arc::new(
            HttpClient::new("http://127.0.0.1:9/api".parse().unwrap(), std::time::Duration::from_millis(50), None)
                .unwrap(),
        );
        let session = Session::with_http(http, false);

        let err = session.coordinator().load_all_data().await.unwrap_err();
        assert_eq!(err, SyncError::Unauthenticated);
        session.logout().await;
        assert!(session.stores().is_empty());
    }

    #[tokio::test]
    async fn sessions_do_not_share_state() {
        let a = Session::new(happy_backend(), true);
        let b = Session::new(happy_backend(), true);

        a.coordinator().load_all_data().await.unwrap();

        assert!(a.stores().balance.snapshot().data.is_some());
        assert!(b.stores().is_empty());
    }
}
