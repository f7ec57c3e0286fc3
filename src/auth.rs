// ===============================
// src/auth.rs
// ===============================
//
// Auth signal + reset layer.
// - Coordinator membaca flag lewat watch::Receiver<bool>
// - Listener dipanggil sinkron, berurutan sesuai urutan registrasi
//
use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::metrics::AUTH_RESETS;
use crate::store::Stores;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    LoggedIn,
    LoggedOut,
}

pub trait AuthListener: Send + Sync {
    fn on_auth_event(&self, event: AuthEvent);
}

pub struct AuthSignal {
    state: watch::Sender<bool>,
    listeners: Vec<Arc<dyn AuthListener>>,
}

impl AuthSignal {
    pub fn new(initial: bool, listeners: Vec<Arc<dyn AuthListener>>) -> Self {
        let (state, _rx) = watch::channel(initial);
        Self { state, listeners }
    }

    pub fn is_authenticated(&self) -> bool {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }

    /// Login is only announced on a real transition; logout is announced every time.
    pub fn set(&self, authenticated: bool) {
        let changed = self.state.send_if_modified(|v| {
            if *v == authenticated {
                return false;
            }
            *v = authenticated;
            true
        });

        let event = match (authenticated, changed) {
            (true, true) => AuthEvent::LoggedIn,
            (true, false) => return,
            (false, _) => AuthEvent::LoggedOut,
        };
        info!(?event, "auth changed");
        for l in &self.listeners {
            l.on_auth_event(event);
        }
    }
}

/// Clears every per-user store once the session is gone.
pub struct ResetOnLogout {
    stores: Arc<Stores>,
}

impl ResetOnLogout {
    pub fn new(stores: Arc<Stores>) -> Self {
        Self { stores }
    }
}

impl AuthListener for ResetOnLogout {
    fn on_auth_event(&self, event: AuthEvent) {
        if event != AuthEvent::LoggedOut || self.stores.is_empty() {
            return;
        }
        self.stores.reset_all();
        AUTH_RESETS.inc();
        info!("stores reset after logout");
    }
}
