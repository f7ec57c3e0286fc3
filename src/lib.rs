// ===============================
// src/lib.rs
// ===============================
pub mod auth;
pub mod client;
pub mod colors;
pub mod config;
pub mod coordinator;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod session;
pub mod store;
pub mod translate;

#[cfg(test)]
mod test_support;

pub use client::{HttpClient, RemoteClient, RemoteError};
pub use coordinator::{Coordinator, LoadReport, Mutation};
pub use error::{SyncError, TranslatedError};
pub use session::Session;
pub use store::{DomainState, DomainStore, Resource, Stores};
