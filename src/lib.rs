//! sdt-client - client core for the Smart Delivery Tracker.
//!
//! This crate is the shared, UI-free core the delivery tracker clients
//! sit on: a REST API client for the backend (couriers, customers,
//! packages, support chat) and a session manager that owns the
//! authentication lifecycle - login, register, logout and restoring a
//! persisted session at startup.
//!
//! Typical startup:
//!
//! ```no_run
//! use sdt_client::{ApiClient, Config, KeyringStore, SessionManager};
//!
//! # async fn start() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let api = ApiClient::new(config.api_base_url())?;
//! let sessions = SessionManager::new(api.clone(), Box::new(KeyringStore::new()));
//!
//! // Before showing any screen that depends on auth state
//! if sessions.restore().await {
//!     // straight to the home screen
//! } else {
//!     // show the login screen
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiClient, ApiError};
pub use auth::{KeyringStore, MemoryStore, Role, Session, SessionManager, SessionStore};
pub use config::Config;
