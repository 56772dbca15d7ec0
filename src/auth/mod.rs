//! Authentication module for managing the user session.
//!
//! This module provides:
//! - `SessionManager`: owns the session lifecycle (login, register,
//!   logout, startup restore) and the API client's bearer token
//! - `SessionStore`: the secure key-value persistence seam, with a
//!   keychain-backed implementation and an in-memory one for tests
//!
//! Sessions persist across restarts in the OS keychain, one field per key.

pub mod session;
pub mod store;

pub use session::{Role, Session, SessionManager};
pub use store::{KeyringStore, MemoryStore, SessionStore, StoreError};
