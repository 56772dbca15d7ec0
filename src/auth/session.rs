//! Session lifecycle: login, register, logout and startup restore.
//!
//! `SessionManager` is the single owner of the authenticated session.
//! It keeps the in-memory record, mirrors it into the secure store one
//! field per key, and keeps the API client's bearer token in step with
//! every transition. UI layers hold it behind a shared handle and only
//! ever read snapshots.

use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError};
use crate::auth::store::SessionStore;
use crate::models::{AuthResponse, LoginRequest, RegisterPayload};

/// Store keys, one per persisted session field
const KEY_TOKEN: &str = "token";
const KEY_EMAIL: &str = "email";
const KEY_ROLE: &str = "role";
const KEY_COURIER_ID: &str = "courierId";
const KEY_CUSTOMER_ID: &str = "customerId";

const ALL_KEYS: [&str; 5] = [KEY_TOKEN, KEY_EMAIL, KEY_ROLE, KEY_COURIER_ID, KEY_CUSTOMER_ID];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Dispatcher,
    Courier,
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Dispatcher => "DISPATCHER",
            Role::Courier => "COURIER",
            Role::Customer => "CUSTOMER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DISPATCHER" => Ok(Role::Dispatcher),
            "COURIER" => Ok(Role::Courier),
            "CUSTOMER" => Ok(Role::Customer),
            other => Err(ApiError::InvalidResponse(format!("Unknown role: {}", other))),
        }
    }
}

/// The authenticated session. Present as a whole or not at all:
/// a logged-out process holds no partial remnants of a previous login.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub email: String,
    pub role: Role,
    pub courier_id: Option<i64>,
    pub customer_id: Option<i64>,
}

struct SessionState {
    session: Option<Session>,
    /// False until the first `restore()` finishes, so callers can tell
    /// "still checking the store" apart from "definitely logged out"
    restored: bool,
}

pub struct SessionManager {
    api: ApiClient,
    store: Box<dyn SessionStore>,
    state: RwLock<SessionState>,
    /// Serializes restore/login/register/logout so a double-submitted
    /// login cannot interleave its store writes with another call
    op_guard: tokio::sync::Mutex<()>,
}

impl SessionManager {
    pub fn new(api: ApiClient, store: Box<dyn SessionStore>) -> Self {
        Self {
            api,
            store,
            state: RwLock::new(SessionState {
                session: None,
                restored: false,
            }),
            op_guard: tokio::sync::Mutex::new(()),
        }
    }

    /// Snapshot of the current session, if authenticated
    pub fn session(&self) -> Option<Session> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .session
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .session
            .is_some()
    }

    /// Whether the startup restore has run. Until it has, an anonymous
    /// state means "undetermined", not "logged out".
    pub fn has_restored(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .restored
    }

    /// Restore a persisted session at startup. Best effort: a missing or
    /// unreadable field means no prior session rather than a failed launch.
    /// Returns true if a session was found.
    pub async fn restore(&self) -> bool {
        let _guard = self.op_guard.lock().await;

        let found = match self.read_persisted() {
            Some(session) => {
                self.api.set_bearer_token(&session.token);
                debug!(role = %session.role, "Restored persisted session");
                self.replace(Some(session));
                true
            }
            None => false,
        };

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.restored = true;
        found
    }

    /// Authenticate against `POST /auth/login`. On success the session is
    /// replaced as a unit: bearer token set, all five fields persisted,
    /// in-memory record swapped. On any failure the prior state is kept.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let _guard = self.op_guard.lock().await;

        if email.trim().is_empty() || password.is_empty() {
            return Err(ApiError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let response = self
            .api
            .login(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;

        // The server may omit the email echo; the caller's value wins
        self.apply_auth(response, email.to_string())
    }

    /// Create an account against `POST /auth/register`. Same
    /// all-or-nothing contract and error taxonomy as `login`.
    pub async fn register(&self, payload: &RegisterPayload) -> Result<Session, ApiError> {
        let _guard = self.op_guard.lock().await;

        if payload.email.trim().is_empty() || payload.password.is_empty() {
            return Err(ApiError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let response = self.api.register(payload).await?;
        self.apply_auth(response, payload.email.clone())
    }

    /// Drop the session: bearer token, persisted fields, in-memory record.
    /// No remote call, idempotent. The in-memory state and the token are
    /// cleared before touching the store, so even a store failure leaves
    /// the process logged out; the failure still propagates so the caller
    /// can tell the user the device may retain stale fields.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let _guard = self.op_guard.lock().await;

        self.api.clear_bearer_token();
        self.replace(None);

        let mut first_err = None;
        for key in ALL_KEYS {
            if let Err(e) = self.store.delete(key) {
                warn!(key, error = %e, "Failed to delete session field");
                first_err.get_or_insert(e);
            }
        }

        match first_err {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    // ===== Internals =====

    fn replace(&self, session: Option<Session>) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .session = session;
    }

    /// Read one field, logging and swallowing store errors (restore path)
    fn read_field(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!(key, error = %e, "Failed to read persisted session field");
                None
            }
        }
    }

    /// Rebuild the session from the store, if token and role are both there
    fn read_persisted(&self) -> Option<Session> {
        let token = self.read_field(KEY_TOKEN)?;
        let role_raw = self.read_field(KEY_ROLE)?;

        let role = match Role::from_str(&role_raw) {
            Ok(role) => role,
            Err(_) => {
                warn!(role = %role_raw, "Persisted role is not recognized, discarding session");
                return None;
            }
        };

        Some(Session {
            token,
            email: self.read_field(KEY_EMAIL).unwrap_or_default(),
            role,
            courier_id: self.read_field(KEY_COURIER_ID).and_then(|v| v.parse().ok()),
            customer_id: self.read_field(KEY_CUSTOMER_ID).and_then(|v| v.parse().ok()),
        })
    }

    /// Commit a successful auth response: header, store, in-memory record.
    /// A store failure propagates; a half-written store is surfaced rather
    /// than silently accepted, and the next restore still sees the old
    /// token/role pair until both were overwritten.
    fn apply_auth(&self, response: AuthResponse, fallback_email: String) -> Result<Session, ApiError> {
        let role = Role::from_str(&response.role)?;

        let session = Session {
            token: response.token,
            email: response.email.unwrap_or(fallback_email),
            role,
            courier_id: response.courier_id,
            customer_id: response.customer_id,
        };

        self.api.set_bearer_token(&session.token);
        self.persist(&session)?;
        self.replace(Some(session.clone()));

        debug!(role = %session.role, "Session established");
        Ok(session)
    }

    /// Write all five fields; absent numeric fields persist as empty strings
    fn persist(&self, session: &Session) -> Result<(), ApiError> {
        let courier_id = session
            .courier_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        let customer_id = session
            .customer_id
            .map(|id| id.to_string())
            .unwrap_or_default();

        self.store.set(KEY_TOKEN, &session.token)?;
        self.store.set(KEY_ROLE, session.role.as_str())?;
        self.store.set(KEY_EMAIL, &session.email)?;
        self.store.set(KEY_COURIER_ID, &courier_id)?;
        self.store.set(KEY_CUSTOMER_ID, &customer_id)?;
        Ok(())
    }
}
