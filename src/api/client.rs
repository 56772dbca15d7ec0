//! HTTP client for the Smart Delivery Tracker REST API.
//!
//! `ApiClient` wraps `reqwest::Client` with the backend base URL and a
//! shared bearer-token slot. The slot is the explicit form of the
//! "default Authorization header": the session manager is its only
//! writer, every request method is a reader. Clones share both the
//! connection pool and the slot, so a token set on one handle is seen
//! by all of them.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::models::{
    AuthResponse, ChatReply, ChatRequest, Courier, CourierCreate, CourierPatch, Customer,
    CustomerCreate, LoginRequest, Package, PackageCreate, Page, PageRequest, RegisterPayload,
};

use super::ApiError;

/// HTTP request timeout in seconds.
/// Matches the 10s the mobile and web clients have always used:
/// long enough for a slow backend, short enough to fail fast on dead links.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// API client for the delivery tracker backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a client against `base_url` (e.g. `http://localhost:8080/api`)
    /// with the standard request timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::from_transport)?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            client,
            base_url,
            token: Arc::new(RwLock::new(None)),
        })
    }

    // ===== Credential slot =====

    /// Set the bearer token attached to every subsequent request
    pub fn set_bearer_token(&self, token: &str) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    /// Drop the bearer token; subsequent requests go out unauthenticated
    pub fn clear_bearer_token(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Current bearer token, if any
    pub fn bearer_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn auth_headers(&self) -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = self.bearer_token() {
            match header::HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(header::AUTHORIZATION, value);
                }
                Err(e) => {
                    warn!(error = %e, "Bearer token is not header-safe, request goes out unauthenticated");
                }
            }
        }
        headers
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ===== Auth endpoints (no bearer header) =====

    /// `POST /auth/login`
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post_unauthenticated("/auth/login", request).await
    }

    /// `POST /auth/register`
    pub async fn register(&self, payload: &RegisterPayload) -> Result<AuthResponse, ApiError> {
        self.post_unauthenticated("/auth/register", payload).await
    }

    async fn post_unauthenticated<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        // Any rejection here is an authentication failure, whatever the code
        if !status.is_success() {
            debug!(url = %url, status = %status, "Auth request rejected");
            return Err(ApiError::from_auth_status(status, &text));
        }

        serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response from {}: {}", url, e))
        })
    }

    // ===== Generic request helpers =====

    /// Check status and decode the body, surfacing the server message on failure
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
        url: &str,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        if !status.is_success() {
            debug!(url, status = %status, "Request rejected");
            return Err(ApiError::from_status(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response from {}: {}", url, e))
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers())
            .query(query)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        Self::parse_response(response, &url).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers())
            .json(body)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        Self::parse_response(response, &url).await
    }

    /// POST carrying query parameters instead of a body
    async fn post_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers())
            .query(query)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        Self::parse_response(response, &url).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self
            .client
            .patch(&url)
            .headers(self.auth_headers())
            .json(body)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        Self::parse_response(response, &url).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        let response = self
            .client
            .delete(&url)
            .headers(self.auth_headers())
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    // ===== Couriers =====

    pub async fn fetch_couriers(&self, page: &PageRequest) -> Result<Page<Courier>, ApiError> {
        self.get("/couriers", &page.to_query()).await
    }

    pub async fn fetch_courier(&self, id: i64) -> Result<Courier, ApiError> {
        self.get(&format!("/couriers/{}", id), &[]).await
    }

    pub async fn create_courier(&self, courier: &CourierCreate) -> Result<Courier, ApiError> {
        self.post("/couriers", courier).await
    }

    /// Partial update; couriers report their position through this
    pub async fn patch_courier(&self, id: i64, patch: &CourierPatch) -> Result<Courier, ApiError> {
        self.patch(&format!("/couriers/{}", id), patch).await
    }

    pub async fn delete_courier(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/couriers/{}", id)).await
    }

    pub async fn fetch_packages_by_courier(
        &self,
        courier_id: i64,
        page: &PageRequest,
    ) -> Result<Page<Package>, ApiError> {
        self.get(&format!("/couriers/{}/packages", courier_id), &page.to_query())
            .await
    }

    // ===== Customers =====

    pub async fn fetch_customers(&self, page: &PageRequest) -> Result<Page<Customer>, ApiError> {
        self.get("/customers", &page.to_query()).await
    }

    pub async fn fetch_customer(&self, id: i64) -> Result<Customer, ApiError> {
        self.get(&format!("/customers/{}", id), &[]).await
    }

    pub async fn create_customer(&self, customer: &CustomerCreate) -> Result<Customer, ApiError> {
        self.post("/customers", customer).await
    }

    pub async fn fetch_packages_by_customer(
        &self,
        customer_id: i64,
        page: &PageRequest,
    ) -> Result<Page<Package>, ApiError> {
        self.get(
            &format!("/customers/{}/packages", customer_id),
            &page.to_query(),
        )
        .await
    }

    // ===== Packages =====

    pub async fn create_package(&self, package: &PackageCreate) -> Result<Package, ApiError> {
        self.post("/packages", package).await
    }

    pub async fn fetch_package(&self, id: i64) -> Result<Package, ApiError> {
        self.get(&format!("/packages/{}", id), &[]).await
    }

    /// Assign a package to a courier; moves NEW packages to PENDING
    pub async fn assign_package(&self, id: i64, courier_id: i64) -> Result<Package, ApiError> {
        self.post_query(
            &format!("/packages/{}/assign", id),
            &[("courierId", courier_id.to_string())],
        )
        .await
    }

    /// Mark a package delivered
    pub async fn deliver_package(&self, id: i64) -> Result<Package, ApiError> {
        self.post_query(&format!("/packages/{}/deliver", id), &[])
            .await
    }

    // ===== Support =====

    /// `POST /support/chat` - ask the support assistant a question
    pub async fn support_chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError> {
        self.post("/support/chat", request).await
    }
}
