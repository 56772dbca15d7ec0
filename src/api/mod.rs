//! REST API client module for the Smart Delivery Tracker backend.
//!
//! This module provides the `ApiClient` for talking to the delivery
//! tracker's REST API: auth, couriers, customers, packages and the
//! support chat.
//!
//! The API uses JWT bearer token authentication obtained through the
//! `/auth/login` and `/auth/register` endpoints; the session manager
//! owns the token lifecycle.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
