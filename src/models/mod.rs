//! Data models for Smart Delivery Tracker entities.
//!
//! Wire shapes match the backend's JSON (camelCase field names):
//!
//! - `Package`, `PackageCreate`: shipments and their lifecycle status
//! - `Courier`, `Customer`: the two actor types packages move between
//! - `Page`, `PageRequest`: Spring-style pagination envelope
//! - Auth types: `LoginRequest`, `RegisterPayload`, `AuthResponse`
//! - `ChatRequest`, `ChatReply`: support chat exchange

pub mod auth;
pub mod courier;
pub mod customer;
pub mod package;
pub mod page;
pub mod support;

pub use auth::{AuthResponse, LoginRequest, RegisterPayload};
pub use courier::{Courier, CourierCreate, CourierPatch};
pub use customer::{Customer, CustomerCreate};
pub use package::{Package, PackageCreate, PackageStatus};
pub use page::{Page, PageRequest};
pub use support::{ChatReply, ChatRequest};
