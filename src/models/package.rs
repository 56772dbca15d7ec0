use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageStatus {
    New,
    Pending,
    Delivered,
}

impl std::fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackageStatus::New => write!(f, "New"),
            PackageStatus::Pending => write!(f, "Pending"),
            PackageStatus::Delivered => write!(f, "Delivered"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: i64,
    pub tracking_code: String,
    pub status: PackageStatus,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    pub pickup_address: String,
    pub delivery_address: String,
    #[serde(default)]
    pub courier_id: Option<i64>,
    #[serde(default)]
    pub sender_customer_id: Option<i64>,
    #[serde(default)]
    pub assigned_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub delivered_at: Option<DateTime<Utc>>,
}

impl Package {
    /// A package is still in motion until the courier confirms delivery
    pub fn is_open(&self) -> bool {
        self.status != PackageStatus::Delivered
    }
}

/// Body for `POST /packages` and `POST /customers/{id}/packages`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageCreate {
    pub pickup_address: String,
    pub delivery_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courier_id: Option<i64>,
    pub sender_customer_id: i64,
}
