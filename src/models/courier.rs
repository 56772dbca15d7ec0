use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Courier {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub manager_id: Option<i64>,
    #[serde(default)]
    pub last_lat: Option<f64>,
    #[serde(default)]
    pub last_lng: Option<f64>,
}

impl Courier {
    /// Last reported position, if the courier has ever pinged one
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.last_lat, self.last_lng) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }
}

/// Body for `POST /couriers`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourierCreate {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_lng: Option<f64>,
}

/// Body for `PATCH /couriers/{id}` - every field optional, only
/// supplied fields change (couriers push location this way)
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourierPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_lng: Option<f64>,
}

impl CourierPatch {
    /// Patch that only updates the courier's last known position
    pub fn location(lat: f64, lng: f64) -> Self {
        Self {
            last_lat: Some(lat),
            last_lng: Some(lng),
            ..Self::default()
        }
    }
}
