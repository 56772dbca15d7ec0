use serde::{Deserialize, Serialize};

/// Body for `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body for `POST /auth/register`.
///
/// The optional fields seed the customer profile created on first
/// registration; couriers are recognized by email and skip them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
}

/// Success body shared by login and register.
///
/// `role` stays a raw string here; the session layer parses and rejects
/// values it does not recognize. `email` is echoed by some deployments
/// only, so the caller-supplied address is authoritative.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub role: String,
    #[serde(default)]
    pub courier_id: Option<i64>,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_parses_full_body() {
        let json = r#"{"token":"jwt","role":"COURIER","courierId":7,"customerId":null}"#;
        let resp: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.token, "jwt");
        assert_eq!(resp.role, "COURIER");
        assert_eq!(resp.courier_id, Some(7));
        assert_eq!(resp.customer_id, None);
        assert_eq!(resp.email, None);
    }

    #[test]
    fn test_auth_response_tolerates_missing_ids() {
        // Dispatcher accounts carry neither id
        let json = r#"{"token":"jwt","role":"DISPATCHER"}"#;
        let resp: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.courier_id, None);
        assert_eq!(resp.customer_id, None);
    }

    #[test]
    fn test_register_payload_skips_absent_fields() {
        let payload = RegisterPayload {
            email: "a@b.c".into(),
            password: "pw".into(),
            name: "Ana".into(),
            phone: None,
            pickup_address: Some("Str. Lunga 1".into()),
            delivery_address: None,
            contact_person: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["pickupAddress"], "Str. Lunga 1");
        assert!(json.get("phone").is_none());
        assert!(json.get("deliveryAddress").is_none());
    }
}
