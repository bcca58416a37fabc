// Handlers module
// HTTP handlers for the REST API

pub mod transactions;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::db::Database;

/// Health check response body. `database` carries the connectivity status
/// of the hosted database; the endpoint itself always answers 200.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub database: String,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn new(database_connected: bool) -> Self {
        HealthResponse {
            status: "OK".to_string(),
            message: "Finance server is running".to_string(),
            database: database_status(database_connected).to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Map the result of the connectivity probe onto the reported status string.
pub fn database_status(connected: bool) -> &'static str {
    if connected {
        "connected"
    } else {
        "disconnected"
    }
}

/// Health check handler
/// GET /health
/// Reports service liveness plus database reachability. Database failures
/// are logged and reflected in the payload, never in the status code.
pub async fn health_check(State(db): State<Arc<Database>>) -> impl IntoResponse {
    let connected = match db.check_connection().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Health check database probe failed: {}", e);
            false
        }
    };

    (StatusCode::OK, Json(HealthResponse::new(connected)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_status_mapping() {
        assert_eq!(database_status(true), "connected");
        assert_eq!(database_status(false), "disconnected");
    }

    #[test]
    fn test_health_response_shape() {
        let response = HealthResponse::new(true);
        let json = serde_json::to_value(&response).expect("Failed to serialize health response");

        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 4);
        assert_eq!(json["status"], "OK");
        assert_eq!(json["database"], "connected");
        assert!(json["message"].as_str().unwrap().contains("running"));

        // Timestamp must be RFC 3339
        let timestamp = json["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    }

    #[test]
    fn test_health_response_disconnected() {
        let response = HealthResponse::new(false);
        assert_eq!(response.database, "disconnected");
        assert_eq!(response.status, "OK");
    }
}
