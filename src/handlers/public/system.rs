use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::{ResponseTemplate, ResponseTemplateStatus};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthInfo {
    pub status: &'static str,
    pub store: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// GET /
pub async fn root() -> ResponseTemplate<ServiceInfo> {
    ResponseTemplate::success(ServiceInfo {
        name: "Mummoom API (Rust)",
        version: env!("CARGO_PKG_VERSION"),
        description: "Community board and ingredient catalog",
    })
}

/// GET /health - DB_ERROR when the store cannot be reached
pub async fn health(State(state): State<AppState>) -> ResponseTemplate<HealthInfo> {
    match state.store.health_check().await {
        Ok(()) => ResponseTemplate::success(HealthInfo {
            status: "ok",
            store: state.store.backend_name(),
            timestamp: Utc::now(),
        }),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            ResponseTemplateStatus::DbError.into()
        }
    }
}
