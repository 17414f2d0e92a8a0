use axum::{extract::State, Json};
use serde::Serialize;
use sqlx::query;

use crate::{
    conf::settings,
    pkg::server::state::AppState,
    prelude::{AppError, Result},
};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: String,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        service: settings.service_name.clone(),
    })
}

/// Process is up; never touches the pool.
pub async fn livez() {}

/// Ready once Postgres answers. Any storage failure reads as not ready (503).
pub async fn healthz(State(state): State<AppState>) -> Result<()> {
    if let Err(err) = query("select 1").execute(&*state.db_pool).await {
        tracing::warn!("{} is not ready: {}", &settings.service_name, err);
        return Err(AppError::StorageUnavailable(err.to_string()));
    }
    Ok(())
}
