// GET/POST /api/settings - the settings access API

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::database::Settings;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub maintenance_mode: bool,
}

/// GET /api/settings - current settings, always 200.
///
/// Missing record, store outage, and read timeout all report the default
/// (maintenance off) instead of erroring: the request gate depends on this
/// endpoint's contract, and a transient storage failure must not take the
/// whole site down with it.
pub async fn settings_get(State(state): State<AppState>) -> Json<Settings> {
    Json(state.settings.current().await)
}

/// POST /api/settings - upsert the maintenance flag. Requires an admin
/// session (enforced by middleware on the route). Unlike the read path,
/// failures here are surfaced: the operator must never be told the flag
/// changed when it did not.
pub async fn settings_post(
    State(state): State<AppState>,
    Json(update): Json<SettingsUpdate>,
) -> Result<Json<Settings>, ApiError> {
    let stored = state.settings.set_maintenance_mode(update.maintenance_mode).await?;
    tracing::info!("Maintenance mode set to {}", stored.maintenance_mode);
    Ok(Json(stored))
}
