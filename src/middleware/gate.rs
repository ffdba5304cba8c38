use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::gate::{dev_override, RouteClass, MAINTENANCE_PATH};
use crate::state::AppState;

/// Site-wide maintenance gate. Runs ahead of every route: classifies the
/// path, applies the developer override, and only then consults the settings
/// flag. Exactly one outcome per request; a failed or slow flag read allows
/// the request through (the read itself is fail-open, see SettingsService).
pub async fn maintenance_gate_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();

    if state.routes.classify(path) == RouteClass::Bypass {
        return next.run(request).await;
    }

    // Host header first, then URI authority (absolute-form requests)
    let host = request
        .headers()
        .get(axum::http::header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| request.uri().host());

    if dev_override(host, request.uri().query()) {
        debug!("Developer override active for {}", path);
        return next.run(request).await;
    }

    if state.settings.maintenance_mode().await {
        return Redirect::temporary(MAINTENANCE_PATH).into_response();
    }

    next.run(request).await
}
