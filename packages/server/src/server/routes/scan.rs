use axum::{extract::Extension, Json};
use serde_json::{json, Value};

use crate::domains::scan::{ScanRequest, ScanService};
use crate::server::app::AppState;
use crate::server::error::ApiError;

/// Run the full scan pipeline for a keyword/location pair.
pub async fn scan_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<Value>, ApiError> {
    let service = ScanService::from_deps(&state.server_deps);
    let outcome = service.run(&request).await?;

    if outcome.success {
        Ok(Json(json!({
            "success": true,
            "count": outcome.count,
            "candidates": outcome.candidates,
            "is_fallback": outcome.is_fallback,
            "fallback_keyword": outcome.fallback_keyword,
        })))
    } else {
        Ok(Json(json!({
            "success": false,
            "message": outcome.message,
            "suggestion": outcome.fallback_keyword,
        })))
    }
}
