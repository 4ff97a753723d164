use axum::{extract::Extension, Json};
use serde_json::{json, Value};

use crate::domains::outreach::{DraftRequest, DraftService};
use crate::server::app::AppState;
use crate::server::error::ApiError;

/// Draft a personalized outreach email for a lead.
pub async fn draft_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<DraftRequest>,
) -> Result<Json<Value>, ApiError> {
    let service = DraftService::new(state.server_deps.ai.clone());
    let draft = service.draft(&request).await?;

    Ok(Json(json!({
        "success": true,
        "subject": draft.subject,
        "body": draft.body,
    })))
}
