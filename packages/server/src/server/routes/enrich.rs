use axum::{extract::Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::domains::contacts::enrich::ContactEnricher;
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichRequest {
    pub company_id: Uuid,
    pub company_name: String,
}

/// Find and store decision-makers for a scanned company.
pub async fn enrich_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<EnrichRequest>,
) -> Result<Json<Value>, ApiError> {
    let enricher = ContactEnricher::new(
        state.server_deps.ai.clone(),
        state.server_deps.store.clone(),
    );

    match enricher
        .enrich(request.company_id, &request.company_name)
        .await?
    {
        Some(contacts) => Ok(Json(json!({
            "success": true,
            "count": contacts.len(),
            "contacts": contacts,
        }))),
        None => Ok(Json(json!({
            "success": false,
            "message": "AI could not find contact information for this company.",
        }))),
    }
}
