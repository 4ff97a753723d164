use axum::{extract::Extension, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::domains::contacts::Contact;
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub contact_id: Uuid,
    pub status: String,
}

/// Update a contact's outreach status.
pub async fn update_contact_status_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    match Contact::update_status(request.contact_id, &request.status, &state.db_pool).await? {
        Some(contact) => Ok((
            StatusCode::OK,
            Json(json!({ "success": true, "contact": contact })),
        )),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "Contact not found" })),
        )),
    }
}
