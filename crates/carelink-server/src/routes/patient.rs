//! Patient search endpoint.

use axum::extract::{Query, State};
use axum::{Extension, Json};
use carelink_auth::TenantContext;
use carelink_core::models::patient::{Patient, PatientFilter};
use serde::Serialize;
use surrealdb::Connection;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    message: &'static str,
    data: Vec<Patient>,
}

/// Search within the caller's hospital.
///
/// `hospital_id` in the query string is accepted and ignored.
pub async fn search<C: Connection>(
    State(state): State<AppState<C>>,
    Extension(ctx): Extension<TenantContext>,
    Query(filter): Query<PatientFilter>,
) -> Result<Json<SearchResponse>, ApiError> {
    let data = state.patients.search(filter, ctx.hospital_id).await?;
    let message = if data.is_empty() {
        "No patient found."
    } else {
        "Search successfully."
    };
    Ok(Json(SearchResponse { message, data }))
}
