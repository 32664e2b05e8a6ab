use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::{models::ListResponse, services::AppState};

/// Subjects as their public views; chapters and question pools never leave
/// the server.
pub async fn list_subjects(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let subjects = state.catalog.subject_views();
    Json(ListResponse::success(
        subjects,
        "Subjects retrieved successfully",
    ))
}
