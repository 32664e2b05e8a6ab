use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::{
    error::ServiceError,
    models::{ApiResponse, ListResponse},
    services::AppState,
};

pub async fn list_officers(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let officers = state.officers.list();
    Json(ListResponse::success(
        officers,
        "Officers retrieved successfully",
    ))
}

pub async fn get_officer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let officer = state
        .officers
        .get(id)
        .ok_or(ServiceError::OfficerNotFound)?;
    Ok(Json(ApiResponse::success(
        officer,
        "Officer retrieved successfully",
    )))
}

pub async fn list_units(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let units = state.officers.units();
    Json(ListResponse::success(units, "Units retrieved successfully"))
}
