use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use crate::{error::ApiError, AppState};

/// Any non-POST request on an order or book path.
pub async fn wrong_method() -> ApiError {
    ApiError::WrongMethod
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn health_db(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "db: ok").into_response(),
        Err(e) => ApiError::StorageUnavailable(e.to_string()).into_response(),
    }
}
