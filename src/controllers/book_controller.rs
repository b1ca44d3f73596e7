use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{error::ApiError, models::BookRequest, services::book_service, AppState};

// POST /book
pub async fn post_book(State(state): State<AppState>, body: Bytes) -> Response {
    tracing::debug!("body: {}", String::from_utf8_lossy(&body));

    let req: BookRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => return ApiError::BookParams(e.to_string()).into_response(),
    };

    match book_service::get_book(&state, &req.symbol).await {
        Ok(book) => (StatusCode::OK, Json(book)).into_response(),
        Err(e) => e.into_response(),
    }
}
