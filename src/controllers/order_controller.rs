use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::ApiError,
    models::{OrderRequest, OrderResponse},
    services::order_service,
    AppState,
};

// POST /order
pub async fn post_order(State(state): State<AppState>, body: Bytes) -> Response {
    tracing::debug!("body: {}", String::from_utf8_lossy(&body));

    // Content-Type is not checked; any body that decodes is accepted.
    let req: OrderRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => return ApiError::OrderParams(e.to_string()).into_response(),
    };

    match order_service::place_order(&state, req).await {
        Ok(order_id) => {
            tracing::info!("order {} accepted", order_id);
            (StatusCode::OK, Json(OrderResponse { order_id })).into_response()
        }
        Err(e) => e.into_response(),
    }
}
