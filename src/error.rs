use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Every way a request can fail. Nothing escapes a handler except as one of
/// these, rendered as a status code plus a short plain-text body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("please use POST method")]
    WrongMethod,

    #[error("connect to mysql error")]
    StorageUnavailable(String),

    #[error("get order parameters failed")]
    OrderParams(String),

    #[error("get book parameters failed")]
    BookParams(String),

    #[error("get order resp failed")]
    Insert(String),

    #[error("getBookResp error")]
    Query(String),

    #[error("not found")]
    NotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::OrderParams(_) | ApiError::BookParams(_) | ApiError::Insert(_) => {
                StatusCode::PAYMENT_REQUIRED
            }
            ApiError::WrongMethod
            | ApiError::StorageUnavailable(_)
            | ApiError::Query(_)
            | ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::StorageUnavailable(detail) => tracing::error!("storage unavailable: {detail}"),
            ApiError::Insert(detail) => tracing::error!("insert failed: {detail}"),
            ApiError::Query(detail) => tracing::error!("book query failed: {detail}"),
            ApiError::OrderParams(detail) | ApiError::BookParams(detail) => {
                tracing::warn!("{self}: {detail}")
            }
            ApiError::WrongMethod | ApiError::NotFound => tracing::debug!("{self}"),
        }

        (self.status(), self.to_string()).into_response()
    }
}
