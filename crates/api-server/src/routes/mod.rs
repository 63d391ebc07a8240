//! Route handlers

use axum::{http::StatusCode, Json};
use serde::Serialize;

use crate::store::StoreError;

pub mod health;
pub mod task;
pub mod user;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn store_error(err: StoreError) -> ApiError {
    let status = match &err {
        StoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
    };
    let error = match err {
        StoreError::InvalidInput(msg) | StoreError::NotFound(msg) => msg,
    };
    (status, Json(ErrorResponse { error }))
}
