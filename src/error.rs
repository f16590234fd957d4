//! ==============================================================================
//! error.rs - store and api error kinds
//! ==============================================================================
//!
//! purpose:
//!     the store only ever fails one way (unknown device). the api adds the
//!     "body did not bind" case and turns both into `{"message": ...}` json
//!     responses with the matching status code.
//!
//! ==============================================================================

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("unknown device id: {id}")]
    NotFound { id: String },
}

/// errors surfaced to http clients
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("was not able to bind the request body.")]
    BadRequest,

    #[error("no device with that id")]
    NotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "message": self.to_string() }));
        (self.status(), body).into_response()
    }
}
