//! HTTP boundary: routing and error-to-status mapping.
//!
//! Thin plumbing around the model service. Validation errors map to 400
//! responses with field-specific guidance; everything else collapses to a
//! generic 500 so internal detail never reaches the caller.

use crate::error::Error;
use crate::models::ModelService;
use crate::types::{PredictionRequest, PredictionResponse};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, warn};

/// Build the service router.
pub fn router(service: Arc<ModelService>) -> Router {
    Router::new()
        .route("/health", get(get_health))
        .route("/predict", post(post_predict))
        .with_state(service)
}

async fn get_health() -> Json<serde_json::Value> {
    Json(json!({ "status": "OK" }))
}

async fn post_predict(
    State(service): State<Arc<ModelService>>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection, "Rejected malformed request body");
        ApiError::bad_request("Invalid input data")
    })?;

    let predict = service.predict(&request.flights)?;
    Ok(Json(PredictionResponse { predict }))
}

/// User-facing error: status code plus message, rendered as
/// `{"message": "..."}`.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidMonthValue(_) => {
                Self::bad_request("Invalid input data: MES must be between 1 and 12")
            }
            Error::InvalidTipoVuelo(_) => {
                Self::bad_request("Invalid input data: TIPOVUELO must be 'N' or 'I'")
            }
            Error::MalformedInput(_) => Self::bad_request("Invalid input data"),
            other => {
                error!(error = %other, "Request processing failed");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Error processing request".to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}
