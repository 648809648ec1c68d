use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};
use validator::ValidationErrors;

use bp_calc_domain::entities::Rejection;
use bp_calc_domain::services::ReadingServiceError;

use crate::entities::common::StatusMessage;
use crate::entities::reading::PressureParseError;

/// Errors a reading handler can return
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body could not be read as a reading
    #[error("{0}")]
    BadRequest(String),

    /// The reading was refused by the validation rules
    #[error("{0}")]
    Rejected(Rejection),

    #[error("reading not found")]
    NotFound,

    /// Storage failed; details are logged, never returned
    #[error("Internal Server Error")]
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Rejected(_) => StatusCode::RANGE_NOT_SATISFIABLE,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Internal => (status, "Internal Server Error").into_response(),
            other => {
                let body = StatusMessage::new(status.as_u16(), other.to_string());
                (status, Json(body)).into_response()
            }
        }
    }
}

impl From<ReadingServiceError> for ApiError {
    fn from(err: ReadingServiceError) -> Self {
        match err {
            ReadingServiceError::Rejected(rejection) => ApiError::Rejected(rejection),
            ReadingServiceError::NotFound(_) => ApiError::NotFound,
            ReadingServiceError::Storage(e) => {
                error!("Storage failure while serving request: {}", e);
                ApiError::Internal
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Malformed reading request: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PressureParseError> for ApiError {
    fn from(err: PressureParseError) -> Self {
        warn!("Unreadable pressure value: {}", err);
        ApiError::BadRequest(err.to_string())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();
        warn!("Invalid reading request: {:?}", messages);
        ApiError::BadRequest(messages.join("; "))
    }
}
