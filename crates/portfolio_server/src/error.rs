use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use portfolio_core::{ContactServiceError, ContactValidationError};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ContactValidationError),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] ContactServiceError),

    #[error("Worker error: {0}")]
    Worker(#[from] JoinError),
}

#[derive(Serialize)]
struct FieldDetail<'a> {
    field: &'a str,
    message: &'a str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation(err) => {
                let detail: Vec<_> = err
                    .violations()
                    .iter()
                    .map(|violation| FieldDetail {
                        field: violation.field.as_str(),
                        message: &violation.message,
                    })
                    .collect();
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "detail": detail })),
                )
                    .into_response()
            }
            AppError::MalformedPayload(message) => {
                let detail = [FieldDetail {
                    field: "body",
                    message,
                }];
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "detail": detail })),
                )
                    .into_response()
            }
            AppError::Persistence(_) | AppError::Worker(_) => {
                error!("event=request_failed module=server status=error error={self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
