use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use log::debug;
use portfolio_core::{submit_contact, ContactSubmission};
use serde::Serialize;
use tokio::task::spawn_blocking;

use crate::{error::AppError, state::AppState};

pub const CONTACT_ACK_MESSAGE: &str = "Message received!";

#[derive(Serialize)]
pub struct ContactAccepted {
    pub success: bool,
    pub message: &'static str,
}

/// Validates the submission, then stores it on a blocking worker with a
/// connection scoped to this request.
pub async fn contact_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<ContactAccepted>), AppError> {
    let Json(submission) =
        payload.map_err(|rejection| AppError::MalformedPayload(rejection.body_text()))?;

    // Rejected submissions never open a connection.
    let contact = submission.validate()?;

    let stored = spawn_blocking(move || submit_contact(&state.database, &contact)).await??;
    debug!(
        "event=contact_accepted module=server status=ok id={}",
        stored.id
    );

    Ok((
        StatusCode::CREATED,
        Json(ContactAccepted {
            success: true,
            message: CONTACT_ACK_MESSAGE,
        }),
    ))
}
