//! HTTP request handlers.

pub mod chart;
pub mod preview;
pub mod style;

use axum::http::StatusCode;

use crate::error::TinctureError;

/// Map a library error to the handler error shape.
pub(crate) fn error_response(e: TinctureError) -> (StatusCode, String) {
    let status = match &e {
        TinctureError::Aborted => StatusCode::CONFLICT,
        TinctureError::InvalidRequest(_) | TinctureError::Json(_) => StatusCode::BAD_REQUEST,
        TinctureError::Transport(_) => StatusCode::BAD_GATEWAY,
        TinctureError::Persistence { .. } | TinctureError::Io(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let message = e
        .user_message()
        .unwrap_or_else(|| "Superseded by a newer request".to_string());
    (status, message)
}
