//! Preview API handler.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{sync::Arc, time::Instant};
use uuid::Uuid;

use crate::error::TinctureError;
use crate::preview::{PreviewOrchestrator, PreviewRequest, PreviewState};
use crate::style;

use super::super::state::{AppState, PreviewSession, SESSION_EXPIRATION_SECS, SharedBackend};
use super::error_response;

#[derive(Deserialize)]
pub struct PreviewBody {
    /// Session from an earlier reply; a new session is opened when absent.
    #[serde(default)]
    pub session: Option<String>,
    #[serde(default)]
    pub style: Value,
    pub request: PreviewRequest,
}

#[derive(Debug, Serialize)]
pub struct PreviewReply {
    pub session: String,
    #[serde(flatten)]
    pub state: PreviewState,
}

/// POST /api/preview - Fetch, render and commit a preview.
///
/// A request overtaken by a newer one in the same session answers 409.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PreviewBody>,
) -> Result<Json<PreviewReply>, (StatusCode, String)> {
    cleanup_expired_sessions(&state).await;

    let (session_id, orchestrator) = open_session(&state, body.session.as_deref()).await?;

    let resolved = style::resolve(Some(&body.style));
    let task = orchestrator.refresh(resolved, body.request).await;
    let committed = task.wait().await.map_err(error_response)?;
    if !committed {
        return Err(error_response(TinctureError::Aborted));
    }

    Ok(Json(PreviewReply {
        session: session_id.to_string(),
        state: orchestrator.snapshot().await,
    }))
}

/// Look up (and touch) an existing session, or open a new one.
async fn open_session(
    state: &AppState,
    id: Option<&str>,
) -> Result<(Uuid, Arc<PreviewOrchestrator<SharedBackend>>), (StatusCode, String)> {
    let mut sessions = state.preview_sessions.write().await;

    let Some(id) = id else {
        let session_id = Uuid::new_v4();
        let session = PreviewSession::new(state.backend.clone());
        let orchestrator = session.orchestrator.clone();
        sessions.insert(session_id, session);
        tracing::debug!(session = %session_id, "opened preview session");
        return Ok((session_id, orchestrator));
    };

    let session_id = Uuid::parse_str(id)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid session ID".to_string()))?;
    let session = sessions
        .get_mut(&session_id)
        .ok_or((StatusCode::NOT_FOUND, "Session not found or expired".to_string()))?;
    session.touch();
    Ok((session_id, session.orchestrator.clone()))
}

/// Drop sessions idle for longer than [`SESSION_EXPIRATION_SECS`].
async fn cleanup_expired_sessions(state: &AppState) {
    let now = Instant::now();
    let mut sessions = state.preview_sessions.write().await;

    sessions.retain(|_, session| {
        now.duration_since(session.last_accessed).as_secs() < SESSION_EXPIRATION_SECS
    });
}
