//! Latest-wins preview fetching.
//!
//! Every [`PreviewOrchestrator::refresh`] bumps a generation counter and
//! aborts the task still in flight. A finished fetch commits to the shared
//! [`PreviewState`] only while its generation is current, checked under the
//! state's write lock, so a slow stale response can never overwrite a newer
//! one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::{AbortHandle, JoinHandle};

use crate::error::TinctureError;
use crate::style::StyleConfig;

use super::{Preview, PreviewBackend, PreviewRequest, render_preview};

/// What the preview pane currently shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PreviewState {
    /// Generation of the last refresh that touched this state.
    pub generation: u64,
    pub request: Option<PreviewRequest>,
    pub preview: Preview,
    pub error: Option<String>,
    pub loading: bool,
}

/// Handle on one started fetch.
pub struct PreviewTask {
    pub generation: u64,
    handle: JoinHandle<Result<bool, TinctureError>>,
}

impl PreviewTask {
    /// Wait for the fetch. `Ok(true)` means its result was committed,
    /// `Ok(false)` that it finished after being superseded.
    /// A task aborted before finishing yields [`TinctureError::Aborted`].
    pub async fn wait(self) -> Result<bool, TinctureError> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(TinctureError::Aborted),
            Err(e) => Err(TinctureError::Transport(format!("Preview task failed: {}", e))),
        }
    }
}

pub struct PreviewOrchestrator<B: PreviewBackend + 'static> {
    backend: Arc<B>,
    generation: Arc<AtomicU64>,
    in_flight: Mutex<Option<AbortHandle>>,
    state: Arc<RwLock<PreviewState>>,
}

impl<B: PreviewBackend + 'static> PreviewOrchestrator<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
            generation: Arc::new(AtomicU64::new(0)),
            in_flight: Mutex::new(None),
            state: Arc::new(RwLock::new(PreviewState::default())),
        }
    }

    pub async fn snapshot(&self) -> PreviewState {
        self.state.read().await.clone()
    }

    /// Start a fetch for `request` rendered with `style`, superseding any
    /// fetch still running.
    ///
    /// The generation is taken under the state write lock, so concurrent
    /// refreshes record their request in the same order they are numbered.
    pub async fn refresh(&self, style: StyleConfig, request: PreviewRequest) -> PreviewTask {
        let mut guard = self.state.write().await;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(previous) = in_flight.take() {
                previous.abort();
                tracing::debug!(generation, "aborted superseded preview fetch");
            }
        }

        if self.generation.load(Ordering::SeqCst) == generation {
            guard.generation = generation;
            guard.request = Some(request.clone());
            guard.loading = true;
        }

        let backend = self.backend.clone();
        let current = self.generation.clone();
        let state = self.state.clone();
        let handle = tokio::spawn(async move {
            let outcome = backend
                .fetch(&request)
                .await
                .and_then(|response| render_preview(&style, request.format, &response));

            let mut state = state.write().await;
            if current.load(Ordering::SeqCst) != generation {
                tracing::debug!(generation, "discarding stale preview result");
                return Ok(false);
            }
            state.loading = false;
            match outcome {
                Ok(preview) => {
                    tracing::info!(generation, template = %request.template_id, "preview updated");
                    state.preview = preview;
                    state.error = None;
                    Ok(true)
                }
                Err(e) => {
                    tracing::warn!(generation, error = %e, "preview failed");
                    state.error = e.user_message();
                    Err(e)
                }
            }
        });

        {
            let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
            *in_flight = Some(handle.abort_handle());
        }
        drop(guard);

        PreviewTask { generation, handle }
    }
}
