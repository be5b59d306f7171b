//! Server state and configuration.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::TinctureError;
use crate::preview::{HttpPreviewBackend, PreviewBackend, PreviewOrchestrator};

/// Idle preview sessions are dropped after this many seconds.
pub const SESSION_EXPIRATION_SECS: u64 = 30 * 60;

/// Backend shared by every preview session.
pub type SharedBackend = Arc<dyn PreviewBackend>;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Root URL of the report backend serving previews (e.g., "http://localhost:5000/api")
    pub backend_url: String,
}

/// One client's editing session: newer previews supersede older ones only
/// within the same session.
pub struct PreviewSession {
    pub orchestrator: Arc<PreviewOrchestrator<SharedBackend>>,
    pub last_accessed: Instant,
}

impl PreviewSession {
    pub fn new(backend: SharedBackend) -> Self {
        Self {
            orchestrator: Arc::new(PreviewOrchestrator::new(backend)),
            last_accessed: Instant::now(),
        }
    }

    /// Update last accessed time.
    pub fn touch(&mut self) {
        self.last_accessed = Instant::now();
    }
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub backend: SharedBackend,
    pub preview_sessions: RwLock<HashMap<Uuid, PreviewSession>>,
}

impl AppState {
    /// State talking to the configured report backend over HTTP.
    pub fn new(config: ServerConfig) -> Result<Self, TinctureError> {
        let backend = HttpPreviewBackend::new(&config.backend_url)?;
        Ok(Self::with_backend(config, Box::new(backend)))
    }

    pub fn with_backend(config: ServerConfig, backend: Box<dyn PreviewBackend>) -> Self {
        Self {
            config,
            backend: Arc::from(backend),
            preview_sessions: RwLock::new(HashMap::new()),
        }
    }
}
