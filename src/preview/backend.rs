//! Preview fetch transport.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::TinctureError;

use super::{PreviewRequest, PreviewResponse};

/// Source of report previews.
#[async_trait]
pub trait PreviewBackend: Send + Sync {
    async fn fetch(&self, request: &PreviewRequest) -> Result<PreviewResponse, TinctureError>;
}

#[async_trait]
impl<T: PreviewBackend + ?Sized> PreviewBackend for Arc<T> {
    async fn fetch(&self, request: &PreviewRequest) -> Result<PreviewResponse, TinctureError> {
        (**self).fetch(request).await
    }
}

/// Posts preview requests to the report backend as JSON.
#[derive(Clone)]
pub struct HttpPreviewBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPreviewBackend {
    /// `base_url` is the backend root; requests go to `{base_url}/reports/preview`.
    pub fn new(base_url: &str) -> Result<Self, TinctureError> {
        let client = reqwest::Client::builder()
            .user_agent("tincture/0.1")
            .build()
            .map_err(|e| TinctureError::Transport(format!("HTTP client error: {}", e)))?;
        Ok(Self {
            client,
            endpoint: format!("{}/reports/preview", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PreviewBackend for HttpPreviewBackend {
    async fn fetch(&self, request: &PreviewRequest) -> Result<PreviewResponse, TinctureError> {
        tracing::debug!(template = %request.template_id, format = ?request.format, "fetching preview");
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<PreviewResponse>()
            .await?;
        Ok(response)
    }
}
