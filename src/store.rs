//! # Style Persistence
//!
//! Styles are read back through the normalizer, so whatever shape a store
//! returns ends up as a [`NormalizedStyle`]. Writes send each sub-config as
//! an independent JSON-encoded blob plus a display name and a default flag.
//!
//! [`StyleEditor`] is one editing session on top of a store: edits are
//! applied in memory and survive a failed save untouched.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::TinctureError;
use crate::normalize::{NormalizedStyle, normalize_style_response};
use crate::style::{StyleConfig, resolve_normalized};

/// Persisted form of a style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRecord {
    #[serde(rename = "ChartStyle")]
    pub chart_style: String,
    #[serde(rename = "TableStyle")]
    pub table_style: String,
    #[serde(rename = "ExcelStyle")]
    pub excel_style: String,
    #[serde(rename = "TextStyle", default)]
    pub text_style: String,
    #[serde(rename = "StyleName")]
    pub style_name: String,
    #[serde(rename = "IsDefault", default)]
    pub is_default: bool,
}

impl StyleRecord {
    pub fn from_config(
        style: &StyleConfig,
        name: impl Into<String>,
        is_default: bool,
    ) -> Result<Self, TinctureError> {
        Ok(Self {
            chart_style: serde_json::to_string(&style.chart)?,
            table_style: serde_json::to_string(&style.table)?,
            excel_style: serde_json::to_string(&style.excel)?,
            text_style: serde_json::to_string(&style.text)?,
            style_name: name.into(),
            is_default,
        })
    }
}

/// Async style persistence.
#[async_trait]
pub trait StyleStore: Send + Sync {
    /// Load and normalize the style stored under `id`.
    async fn load(&self, id: &str) -> Result<NormalizedStyle, TinctureError>;

    /// Create (`id == None`) or overwrite a style. Returns its id.
    async fn save(&self, id: Option<&str>, record: &StyleRecord) -> Result<String, TinctureError>;
}

// ============================================================================
// HTTP STORE
// ============================================================================

/// Store backed by the report backend's style endpoints:
/// `GET {base}/styles/{id}`, `POST {base}/styles`, `PUT {base}/styles/{id}`.
pub struct HttpStyleStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStyleStore {
    pub fn new(base_url: impl Into<String>) -> Result<Self, TinctureError> {
        let client = reqwest::Client::builder()
            .user_agent("tincture/0.1")
            .build()
            .map_err(|e| TinctureError::Transport(format!("HTTP client error: {}", e)))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// JSON bodies may carry `message` or `error`; any other non-empty body is
/// taken verbatim.
pub fn server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(json) => ["message", "error"]
            .iter()
            .find_map(|k| json.get(*k).and_then(Value::as_str))
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        Err(_) => Some(body.to_string()),
    }
}

#[async_trait]
impl StyleStore for HttpStyleStore {
    async fn load(&self, id: &str) -> Result<NormalizedStyle, TinctureError> {
        let url = format!("{}/styles/{}", self.base_url, id);
        let body: Value = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(normalize_style_response(&body))
    }

    async fn save(&self, id: Option<&str>, record: &StyleRecord) -> Result<String, TinctureError> {
        let request = match id {
            Some(id) => self.client.put(format!("{}/styles/{}", self.base_url, id)),
            None => self.client.post(format!("{}/styles", self.base_url)),
        };

        let response = request.json(record).send().await.map_err(|e| {
            tracing::warn!(error = %e, "style save request failed");
            TinctureError::Persistence { message: None }
        })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            tracing::warn!(%status, "style save rejected");
            return Err(TinctureError::Persistence {
                message: server_message(&body),
            });
        }

        let returned = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| match v.get("id") {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            });
        returned
            .or_else(|| id.map(str::to_string))
            .ok_or(TinctureError::Persistence { message: None })
    }
}

// ============================================================================
// MEMORY STORE
// ============================================================================

/// In-process store keeping raw records as JSON.
#[derive(Default)]
pub struct MemoryStyleStore {
    styles: RwLock<HashMap<String, Value>>,
    rejects: bool,
    rejection_message: Option<String>,
}

impl MemoryStyleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail, optionally with a server message.
    pub fn rejecting(message: Option<&str>) -> Self {
        Self {
            rejects: true,
            rejection_message: message.map(str::to_string),
            ..Self::default()
        }
    }

    /// Seed a raw payload in any shape the normalizer accepts.
    pub async fn insert_raw(&self, id: impl Into<String>, raw: Value) {
        self.styles.write().await.insert(id.into(), raw);
    }

    pub async fn len(&self) -> usize {
        self.styles.read().await.len()
    }
}

#[async_trait]
impl StyleStore for MemoryStyleStore {
    async fn load(&self, id: &str) -> Result<NormalizedStyle, TinctureError> {
        let styles = self.styles.read().await;
        let raw = styles
            .get(id)
            .ok_or_else(|| TinctureError::Transport(format!("Style not found: {}", id)))?;
        Ok(normalize_style_response(raw))
    }

    async fn save(&self, id: Option<&str>, record: &StyleRecord) -> Result<String, TinctureError> {
        if self.rejects {
            return Err(TinctureError::Persistence {
                message: self.rejection_message.clone(),
            });
        }
        let id = id
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let raw = serde_json::to_value(record)?;
        self.styles.write().await.insert(id.clone(), raw);
        Ok(id)
    }
}

// ============================================================================
// EDITOR
// ============================================================================

/// One style editing session.
pub struct StyleEditor<S: StyleStore> {
    store: S,
    id: Option<String>,
    is_default: bool,
    style: StyleConfig,
    dirty: bool,
    last_error: Option<String>,
}

impl<S: StyleStore> StyleEditor<S> {
    /// Fresh, unsaved style starting from defaults.
    pub fn new(store: S) -> Self {
        Self {
            store,
            id: None,
            is_default: false,
            style: StyleConfig::default(),
            dirty: false,
            last_error: None,
        }
    }

    /// Open the stored style `id`, resolved against the defaults.
    pub async fn open(store: S, id: &str) -> Result<Self, TinctureError> {
        let normalized = store.load(id).await?;
        let style = resolve_normalized(&normalized);
        tracing::info!(id, name = %normalized.style_name, "opened style");
        Ok(Self {
            id: Some(id.to_string()),
            style,
            ..Self::new(store)
        })
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.style.style_name
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Message from the last failed save, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Apply a partial edit on top of the current state.
    pub fn apply(&mut self, patch: &Value) {
        self.style = self.style.apply(patch);
        self.dirty = true;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.style.style_name = name.into();
        self.dirty = true;
    }

    pub fn set_default(&mut self, is_default: bool) {
        self.is_default = is_default;
        self.dirty = true;
    }

    pub fn record(&self) -> Result<StyleRecord, TinctureError> {
        StyleRecord::from_config(&self.style, self.style.style_name.clone(), self.is_default)
    }

    /// Persist the current state. A failure leaves the edits in place.
    pub async fn save(&mut self) -> Result<String, TinctureError> {
        let record = self.record()?;
        match self.store.save(self.id.as_deref(), &record).await {
            Ok(id) => {
                tracing::info!(id = %id, name = %self.style.style_name, "saved style");
                self.id = Some(id.clone());
                self.dirty = false;
                self.last_error = None;
                Ok(id)
            }
            Err(e) => {
                tracing::warn!(error = %e, "style save failed, keeping edits");
                self.last_error = e.user_message();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SAVE_FAILED_MESSAGE;
    use crate::style::{ChartType, LineDash};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_server_message() {
        assert_eq!(server_message(r#"{"message": "Name taken"}"#).as_deref(), Some("Name taken"));
        assert_eq!(server_message(r#"{"error": "Locked"}"#).as_deref(), Some("Locked"));
        assert_eq!(server_message("Bad gateway").as_deref(), Some("Bad gateway"));
        assert_eq!(server_message(r#"{"message": ""}"#), None);
        assert_eq!(server_message("  "), None);
    }

    #[test]
    fn test_record_blobs_are_json_strings() {
        let record = StyleRecord::from_config(&StyleConfig::default(), "Daily", true).unwrap();
        let wire = serde_json::to_value(&record).unwrap();
        assert!(wire["ChartStyle"].is_string());
        assert_eq!(wire["StyleName"], json!("Daily"));
        assert_eq!(wire["IsDefault"], json!(true));
    }

    #[tokio::test]
    async fn test_memory_round_trip_through_normalizer() {
        let store = MemoryStyleStore::new();
        let mut editor = StyleEditor::new(store);
        editor.apply(&json!({"chart": {"type": "line", "line": {"dash": "dotted"}}}));
        editor.set_name("Night shift");
        let id = editor.save().await.unwrap();
        assert!(!editor.is_dirty());

        let StyleEditor { store, .. } = editor;
        let reopened = StyleEditor::open(store, &id).await.unwrap();
        assert_eq!(reopened.name(), "Night shift");
        assert_eq!(reopened.style().chart.kind, ChartType::Line);
        assert_eq!(reopened.style().chart.line.dash, LineDash::Dotted);
    }

    #[tokio::test]
    async fn test_open_legacy_payload() {
        let store = MemoryStyleStore::new();
        store
            .insert_raw("7", json!({"data": {"chart_style": "{\"chartType\": \"line\"}", "name": "Old"}}))
            .await;
        let editor = StyleEditor::open(store, "7").await.unwrap();
        assert_eq!(editor.style().chart.kind, ChartType::Line);
        assert_eq!(editor.name(), "Old");
    }

    #[tokio::test]
    async fn test_open_missing_style() {
        let result = StyleEditor::open(MemoryStyleStore::new(), "nope").await;
        assert!(matches!(result, Err(TinctureError::Transport(_))));
    }

    #[tokio::test]
    async fn test_failed_save_keeps_edits() {
        let mut editor = StyleEditor::new(MemoryStyleStore::rejecting(None));
        editor.apply(&json!({"chart": {"type": "line"}}));
        let err = editor.save().await.unwrap_err();
        assert_eq!(err.to_string(), SAVE_FAILED_MESSAGE);
        assert_eq!(editor.last_error(), Some(SAVE_FAILED_MESSAGE));
        assert_eq!(editor.style().chart.kind, ChartType::Line);
        assert!(editor.is_dirty());
        assert_eq!(editor.id(), None);
    }

    #[tokio::test]
    async fn test_failed_save_surfaces_server_message() {
        let mut editor = StyleEditor::new(MemoryStyleStore::rejecting(Some("Name already used")));
        let err = editor.save().await.unwrap_err();
        assert_eq!(err.user_message().as_deref(), Some("Name already used"));
    }

    #[tokio::test]
    async fn test_overwrite_keeps_id() {
        let store = MemoryStyleStore::new();
        let id = store
            .save(Some("fixed"), &StyleRecord::from_config(&StyleConfig::default(), "A", false).unwrap())
            .await
            .unwrap();
        assert_eq!(id, "fixed");
        assert_eq!(store.len().await, 1);
    }
}
