//! Style API handlers.

use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::merge::merge_deep;
use crate::style::{self, StyleConfig};

/// GET /api/style/defaults - Built-in defaults.
pub async fn defaults() -> Json<StyleConfig> {
    Json(StyleConfig::default())
}

/// POST /api/style/resolve - Resolve any persisted or partial shape.
pub async fn resolve(Json(raw): Json<Value>) -> Json<StyleConfig> {
    Json(style::resolve(Some(&raw)))
}

#[derive(Deserialize)]
pub struct MergeRequest {
    #[serde(default)]
    pub base: Value,
    #[serde(default)]
    pub patch: Value,
}

#[derive(Serialize)]
pub struct MergeResponse {
    /// `patch` deep-merged onto `base`, unvalidated.
    pub merged: Value,
    /// The merge resolved against the defaults.
    pub resolved: StyleConfig,
}

/// POST /api/style/merge - Deep-merge two raw payloads, then resolve.
pub async fn merge(Json(req): Json<MergeRequest>) -> Json<MergeResponse> {
    let merged = merge_deep(req.base, &req.patch);
    let resolved = style::resolve(Some(&merged));
    Json(MergeResponse { merged, resolved })
}
