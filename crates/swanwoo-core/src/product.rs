//! Product spec documents and per-product asset locations
//!
//! Each product lives in its own directory under the asset base:
//!
//! ```text
//! {base}/{name}/spec.json   title, date and spec lines
//! {base}/{name}/usdz.glb    combined geometry, materials and rig
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the combined model asset inside a product directory
pub const MODEL_FILE: &str = "usdz.glb";
/// File name of the spec document inside a product directory
pub const SPEC_FILE: &str = "spec.json";

#[derive(Error, Debug)]
pub enum SpecError {
    #[error("Request for {url} failed: {reason}")]
    Request { url: String, reason: String },
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("Spec JSON error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Metadata shown next to a product viewer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSpec {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    /// Bullet lines, in display order
    #[serde(default)]
    pub spec: Vec<String>,
}

impl ProductSpec {
    pub fn from_json(content: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(content)?)
    }
}

/// Resolves the asset locations of one product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductAssets {
    base: String,
    name: String,
}

impl ProductAssets {
    pub fn new(base: &str, name: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL for fetching the spec document from the page
    pub fn spec_url(&self) -> String {
        format!("{}/{}/{}", self.base, self.name, SPEC_FILE)
    }

    /// Path handed to the asset loader for the combined model
    pub fn model_path(&self) -> String {
        normalize_asset_path(&format!("{}/{}/{}", self.base, self.name, MODEL_FILE))
    }
}

/// Absolute URLs pass through; local paths lose their leading slash so the
/// asset loader resolves them against the page root.
pub fn normalize_asset_path(path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    path.trim_start_matches('/').to_string()
}
