//! OpenAPI document loading
//!
//! Reads a JSON or YAML description from disk into a [`serde_json::Value`]
//! and exposes the few attributes the generator walks.

use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::errors::{Result, SwaggenError};

/// Maximum document size (16 MB)
const MAX_DOCUMENT_SIZE: u64 = 16 * 1024 * 1024;

/// A parsed API description
#[derive(Debug, Clone)]
pub struct ApiDocument {
    value: Value,
}

impl ApiDocument {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// Read and parse a document; `.yaml`/`.yml` files are parsed as YAML
    pub fn load(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path)?;
        if metadata.len() > MAX_DOCUMENT_SIZE {
            return Err(SwaggenError::Argument(format!(
                "OpenAPI document too large: {} bytes (max {} bytes)",
                metadata.len(),
                MAX_DOCUMENT_SIZE
            )));
        }

        let content = fs::read_to_string(path)?;
        let value: Value = if is_yaml(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        Ok(Self::new(value))
    }

    /// `servers[0].url`
    pub fn server_url(&self) -> Result<&str> {
        self.value
            .get("servers")
            .and_then(|s| s.get(0))
            .and_then(|s| s.get("url"))
            .and_then(|u| u.as_str())
            .ok_or_else(|| SwaggenError::MissingField("servers[0].url".to_string()))
    }

    /// `components.schemas`, empty when absent
    pub fn schemas(&self) -> Map<String, Value> {
        self.value
            .get("components")
            .and_then(|c| c.get("schemas"))
            .and_then(|s| s.as_object())
            .cloned()
            .unwrap_or_default()
    }

    /// `paths`, empty when absent
    pub fn paths(&self) -> Map<String, Value> {
        self.value
            .get("paths")
            .and_then(|p| p.as_object())
            .cloned()
            .unwrap_or_default()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Whether a path looks like an API description the generator reads
pub fn is_document_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| matches!(e, "json" | "yaml" | "yml"))
}

fn is_yaml(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "yaml" || e == "yml")
}
