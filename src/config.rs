//! Visitor options and the options file they can be read from.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Options that change what the visitor emits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisitorOptions {
    /// Emit members whose `isExported` flag is not set.
    pub include_non_exported: bool,
}

impl VisitorOptions {
    /// Read options from a TypeDoc-style JSON options object.
    /// Keys this crate does not know are ignored.
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).context("invalid options JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read options file: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("failed to load options from {}", path.display()))
    }
}
