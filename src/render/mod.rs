//! Block renderers: turn assembled comment text into documentation blocks.

pub mod markdown;
pub mod plain;

use crate::model::Block;
use anyhow::{anyhow, Result};

/// Capability the visitor hands comment text to.
pub trait BlockRenderer {
    fn render_block(&self, text: &str) -> Block;
    fn name(&self) -> &str;
}

/// Create a renderer for the given name.
pub fn create_renderer(name: &str) -> Result<Box<dyn BlockRenderer>> {
    match name {
        "markdown" | "md" | "html" => Ok(Box::new(markdown::MarkdownRenderer)),
        "plain" | "text" => Ok(Box::new(plain::PlainRenderer)),
        _ => Err(anyhow!(
            "unknown renderer: {}. Use markdown or plain",
            name
        )),
    }
}
