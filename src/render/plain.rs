//! Pass-through renderer: keeps the assembled text as-is.
//!
//! Useful for snapshot tests and for consumers that render markdown themselves.

use crate::model::Block;
use crate::render::BlockRenderer;

pub struct PlainRenderer;

impl BlockRenderer for PlainRenderer {
    fn render_block(&self, text: &str) -> Block {
        Block::new(text)
    }

    fn name(&self) -> &str {
        "plain"
    }
}
