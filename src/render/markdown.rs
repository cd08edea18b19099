//! Markdown to HTML rendering.

use crate::model::Block;
use crate::render::BlockRenderer;
use pulldown_cmark::{html, Options, Parser};

pub struct MarkdownRenderer;

impl BlockRenderer for MarkdownRenderer {
    fn render_block(&self, text: &str) -> Block {
        Block::new(render_markdown(text))
    }

    fn name(&self) -> &str {
        "markdown"
    }
}

/// Render markdown to HTML.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(markdown, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}
