//! Renderer module — trait-based format dispatch.

pub mod json;
pub mod markdown;
pub mod tool;

use crate::error::{Error, Result};
use crate::model::Document;

/// Trait for rendering a Document into a specific output format.
pub trait Renderer {
    fn render(&self, doc: &Document) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "json" => Ok(Box::new(json::JsonRenderer)),
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "tool" => Ok(Box::new(tool::ToolRenderer)),
        _ => Err(Error::UnknownFormat(format.to_string())),
    }
}
