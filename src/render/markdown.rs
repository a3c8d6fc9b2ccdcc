//! GitHub-flavored markdown renderer.

use crate::error::Result;
use crate::model::{Document, Entries, FunctionDoc};
use crate::render::Renderer;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, doc: &Document) -> Result<String> {
        let blocks: Vec<String> = doc.functions.iter().map(render_function).collect();
        Ok(blocks.join("\n"))
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

/// Render a single function's documentation block.
fn render_function(func: &FunctionDoc) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("### {}\n", func.name));

    if !func.doc.summary.is_empty() {
        lines.push(func.doc.summary.clone());
        lines.push(String::new());
    }

    render_entries(&mut lines, "Arguments", &func.doc.args);

    if !func.doc.returns.is_empty() {
        lines.push("#### Returns\n".to_string());
        lines.push(func.doc.returns.clone());
        lines.push(String::new());
    }

    render_entries(&mut lines, "Raises", &func.doc.raises);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_entries(lines: &mut Vec<String>, title: &str, entries: &Entries) {
    if entries.is_empty() {
        return;
    }
    lines.push(format!("#### {}\n", title));
    for (name, desc) in entries.iter() {
        if desc.is_empty() {
            lines.push(format!("* **{}**", name));
        } else {
            lines.push(format!("* **{}**: {}", name, desc));
        }
    }
    lines.push(String::new());
}
