//! Tool descriptor renderer.
//!
//! Emits one MCP-style tool per documented function: the summary (plus the
//! returns text) becomes the tool description and each documented argument
//! becomes an input schema property.

use crate::error::Result;
use crate::model::{Document, Entries, FunctionDoc};
use crate::render::Renderer;
use serde::ser::{Serialize, SerializeMap, Serializer};

pub struct ToolRenderer;

#[derive(serde::Serialize)]
struct Tool<'a> {
    name: &'a str,
    description: String,
    #[serde(rename = "inputSchema")]
    input_schema: InputSchema<'a>,
}

#[derive(serde::Serialize)]
struct InputSchema<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    properties: Properties<'a>,
}

/// Argument entries as `{ name: { "description": ... } }`, in doc order.
struct Properties<'a>(&'a Entries);

#[derive(serde::Serialize)]
struct Property<'a> {
    description: &'a str,
}

impl Serialize for Properties<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, description) in self.0.iter() {
            map.serialize_entry(name, &Property { description })?;
        }
        map.end()
    }
}

impl Renderer for ToolRenderer {
    fn render(&self, doc: &Document) -> Result<String> {
        let tools: Vec<Tool> = doc.functions.iter().map(to_tool).collect();
        let mut out = serde_json::to_string_pretty(&tools)?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "tools.json"
    }
}

fn to_tool(func: &FunctionDoc) -> Tool<'_> {
    Tool {
        name: &func.name,
        description: tool_description(func),
        input_schema: InputSchema {
            kind: "object",
            properties: Properties(&func.doc.args),
        },
    }
}

fn tool_description(func: &FunctionDoc) -> String {
    let doc = &func.doc;
    match (doc.summary.is_empty(), doc.returns.is_empty()) {
        (_, true) => doc.summary.clone(),
        (true, false) => format!("Returns: {}", doc.returns),
        (false, false) => format!("{}\n\nReturns: {}", doc.summary, doc.returns),
    }
}
