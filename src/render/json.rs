//! JSON renderer — the extracted records as-is, for tooling integration.

use crate::error::Result;
use crate::model::Document;
use crate::render::Renderer;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, doc: &Document) -> Result<String> {
        let mut out = serde_json::to_string_pretty(doc)?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[test]
    fn render_keeps_argument_order() {
        let doc = parser::parse_comment(
            "f",
            "Do f.\nArgs:\n    zeta: Z.\n    alpha: A.\nRaises:\n    E: e",
        );
        let out = JsonRenderer.render(&doc).unwrap();
        assert!(out.find("\"zeta\"").unwrap() < out.find("\"alpha\"").unwrap());

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["source"], serde_json::Value::Null);
        let func = &value["functions"][0];
        assert_eq!(func["name"], "f");
        assert_eq!(func["summary"], "Do f.");
        assert_eq!(func["args"]["alpha"], "A.");
        assert_eq!(func["returns"], "");
        assert_eq!(func["raises"]["E"], "e");
    }
}
