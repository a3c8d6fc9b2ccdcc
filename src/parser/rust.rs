//! Rust doc comment scanner.
//!
//! Collects `///` blocks and attaches them to the `fn` declaration that
//! follows. Attributes between the comment and the function are allowed;
//! any other code line drops the pending comment.

use crate::model::{Document, FunctionDoc};
use crate::parser::docstring;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

// `///` but not a `////` ruler
static RE_DOC_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^///([^/].*)?$").unwrap());

static RE_FN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:pub(?:\([^)]*\))?\s+)?",
        r"(?:(?:const|async|unsafe)\s+)*",
        r#"(?:extern\s+(?:"[^"]*"\s+)?)?"#,
        r"fn\s+(\w+)"
    ))
    .unwrap()
});

/// Parse a Rust source file into a Document.
pub fn parse(input: &str) -> Document {
    let mut functions = Vec::new();
    let mut current_doc: Vec<String> = Vec::new();

    for (idx, raw) in input.lines().enumerate() {
        let line = raw.trim();

        if let Some(caps) = RE_DOC_COMMENT.captures(line) {
            let text = caps.get(1).map_or("", |m| m.as_str());
            current_doc.push(text.strip_prefix(char::is_whitespace).unwrap_or(text).to_string());
            continue;
        }

        // Attributes and blank lines keep the pending comment
        if line.is_empty() || line.starts_with("#[") {
            continue;
        }

        if let Some(caps) = RE_FN.captures(line) {
            if !current_doc.is_empty() {
                let name = caps[1].to_string();
                debug!(function = %name, line = idx + 1, "found doc comment");
                functions.push(FunctionDoc {
                    name,
                    line: idx + 1,
                    source: None,
                    doc: docstring::parse(Some(&current_doc.join("\n"))),
                });
            }
        }
        current_doc.clear();
    }

    Document {
        source: None,
        functions,
    }
}
