//! Parser module — dispatch by file extension.

pub mod docstring;
pub mod merge;
pub mod python;
pub mod rust;

use crate::error::{Error, Result};
use crate::model::{Document, FunctionDoc};
use std::path::Path;
use tracing::debug;

/// File extensions accepted by [`parse_file`].
pub const SUPPORTED_EXTENSIONS: &[&str] = &["py", "pyi", "rs", "txt", "md"];

/// Parse a source file into a Document based on its extension.
///
/// Plain `.txt`/`.md` files are treated as a single doc comment named after
/// the file stem.
pub fn parse_file(path: &Path, content: &str) -> Result<Document> {
    let mut doc = match path.extension().and_then(|e| e.to_str()) {
        Some("py" | "pyi") => python::parse(content),
        Some("rs") => rust::parse(content),
        Some("txt" | "md") => {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            parse_comment(&name, content)
        }
        _ => {
            return Err(Error::UnsupportedFileType {
                path: path.to_path_buf(),
            })
        }
    };
    let source = path.to_string_lossy().to_string();
    for func in &mut doc.functions {
        func.source = Some(source.clone());
    }
    doc.source = Some(source);
    debug!(
        path = %path.display(),
        functions = doc.functions.len(),
        "parsed source file"
    );
    Ok(doc)
}

/// Wrap a bare doc comment body as a single-function Document.
pub fn parse_comment(name: &str, text: &str) -> Document {
    Document {
        source: None,
        functions: vec![FunctionDoc {
            name: name.to_string(),
            line: 0,
            source: None,
            doc: docstring::parse(Some(text)),
        }],
    }
}
