//! Merge documents that would be written to the same output file.
//!
//! `api.py` and `api.rs`, or `a/tools.py` and `b/tools.py`, all map to one
//! `<stem>.<ext>` output. Their functions are concatenated in input order;
//! each function keeps its own `source`.

use crate::model::Document;
use crate::parser::SUPPORTED_EXTENSIONS;
use tracing::debug;

/// Group documents by output name, keeping first-seen order.
///
/// The merged document's `source` is that of the first input in the group.
pub fn merge(docs: Vec<Document>) -> Vec<(String, Document)> {
    let mut result: Vec<(String, Document)> = Vec::new();

    for doc in docs {
        let name = output_name(doc.source.as_deref().unwrap_or("-"));
        match result.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => {
                debug!(
                    output = %name,
                    source = doc.source.as_deref().unwrap_or("-"),
                    "merging into shared output"
                );
                existing.functions.extend(doc.functions);
            }
            None => result.push((name, doc)),
        }
    }

    result
}

/// Derive the output file name (without extension) from a source path.
/// "tools/search.py" → "search", "src/api.rs" → "api"
pub fn output_name(source: &str) -> String {
    let filename = source.rsplit(['/', '\\']).next().unwrap_or(source);
    SUPPORTED_EXTENSIONS
        .iter()
        .find_map(|ext| filename.strip_suffix(&format!(".{}", ext)))
        .unwrap_or(filename)
        .to_string()
}
