//! Data model for parsed doc comments — format-agnostic.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Structured metadata extracted from one doc comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ParsedDoc {
    /// Trimmed first line of the comment
    pub summary: String,
    /// Parameter name → description
    pub args: Entries,
    /// Returns/Yields text, continuation lines joined by a space
    pub returns: String,
    /// Error name (possibly dotted) → description
    pub raises: Entries,
}

/// Insertion-ordered name → description mapping.
///
/// Re-inserting a name replaces its description but keeps the slot of the
/// first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entries {
    items: Vec<(String, String)>,
}

impl Entries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, description: impl Into<String>) {
        let name = name.into();
        let description = description.into();
        match self.items.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = description,
            None => self.items.push((name, description)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Entries {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entries = Entries::new();
        for (k, v) in iter {
            entries.insert(k, v);
        }
        entries
    }
}

impl Serialize for Entries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for (k, v) in &self.items {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// A documented function found in a source file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FunctionDoc {
    pub name: String,
    /// 1-based line of the declaration (0 when the input was a bare comment)
    pub line: usize,
    /// File the function came from, set when read from a file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(flatten)]
    pub doc: ParsedDoc,
}

/// Everything extracted from a single input.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Document {
    /// Path of the input, `None` for stdin
    pub source: Option<String>,
    pub functions: Vec<FunctionDoc>,
}
