//! docmeta — extract structured metadata from function doc comments.
//!
//! The core is [`parse`]: given a doc comment body it returns the one-line
//! summary, the documented arguments, the returns text and the documented
//! errors. Source scanners for Python and Rust locate doc comments in whole
//! files, and renderers turn the results into JSON, markdown or tool
//! descriptors.

pub mod error;
pub mod model;
pub mod parser;
pub mod render;

pub use error::{Error, Result};
pub use model::{Document, Entries, FunctionDoc, ParsedDoc};
pub use parser::docstring::parse;
