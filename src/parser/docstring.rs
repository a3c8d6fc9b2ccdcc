//! Doc comment parser — line-by-line state machine.
//!
//! Recognizes `Args:` / `Returns:` / `Raises:` style sections, `name (type):
//! description` entries inside them, and indented continuation lines. Never
//! fails: malformed input degrades to partial or empty fields.

use crate::model::ParsedDoc;
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

// -- Patterns -----------------------------------------------------------------

// `name: desc`, `name (type): desc`, `pkg.Error: desc`
static RE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([\w.]+)\s*(?:\(.*\))?:\s*(.*)").unwrap());

const ARGS_HEADERS: &[&str] = &["args:", "arguments:", "parameters:"];
const RETURNS_HEADERS: &[&str] = &["returns:", "yields:"];
const RAISES_PREFIXES: &[&str] = &["raises ", "raises:", "errors:", "exceptions:"];
const OTHER_PREFIXES: &[&str] = &["attributes:", "see also:", "example:", "examples:", "notes:"];

// -- Scanner state ------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Args,
    Returns,
    Raises,
    /// Recognized but not captured (Notes, Examples, ...)
    Other,
}

/// Classify a trimmed line as a section header.
///
/// Args and Returns headers must match exactly; Raises and the ignored
/// sections match by prefix. Comparison is case-insensitive.
fn classify_header(trimmed: &str) -> Option<Section> {
    let lower = trimmed.to_lowercase();
    if ARGS_HEADERS.contains(&lower.as_str()) {
        Some(Section::Args)
    } else if RETURNS_HEADERS.contains(&lower.as_str()) {
        Some(Section::Returns)
    } else if RAISES_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        Some(Section::Raises)
    } else if OTHER_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        Some(Section::Other)
    } else {
        None
    }
}

struct Scanner {
    doc: ParsedDoc,
    section: Section,
    // Open Args/Raises entry
    key: Option<String>,
    // Description lines of the open entry, or of Returns
    desc: Vec<String>,
}

impl Scanner {
    fn new(summary: String) -> Self {
        Scanner {
            doc: ParsedDoc {
                summary,
                ..Default::default()
            },
            section: Section::None,
            key: None,
            desc: Vec::new(),
        }
    }

    /// An entry or a Returns text is being collected.
    fn has_open_item(&self) -> bool {
        match self.section {
            Section::Args | Section::Raises => self.key.is_some(),
            Section::Returns => !self.desc.is_empty(),
            Section::None | Section::Other => false,
        }
    }

    /// Commit whatever is pending into the record and clear the accumulator.
    fn flush(&mut self) {
        let text = self.desc.join(" ").trim().to_string();
        match self.section {
            Section::Args => {
                if let Some(key) = self.key.take() {
                    self.doc.args.insert(key, text);
                }
            }
            Section::Raises => {
                if let Some(key) = self.key.take() {
                    self.doc.raises.insert(key, text);
                }
            }
            Section::Returns => self.doc.returns = text,
            Section::None | Section::Other => {}
        }
        self.key = None;
        self.desc.clear();
    }

    fn process_line(&mut self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return;
        }

        if let Some(next) = classify_header(trimmed) {
            self.flush();
            trace!(from = ?self.section, to = ?next, "section header");
            self.section = next;
            return;
        }

        let indented = line.starts_with(char::is_whitespace);

        // An unindented line closes the open item and leaves the section;
        // the line itself is not captured.
        if !indented && self.has_open_item() {
            self.flush();
            trace!(from = ?self.section, "de-indented line ends section");
            self.section = Section::None;
            return;
        }

        match self.section {
            Section::Args | Section::Raises => {
                // A key-line always starts a new entry, even when indented.
                if let Some(caps) = RE_KEY.captures(line) {
                    self.flush();
                    self.key = Some(caps[1].to_string());
                    self.desc.push(caps[2].trim().to_string());
                } else if self.key.is_some() && indented {
                    self.desc.push(trimmed.to_string());
                }
            }
            Section::Returns => {
                if self.desc.is_empty() || indented {
                    self.desc.push(trimmed.to_string());
                }
            }
            Section::None | Section::Other => {}
        }
    }

    fn finish(mut self) -> ParsedDoc {
        if self.has_open_item() {
            self.flush();
        }
        self.doc
    }
}

// -- Public API ---------------------------------------------------------------

/// Parse a doc comment body into summary, args, returns and raises.
///
/// `None`, empty and whitespace-only input all yield the empty record. The
/// first line of the trimmed text is always the summary.
pub fn parse(text: Option<&str>) -> ParsedDoc {
    let Some(text) = text else {
        return ParsedDoc::default();
    };
    let mut lines = text.trim().lines();
    let Some(first) = lines.next() else {
        return ParsedDoc::default();
    };

    let mut scanner = Scanner::new(first.trim().to_string());
    for line in lines {
        scanner.process_line(line);
    }
    scanner.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Entries;
    use pretty_assertions::assert_eq;

    fn entries(pairs: &[(&str, &str)]) -> Entries {
        pairs.iter().copied().collect()
    }

    #[test]
    fn absent_and_blank_input_is_empty() {
        assert_eq!(parse(None), ParsedDoc::default());
        assert_eq!(parse(Some("")), ParsedDoc::default());
        assert_eq!(parse(Some("   \n\t\n  ")), ParsedDoc::default());
    }

    #[test]
    fn summary_is_literal_first_line() {
        let doc = parse(Some("\n\n   Do the thing.  \nMore text.\n"));
        assert_eq!(doc.summary, "Do the thing.");

        // Even a header-looking first line is the summary
        let doc = parse(Some("Args:\n    x: value"));
        assert_eq!(doc.summary, "Args:");
        assert!(doc.args.is_empty());
    }

    #[test]
    fn summary_reparse_is_idempotent() {
        let doc = parse(Some("  Fetch a user by id.\n\nArgs:\n    id: The id.\n"));
        let again = parse(Some(&doc.summary));
        assert_eq!(again.summary, doc.summary);
        assert!(again.args.is_empty());
    }

    #[test]
    fn args_with_and_without_types() {
        let doc = parse(Some(
            "Summary.\n\nArgs:\n    x: the x value\n    y (int): the y value\n",
        ));
        assert_eq!(doc.args, entries(&[("x", "the x value"), ("y", "the y value")]));
        assert_eq!(doc.returns, "");
        assert!(doc.raises.is_empty());
    }

    #[test]
    fn nested_type_annotation_is_stripped() {
        let doc = parse(Some("S.\nArgs:\n    data (Dict[str, List[int]]): Payload."));
        assert_eq!(doc.args.get("data"), Some("Payload."));
    }

    #[test]
    fn continuation_joined_with_single_space() {
        let doc = parse(Some(
            "Run code.\n\nArgs:\n    code: The string containing the Python\n        code to execute.\n",
        ));
        assert_eq!(
            doc.args.get("code"),
            Some("The string containing the Python code to execute.")
        );
    }

    #[test]
    fn continuation_after_empty_first_description() {
        let doc = parse(Some("S.\nArgs:\n    opts:\n        Extra options.\n"));
        assert_eq!(doc.args.get("opts"), Some("Extra options."));
    }

    #[test]
    fn alternate_args_headers() {
        for header in ["Arguments:", "PARAMETERS:", "args:"] {
            let doc = parse(Some(&format!("S.\n{header}\n    a: A.")));
            assert_eq!(doc.args.get("a"), Some("A."), "header {header}");
        }
    }

    #[test]
    fn raises_plain_and_qualified() {
        let doc = parse(Some(
            "S.\n\nRaises:\n    ValueError: bad input\n    pkg.MyError: oops\n",
        ));
        assert_eq!(
            doc.raises,
            entries(&[("ValueError", "bad input"), ("pkg.MyError", "oops")])
        );
    }

    #[test]
    fn raises_prefix_headers() {
        let doc = parse(Some("S.\nRaises ValueError: when bad\n    KeyError: missing"));
        assert_eq!(doc.raises, entries(&[("KeyError", "missing")]));

        let doc = parse(Some("S.\nExceptions:\n    E: e\nErrors:\n    F: f"));
        assert_eq!(doc.raises, entries(&[("E", "e"), ("F", "f")]));
    }

    #[test]
    fn returns_single_and_multi_line() {
        let doc = parse(Some("S.\n\nReturns:\n    The result.\n"));
        assert_eq!(doc.returns, "The result.");

        let doc = parse(Some("S.\n\nReturns:\n    A string with\n    the output.\n"));
        assert_eq!(doc.returns, "A string with the output.");
    }

    #[test]
    fn yields_is_returns() {
        let doc = parse(Some("S.\nYields:\n    Chunks of data."));
        assert_eq!(doc.returns, "Chunks of data.");
    }

    #[test]
    fn trailing_returns_section_replaces_earlier() {
        let doc = parse(Some("S.\nReturns:\n    A.\nYields:\n    B."));
        assert_eq!(doc.returns, "B.");

        // An empty trailing section leaves the earlier text alone
        let doc = parse(Some("S.\nReturns:\n    A.\nYields:"));
        assert_eq!(doc.returns, "A.");
    }

    #[test]
    fn returns_first_line_may_be_unindented() {
        let doc = parse(Some("S.\nReturns:\nThe value\n    and more.\n"));
        assert_eq!(doc.returns, "The value and more.");
    }

    #[test]
    fn duplicate_key_last_wins() {
        let doc = parse(Some("S.\nArgs:\n    x: first\n    y: why\n    x: second\n"));
        assert_eq!(doc.args, entries(&[("x", "second"), ("y", "why")]));
        assert_eq!(doc.args.keys().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn indented_key_pattern_starts_new_entry() {
        let doc = parse(Some("S.\nArgs:\n    a: Uses mode\n        note: not a continuation\n"));
        assert_eq!(doc.args, entries(&[("a", "Uses mode"), ("note", "not a continuation")]));
    }

    #[test]
    fn unindented_paragraph_terminates_entry() {
        let doc = parse(Some(
            "S.\nArgs:\n    x: the x\n        value\nThis paragraph is not an arg.\nNor is this one.\n",
        ));
        assert_eq!(doc.args, entries(&[("x", "the x value")]));
        assert_eq!(doc.returns, "");
        assert!(doc.raises.is_empty());
    }

    #[test]
    fn unindented_paragraph_terminates_returns() {
        let doc = parse(Some(
            "S.\nReturns:\n    The value.\nTrailing paragraph.\nSecond line.\n",
        ));
        assert_eq!(doc.returns, "The value.");
    }

    #[test]
    fn unindented_key_line_after_open_key_is_dropped() {
        let doc = parse(Some("S.\nArgs:\nx: first\ny: second\n"));
        assert_eq!(doc.args, entries(&[("x", "first")]));
    }

    #[test]
    fn header_after_paragraph_resumes_collection() {
        let doc = parse(Some(
            "S.\nArgs:\n    x: X.\nSome prose.\nRaises:\n    IOError: disk\n",
        ));
        assert_eq!(doc.args, entries(&[("x", "X.")]));
        assert_eq!(doc.raises, entries(&[("IOError", "disk")]));
    }

    #[test]
    fn blank_lines_do_not_end_entries() {
        let doc = parse(Some("S.\nArgs:\n    x: one\n\n        two\n"));
        assert_eq!(doc.args.get("x"), Some("one two"));
    }

    #[test]
    fn other_sections_stop_accumulation() {
        let doc = parse(Some(
            "S.\nArgs:\n    x: X.\nNotes:\n    y: not captured\nExamples:\n    >>> f(1)\n",
        ));
        assert_eq!(doc.args, entries(&[("x", "X.")]));
        assert_eq!(doc.returns, "");
        assert!(doc.raises.is_empty());
    }

    #[test]
    fn near_miss_headers_are_content() {
        // Trailing text after an exact-match header is not a header
        let doc = parse(Some("S.\nArgs: the inputs\n    x: X.\nReturns: nothing\n"));
        assert!(doc.args.is_empty());
        assert_eq!(doc.returns, "");

        // Prefix headers tolerate trailing text
        let doc = parse(Some("S.\nArgs:\n    x: X.\nNotes: see below\n    y: Y.\n"));
        assert_eq!(doc.args, entries(&[("x", "X.")]));
    }

    #[test]
    fn header_case_insensitive() {
        let doc = parse(Some("S.\nARGS:\n    x: X.\nreturns:\n    R.\nRAISES:\n    E: e"));
        assert_eq!(doc.args.get("x"), Some("X."));
        assert_eq!(doc.returns, "R.");
        assert_eq!(doc.raises.get("E"), Some("e"));
    }

    #[test]
    fn non_matching_lines_in_args_are_ignored() {
        let doc = parse(Some("S.\nArgs:\n    just some words\n    x: X.\n"));
        assert_eq!(doc.args, entries(&[("x", "X.")]));
    }

    #[test]
    fn header_lines_never_become_values() {
        let doc = parse(Some("S.\nArgs:\n    x: X.\nReturns:\nRaises:\n    E: e\n"));
        assert_eq!(doc.args, entries(&[("x", "X.")]));
        assert_eq!(doc.returns, "");
        assert_eq!(doc.raises, entries(&[("E", "e")]));
    }

    #[test]
    fn tab_indentation_continues() {
        let doc = parse(Some("S.\nArgs:\n\tx: one\n\t\ttwo\n"));
        assert_eq!(doc.args.get("x"), Some("one two"));
    }

    #[test]
    fn full_google_style_docstring() {
        let text = r#"
        Executes Python code within a secure cloud sandbox.

        Args:
            code: The string containing the Python code to execute.
            timeout (float): Seconds to wait before
                giving up.

        Returns:
            A string containing the formatted stdout and stderr
            from the execution.

        Raises:
            NotAuthorizedError: If the API key is not set.
            ValueError: If the code is empty.
"#;
        let doc = parse(Some(text));
        assert_eq!(doc.summary, "Executes Python code within a secure cloud sandbox.");
        assert_eq!(
            doc.args,
            entries(&[
                ("code", "The string containing the Python code to execute."),
                ("timeout", "Seconds to wait before giving up."),
            ])
        );
        assert_eq!(
            doc.returns,
            "A string containing the formatted stdout and stderr from the execution."
        );
        assert_eq!(
            doc.raises,
            entries(&[
                ("NotAuthorizedError", "If the API key is not set."),
                ("ValueError", "If the code is empty."),
            ])
        );
    }

    #[test]
    fn classify_header_exact_and_prefix() {
        assert_eq!(classify_header("Args:"), Some(Section::Args));
        assert_eq!(classify_header("Args: x"), None);
        assert_eq!(classify_header("Yields:"), Some(Section::Returns));
        assert_eq!(classify_header("Raises ValueError"), Some(Section::Raises));
        assert_eq!(classify_header("See also: other"), Some(Section::Other));
        assert_eq!(classify_header("Raisesfoo"), None);
        assert_eq!(classify_header("Summary"), None);
    }
}
