//! Python source scanner.
//!
//! Finds `def` / `async def` declarations and the triple-quoted docstring
//! that opens their body. Methods are reported as `Class.method`. The
//! docstring body is handed to the doc comment parser verbatim, so its
//! indentation keeps working as the continuation signal.

use crate::model::{Document, FunctionDoc};
use crate::parser::docstring;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static RE_DEF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ \t]*)(?:async[ \t]+)?def[ \t]+(\w+)[ \t]*\(").unwrap());

static RE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ \t]*)class[ \t]+(\w+)").unwrap());

// Opening quote of a docstring, with optional string prefix
static RE_DOC_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[ \t]*(?:[rRuU])?("""|''')"#).unwrap());

/// Parse a Python source file into a Document.
pub fn parse(input: &str) -> Document {
    let lines: Vec<&str> = input.lines().collect();
    let mut functions = Vec::new();
    // (indent width, class name)
    let mut classes: Vec<(usize, String)> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if let Some(caps) = RE_CLASS.captures(line) {
            let indent = caps[1].len();
            classes.retain(|(w, _)| *w < indent);
            classes.push((indent, caps[2].to_string()));
            i += 1;
            continue;
        }

        let Some(caps) = RE_DEF.captures(line) else {
            i += 1;
            continue;
        };

        let indent = caps[1].len();
        classes.retain(|(w, _)| *w < indent);
        let name = match classes.last() {
            Some((_, class)) => format!("{}.{}", class, &caps[2]),
            None => caps[2].to_string(),
        };
        let decl_line = i + 1;

        // Signature may span lines; the body starts after it
        let open = caps.get(0).map_or(0, |m| m.end().saturating_sub(1));
        let Some(body_start) = find_body_start(&lines, i, open) else {
            i += 1;
            continue;
        };

        let mut j = body_start;
        while j < lines.len() && lines[j].trim().is_empty() {
            j += 1;
        }

        match read_docstring(&lines, j) {
            Some((text, end)) => {
                debug!(function = %name, line = decl_line, "found docstring");
                functions.push(FunctionDoc {
                    name,
                    line: decl_line,
                    source: None,
                    doc: docstring::parse(Some(&text)),
                });
                i = end + 1;
            }
            None => i = body_start,
        }
    }

    Document {
        source: None,
        functions,
    }
}

/// Scan the signature starting at `lines[start][open..]` (the opening paren)
/// and return the index of the first body line.
///
/// Returns `None` for one-line definitions (`def f(): pass`), which cannot
/// carry a docstring on a following line.
fn find_body_start(lines: &[&str], start: usize, open: usize) -> Option<usize> {
    let mut depth = 0i32;
    let mut closed = false;

    for (idx, line) in lines.iter().enumerate().skip(start) {
        let from = if idx == start { open } else { 0 };
        let code = strip_comment(line.get(from..).unwrap_or(""));
        let mut tail_from = None;
        // Open string literal and whether the previous char was a backslash
        let mut quote: Option<char> = None;
        let mut escaped = false;

        for (pos, ch) in code.char_indices() {
            if closed {
                break;
            }
            if let Some(q) = quote {
                match ch {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    c if c == q => quote = None,
                    _ => {}
                }
                continue;
            }
            match ch {
                '"' | '\'' => quote = Some(ch),
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => {
                    depth -= 1;
                    if depth == 0 {
                        closed = true;
                        tail_from = Some(pos + ch.len_utf8());
                    }
                }
                _ => {}
            }
        }

        if !closed {
            continue;
        }

        let tail = match tail_from {
            Some(pos) => &code[pos..],
            None => code,
        };
        let tail = tail.trim();
        if tail.ends_with(':') {
            return Some(idx + 1);
        }
        if let Some((_, rest)) = tail.split_once(':') {
            if !rest.trim().is_empty() {
                return None;
            }
        }
    }
    None
}

/// Drop a trailing `# comment` outside of string literals.
fn strip_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    for (pos, ch) in line.char_indices() {
        match (quote, ch) {
            (None, '#') => return &line[..pos],
            (None, '"' | '\'') => quote = Some(ch),
            (Some(q), c) if c == q => quote = None,
            _ => {}
        }
    }
    line
}

/// Read a triple-quoted string opening at `lines[at]`.
///
/// Returns the text between the quotes and the index of the closing line.
fn read_docstring(lines: &[&str], at: usize) -> Option<(String, usize)> {
    let first = lines.get(at)?;
    let caps = RE_DOC_OPEN.captures(first)?;
    let delim = caps.get(1)?;
    let quote = delim.as_str();
    let rest = &first[delim.end()..];

    if let Some(end) = rest.find(quote) {
        return Some((rest[..end].to_string(), at));
    }

    let mut body = vec![rest.to_string()];
    for (idx, line) in lines.iter().enumerate().skip(at + 1) {
        if let Some(end) = line.find(quote) {
            body.push(line[..end].to_string());
            return Some((body.join("\n"), idx));
        }
        body.push(line.to_string());
    }
    // Unterminated: take everything to the end of file
    Some((body.join("\n"), lines.len().saturating_sub(1)))
}
