//! docmeta — extract summary, arguments, returns and raises from doc comments.
//!
//! Two modes:
//!
//! - **stdin mode**: `docmeta < comment.txt` parses stdin as one doc comment
//!   (or as a source file with `--lang python|rust`)
//! - **file mode**: `docmeta -f tool -o out/ tools/*.py src/` scans source files

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use docmeta::model::Document;
use docmeta::parser::{self, merge};
use docmeta::render::{self, Renderer};
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "docmeta",
    about = "Extract summary, arguments, returns and raises from function doc comments"
)]
struct Cli {
    /// Input files, directories or glob patterns. If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory. Without it, results are printed to stdout.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: json (default), markdown, tool
    #[arg(short = 'f', long, default_value = "json")]
    format: String,

    /// How to interpret stdin
    #[arg(long, value_enum, default_value_t = Lang::Docstring)]
    lang: Lang,

    /// Omit inputs without documented functions (always on with --output)
    #[arg(long)]
    skip_empty: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Lang {
    /// The whole input is one doc comment
    Docstring,
    Python,
    Rust,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.files.is_empty() {
        return stdin_mode(&cli);
    }

    file_mode(&cli)
}

/// Log to stderr. `DOCMETA_LOG` overrides the level picked by `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("DOCMETA_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .without_time()
        .init();
}

/// stdin mode: read from stdin, parse, write the rendered result to stdout.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let doc = match cli.lang {
        Lang::Docstring => parser::parse_comment("-", &input),
        Lang::Python => parser::python::parse(&input),
        Lang::Rust => parser::rust::parse(&input),
    };
    let renderer = render::create_renderer(&cli.format)?;
    print!("{}", renderer.render(&doc)?);
    Ok(())
}

/// file mode: process multiple files, print one result per input or write
/// one output file per output name.
fn file_mode(cli: &Cli) -> Result<()> {
    let renderer = render::create_renderer(&cli.format)?;
    let input_files = expand_globs(&cli.files)?;
    info!(count = input_files.len(), "processing input files");

    let docs: Vec<Document> = input_files.iter().filter_map(|p| read_document(p)).collect();

    let Some(dir) = cli.output.as_deref() else {
        for doc in &docs {
            if doc.functions.is_empty() && cli.skip_empty {
                continue;
            }
            print!("{}", render_document(renderer.as_ref(), doc)?);
        }
        return Ok(());
    };

    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;

    // Inputs sharing a stem (api.py + api.rs) land in the same file
    for (name, doc) in merge::merge(docs) {
        if doc.functions.is_empty() {
            info!(output = %name, "no documented functions, skipping");
            continue;
        }
        let rendered = render_document(renderer.as_ref(), &doc)?;
        write_output(dir, &name, renderer.as_ref(), &rendered)?;
    }

    Ok(())
}

fn render_document(renderer: &dyn Renderer, doc: &Document) -> Result<String> {
    renderer
        .render(doc)
        .with_context(|| format!("failed to render {}", doc.source.as_deref().unwrap_or("-")))
}

/// Read and parse one input. Unreadable or unsupported files are skipped.
fn read_document(path: &Path) -> Option<Document> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping unreadable file");
            return None;
        }
    };
    match parser::parse_file(path, &content) {
        Ok(doc) => Some(doc),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping file");
            None
        }
    }
}

fn write_output(dir: &Path, name: &str, renderer: &dyn Renderer, rendered: &str) -> Result<()> {
    let out_path = dir.join(format!("{}.{}", name, renderer.file_extension()));
    fs::write(&out_path, rendered)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    info!(path = %out_path.display(), "wrote output");
    Ok(())
}

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for supported file types.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // Directories are scanned non-recursively
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                let supported = p
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|ext| parser::SUPPORTED_EXTENSIONS.contains(&ext));
                if p.is_file() && supported {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!(pattern = %pattern, "no files matched");
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}
