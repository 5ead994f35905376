use anyhow::{bail, Result};
use boolir_core::{boolean_query, InvertedIndex, QueryError, Token};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::Path;
use std::time::Instant;
use walkdir::WalkDir;

/// Read every `.txt` file directly under `dir` into a filename -> content
/// mapping, sorted by filename. Subdirectories and other extensions are
/// ignored. A missing directory is an error; an empty result is left to the
/// caller to accept or reject.
pub fn read_documents(dir: &Path) -> Result<BTreeMap<String, String>> {
    if !dir.is_dir() {
        bail!("document folder '{}' does not exist", dir.display());
    }
    let mut docs = BTreeMap::new();
    for entry in WalkDir::new(dir).max_depth(1).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_txt = path
            .extension()
            .and_then(|s| s.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case("txt"));
        if !is_txt {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        let text = std::fs::read_to_string(path)?;
        docs.insert(name, text);
    }
    tracing::info!(num_docs = docs.len(), folder = %dir.display(), "loaded documents");
    Ok(docs)
}

/// Load the corpus for indexing, rejecting an empty one. The core accepts
/// an empty index as a degenerate valid state, but a session over zero
/// documents answers every query with nothing, so startup refuses it.
pub fn load_corpus(dir: &Path) -> Result<BTreeMap<String, String>> {
    let docs = read_documents(dir)?;
    if docs.is_empty() {
        bail!("no .txt documents found in '{}'", dir.display());
    }
    Ok(docs)
}

#[derive(Debug, Serialize)]
pub struct QueryReport {
    pub query: String,
    pub tokens: Vec<String>,
    pub postfix: Vec<String>,
    pub total_hits: usize,
    pub results: Vec<String>,
    pub took_s: f64,
}

fn render(tokens: &[Token]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

/// Run one boolean query and package all three stages for display.
pub fn run_query(index: &InvertedIndex, query: &str) -> Result<QueryReport, QueryError> {
    let start = Instant::now();
    let out = boolean_query(query, index)?;
    Ok(QueryReport {
        query: query.to_string(),
        tokens: render(&out.tokens),
        postfix: render(&out.postfix),
        total_hits: out.matches.len(),
        results: out.matches,
        took_s: start.elapsed().as_secs_f64(),
    })
}

pub fn write_summary(out: &mut impl Write, index: &InvertedIndex, preview: usize) -> Result<()> {
    writeln!(out, "Indexed {} documents, {} terms.", index.num_docs(), index.num_terms())?;
    writeln!(out, "\n=== Dictionary (first {preview} terms) ===")?;
    let dict: Vec<&str> = index.dictionary().take(preview).collect();
    writeln!(out, "{dict:?}")?;
    writeln!(out, "\n=== Inverted index (first {preview} terms) ===")?;
    for term in index.dictionary().take(preview) {
        if let Some(postings) = index.postings(term) {
            let docs: Vec<&str> = postings.iter().map(String::as_str).collect();
            writeln!(out, "{term} -> {docs:?}")?;
        }
    }
    Ok(())
}

pub fn write_report(out: &mut impl Write, report: &QueryReport, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(report)?)?;
        return Ok(());
    }
    writeln!(out, "Tokens: {:?}", report.tokens)?;
    writeln!(out, "Postfix: {:?}", report.postfix)?;
    writeln!(out, "Results ({} docs):", report.total_hits)?;
    for doc in &report.results {
        writeln!(out, " - {doc}")?;
    }
    Ok(())
}

/// Interactive loop: one query per line, `exit`/`quit` leaves, blank lines
/// are skipped, and a malformed query reports its error without ending the
/// session.
pub fn repl(index: &InvertedIndex, input: impl BufRead, mut out: impl Write, json: bool) -> Result<()> {
    write!(out, "Query> ")?;
    out.flush()?;
    for line in input.lines() {
        let line = line?;
        let query = line.trim();
        if query.is_empty() {
            write!(out, "Query> ")?;
            out.flush()?;
            continue;
        }
        if query.eq_ignore_ascii_case("exit") || query.eq_ignore_ascii_case("quit") {
            writeln!(out, "Exiting.")?;
            break;
        }
        match run_query(index, query) {
            Ok(report) => write_report(&mut out, &report, json)?,
            Err(err) => writeln!(out, "Error evaluating query: {err}")?,
        }
        write!(out, "Query> ")?;
        out.flush()?;
    }
    Ok(())
}
