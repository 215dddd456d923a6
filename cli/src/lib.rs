//! Corpus loading, configuration and result rendering for the `lexrank` binary.

use anyhow::{bail, Context, Result};
use lexrank_core::{
    CorpusIndex, DocId, IndexConfig, ScoreEntry, SearchOptions, Strategy, Vocabulary,
};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InputDoc {
    Text(String),
    Record { body: String },
}

impl InputDoc {
    fn into_body(self) -> String {
        match self {
            InputDoc::Text(body) | InputDoc::Record { body } => body,
        }
    }
}

/// Settings read from a `--config` JSON file. Command-line flags take precedence.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub index: IndexConfig,
    pub search: SearchOptions,
}

pub fn load_config(path: &Path) -> Result<CliConfig> {
    let f = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
    let config: CliConfig = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

/// Load documents from a `.json`, `.jsonl` or `.txt` file, or from every such
/// file under a directory. Files are visited in file-name order so document
/// ids are stable across runs.
pub fn load_corpus(input: &Path) -> Result<Vec<String>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        let entries = WalkDir::new(input).sort_by_file_name().into_iter();
        for entry in entries.filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && corpus_extension(p).is_some() {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        bail!("input {} does not exist", input.display());
    }

    let mut documents = Vec::new();
    for file in files {
        let before = documents.len();
        match corpus_extension(&file) {
            Some("jsonl") => load_jsonl(&file, &mut documents)?,
            Some("json") => load_json(&file, &mut documents)?,
            _ => load_lines(&file, &mut documents)?,
        }
        let docs = documents.len() - before;
        tracing::debug!(file = %file.display(), docs, "loaded corpus file");
    }
    tracing::info!(num_docs = documents.len(), input = %input.display(), "corpus loaded");
    Ok(documents)
}

fn corpus_extension(path: &Path) -> Option<&str> {
    path.extension()
        .and_then(|s| s.to_str())
        .filter(|ext| matches!(*ext, "json" | "jsonl" | "txt"))
}

fn load_jsonl(file: &Path, documents: &mut Vec<String>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid document", file.display(), lineno + 1))?;
        documents.push(doc.into_body());
    }
    Ok(())
}

fn load_json(file: &Path, documents: &mut Vec<String>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)
        .with_context(|| format!("parsing {}", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                let doc: InputDoc = serde_json::from_value(v)?;
                documents.push(doc.into_body());
            }
        }
        other => {
            let doc: InputDoc = serde_json::from_value(other).with_context(|| {
                format!("{}: expected a document or an array of documents", file.display())
            })?;
            documents.push(doc.into_body());
        }
    }
    Ok(())
}

fn load_lines(file: &Path, documents: &mut Vec<String>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        documents.push(line);
    }
    Ok(())
}

/// Whitespace-separated terms, normalized the same way as document text.
pub fn load_vocabulary(path: &Path) -> Result<Vocabulary> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading vocabulary {}", path.display()))?;
    Ok(lexrank_core::tokenize(&text).into_iter().collect())
}

#[derive(Debug, Serialize)]
pub struct SearchHit<'a> {
    pub score: f64,
    pub doc_id: DocId,
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SearchReport<'a> {
    pub query: &'a str,
    pub strategy: Strategy,
    pub results: Vec<SearchHit<'a>>,
}

impl<'a> SearchReport<'a> {
    pub fn new(
        index: &'a CorpusIndex,
        query: &'a str,
        strategy: Strategy,
        entries: &[ScoreEntry],
    ) -> Self {
        let results = entries
            .iter()
            .map(|e| SearchHit {
                score: e.score,
                doc_id: e.doc_id,
                text: index.document(e.doc_id).unwrap_or(""),
            })
            .collect();
        Self {
            query,
            strategy,
            results,
        }
    }

    pub fn to_table(&self) -> String {
        let mut out = format!("Query: '{}' ({})\n\n", self.query, self.strategy);
        out.push_str("Score  | idx | Document\n");
        out.push_str(&"-".repeat(60));
        out.push('\n');
        for hit in &self.results {
            out.push_str(&format!("{:.4} | {:<3} | {}\n", hit.score, hit.doc_id, hit.text));
        }
        out
    }
}

#[derive(Debug, Serialize)]
pub struct TermSummary {
    pub term: String,
    pub document_frequency: u32,
    pub bm25_idf: f64,
    pub smoothed_idf: f64,
}

#[derive(Debug, Serialize)]
pub struct CorpusStats {
    pub num_docs: usize,
    pub num_terms: usize,
    pub avg_length: f64,
    /// Most widespread terms first; ties in term order.
    pub top_terms: Vec<TermSummary>,
}

pub fn corpus_stats(index: &CorpusIndex, top: usize) -> CorpusStats {
    let mut terms: Vec<TermSummary> = index
        .vocabulary()
        .iter()
        .filter_map(|term| {
            index.term_stats(term).map(|s| TermSummary {
                term: term.to_string(),
                document_frequency: s.document_frequency,
                bm25_idf: s.bm25_idf,
                smoothed_idf: s.smoothed_idf,
            })
        })
        .collect();
    terms.sort_by(|a, b| {
        b.document_frequency
            .cmp(&a.document_frequency)
            .then_with(|| a.term.cmp(&b.term))
    });
    terms.truncate(top);
    CorpusStats {
        num_docs: index.num_docs(),
        num_terms: index.vocabulary().len(),
        avg_length: index.avg_length(),
        top_terms: terms,
    }
}
