//! File loading: picks a format by extension and materializes a [`FaqSet`].

use std::path::Path;

use serde::Deserialize;

use super::error::{LoadError, Result};
use super::parser::parse_markdown;
use super::types::{FaqSet, normalize_tag};

#[derive(Debug, Deserialize)]
struct RawEntry {
    category: String,
    question: String,
    #[serde(default)]
    answer: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDocument {
    List(Vec<RawEntry>),
    Titled {
        #[serde(default)]
        title: Option<String>,
        entries: Vec<RawEntry>,
    },
}

/// Source formats understood by [`load_entries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Markdown,
    Csv,
    Json,
}

impl SourceFormat {
    /// Detect the format from the file extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "md" | "markdown" => Ok(Self::Markdown),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(LoadError::UnsupportedFormat { extension: ext }),
        }
    }
}

/// Read and parse a FAQ file.
///
/// # Errors
///
/// Returns a [`LoadError`] when the file cannot be read or decoded, or when
/// an entry has an empty question.
pub fn load_entries(path: &Path) -> Result<FaqSet> {
    let format = SourceFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let faq = parse_source(path, &content, format)?;
    tracing::info!(
        path = %path.display(),
        entries = faq.len(),
        categories = faq.categories().len(),
        "loaded FAQ"
    );
    Ok(faq)
}

/// Parse already-read content in the given format. `path` is only used in errors.
///
/// # Errors
///
/// See [`load_entries`].
pub fn parse_source(path: &Path, content: &str, format: SourceFormat) -> Result<FaqSet> {
    match format {
        SourceFormat::Markdown => parse_markdown(content),
        SourceFormat::Csv => parse_csv(path, content),
        SourceFormat::Json => parse_json(path, content),
    }
}

fn parse_csv(path: &Path, content: &str) -> Result<FaqSet> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let mut raw = Vec::new();
    for record in reader.deserialize::<RawEntry>() {
        let record = record.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        raw.push(record);
    }
    build(None, raw)
}

fn parse_json(path: &Path, content: &str) -> Result<FaqSet> {
    let doc: RawDocument = serde_json::from_str(content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    match doc {
        RawDocument::List(entries) => build(None, entries),
        RawDocument::Titled { title, entries } => build(title, entries),
    }
}

fn build(title: Option<String>, raw: Vec<RawEntry>) -> Result<FaqSet> {
    if let Some(index) = raw.iter().position(|e| e.question.trim().is_empty()) {
        return Err(LoadError::EmptyQuestion { index });
    }
    Ok(FaqSet::from_triples(
        title,
        raw.into_iter().map(|e| {
            (
                normalize_tag(&e.category),
                e.question.trim().to_string(),
                e.answer.trim().to_string(),
            )
        }),
    ))
}
