//! FAQ knowledge base: fuzzy question -> answer lookup used when no intent
//! matches.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::render_template;
use crate::kernel::intent::similarity::{best_match_by, normalize, sequence_ratio};

pub const DEFAULT_FAQ_CUTOFF: f64 = 0.4;

fn default_cutoff() -> f64 {
    DEFAULT_FAQ_CUTOFF
}

fn default_answer_template() -> String {
    "**Answer:** {answer}".to_string()
}

fn default_topics_header() -> String {
    "I don't have a specific answer. Try these topics:".to_string()
}

#[derive(Debug, Error)]
pub enum FaqError {
    #[error("failed to read FAQ file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid FAQ TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid FAQ JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid FAQ CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("unsupported FAQ file format {} (expected .toml, .json or .csv)", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("FAQ cutoff must be within 0.0..=1.0, got {0}")]
    CutoffOutOfRange(f64),

    #[error("FAQ entry {0} has an empty question")]
    EmptyQuestion(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    #[serde(alias = "Question")]
    pub question: String,
    #[serde(alias = "Answer")]
    pub answer: String,
}

/// Serialized form, either the `[faq]` table of a bot config or a standalone
/// `.toml` / `.json` file. A `.csv` file only supplies `entries`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FaqFile {
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default = "default_answer_template")]
    pub answer_template: String,
    #[serde(default = "default_topics_header")]
    pub topics_header: String,
    #[serde(default)]
    pub entries: Vec<FaqEntry>,
}

impl Default for FaqFile {
    fn default() -> Self {
        Self {
            cutoff: default_cutoff(),
            topics: Vec::new(),
            answer_template: default_answer_template(),
            topics_header: default_topics_header(),
            entries: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FaqHit {
    /// The stored question, as written in the FAQ file.
    pub question: String,
    pub answer: String,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct FaqBook {
    entries: Vec<FaqEntry>,
    // Parallel to `entries`.
    normalized: Vec<String>,
    cutoff: f64,
    topics: Vec<String>,
    answer_template: String,
    topics_header: String,
}

impl FaqBook {
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        let normalized = entries.iter().map(|e| normalize(&e.question)).collect();
        Self {
            entries,
            normalized,
            cutoff: DEFAULT_FAQ_CUTOFF,
            topics: Vec::new(),
            answer_template: default_answer_template(),
            topics_header: default_topics_header(),
        }
    }

    pub fn compile(file: FaqFile) -> Result<Self, FaqError> {
        if !(0.0..=1.0).contains(&file.cutoff) {
            return Err(FaqError::CutoffOutOfRange(file.cutoff));
        }
        if let Some(pos) = file.entries.iter().position(|e| e.question.trim().is_empty()) {
            return Err(FaqError::EmptyQuestion(pos));
        }

        let mut book = Self::new(file.entries);
        book.cutoff = file.cutoff;
        book.topics = file
            .topics
            .into_iter()
            .filter(|t| !t.trim().is_empty())
            .collect();
        book.answer_template = file.answer_template;
        book.topics_header = file.topics_header;
        Ok(book)
    }

    /// Loads a standalone FAQ file, format chosen by extension. CSV files need
    /// a header row with `question`/`answer` (or `Question`/`Answer`) columns.
    pub fn load(path: &Path) -> Result<Self, FaqError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let read = || {
            std::fs::read_to_string(path).map_err(|source| FaqError::Io {
                path: path.to_path_buf(),
                source,
            })
        };

        let file: FaqFile = match extension.as_deref() {
            Some("toml") => toml::from_str(&read()?)?,
            Some("json") => serde_json::from_str(&read()?)?,
            Some("csv") => FaqFile {
                entries: parse_csv(&read()?)?,
                ..FaqFile::default()
            },
            _ => {
                return Err(FaqError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        let book = Self::compile(file)?;
        info!(path = %path.display(), entries = book.len(), "loaded FAQ");
        Ok(book)
    }

    pub fn lookup(&self, query: &str) -> Option<FaqHit> {
        let query = normalize(query);
        if query.is_empty() {
            return None;
        }

        // Blocks are searched in the stored question first.
        let best = best_match_by(
            &query,
            self.normalized.iter().map(String::as_str),
            self.cutoff,
            |query, question| sequence_ratio(question, query),
        )?;
        let entry = &self.entries[best.index];
        debug!(question = %entry.question, score = best.score, "FAQ hit");

        Some(FaqHit {
            question: entry.question.clone(),
            answer: entry.answer.clone(),
            score: best.score,
        })
    }

    pub fn render_answer(&self, hit: &FaqHit) -> String {
        render_template(
            &self.answer_template,
            &[("answer", hit.answer.as_str()), ("question", hit.question.as_str())],
        )
    }

    /// Bulleted topic suggestions, `None` when no topics are configured.
    pub fn topics_reply(&self) -> Option<String> {
        if self.topics.is_empty() {
            return None;
        }
        let bullets: Vec<String> = self.topics.iter().map(|t| format!("• {}", t)).collect();
        Some(format!("{}\n{}", self.topics_header, bullets.join("\n")))
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_csv(text: &str) -> Result<Vec<FaqEntry>, FaqError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut entries = Vec::new();
    for row in reader.deserialize::<FaqEntry>() {
        entries.push(row?);
    }
    Ok(entries)
}
