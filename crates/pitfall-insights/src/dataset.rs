/// Local thread dataset: one crawled question thread per JSON file.
///
/// Loading is lenient per file (unreadable or malformed files are logged and skipped)
/// and strict per directory (a missing or unreadable directory is an error). Threads
/// pass a cheap upstream selection before reaching the analyzer's own candidate filter.
use std::path::{Path, PathBuf};

use pitfall_core::model::QuestionRecord;
use regex::Regex;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::model::QuestionThread;

/// Lowercase substrings of title or body that select a thread.
const SELECTION_KEYWORDS: &[&str] = &[
    "thread",
    "parallel",
    "executor",
    "deadlock",
    "synchronized",
    "lock",
    "concurrent",
    "race condition",
    "volatile",
    "atomic",
];

/// API names that select a thread when they appear inside a code span.
const CODE_API_NAMES: &[&str] = &[
    "Thread",
    "Runnable",
    "Executor",
    "synchronized",
    "Lock",
    "ConcurrentHashMap",
    "CompletableFuture",
];

const CODE_SPAN_PATTERN: &str = r"(?is)<(?:code|pre)\b[^>]*>(.*?)</(?:code|pre)\s*>";

pub struct LocalDataset {
    path: PathBuf,
    candidate_tags: Vec<String>,
    code_span: Regex,
}

impl LocalDataset {
    pub fn new(path: impl Into<PathBuf>, candidate_tags: Vec<String>) -> Result<Self, AppError> {
        Ok(Self {
            path: path.into(),
            candidate_tags,
            code_span: Regex::new(CODE_SPAN_PATTERN)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(config.dataset_path(), config.candidate_tags.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every parseable thread in the directory, in file-name order.
    pub fn load_threads(&self) -> Result<Vec<QuestionThread>, AppError> {
        let entries = std::fs::read_dir(&self.path).map_err(|e| {
            AppError::Dataset(format!("failed to read {}: {e}", self.path.display()))
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| {
                entry
                    .inspect_err(|e| warn!(error = %e, "unreadable dataset entry, skipping"))
                    .ok()
            })
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
            })
            .collect();
        paths.sort();

        let threads: Vec<QuestionThread> = paths.iter().filter_map(|p| load_thread(p)).collect();
        info!(
            path = %self.path.display(),
            files = paths.len(),
            threads = threads.len(),
            "dataset loaded"
        );
        Ok(threads)
    }

    /// Selected threads as analyzer input, sorted by question id with duplicates dropped.
    pub fn load_candidates(&self) -> Result<Vec<QuestionRecord>, AppError> {
        let threads = self.load_threads()?;
        let total = threads.len();

        let mut records: Vec<QuestionRecord> = threads
            .iter()
            .filter(|thread| self.is_selected(thread))
            .map(to_record)
            .collect();
        records.sort_by_key(|r| r.id);
        records.dedup_by_key(|r| r.id);

        debug!(threads = total, selected = records.len(), "upstream selection applied");
        Ok(records)
    }

    /// Tag match, keyword in title or body, or a concurrency API name inside code.
    pub fn is_selected(&self, thread: &QuestionThread) -> bool {
        let question = &thread.question;

        let tagged = question.tags.iter().any(|tag| {
            self.candidate_tags
                .iter()
                .any(|wanted| tag.eq_ignore_ascii_case(wanted))
        });
        if tagged {
            return true;
        }

        let text = format!("{} {}", question.title, question.body).to_lowercase();
        if SELECTION_KEYWORDS.iter().any(|k| text.contains(k)) {
            return true;
        }

        self.code_span.captures_iter(&question.body).any(|caps| {
            caps.get(1)
                .is_some_and(|code| CODE_API_NAMES.iter().any(|api| code.as_str().contains(api)))
        })
    }
}

fn load_thread(path: &Path) -> Option<QuestionThread> {
    let content = std::fs::read_to_string(path)
        .inspect_err(|e| warn!(error = %e, path = %path.display(), "unreadable thread file, skipping"))
        .ok()?;
    serde_json::from_str(&content)
        .inspect_err(|e| warn!(error = %e, path = %path.display(), "malformed thread file, skipping"))
        .ok()
}

fn to_record(thread: &QuestionThread) -> QuestionRecord {
    let question = &thread.question;
    QuestionRecord {
        id: question.question_id,
        title: question.title.clone(),
        body: question.body.clone(),
        tags: question.tags.clone(),
        accepted_answer_body: thread.accepted_answer().map(|a| a.body.clone()),
    }
}

/// Hex SHA-256 over the records an analysis was computed from.
pub fn corpus_fingerprint(records: &[QuestionRecord]) -> String {
    let mut hasher = Sha256::new();
    for record in records {
        hasher.update(record.id.to_le_bytes());
        for part in [
            record.title.as_str(),
            record.body.as_str(),
            record.accepted_answer_body.as_deref().unwrap_or_default(),
        ] {
            hasher.update((part.len() as u64).to_le_bytes());
            hasher.update(part.as_bytes());
        }
    }
    format!("{:x}", hasher.finalize())
}
