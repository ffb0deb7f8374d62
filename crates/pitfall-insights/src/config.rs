use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Concurrency-related tags used for upstream candidate selection when
/// `PITFALL_CANDIDATE_TAGS` is not set.
pub const DEFAULT_CANDIDATE_TAGS: &[&str] = &[
    "multithreading",
    "thread",
    "concurrency",
    "synchronization",
    "executor",
    "locks",
    "parallel",
    "async",
    "java-threads",
];

/// Application configuration loaded explicitly from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory of crawled thread JSON files, one thread per file.
    pub dataset_path: PathBuf,
    /// Address for the REST API (e.g. "127.0.0.1:8080"). `None` serves MCP on stdio.
    pub http_listen_addr: Option<String>,
    /// Lowercased tags that select a thread as a candidate upstream of the core filter.
    pub candidate_tags: Vec<String>,
}

impl Config {
    /// Required:
    /// - `PITFALL_DATASET_PATH`: directory containing thread JSON files
    ///
    /// Optional:
    /// - `PITFALL_HTTP_LISTEN_ADDR`: serve the REST API instead of MCP on stdio
    /// - `PITFALL_CANDIDATE_TAGS`: comma-separated tag list (default: concurrency tags)
    pub fn from_env() -> Result<Self, AppError> {
        let dataset_path = std::env::var("PITFALL_DATASET_PATH").map_err(|_| {
            AppError::Config("PITFALL_DATASET_PATH environment variable is required".to_string())
        })?;

        Self::new(
            dataset_path,
            std::env::var("PITFALL_HTTP_LISTEN_ADDR").ok(),
            std::env::var("PITFALL_CANDIDATE_TAGS").ok().as_deref(),
        )
    }

    pub fn new(
        dataset_path: impl Into<PathBuf>,
        http_listen_addr: Option<String>,
        candidate_tags: Option<&str>,
    ) -> Result<Self, AppError> {
        let dataset_path = dataset_path.into();
        if !dataset_path.is_dir() {
            return Err(AppError::Config(format!(
                "dataset directory not found: {}",
                dataset_path.display()
            )));
        }

        let candidate_tags = match candidate_tags {
            Some(raw) => parse_tags(raw),
            None => DEFAULT_CANDIDATE_TAGS.iter().map(|t| t.to_string()).collect(),
        };

        Ok(Self {
            dataset_path,
            http_listen_addr: http_listen_addr.filter(|addr| !addr.trim().is_empty()),
            candidate_tags,
        })
    }

    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }
}

fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_dataset_directory() {
        let err = Config::new("/definitely/not/here", None, None).unwrap_err();
        assert!(err.to_string().contains("dataset directory not found"));
    }

    #[test]
    fn defaults_candidate_tags() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path(), None, None).unwrap();
        assert!(config.candidate_tags.iter().any(|t| t == "multithreading"));
        assert!(config.http_listen_addr.is_none());
    }

    #[test]
    fn parses_tag_override_and_listen_addr() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(
            dir.path(),
            Some("127.0.0.1:8080".to_string()),
            Some(" Java-Threads, ,deadlock "),
        )
        .unwrap();
        assert_eq!(config.candidate_tags, vec!["java-threads", "deadlock"]);
        assert_eq!(config.http_listen_addr.as_deref(), Some("127.0.0.1:8080"));
    }

    #[test]
    fn blank_listen_addr_means_stdio() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path(), Some("  ".to_string()), None).unwrap();
        assert!(config.http_listen_addr.is_none());
    }
}
