use crate::ports::{CandidateFile, ChangeSink, PullRequest, RepositorySource};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Path or content terms that make a file a candidate
pub const DEFAULT_SEARCH_KEYWORDS: &[&str] = &[
    "stripe",
    "square",
    "payment",
    "billing",
    "checkout",
    "subscription",
    "charge",
    "customer",
];

const SKIPPED_DIRS: &[&str] = &[
    "node_modules",
    "target",
    "__pycache__",
    "venv",
    "dist",
    "build",
];

const MAX_CANDIDATE_BYTES: u64 = 1024 * 1024;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Path escapes repository root: {0}")]
    InvalidPath(String),
}

/// Working copy on disk acting as both source and sink.
///
/// Branches and pull requests are not materialized: `create_branch` echoes
/// the name and writes land directly in the working tree.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    root: PathBuf,
    keywords: Vec<String>,
}

impl LocalRepository {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            keywords: DEFAULT_SEARCH_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Replace the candidate search terms
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords
            .into_iter()
            .map(|k| k.into().to_lowercase())
            .collect();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, RepositoryError> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if path.is_empty() || escapes {
            return Err(RepositoryError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }

    fn scan(root: &Path, keywords: &[String]) -> Vec<CandidateFile> {
        let mut files = Vec::new();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped(entry));

        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Failed to read entry: {e}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            if let Ok(meta) = entry.metadata() {
                if meta.len() > MAX_CANDIDATE_BYTES {
                    log::debug!("Skipping large file {}", entry.path().display());
                    continue;
                }
            }

            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            // binary and non-UTF-8 files are never candidates
            let Ok(content) = std::fs::read_to_string(entry.path()) else {
                continue;
            };

            let path_lower = relative.to_lowercase();
            let content_lower = content.to_lowercase();
            if keywords
                .iter()
                .any(|k| path_lower.contains(k.as_str()) || content_lower.contains(k.as_str()))
            {
                files.push(CandidateFile::new(relative));
            }
        }

        log::info!("Found {} candidate payment files", files.len());
        files
    }
}

fn is_skipped(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || (entry.file_type().is_dir() && SKIPPED_DIRS.contains(&&*name))
}

#[async_trait::async_trait]
impl RepositorySource for LocalRepository {
    async fn list_candidate_files(&self, _repo: &str) -> anyhow::Result<Vec<CandidateFile>> {
        let root = self.root.clone();
        let keywords = self.keywords.clone();
        let files = tokio::task::spawn_blocking(move || Self::scan(&root, &keywords)).await?;
        Ok(files)
    }

    async fn file_content(&self, _repo: &str, path: &str) -> anyhow::Result<String> {
        let full = self.resolve(path)?;
        match tokio::fs::read_to_string(&full).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(RepositoryError::NotFound(path.to_string()).into())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait::async_trait]
impl ChangeSink for LocalRepository {
    async fn create_branch(&self, _repo: &str, name: &str, base: &str) -> anyhow::Result<String> {
        log::info!("Local checkout: writing {name} changes in place (base {base})");
        Ok(name.to_string())
    }

    async fn write_file(
        &self,
        _repo: &str,
        path: &str,
        content: &str,
        message: &str,
        branch: &str,
    ) -> anyhow::Result<String> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full, content).await?;
        log::debug!("Wrote {path} on {branch}: {message}");
        Ok(format!("local:{path}"))
    }

    async fn create_pull_request(
        &self,
        repo: &str,
        title: &str,
        _body: &str,
        head: &str,
        base: &str,
    ) -> anyhow::Result<PullRequest> {
        log::info!("Local checkout: pull request \"{title}\" not opened");
        Ok(PullRequest {
            url: format!("local://{repo}/compare/{base}...{head}"),
            number: 0,
        })
    }
}
