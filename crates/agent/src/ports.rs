//! Collaborator interfaces the orchestrator drives.
//!
//! Implementations wrap a source-control host (or a local checkout); their
//! failures are dynamic, so every method returns `anyhow::Result`.

use serde::{Deserialize, Serialize};

/// A file worth analyzing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateFile {
    /// Repository-relative, `/`-separated
    pub path: String,
}

impl CandidateFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub url: String,
    pub number: u64,
}

/// Read access to a repository
#[async_trait::async_trait]
pub trait RepositorySource: Send + Sync {
    /// Files that may contain payment code
    async fn list_candidate_files(&self, repo: &str) -> anyhow::Result<Vec<CandidateFile>>;

    /// Full text of one file
    async fn file_content(&self, repo: &str, path: &str) -> anyhow::Result<String>;
}

/// Write access to a repository
#[async_trait::async_trait]
pub trait ChangeSink: Send + Sync {
    /// Create `name` from `base`, returning the branch actually created
    async fn create_branch(&self, repo: &str, name: &str, base: &str) -> anyhow::Result<String>;

    /// Create or replace a file on `branch`, returning a commit reference
    async fn write_file(
        &self,
        repo: &str,
        path: &str,
        content: &str,
        message: &str,
        branch: &str,
    ) -> anyhow::Result<String>;

    async fn create_pull_request(
        &self,
        repo: &str,
        title: &str,
        body: &str,
        head: &str,
        base: &str,
    ) -> anyhow::Result<PullRequest>;
}
