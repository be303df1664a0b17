//! # Payshift Agent
//!
//! Migrates a repository's payment code from Stripe/Square to FlowGlad.
//!
//! ## Architecture
//!
//! ```text
//! RepositorySource ──> candidate files ──> SourceAnalyzer ──> flows
//!                                                │
//!                          ┌─────────────────────┼──────────────────┐
//!                          ▼                     ▼                  ▼
//!                    aggregate()          FlowMapper (opt.)   ConversionEngine
//!                  (architecture)       (TextGenerator)      (one pass per file)
//!                                                                   │
//!                               auto_apply: ChangeSink ◄────────────┘
//!                          branch ─> write files ─> pull request
//!                                                                   │
//!                                                          MigrationReport
//! ```
//!
//! Collaborators are injected as trait objects; [`LocalRepository`] plays
//! both repository roles over a directory on disk.
//!
//! ## Example
//!
//! ```rust,no_run
//! use payshift_agent::{AgentConfig, LocalRepository, MigrationAgent};
//! use payshift_mapper::TextGenerator;
//! use std::sync::Arc;
//!
//! struct Offline;
//!
//! #[async_trait::async_trait]
//! impl TextGenerator for Offline {
//!     async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
//!         anyhow::bail!("no generator configured")
//!     }
//! }
//!
//! # async fn demo() -> payshift_agent::Result<()> {
//! payshift_agent::init_logging(false, false);
//!
//! let repo = Arc::new(LocalRepository::new("./shop"));
//! let mut config = AgentConfig::new("acme/shop");
//! config.map_flows = false;
//!
//! let mut agent = MigrationAgent::new(config, repo.clone(), repo, Arc::new(Offline))?;
//! let report = agent.run().await?;
//! println!("{}", serde_json::to_string_pretty(&report).unwrap());
//! std::fs::write("migrate.py", agent.migration_script())?;
//! # Ok(())
//! # }
//! ```

mod agent;
mod config;
mod error;
mod local;
mod logging;
mod ports;
mod report;

pub use agent::{AgentStatus, FlowInsight, MigrationAgent};
pub use config::AgentConfig;
pub use error::{AgentError, Result};
pub use local::{LocalRepository, RepositoryError, DEFAULT_SEARCH_KEYWORDS};
pub use logging::init_logging;
pub use ports::{CandidateFile, ChangeSink, PullRequest, RepositorySource};
pub use report::{pull_request_body, MigrationReport};
