use crate::error::{AgentError, Result};
use payshift_analyzer::AnalyzerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Migration run settings, usually read from a `payshift.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Repository identifier handed to the collaborators (e.g. `owner/name`)
    pub repo: String,

    /// Branch receiving the converted files
    pub target_branch: String,

    pub base_branch: String,

    /// Open a pull request after applying
    pub create_pr: bool,

    /// Write converted files; otherwise the run only reports
    pub auto_apply: bool,

    /// Describe each flow through the text generator
    pub map_flows: bool,

    pub pr_title: String,

    pub analyzer: AnalyzerConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            repo: String::new(),
            target_branch: "flowglad-migration".to_string(),
            base_branch: "main".to_string(),
            create_pr: true,
            auto_apply: false,
            map_flows: true,
            pr_title: "Migrate payment processing to FlowGlad".to_string(),
            analyzer: AnalyzerConfig::default(),
        }
    }
}

impl AgentConfig {
    pub fn new(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            ..Default::default()
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate().map_err(AgentError::Config)?;
        Ok(config)
    }

    /// Read and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.repo.trim().is_empty() {
            return Err("repo must not be empty".to_string());
        }

        if self.target_branch.trim().is_empty() || self.base_branch.trim().is_empty() {
            return Err("branch names must not be empty".to_string());
        }

        if self.target_branch == self.base_branch {
            return Err(format!(
                "target_branch must differ from base_branch ({})",
                self.base_branch
            ));
        }

        self.analyzer.validate()
    }
}
