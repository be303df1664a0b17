use thiserror::Error;

pub type Result<T> = std::result::Result<T, AgentError>;

#[derive(Error, Debug)]
pub enum AgentError {
    /// A repository collaborator failed in a way the run cannot recover from
    #[error("Repository error: {0}")]
    Source(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AgentError {
    pub fn repository(context: &str, err: &anyhow::Error) -> Self {
        Self::Source(format!("{context}: {err:#}"))
    }
}

impl From<toml::de::Error> for AgentError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
