use thiserror::Error;

/// Result type for converter operations
pub type Result<T> = std::result::Result<T, ConverterError>;

/// Errors raised while building rule catalogs or checking converted code.
///
/// Applying rules never fails.
#[derive(Error, Debug)]
pub enum ConverterError {
    /// A rule pattern failed to compile
    #[error("Invalid rule `{pattern}`: {source}")]
    InvalidRule {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Keyword rename with an empty or non-identifier name
    #[error("Invalid keyword rename: {0}")]
    InvalidRename(String),

    /// The syntax checker could not be set up
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ConverterError {
    pub fn invalid_rule(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidRule {
            pattern: pattern.into(),
            source,
        }
    }
}
