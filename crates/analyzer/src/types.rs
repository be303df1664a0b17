use crate::provider::PaymentProvider;
use serde::{Deserialize, Serialize};

/// One detected occurrence of provider-specific payment logic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentFlow {
    pub provider: PaymentProvider,

    /// Operation label, e.g. `customer_creation` or `import`
    pub flow_type: String,

    /// Source file path
    pub file_path: String,

    /// Start line (1-indexed)
    pub line_start: usize,

    /// End line (1-indexed, inclusive)
    pub line_end: usize,

    /// Matched call strings, in match order
    #[serde(default)]
    pub methods: Vec<String>,

    #[serde(default)]
    pub endpoints: Vec<String>,

    #[serde(default)]
    pub models: Vec<String>,

    #[serde(default)]
    pub webhooks: Vec<String>,

    #[serde(default)]
    pub api_keys: Vec<String>,
}

impl PaymentFlow {
    /// Create a single-line flow
    #[must_use]
    pub fn new(
        provider: PaymentProvider,
        flow_type: impl Into<String>,
        file_path: impl Into<String>,
        line: usize,
    ) -> Self {
        Self {
            provider,
            flow_type: flow_type.into(),
            file_path: file_path.into(),
            line_start: line,
            line_end: line,
            methods: Vec::new(),
            endpoints: Vec::new(),
            models: Vec::new(),
            webhooks: Vec::new(),
            api_keys: Vec::new(),
        }
    }

    /// Builder: extend the flow to `line_end`, never below `line_start`
    #[must_use]
    pub fn spanning(mut self, line_end: usize) -> Self {
        self.line_end = line_end.max(self.line_start);
        self
    }

    /// Builder: append a matched call string
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.methods.push(method.into());
        self
    }

    /// Builder: append several matched call strings
    #[must_use]
    pub fn with_methods(mut self, methods: impl IntoIterator<Item = String>) -> Self {
        self.methods.extend(methods);
        self
    }

    /// Number of lines covered
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.line_end.saturating_sub(self.line_start) + 1
    }

    /// Check if the flow covers a specific line
    #[must_use]
    pub const fn contains_line(&self, line: usize) -> bool {
        line >= self.line_start && line <= self.line_end
    }
}
