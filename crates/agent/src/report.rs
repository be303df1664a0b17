use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Files listed by name in a pull request description
const LISTED_FILES: usize = 10;

/// Outcome of a migration run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationReport {
    pub repo: String,

    /// Distinct files containing at least one flow
    pub files_analyzed: usize,

    pub flows_found: usize,

    /// Files whose conversion changed their text
    pub files_converted: usize,

    /// `files_converted / files_analyzed`, 0 when nothing was analyzed
    pub success_rate: f64,

    pub pr_url: Option<String>,

    /// Recovered per-item failures, in the order they happened
    #[serde(default)]
    pub errors: Vec<String>,
}

impl MigrationReport {
    pub fn success_rate(files_converted: usize, files_analyzed: usize) -> f64 {
        if files_analyzed == 0 {
            0.0
        } else {
            files_converted as f64 / files_analyzed as f64
        }
    }
}

/// Markdown description for the migration pull request
pub fn pull_request_body(converted: &[String], failed: &[String]) -> String {
    let mut body = String::from(
        "## FlowGlad Migration\n\nThis PR migrates the payment processing from Stripe/Square to FlowGlad.\n\n",
    );

    let _ = writeln!(body, "### Files Modified");
    let _ = writeln!(body, "{} files successfully converted:", converted.len());
    for file in converted.iter().take(LISTED_FILES) {
        let _ = writeln!(body, "- {file}");
    }
    if converted.len() > LISTED_FILES {
        let _ = writeln!(body, "... and {} more", converted.len() - LISTED_FILES);
    }

    if !failed.is_empty() {
        let _ = writeln!(body, "\n### Failed Conversions");
        for file in failed {
            let _ = writeln!(body, "- {file}");
        }
    }

    body.push_str(
        "
### Changes Made
- Replaced Stripe/Square imports with FlowGlad
- Updated API client initialization
- Converted payment method calls to FlowGlad equivalents
- Updated environment variables
- Adapted parameter names to FlowGlad schema

### Testing Required
- [ ] Run existing payment tests
- [ ] Test checkout flow
- [ ] Verify webhook handling
- [ ] Check subscription management
- [ ] Validate refund processing

### Migration Notes
- Ensure FlowGlad API keys are configured
- Update webhook endpoints in FlowGlad dashboard
- Review and test all payment flows before deployment
",
    );

    body
}
