use payshift_analyzer::PaymentProvider;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of `flow_description` on a degraded map
pub const DEGRADED_PREFIX: &str = "Error parsing flow: ";

/// One step of a business flow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawStep")]
pub struct FlowStep {
    pub description: String,
    pub code_reference: Option<String>,
}

/// Generators answer with either bare strings or step objects
#[derive(Deserialize)]
#[serde(untagged)]
enum RawStep {
    Text(String),
    Detailed {
        #[serde(default)]
        description: String,
        #[serde(default)]
        code_reference: Option<String>,
    },
}

impl From<RawStep> for FlowStep {
    fn from(raw: RawStep) -> Self {
        match raw {
            RawStep::Text(description) => Self {
                description,
                code_reference: None,
            },
            RawStep::Detailed {
                description,
                code_reference,
            } => Self {
                description,
                code_reference,
            },
        }
    }
}

/// Business-level description of a payment flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentFlowMap {
    pub original_provider: PaymentProvider,
    pub flow_description: String,
    pub steps: Vec<FlowStep>,
    pub entities: Vec<String>,
    pub api_calls: Vec<String>,
    pub business_logic: String,
    pub validation_rules: Vec<String>,
    pub error_handling: Vec<String>,
    #[serde(skip)]
    degraded: bool,
}

impl PaymentFlowMap {
    /// Map with no content yet
    pub fn new(provider: PaymentProvider) -> Self {
        Self {
            original_provider: provider,
            flow_description: String::new(),
            steps: Vec::new(),
            entities: Vec::new(),
            api_calls: Vec::new(),
            business_logic: String::new(),
            validation_rules: Vec::new(),
            error_handling: Vec::new(),
            degraded: false,
        }
    }

    /// Empty map whose description carries the failure reason
    pub fn degraded(provider: PaymentProvider, reason: impl fmt::Display) -> Self {
        Self {
            flow_description: format!("{DEGRADED_PREFIX}{reason}"),
            degraded: true,
            ..Self::new(provider)
        }
    }

    /// True only for maps built by [`PaymentFlowMap::degraded`]
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }
}

/// Generator reply body.
///
/// Every field is optional and tolerant of shape: a list where text was
/// asked for is joined, a single string where a list was asked for becomes
/// one entry, and nested objects are kept as their JSON text.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct FlowResponse {
    #[serde(deserialize_with = "lenient::text")]
    pub flow_description: String,
    #[serde(deserialize_with = "lenient::steps")]
    pub steps: Vec<FlowStep>,
    #[serde(deserialize_with = "lenient::list")]
    pub entities: Vec<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub api_calls: Vec<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub business_logic: String,
    #[serde(deserialize_with = "lenient::list")]
    pub validation_rules: Vec<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub error_handling: Vec<String>,
}

impl FlowResponse {
    pub fn into_map(self, provider: PaymentProvider) -> PaymentFlowMap {
        PaymentFlowMap {
            flow_description: self.flow_description,
            steps: self.steps,
            entities: self.entities,
            api_calls: self.api_calls,
            business_logic: self.business_logic,
            validation_rules: self.validation_rules,
            error_handling: self.error_handling,
            ..PaymentFlowMap::new(provider)
        }
    }
}

mod lenient {
    use super::FlowStep;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items.into_iter().map(scalar).collect::<Vec<_>>().join("; "),
            other => scalar(other),
        })
    }

    pub fn list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        Ok(entries(Value::deserialize(deserializer)?)
            .into_iter()
            .map(scalar)
            .collect())
    }

    pub fn steps<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<FlowStep>, D::Error> {
        Ok(entries(Value::deserialize(deserializer)?)
            .into_iter()
            .map(|value| match value {
                Value::Object(mut fields) => FlowStep {
                    description: fields.remove("description").map(scalar).unwrap_or_default(),
                    code_reference: fields
                        .remove("code_reference")
                        .filter(|v| !v.is_null())
                        .map(scalar),
                },
                other => FlowStep {
                    description: scalar(other),
                    code_reference: None,
                },
            })
            .collect())
    }

    fn entries(value: Value) -> Vec<Value> {
        match value {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => vec![other],
        }
    }

    fn scalar(value: Value) -> String {
        match value {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// Migration effort estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    /// Below 10 is Low, below 25 is Medium, anything else High
    pub const fn from_score(score: usize) -> Self {
        if score < 10 {
            Self::Low
        } else if score < 25 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An original API call and its FlowGlad counterpart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equivalent {
    pub original: String,
    pub target: String,
}

/// Result of comparing a flow map with the FlowGlad API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetComparison {
    pub provider: PaymentProvider,
    pub equivalents: Vec<Equivalent>,
    pub complexity: Complexity,
    pub required_changes: Vec<String>,
}
