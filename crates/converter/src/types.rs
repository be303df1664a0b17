use serde::{Deserialize, Serialize};

/// How thoroughly a file was rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformationType {
    /// Provider rules plus language-specific passes
    FullConversion,
    /// Provider rules only
    GenericConversion,
}

impl TransformationType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullConversion => "full_conversion",
            Self::GenericConversion => "generic_conversion",
        }
    }
}

/// Result of converting one piece of code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeTransformation {
    pub original_code: String,
    pub transformed_code: String,

    /// Empty until the caller attaches it
    #[serde(default)]
    pub file_path: String,

    /// `(0, 0)` means the whole text
    #[serde(default)]
    pub line_range: (usize, usize),

    pub transformation_type: TransformationType,

    /// Descriptions of the rules that matched, in application order
    #[serde(default)]
    pub applied: Vec<String>,
}

impl CodeTransformation {
    pub fn new(
        original_code: impl Into<String>,
        transformed_code: impl Into<String>,
        transformation_type: TransformationType,
    ) -> Self {
        Self {
            original_code: original_code.into(),
            transformed_code: transformed_code.into(),
            file_path: String::new(),
            line_range: (0, 0),
            transformation_type,
            applied: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = file_path.into();
        self
    }

    pub fn is_changed(&self) -> bool {
        self.original_code != self.transformed_code
    }
}
