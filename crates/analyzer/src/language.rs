use crate::error::{AnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Language family of a source file, chosen once per file from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    PythonLike,
    JsLike,
    JavaLike,
    Generic,
}

impl SourceKind {
    /// Detect kind from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "py" | "pyw" => SourceKind::PythonLike,
            "js" | "jsx" | "mjs" | "cjs" | "ts" | "tsx" => SourceKind::JsLike,
            "java" | "kt" | "kts" => SourceKind::JavaLike,
            _ => SourceKind::Generic,
        }
    }

    /// Detect kind from file path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(SourceKind::Generic)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::PythonLike => "python",
            SourceKind::JsLike => "javascript",
            SourceKind::JavaLike => "java",
            SourceKind::Generic => "generic",
        }
    }

    /// Check if this kind is scanned construct by construct
    pub fn supports_ast(self) -> bool {
        matches!(self, SourceKind::PythonLike)
    }

    /// Get Tree-sitter language instance
    pub fn tree_sitter_language(self) -> Result<tree_sitter::Language> {
        match self {
            SourceKind::PythonLike => Ok(tree_sitter_python::LANGUAGE.into()),
            _ => Err(AnalyzerError::tree_sitter(format!(
                "no grammar for {}",
                self.as_str()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(SourceKind::from_extension("py"), SourceKind::PythonLike);
        assert_eq!(SourceKind::from_extension("PY"), SourceKind::PythonLike);
        assert_eq!(SourceKind::from_extension("tsx"), SourceKind::JsLike);
        assert_eq!(SourceKind::from_extension("kt"), SourceKind::JavaLike);
        assert_eq!(SourceKind::from_extension("rb"), SourceKind::Generic);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(SourceKind::from_path("billing/api.py"), SourceKind::PythonLike);
        assert_eq!(SourceKind::from_path("web/checkout.js"), SourceKind::JsLike);
        assert_eq!(SourceKind::from_path("Payments.java"), SourceKind::JavaLike);
        assert_eq!(SourceKind::from_path(".env"), SourceKind::Generic);
        assert_eq!(SourceKind::from_path("Makefile"), SourceKind::Generic);
    }

    #[test]
    fn test_tree_sitter_language() {
        assert!(SourceKind::PythonLike.supports_ast());
        assert!(SourceKind::PythonLike.tree_sitter_language().is_ok());
        assert!(!SourceKind::JsLike.supports_ast());
        assert!(SourceKind::JavaLike.tree_sitter_language().is_err());
    }
}
