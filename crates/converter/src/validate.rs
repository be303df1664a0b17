use crate::error::{ConverterError, Result};
use crate::types::CodeTransformation;
use payshift_analyzer::SourceKind;
use serde::{Deserialize, Serialize};
use tree_sitter::Parser;

/// Text that shows converted code pulls in the FlowGlad SDK
const FLOWGLAD_IMPORT_MARKERS: &[&str] = &[
    "import flowglad",
    "from flowglad",
    "require('flowglad')",
    "from 'flowglad'",
];

/// Checks run on converted code before it is written back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeValidation {
    /// `None` when there is no grammar for the file's language
    pub syntax_valid: Option<bool>,
    pub imports_resolved: bool,
}

impl ChangeValidation {
    /// Safe to write: the code parses, or could not be checked
    pub fn is_acceptable(&self) -> bool {
        self.syntax_valid != Some(false)
    }
}

/// Validate a transformation, classifying it by its file path
pub fn validate_transformation(transformation: &CodeTransformation) -> Result<ChangeValidation> {
    let kind = SourceKind::from_path(&transformation.file_path);
    validate_code(&transformation.transformed_code, kind)
}

pub fn validate_code(code: &str, kind: SourceKind) -> Result<ChangeValidation> {
    let syntax_valid = if kind.supports_ast() {
        Some(parses_cleanly(code, kind)?)
    } else {
        None
    };

    Ok(ChangeValidation {
        syntax_valid,
        imports_resolved: FLOWGLAD_IMPORT_MARKERS.iter().any(|m| code.contains(m)),
    })
}

fn parses_cleanly(code: &str, kind: SourceKind) -> Result<bool> {
    let language = kind
        .tree_sitter_language()
        .map_err(|e| ConverterError::Validation(e.to_string()))?;
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| ConverterError::Validation(format!("Failed to set language: {e}")))?;

    Ok(parser
        .parse(code, None)
        .is_some_and(|tree| !tree.root_node().has_error()))
}
