use crate::catalog::RuleCatalog;
use crate::rule::ConversionRule;
use crate::script;
use crate::types::{CodeTransformation, TransformationType};
use payshift_analyzer::{PaymentProvider, SourceKind};
use std::sync::Arc;

/// Rewrites provider SDK usage onto FlowGlad using a shared rule catalog
#[derive(Debug, Clone)]
pub struct ConversionEngine {
    catalog: Arc<RuleCatalog>,
}

impl ConversionEngine {
    pub fn new(catalog: Arc<RuleCatalog>) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(RuleCatalog::builtin()))
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Convert `code` written against `provider`.
    ///
    /// Pure text rewriting: never fails, and a provider without rules
    /// leaves the text untouched.
    pub fn convert(
        &self,
        code: &str,
        provider: PaymentProvider,
        kind: SourceKind,
    ) -> CodeTransformation {
        let mut applied = Vec::new();

        let (transformed, transformation_type) = match kind {
            SourceKind::PythonLike => {
                let mut text =
                    apply_rules(code, self.catalog.rules_for(provider), &mut applied);
                for rename in self.catalog.keyword_renames_for(provider) {
                    text = rename.apply(&text).into_owned();
                }
                let text = self.catalog.preamble().inject(&text).into_owned();
                (text, TransformationType::FullConversion)
            }
            SourceKind::JsLike => (
                apply_rules(code, self.catalog.script_rules_for(provider), &mut applied),
                TransformationType::FullConversion,
            ),
            SourceKind::JavaLike | SourceKind::Generic => (
                apply_rules(code, self.catalog.rules_for(provider), &mut applied),
                TransformationType::GenericConversion,
            ),
        };

        log::debug!(
            "{} conversion ({}): {} rules applied",
            provider,
            kind.as_str(),
            applied.len()
        );

        let mut transformation = CodeTransformation::new(code, transformed, transformation_type);
        transformation.applied = applied;
        transformation
    }

    /// Classify by path, convert, and attach the file identity
    pub fn convert_file(
        &self,
        file_path: &str,
        code: &str,
        provider: PaymentProvider,
    ) -> CodeTransformation {
        self.convert(code, provider, SourceKind::from_path(file_path))
            .with_file_path(file_path)
    }

    /// Runnable Python script applying `transformations` to a checkout,
    /// with a backup first and `.env` key renames after.
    pub fn migration_script(&self, transformations: &[CodeTransformation]) -> String {
        script::render(transformations)
    }
}

impl Default for ConversionEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Apply each rule in order to the output of the previous one
fn apply_rules<'r>(
    code: &str,
    rules: impl Iterator<Item = &'r ConversionRule>,
    applied: &mut Vec<String>,
) -> String {
    let mut text = code.to_string();
    for rule in rules {
        if rule.is_match(&text) {
            text = rule.apply(&text).into_owned();
            applied.push(rule.description.clone());
        }
    }
    text
}
