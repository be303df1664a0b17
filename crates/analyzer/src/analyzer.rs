use crate::catalog::PatternCatalog;
use crate::config::AnalyzerConfig;
use crate::error::{AnalyzerError, Result};
use crate::language::SourceKind;
use crate::line_scan::LineScan;
use crate::python::PythonScanner;
use crate::types::PaymentFlow;
use std::sync::Arc;

/// Detects payment SDK usage in a single file
pub struct SourceAnalyzer {
    catalog: Arc<PatternCatalog>,
    config: AnalyzerConfig,
}

impl SourceAnalyzer {
    /// Create an analyzer over a shared catalog
    pub fn new(catalog: Arc<PatternCatalog>, config: AnalyzerConfig) -> Result<Self> {
        config.validate().map_err(AnalyzerError::invalid_config)?;
        Ok(Self { catalog, config })
    }

    /// Analyzer with the built-in catalog and default configuration
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            catalog: Arc::new(PatternCatalog::builtin()),
            config: AnalyzerConfig::default(),
        }
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze a file, classifying its language from the path
    pub fn analyze_file(&self, file_path: &str, content: &str) -> Vec<PaymentFlow> {
        self.analyze_with_kind(file_path, content, SourceKind::from_path(file_path))
    }

    /// Analyze a file with an explicit language classification.
    ///
    /// Never fails: unparseable input falls back to line scanning and the
    /// worst case is an empty result.
    pub fn analyze_with_kind(
        &self,
        file_path: &str,
        content: &str,
        kind: SourceKind,
    ) -> Vec<PaymentFlow> {
        if self.config.max_file_bytes > 0 && content.len() > self.config.max_file_bytes {
            log::warn!(
                "Skipping {file_path}: {} bytes exceeds limit of {}",
                content.len(),
                self.config.max_file_bytes
            );
            return Vec::new();
        }

        let flows = match kind {
            SourceKind::PythonLike => self.analyze_python(file_path, content),
            SourceKind::JsLike | SourceKind::JavaLike => {
                LineScan::new(content, self.catalog.line_table(kind), file_path).collect()
            }
            SourceKind::Generic => Vec::new(),
        };

        log::debug!(
            "{file_path}: {} payment flows ({})",
            flows.len(),
            kind.as_str()
        );
        flows
    }

    fn analyze_python(&self, file_path: &str, content: &str) -> Vec<PaymentFlow> {
        match self.scan_python(file_path, content) {
            Ok(flows) => flows,
            Err(e) => {
                log::debug!("{file_path}: AST scan failed, falling back to line scan: {e}");
                LineScan::new(content, self.catalog.patterns(), file_path).collect()
            }
        }
    }

    fn scan_python(&self, file_path: &str, content: &str) -> Result<Vec<PaymentFlow>> {
        let mut scanner = PythonScanner::new(&self.catalog, &self.config)?;
        scanner.scan(content, file_path)
    }
}

impl Default for SourceAnalyzer {
    fn default() -> Self {
        Self::with_defaults()
    }
}
