use crate::config::AgentConfig;
use crate::error::{AgentError, Result};
use crate::ports::{ChangeSink, RepositorySource};
use crate::report::{pull_request_body, MigrationReport};
use payshift_analyzer::{aggregate, PatternCatalog, PaymentArchitecture, PaymentFlow, SourceAnalyzer};
use payshift_converter::{validate_transformation, CodeTransformation, ConversionEngine};
use payshift_mapper::{compare_with_target, FlowMapper, PaymentFlowMap, TargetComparison, TextGenerator};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Stage the agent is in (or finished with)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Idle,
    Analyzing,
    Mapping,
    Converting,
    Applying,
    Complete,
    Error,
}

impl AgentStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Analyzing => "analyzing",
            Self::Mapping => "mapping",
            Self::Converting => "converting",
            Self::Applying => "applying",
            Self::Complete => "complete",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected flow with its business description
#[derive(Debug, Clone, Serialize)]
pub struct FlowInsight {
    pub flow: PaymentFlow,
    pub map: PaymentFlowMap,
    pub comparison: TargetComparison,
}

/// A fetched file that contained at least one flow
struct AnalyzedFile {
    path: String,
    content: String,
    flows: Vec<PaymentFlow>,
}

/// Drives a repository through analyze → map → convert → apply
pub struct MigrationAgent {
    config: AgentConfig,
    source: Arc<dyn RepositorySource>,
    sink: Arc<dyn ChangeSink>,
    analyzer: SourceAnalyzer,
    converter: ConversionEngine,
    mapper: FlowMapper,
    status: AgentStatus,
    architecture: PaymentArchitecture,
    insights: Vec<FlowInsight>,
    transformations: Vec<CodeTransformation>,
}

impl MigrationAgent {
    pub fn new(
        config: AgentConfig,
        source: Arc<dyn RepositorySource>,
        sink: Arc<dyn ChangeSink>,
        generator: Arc<dyn TextGenerator>,
    ) -> Result<Self> {
        config.validate().map_err(AgentError::Config)?;

        let analyzer = SourceAnalyzer::new(
            Arc::new(PatternCatalog::builtin()),
            config.analyzer.clone(),
        )
        .map_err(|e| AgentError::Config(e.to_string()))?;

        Ok(Self {
            config,
            source,
            sink,
            analyzer,
            converter: ConversionEngine::with_defaults(),
            mapper: FlowMapper::new(generator),
            status: AgentStatus::Idle,
            architecture: PaymentArchitecture::default(),
            insights: Vec::new(),
            transformations: Vec::new(),
        })
    }

    /// Swap the conversion engine (custom rule catalogs)
    #[must_use]
    pub fn with_converter(mut self, converter: ConversionEngine) -> Self {
        self.converter = converter;
        self
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn status(&self) -> AgentStatus {
        self.status
    }

    /// Provider summary of the last run
    pub fn architecture(&self) -> &PaymentArchitecture {
        &self.architecture
    }

    /// Flow maps of the last run (empty when mapping is disabled)
    pub fn flow_insights(&self) -> &[FlowInsight] {
        &self.insights
    }

    /// Changed files of the last run, applied or not
    pub fn transformations(&self) -> &[CodeTransformation] {
        &self.transformations
    }

    /// Standalone Python script replaying the last run's transformations
    pub fn migration_script(&self) -> String {
        self.converter.migration_script(&self.transformations)
    }

    /// Run every stage and report.
    ///
    /// Per-file and per-flow failures are logged, recorded in
    /// `MigrationReport::errors` and skipped. Only failures that leave
    /// nothing to work with (listing candidates, creating the branch)
    /// abort the run.
    pub async fn run(&mut self) -> Result<MigrationReport> {
        self.architecture = PaymentArchitecture::default();
        self.insights.clear();
        self.transformations.clear();

        match self.execute().await {
            Ok(report) => {
                self.status = AgentStatus::Complete;
                log::info!(
                    "Migration of {} complete: {}/{} files converted",
                    report.repo,
                    report.files_converted,
                    report.files_analyzed
                );
                Ok(report)
            }
            Err(e) => {
                self.status = AgentStatus::Error;
                log::error!("Migration of {} failed: {e}", self.config.repo);
                Err(e)
            }
        }
    }

    async fn execute(&mut self) -> Result<MigrationReport> {
        let mut errors = Vec::new();

        self.status = AgentStatus::Analyzing;
        let files = self.analyze_repository(&mut errors).await?;
        self.architecture = aggregate(files.iter().flat_map(|f| f.flows.iter()));

        if self.config.map_flows {
            self.status = AgentStatus::Mapping;
            self.map_flows(&files, &mut errors).await;
        }

        self.status = AgentStatus::Converting;
        self.convert_files(&files);

        let pr_url = if self.config.auto_apply {
            self.status = AgentStatus::Applying;
            self.apply_changes(&mut errors).await?
        } else {
            None
        };

        let files_analyzed = files.len();
        let files_converted = self.transformations.len();
        Ok(MigrationReport {
            repo: self.config.repo.clone(),
            files_analyzed,
            flows_found: self.architecture.total_flows(),
            files_converted,
            success_rate: MigrationReport::success_rate(files_converted, files_analyzed),
            pr_url,
            errors,
        })
    }

    async fn analyze_repository(&self, errors: &mut Vec<String>) -> Result<Vec<AnalyzedFile>> {
        let repo = self.config.repo.as_str();
        let candidates = self
            .source
            .list_candidate_files(repo)
            .await
            .map_err(|e| AgentError::repository("listing candidate files", &e))?;
        log::info!("Found {} potential payment files", candidates.len());

        let mut files = Vec::new();
        for candidate in candidates {
            let content = match self.source.file_content(repo, &candidate.path).await {
                Ok(content) => content,
                Err(e) => {
                    log::warn!("Could not analyze {}: {e:#}", candidate.path);
                    errors.push(format!("{}: {e:#}", candidate.path));
                    continue;
                }
            };

            let flows = self.analyzer.analyze_file(&candidate.path, &content);
            if !flows.is_empty() {
                files.push(AnalyzedFile {
                    path: candidate.path,
                    content,
                    flows,
                });
            }
        }

        log::info!(
            "Identified {} payment flows in {} files",
            files.iter().map(|f| f.flows.len()).sum::<usize>(),
            files.len()
        );
        Ok(files)
    }

    async fn map_flows(&mut self, files: &[AnalyzedFile], errors: &mut Vec<String>) {
        for file in files {
            for flow in &file.flows {
                let map = self
                    .mapper
                    .map_flow(&file.content, flow.provider, &flow.flow_type)
                    .await;
                if map.is_degraded() {
                    errors.push(format!(
                        "{}: could not map {} flow: {}",
                        file.path, flow.flow_type, map.flow_description
                    ));
                }

                let comparison = compare_with_target(&map);
                self.insights.push(FlowInsight {
                    flow: flow.clone(),
                    map,
                    comparison,
                });
            }
        }
        log::info!("Mapped {} payment flows", self.insights.len());
    }

    fn convert_files(&mut self, files: &[AnalyzedFile]) {
        for file in files {
            // the first flow decides the provider for the whole file
            let provider = file.flows[0].provider;
            let transformation = self
                .converter
                .convert_file(&file.path, &file.content, provider);

            if transformation.is_changed() {
                self.transformations.push(transformation);
            } else {
                log::debug!("{}: no applicable {provider} rules", file.path);
            }
        }
        log::info!("Generated {} code transformations", self.transformations.len());
    }

    async fn apply_changes(&self, errors: &mut Vec<String>) -> Result<Option<String>> {
        if self.transformations.is_empty() {
            log::info!("Nothing to apply");
            return Ok(None);
        }

        let repo = self.config.repo.as_str();
        let branch = self
            .sink
            .create_branch(repo, &self.config.target_branch, &self.config.base_branch)
            .await
            .map_err(|e| AgentError::repository("creating branch", &e))?;
        log::info!("Created branch {branch}");

        let mut written = Vec::new();
        let mut failed = Vec::new();
        for t in &self.transformations {
            if let Err(reason) = check_before_write(t) {
                log::warn!("Not writing {}: {reason}", t.file_path);
                errors.push(format!("{}: {reason}", t.file_path));
                failed.push(t.file_path.clone());
                continue;
            }

            let message = format!("Convert {} to FlowGlad", t.file_path);
            match self
                .sink
                .write_file(repo, &t.file_path, &t.transformed_code, &message, &branch)
                .await
            {
                Ok(_) => written.push(t.file_path.clone()),
                Err(e) => {
                    log::warn!("Could not write {}: {e:#}", t.file_path);
                    errors.push(format!("{}: {e:#}", t.file_path));
                    failed.push(t.file_path.clone());
                }
            }
        }
        log::info!("Applied {} transformations", written.len());

        if !self.config.create_pr || written.is_empty() {
            return Ok(None);
        }

        let body = pull_request_body(&written, &failed);
        match self
            .sink
            .create_pull_request(repo, &self.config.pr_title, &body, &branch, &self.config.base_branch)
            .await
        {
            Ok(pr) => {
                log::info!("Created pull request #{}: {}", pr.number, pr.url);
                Ok(Some(pr.url))
            }
            Err(e) => {
                log::warn!("Could not open pull request: {e:#}");
                errors.push(format!("pull request: {e:#}"));
                Ok(None)
            }
        }
    }
}

/// Converted code must parse before it replaces the original
fn check_before_write(t: &CodeTransformation) -> std::result::Result<(), String> {
    let check = validate_transformation(t).map_err(|e| e.to_string())?;
    if !check.is_acceptable() {
        return Err("converted code has syntax errors".to_string());
    }
    if !check.imports_resolved {
        log::debug!("{}: no FlowGlad import after conversion", t.file_path);
    }
    Ok(())
}
