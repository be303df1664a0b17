use crate::prompt::{build_prompt, parse_flow_response};
use crate::types::PaymentFlowMap;
use payshift_analyzer::PaymentProvider;
use std::sync::Arc;

/// Text completion backend (LLM client, fixture, ...)
///
/// Implement this trait to plug a model into the flow mapper.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Complete a prompt
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Describes payment flows in business terms through a text generator
#[derive(Clone)]
pub struct FlowMapper {
    generator: Arc<dyn TextGenerator>,
}

impl FlowMapper {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Map one flow.
    ///
    /// Never fails: a generator error or an undecodable reply yields a
    /// degraded map carrying the reason.
    pub async fn map_flow(
        &self,
        code: &str,
        provider: PaymentProvider,
        flow_type: &str,
    ) -> PaymentFlowMap {
        let prompt = build_prompt(code, provider, flow_type);

        match self.generator.generate(&prompt).await {
            Ok(reply) => parse_flow_response(&reply, provider),
            Err(e) => {
                log::warn!("Flow generation failed for {provider} {flow_type}: {e:#}");
                PaymentFlowMap::degraded(provider, format!("{e:#}"))
            }
        }
    }
}
