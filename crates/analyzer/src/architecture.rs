//! Cross-file fold of detected flows into a per-provider summary.

use crate::provider::PaymentProvider;
use crate::types::PaymentFlow;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// What one provider looks like across the analyzed files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSummary {
    /// Flow type of every recorded flow, repeats kept
    pub flows: Vec<String>,

    /// Distinct files touched
    pub files: BTreeSet<String>,

    /// Distinct matched call strings
    pub methods: BTreeSet<String>,
}

/// Aggregated view of every detected flow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentArchitecture {
    pub providers: BTreeMap<PaymentProvider, ProviderSummary>,
    pub endpoints: Vec<String>,
    pub webhooks: Vec<String>,
    pub models: Vec<String>,

    /// flow_type -> number of flows
    pub flow_summary: BTreeMap<String, usize>,
}

impl PaymentArchitecture {
    /// Fold one flow into the summary
    pub fn record(&mut self, flow: &PaymentFlow) {
        let summary = self.providers.entry(flow.provider).or_default();
        summary.flows.push(flow.flow_type.clone());
        summary.files.insert(flow.file_path.clone());
        summary.methods.extend(flow.methods.iter().cloned());

        self.endpoints.extend(flow.endpoints.iter().cloned());
        self.webhooks.extend(flow.webhooks.iter().cloned());
        self.models.extend(flow.models.iter().cloned());

        *self.flow_summary.entry(flow.flow_type.clone()).or_insert(0) += 1;
    }

    /// Number of flows recorded so far
    pub fn total_flows(&self) -> usize {
        self.flow_summary.values().sum()
    }

    pub fn provider(&self, provider: PaymentProvider) -> Option<&ProviderSummary> {
        self.providers.get(&provider)
    }

    /// Provider with the most recorded flows
    pub fn dominant_provider(&self) -> Option<PaymentProvider> {
        self.providers
            .iter()
            .max_by_key(|(_, summary)| summary.flows.len())
            .map(|(provider, _)| *provider)
    }
}

/// Aggregate a flow sequence
pub fn aggregate<'a>(flows: impl IntoIterator<Item = &'a PaymentFlow>) -> PaymentArchitecture {
    flows
        .into_iter()
        .fold(PaymentArchitecture::default(), |mut arch, flow| {
            arch.record(flow);
            arch
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn flow(provider: PaymentProvider, flow_type: &str, file: &str, method: &str) -> PaymentFlow {
        PaymentFlow::new(provider, flow_type, file, 1).with_method(method)
    }

    #[test]
    fn test_groups_by_provider() {
        let flows = vec![
            flow(PaymentProvider::Stripe, "import", "a.py", "stripe"),
            flow(PaymentProvider::Stripe, "customer_creation", "a.py", "stripe.Customer.create"),
            flow(PaymentProvider::Stripe, "customer_creation", "b.py", "stripe.Customer.create"),
            flow(PaymentProvider::Square, "refund", "c.py", "square.RefundsApi"),
        ];

        let arch = aggregate(&flows);
        let stripe = arch.provider(PaymentProvider::Stripe).unwrap();
        assert_eq!(stripe.flows, vec!["import", "customer_creation", "customer_creation"]);
        assert_eq!(stripe.files.len(), 2);
        assert_eq!(stripe.methods.len(), 2);

        assert_eq!(arch.flow_summary.get("customer_creation"), Some(&2));
        assert_eq!(arch.total_flows(), flows.len());
        assert_eq!(arch.dominant_provider(), Some(PaymentProvider::Stripe));
    }

    #[test]
    fn test_count_law() {
        let flows: Vec<_> = (0..7)
            .map(|i| {
                let provider = if i % 3 == 0 {
                    PaymentProvider::Square
                } else {
                    PaymentProvider::Stripe
                };
                flow(provider, "checkout", &format!("f{}.py", i % 2), "m")
            })
            .collect();

        let arch = aggregate(&flows);
        assert_eq!(arch.flow_summary.values().sum::<usize>(), flows.len());
        for (provider, summary) in &arch.providers {
            let count = flows.iter().filter(|f| f.provider == *provider).count();
            assert!(summary.files.len() <= count);
            assert_eq!(summary.flows.len(), count);
        }
    }

    #[test]
    fn test_flattens_rich_fields() {
        let mut rich = flow(PaymentProvider::Stripe, "webhook", "hooks.py", "stripe.Webhook");
        rich.endpoints.push("/webhooks/stripe".to_string());
        rich.webhooks.push("invoice.paid".to_string());
        rich.models.push("Invoice".to_string());

        let arch = aggregate([&rich]);
        assert_eq!(arch.endpoints, vec!["/webhooks/stripe"]);
        assert_eq!(arch.webhooks, vec!["invoice.paid"]);
        assert_eq!(arch.models, vec!["Invoice"]);
    }

    #[test]
    fn test_empty_and_serializable() {
        let arch = aggregate(&Vec::new());
        assert_eq!(arch.total_flows(), 0);
        assert!(arch.dominant_provider().is_none());

        let json = serde_json::to_value(aggregate(&[flow(
            PaymentProvider::Square,
            "import",
            "x.py",
            "square",
        )]))
        .unwrap();
        assert!(json["providers"]["square"]["files"].is_array());
    }
}
