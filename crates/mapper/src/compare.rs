use crate::types::{Complexity, Equivalent, PaymentFlowMap, TargetComparison};
use payshift_analyzer::PaymentProvider;

const STRIPE_EQUIVALENTS: &[(&str, &str)] = &[
    ("customer_creation", "flowglad.customers.create"),
    ("payment_intent", "flowglad.checkout.create"),
    ("subscription", "flowglad.subscriptions.create"),
    ("webhook", "flowglad.webhooks.handle"),
    ("refund", "flowglad.refunds.create"),
];

const SQUARE_EQUIVALENTS: &[(&str, &str)] = &[
    ("payment_creation", "flowglad.payments.create"),
    ("customer_creation", "flowglad.customers.create"),
    ("subscription", "flowglad.subscriptions.create"),
    ("checkout", "flowglad.checkout.create"),
    ("refund", "flowglad.refunds.create"),
];

/// Flow-type key → FlowGlad method for a provider; empty for unmapped providers
pub fn target_equivalents(provider: PaymentProvider) -> &'static [(&'static str, &'static str)] {
    match provider {
        PaymentProvider::Stripe => STRIPE_EQUIVALENTS,
        PaymentProvider::Square => SQUARE_EQUIVALENTS,
        _ => &[],
    }
}

/// Compare a flow map with the FlowGlad API
pub fn compare_with_target(flow_map: &PaymentFlowMap) -> TargetComparison {
    let table = target_equivalents(flow_map.original_provider);

    let mut equivalents = Vec::new();
    for call in &flow_map.api_calls {
        let lowered = call.to_lowercase();
        for (key, target) in table {
            if lowered.contains(key) {
                equivalents.push(Equivalent {
                    original: call.clone(),
                    target: (*target).to_string(),
                });
            }
        }
    }

    TargetComparison {
        provider: flow_map.original_provider,
        equivalents,
        complexity: assess_complexity(flow_map),
        required_changes: required_changes(flow_map),
    }
}

fn assess_complexity(flow_map: &PaymentFlowMap) -> Complexity {
    Complexity::from_score(
        flow_map.steps.len() + flow_map.entities.len() + flow_map.validation_rules.len(),
    )
}

fn required_changes(flow_map: &PaymentFlowMap) -> Vec<String> {
    let mentions = |items: &[String], needle: &str| {
        items.iter().any(|item| item.to_lowercase().contains(needle))
    };

    let mut changes = Vec::new();
    if mentions(&flow_map.api_calls, "webhook") {
        changes.push("Update webhook endpoints to FlowGlad format");
    }
    if mentions(&flow_map.api_calls, "subscription") {
        changes.push("Migrate subscription models to FlowGlad subscription API");
    }
    if mentions(&flow_map.entities, "customer") {
        changes.push("Convert customer data model to FlowGlad schema");
    }
    if !flow_map.validation_rules.is_empty() {
        changes.push("Adapt validation rules to FlowGlad requirements");
    }
    changes.push("Update API authentication to use FlowGlad keys");
    changes.push("Replace provider-specific SDKs with FlowGlad SDK");

    changes.into_iter().map(String::from).collect()
}
