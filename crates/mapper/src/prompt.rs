use crate::types::{FlowResponse, PaymentFlowMap};
use payshift_analyzer::PaymentProvider;
use serde_json::Value;

/// Prompt asking a generator to describe a flow as JSON
pub fn build_prompt(code: &str, provider: PaymentProvider, flow_type: &str) -> String {
    format!(
        r#"Analyze this {provider} {flow_type} payment implementation and extract:

1. Business flow steps (in order)
2. Data entities involved
3. API calls made
4. Business logic rules
5. Validation checks
6. Error handling

Code:
```
{code}
```

Provide a structured analysis in JSON format with these fields:
- flow_description: One-sentence summary of the flow
- steps: Array of flow steps with description and code_reference
- entities: Array of data entities (customer, payment, subscription, etc.)
- api_calls: Array of API endpoints/methods called
- business_logic: Summary of core business rules
- validation_rules: Array of validation checks
- error_handling: Array of error scenarios handled

Focus on understanding the payment flow logic, not just the code structure."#
    )
}

/// Decode a generator reply, degrading instead of failing.
///
/// Any JSON object is accepted; only a payload that is not a JSON object
/// degrades.
pub fn parse_flow_response(text: &str, provider: PaymentProvider) -> PaymentFlowMap {
    match decode(extract_payload(text).trim()) {
        Ok(response) => response.into_map(provider),
        Err(e) => {
            log::debug!("Undecodable flow response for {provider}: {e}");
            PaymentFlowMap::degraded(provider, e)
        }
    }
}

fn decode(payload: &str) -> serde_json::Result<FlowResponse> {
    let value: Value = serde_json::from_str(payload)?;
    if !value.is_object() {
        return Err(serde::de::Error::custom("expected a JSON object"));
    }
    serde_json::from_value(value)
}

/// Body of the first ```json fence, else of the first fence, else the raw text
fn extract_payload(text: &str) -> &str {
    if let Some((_, rest)) = text.split_once("```json") {
        return fence_body(rest);
    }
    if let Some((_, rest)) = text.split_once("```") {
        return fence_body(rest);
    }
    text
}

fn fence_body(rest: &str) -> &str {
    rest.split_once("```").map_or(rest, |(body, _)| body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_inputs() {
        let prompt = build_prompt("stripe.Refund.create()", PaymentProvider::Stripe, "refund");
        assert!(prompt.starts_with("Analyze this stripe refund payment implementation"));
        assert!(prompt.contains("```\nstripe.Refund.create()\n```"));
        assert!(prompt.contains("- api_calls:"));
    }

    #[test]
    fn test_extract_payload() {
        assert_eq!(extract_payload("x ```json\n{}\n``` y"), "\n{}\n");
        assert_eq!(extract_payload("```\n[1]\n```"), "\n[1]\n");
        assert_eq!(extract_payload("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(extract_payload("```json {\"a\": 1}"), " {\"a\": 1}");
    }

    #[test]
    fn test_json_fence_preferred() {
        let text = "```\nnot json\n```\n```json\n{\"entities\": [\"customer\"]}\n```";
        let map = parse_flow_response(text, PaymentProvider::Square);
        assert!(!map.is_degraded());
        assert_eq!(map.entities, vec!["customer"]);
        assert_eq!(map.original_provider, PaymentProvider::Square);
    }

    #[test]
    fn test_loosely_shaped_reply_keeps_api_calls() {
        let text = r#"```json
{"business_logic": ["one plan per customer"],
 "error_handling": [{"error": "CardError", "action": "retry"}],
 "api_calls": ["stripe.Subscription.create"]}
```"#;
        let map = parse_flow_response(text, PaymentProvider::Stripe);
        assert!(!map.is_degraded());
        assert_eq!(map.business_logic, "one plan per customer");
        assert_eq!(map.error_handling.len(), 1);
        assert!(map.error_handling[0].contains("CardError"));
        assert_eq!(map.api_calls, vec!["stripe.Subscription.create"]);
    }

    #[test]
    fn test_non_object_json_degrades() {
        let map = parse_flow_response("[\"steps\"]", PaymentProvider::Stripe);
        assert!(map.is_degraded());
        assert_eq!(map.flow_description, "Error parsing flow: expected a JSON object");
    }

    #[test]
    fn test_invalid_json_degrades() {
        let map = parse_flow_response("I could not analyze this.", PaymentProvider::Stripe);
        assert!(map.is_degraded());
        assert!(map.api_calls.is_empty());
    }
}
