use crate::types::PaymentFlowMap;
use std::fmt::Write;

/// Render a flow map as a markdown document
pub fn render_documentation(flow_map: &PaymentFlowMap) -> String {
    let mut doc = String::new();

    // fmt::Write on String is infallible
    let _ = writeln!(doc, "# Payment Flow Documentation\n");
    let _ = writeln!(doc, "## Original Provider: {}\n", flow_map.original_provider);
    let _ = writeln!(doc, "## Flow Description\n{}\n", flow_map.flow_description);

    doc.push_str("## Process Steps\n");
    for (i, step) in flow_map.steps.iter().enumerate() {
        let n = i + 1;
        if step.description.is_empty() {
            let _ = writeln!(doc, "{n}. Step {n}");
        } else {
            let _ = writeln!(doc, "{n}. {}", step.description);
        }
        if let Some(reference) = &step.code_reference {
            let _ = writeln!(doc, "   - Code: {reference}");
        }
    }

    let _ = writeln!(doc, "\n## Data Entities\n{}\n", flow_map.entities.join(", "));

    doc.push_str("## API Calls\n");
    push_bullets(&mut doc, &flow_map.api_calls);

    let _ = writeln!(doc, "\n## Business Logic\n{}\n", flow_map.business_logic);

    doc.push_str("## Validation Rules\n");
    push_bullets(&mut doc, &flow_map.validation_rules);

    doc.push_str("\n## Error Handling\n");
    push_bullets(&mut doc, &flow_map.error_handling);

    doc
}

fn push_bullets(doc: &mut String, items: &[String]) {
    for item in items {
        let _ = writeln!(doc, "- {item}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FlowStep;
    use payshift_analyzer::PaymentProvider;

    #[test]
    fn test_render_sections() {
        let mut map = PaymentFlowMap::new(PaymentProvider::Stripe);
        map.flow_description = "Charge a saved card".to_string();
        map.steps = vec![
            FlowStep {
                description: "Look up customer".to_string(),
                code_reference: Some("billing.py:4".to_string()),
            },
            FlowStep::default(),
        ];
        map.entities = vec!["customer".to_string(), "payment".to_string()];
        map.api_calls = vec!["stripe.PaymentIntent.create".to_string()];

        let doc = render_documentation(&map);
        assert!(doc.starts_with("# Payment Flow Documentation\n\n## Original Provider: stripe\n"));
        assert!(doc.contains("1. Look up customer\n   - Code: billing.py:4\n2. Step 2\n"));
        assert!(doc.contains("## Data Entities\ncustomer, payment\n"));
        assert!(doc.contains("## API Calls\n- stripe.PaymentIntent.create\n"));
        assert!(doc.ends_with("## Error Handling\n"));
    }
}
