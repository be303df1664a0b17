//! Ordered pattern tables used to classify payment SDK usage.
//!
//! Order is precedence: callers that need a single classification for a call
//! site take the first matching pattern.

use crate::error::{AnalyzerError, Result};
use crate::language::SourceKind;
use crate::provider::PaymentProvider;
use regex::{Regex, RegexBuilder};

/// Anything that can classify a piece of text as a payment flow
pub trait FlowMatcher {
    fn is_match(&self, text: &str) -> bool;
    fn provider(&self) -> PaymentProvider;
    fn flow_type(&self) -> &str;
}

/// Call-string pattern with a confidence score
#[derive(Debug, Clone)]
pub struct PaymentPattern {
    pattern: Regex,
    pub provider: PaymentProvider,
    pub flow_type: String,
    pub confidence: f32,
}

impl PaymentPattern {
    pub fn new(
        pattern: &str,
        provider: PaymentProvider,
        flow_type: impl Into<String>,
        confidence: f32,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(AnalyzerError::InvalidConfidence(confidence));
        }
        let compiled =
            Regex::new(pattern).map_err(|e| AnalyzerError::invalid_pattern(pattern, e))?;

        Ok(Self {
            pattern: compiled,
            provider,
            flow_type: flow_type.into(),
            confidence,
        })
    }

    /// Source text of the regular expression
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl FlowMatcher for PaymentPattern {
    fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    fn provider(&self) -> PaymentProvider {
        self.provider
    }

    fn flow_type(&self) -> &str {
        &self.flow_type
    }
}

/// Row of a per-language line-scan table
#[derive(Debug, Clone)]
pub struct LinePattern {
    pattern: Regex,
    pub provider: PaymentProvider,
    pub flow_type: String,
}

impl LinePattern {
    pub fn new(
        pattern: &str,
        provider: PaymentProvider,
        flow_type: impl Into<String>,
        case_insensitive: bool,
    ) -> Result<Self> {
        let compiled = RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|e| AnalyzerError::invalid_pattern(pattern, e))?;

        Ok(Self {
            pattern: compiled,
            provider,
            flow_type: flow_type.into(),
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl FlowMatcher for LinePattern {
    fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    fn provider(&self) -> PaymentProvider {
        self.provider
    }

    fn flow_type(&self) -> &str {
        &self.flow_type
    }
}

/// Immutable after construction; share it behind an `Arc`
#[derive(Debug, Clone, Default)]
pub struct PatternCatalog {
    patterns: Vec<PaymentPattern>,
    javascript: Vec<LinePattern>,
    java: Vec<LinePattern>,
}

impl PatternCatalog {
    /// Catalog with no patterns at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Built-in Stripe and Square catalog
    pub fn builtin() -> Self {
        use PaymentProvider::{Square, Stripe};

        let patterns = vec![
            call(r"stripe\.Stripe", Stripe, "initialization", 0.9),
            call(r"stripe\.Customer\.create", Stripe, "customer_creation", 0.95),
            call(r"stripe\.PaymentIntent", Stripe, "payment_intent", 0.95),
            call(r"stripe\.Subscription", Stripe, "subscription", 0.95),
            call(r"stripe\.Checkout\.Session", Stripe, "checkout", 0.95),
            call(r"stripe\.Webhook", Stripe, "webhook", 0.9),
            call(r"stripe\.Price", Stripe, "pricing", 0.9),
            call(r"stripe\.Product", Stripe, "product", 0.9),
            call(r"stripe\.Invoice", Stripe, "invoice", 0.9),
            call(r"stripe\.Refund", Stripe, "refund", 0.9),
            call(r"square\.Client", Square, "initialization", 0.9),
            call(r"square\.models\.CreatePayment", Square, "payment_creation", 0.95),
            call(r"square\.models\.CreateCustomer", Square, "customer_creation", 0.95),
            call(r"square\.SubscriptionsApi", Square, "subscription", 0.95),
            call(r"square\.CheckoutApi", Square, "checkout", 0.95),
            call(r"square\.WebhooksApi", Square, "webhook", 0.9),
            call(r"square\.CatalogApi", Square, "catalog", 0.9),
            call(r"square\.InvoicesApi", Square, "invoice", 0.9),
            call(r"square\.RefundsApi", Square, "refund", 0.9),
        ];

        let javascript = vec![
            line(r#"require\(['"]stripe['"]\)"#, Stripe, "import", true),
            line(r#"import.*from ['"]stripe['"]"#, Stripe, "import", true),
            line(r#"require\(['"]square['"]\)"#, Square, "import", true),
            line(r#"import.*from ['"]square['"]"#, Square, "import", true),
            line(r"stripe\.customers\.create", Stripe, "customer_creation", true),
            line(r"stripe\.paymentIntents\.create", Stripe, "payment_intent", true),
            line(r"stripe\.subscriptions\.create", Stripe, "subscription", true),
            line(r"stripe\.checkout\.sessions\.create", Stripe, "checkout", true),
            line(r"square\.paymentsApi\.createPayment", Square, "payment_creation", true),
            line(r"square\.customersApi\.createCustomer", Square, "customer_creation", true),
        ];

        let java = vec![
            line(r"import com\.stripe\.", Stripe, "import", false),
            line(r"import com\.squareup\.", Square, "import", false),
            line(r"Stripe\.apiKey", Stripe, "initialization", false),
            line(r"new SquareClient\.Builder", Square, "initialization", false),
            line(r"Customer\.create", Stripe, "customer_creation", false),
            line(r"PaymentIntent\.create", Stripe, "payment_intent", false),
            line(r"Subscription\.create", Stripe, "subscription", false),
        ];

        Self {
            patterns,
            javascript,
            java,
        }
    }

    /// Append a call pattern; it takes the lowest precedence
    pub fn push(&mut self, pattern: PaymentPattern) {
        self.patterns.push(pattern);
    }

    /// Append a line-scan row for a line-scanned language
    pub fn push_line(&mut self, kind: SourceKind, pattern: LinePattern) -> Result<()> {
        match kind {
            SourceKind::JsLike => self.javascript.push(pattern),
            SourceKind::JavaLike => self.java.push(pattern),
            SourceKind::PythonLike | SourceKind::Generic => {
                return Err(AnalyzerError::invalid_config(format!(
                    "{} has no line-scan table",
                    kind.as_str()
                )));
            }
        }
        Ok(())
    }

    pub fn patterns(&self) -> &[PaymentPattern] {
        &self.patterns
    }

    /// Line-scan table for a language; empty for languages without one
    pub fn line_table(&self, kind: SourceKind) -> &[LinePattern] {
        match kind {
            SourceKind::JsLike => &self.javascript,
            SourceKind::JavaLike => &self.java,
            SourceKind::PythonLike | SourceKind::Generic => &[],
        }
    }

    /// Every call pattern matching anywhere in `text`, in catalog order
    pub fn matches<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a PaymentPattern> + 'a {
        self.patterns.iter().filter(move |p| p.is_match(text))
    }

    /// First call pattern matching `text`
    pub fn first_match(&self, text: &str) -> Option<&PaymentPattern> {
        self.patterns.iter().find(|p| p.is_match(text))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn call(pattern: &str, provider: PaymentProvider, flow_type: &str, confidence: f32) -> PaymentPattern {
    PaymentPattern::new(pattern, provider, flow_type, confidence)
        .expect("built-in payment pattern must compile")
}

fn line(pattern: &str, provider: PaymentProvider, flow_type: &str, case_insensitive: bool) -> LinePattern {
    LinePattern::new(pattern, provider, flow_type, case_insensitive)
        .expect("built-in line pattern must compile")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_both_providers() {
        let catalog = PatternCatalog::builtin();
        assert!(catalog.patterns().iter().any(|p| p.provider == PaymentProvider::Stripe));
        assert!(catalog.patterns().iter().any(|p| p.provider == PaymentProvider::Square));
        assert!(catalog
            .patterns()
            .iter()
            .all(|p| (0.0..=1.0).contains(&p.confidence)));
    }

    #[test]
    fn test_matches_in_catalog_order() {
        let catalog = PatternCatalog::builtin();
        let hits: Vec<_> = catalog
            .matches("stripe.Checkout.Session.create")
            .map(|p| p.flow_type.as_str())
            .collect();
        assert_eq!(hits, vec!["checkout"]);

        let first = catalog.first_match("stripe.Customer.create").unwrap();
        assert_eq!(first.flow_type, "customer_creation");
        assert_eq!(first.provider, PaymentProvider::Stripe);
    }

    #[test]
    fn test_no_match_for_plain_text() {
        let catalog = PatternCatalog::builtin();
        assert!(catalog.first_match("requests.get").is_none());
        assert_eq!(catalog.matches("").count(), 0);
    }

    #[test]
    fn test_push_extends_without_touching_matching() {
        let mut catalog = PatternCatalog::builtin();
        let before = catalog.len();
        catalog.push(
            PaymentPattern::new(r"braintree\.Transaction\.sale", PaymentProvider::Braintree, "payment_creation", 0.9)
                .unwrap(),
        );
        assert_eq!(catalog.len(), before + 1);
        let hit = catalog.first_match("braintree.Transaction.sale").unwrap();
        assert_eq!(hit.provider, PaymentProvider::Braintree);
    }

    #[test]
    fn test_invalid_patterns_rejected() {
        assert!(PaymentPattern::new(r"stripe\.(", PaymentProvider::Stripe, "x", 0.5).is_err());
        assert!(PaymentPattern::new(r"stripe", PaymentProvider::Stripe, "x", 1.5).is_err());
        assert!(LinePattern::new(r"[", PaymentProvider::Stripe, "x", true).is_err());
    }

    #[test]
    fn test_line_tables() {
        let catalog = PatternCatalog::builtin();
        assert!(!catalog.line_table(SourceKind::JsLike).is_empty());
        assert!(!catalog.line_table(SourceKind::JavaLike).is_empty());
        assert!(catalog.line_table(SourceKind::Generic).is_empty());

        let js = catalog.line_table(SourceKind::JsLike);
        assert!(js.iter().any(|p| p.is_match("const Stripe = REQUIRE('stripe');")));

        let mut catalog = catalog;
        let row = LinePattern::new(r"paypal", PaymentProvider::PayPal, "import", true).unwrap();
        assert!(catalog.push_line(SourceKind::PythonLike, row).is_err());
    }
}
