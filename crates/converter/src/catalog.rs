use crate::imports::ImportPreamble;
use crate::rule::{ConversionRule, KeywordRename};
use payshift_analyzer::PaymentProvider;

/// Every static table the conversion engine reads.
///
/// Immutable after construction; share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    rules: Vec<ConversionRule>,
    script_rules: Vec<ConversionRule>,
    keyword_renames: Vec<(PaymentProvider, KeywordRename)>,
    preamble: ImportPreamble,
}

impl RuleCatalog {
    pub fn new(preamble: ImportPreamble) -> Self {
        Self {
            preamble,
            ..Default::default()
        }
    }

    /// Built-in Stripe and Square → FlowGlad tables
    pub fn builtin() -> Self {
        use PaymentProvider::{Square, Stripe};

        let rules = vec![
            rule(r"import stripe", "import flowglad", "Replace Stripe import", Stripe),
            rule(r"stripe\.Stripe\((.*?)\)", "flowglad.FlowGlad(${1})", "Initialize FlowGlad client", Stripe),
            rule(r"stripe\.Customer\.create", "flowglad.customers.create", "Create customer", Stripe),
            rule(r"stripe\.PaymentIntent\.create", "flowglad.checkout.sessions.create", "Create payment", Stripe),
            rule(r"stripe\.Subscription\.create", "flowglad.subscriptions.create", "Create subscription", Stripe),
            rule(r"stripe\.Price\.create", "flowglad.prices.create", "Create price", Stripe),
            rule(r"stripe\.Product\.create", "flowglad.products.create", "Create product", Stripe),
            rule(r"stripe\.Webhook\.construct_event", "flowglad.webhooks.verify", "Verify webhook", Stripe),
            rule(r"stripe\.Refund\.create", "flowglad.refunds.create", "Create refund", Stripe),
            rule(r"stripe\.Invoice", "flowglad.invoices", "Invoice operations", Stripe),
            rule(r"stripe\.checkout\.Session\.create", "flowglad.checkout.sessions.create", "Create checkout session", Stripe),
            rule(r"from square\.client import Client", "from flowglad import FlowGlad", "Replace Square import", Square),
            rule(r"Client\((.*?)\)", "FlowGlad(${1})", "Initialize FlowGlad client", Square),
            rule(r"\.payments_api\.create_payment", ".payments.create", "Create payment", Square),
            rule(r"\.customers_api\.create_customer", ".customers.create", "Create customer", Square),
            rule(r"\.subscriptions_api\.create_subscription", ".subscriptions.create", "Create subscription", Square),
            rule(r"\.catalog_api\.upsert_catalog_object", ".products.create", "Create product", Square),
            rule(r"\.refunds_api\.refund", ".refunds.create", "Create refund", Square),
            rule(r"STRIPE_SECRET_KEY", "FLOWGLAD_SECRET_KEY", "Update API key env var", Stripe),
            rule(r"STRIPE_PUBLISHABLE_KEY", "FLOWGLAD_PUBLISHABLE_KEY", "Update publishable key env var", Stripe),
            rule(r"SQUARE_ACCESS_TOKEN", "FLOWGLAD_SECRET_KEY", "Update Square token env var", Square),
            rule(r"SQUARE_ENVIRONMENT", "FLOWGLAD_ENVIRONMENT", "Update Square environment env var", Square),
        ];

        let script_rules = vec![
            rule(r"const stripe = require\('stripe'\)", "const flowglad = require('flowglad')", "Replace Stripe require", Stripe),
            rule(r"import Stripe from 'stripe'", "import FlowGlad from 'flowglad'", "Replace Stripe import", Stripe),
            rule(r"new Stripe\((.*?)\)", "new FlowGlad(${1})", "Initialize FlowGlad client", Stripe),
            rule(r"stripe\.customers\.create", "flowglad.customers.create", "Create customer", Stripe),
            rule(r"stripe\.paymentIntents\.create", "flowglad.checkout.sessions.create", "Create payment", Stripe),
            rule(r"stripe\.subscriptions\.create", "flowglad.subscriptions.create", "Create subscription", Stripe),
            rule(r"stripe\.prices\.create", "flowglad.prices.create", "Create price", Stripe),
            rule(r"stripe\.products\.create", "flowglad.products.create", "Create product", Stripe),
            rule(r"stripe\.webhooks\.constructEvent", "flowglad.webhooks.verify", "Verify webhook", Stripe),
            rule(r"process\.env\.STRIPE_SECRET_KEY", "process.env.FLOWGLAD_SECRET_KEY", "Update API key env var", Stripe),
            rule(r"STRIPE_SECRET_KEY", "FLOWGLAD_SECRET_KEY", "Update API key env var", Stripe),
            rule(r"STRIPE_PUBLISHABLE_KEY", "FLOWGLAD_PUBLISHABLE_KEY", "Update publishable key env var", Stripe),
            rule(r"const \{ Client \} = require\('square'\)", "const { FlowGlad } = require('flowglad')", "Replace Square require", Square),
            rule(r"import \{ Client \} from 'square'", "import { FlowGlad } from 'flowglad'", "Replace Square import", Square),
            rule(r"new Client\((.*?)\)", "new FlowGlad(${1})", "Initialize FlowGlad client", Square),
            rule(r"\.paymentsApi\.createPayment", ".payments.create", "Create payment", Square),
            rule(r"\.customersApi\.createCustomer", ".customers.create", "Create customer", Square),
            rule(r"\.subscriptionsApi\.createSubscription", ".subscriptions.create", "Create subscription", Square),
            rule(r"process\.env\.SQUARE_ACCESS_TOKEN", "process.env.FLOWGLAD_SECRET_KEY", "Update Square token env var", Square),
            rule(r"SQUARE_ACCESS_TOKEN", "FLOWGLAD_SECRET_KEY", "Update Square token env var", Square),
            rule(r"SQUARE_ENVIRONMENT", "FLOWGLAD_ENVIRONMENT", "Update Square environment env var", Square),
        ];

        let keyword_renames = [
            (Stripe, "customer", "customer_id"),
            (Stripe, "payment_method", "payment_method_id"),
            (Stripe, "automatic_payment_methods", "auto_confirm"),
            (Stripe, "payment_method_types", "payment_methods"),
            (Stripe, "line_items", "items"),
            (Stripe, "mode", "checkout_mode"),
            (Stripe, "price", "price_id"),
            (Square, "amount_money", "amount"),
            (Square, "source_id", "payment_source"),
            (Square, "note", "description"),
            (Square, "card_id", "payment_method_id"),
        ]
        .into_iter()
        .map(|(provider, old, new)| {
            let rename = KeywordRename::new(old, new).expect("built-in keyword rename must be valid");
            (provider, rename)
        })
        .collect();

        Self {
            rules,
            script_rules,
            keyword_renames,
            preamble: ImportPreamble::flowglad(),
        }
    }

    /// Append a text rule; it runs after every existing rule
    pub fn push_rule(&mut self, rule: ConversionRule) {
        self.rules.push(rule);
    }

    /// Append a JavaScript/TypeScript rule
    pub fn push_script_rule(&mut self, rule: ConversionRule) {
        self.script_rules.push(rule);
    }

    pub fn push_keyword_rename(&mut self, provider: PaymentProvider, rename: KeywordRename) {
        self.keyword_renames.push((provider, rename));
    }

    /// Text rules for one provider, catalog order preserved
    pub fn rules_for(&self, provider: PaymentProvider) -> impl Iterator<Item = &ConversionRule> {
        self.rules.iter().filter(move |r| r.provider == provider)
    }

    /// JavaScript/TypeScript rules for one provider
    pub fn script_rules_for(&self, provider: PaymentProvider) -> impl Iterator<Item = &ConversionRule> {
        self.script_rules.iter().filter(move |r| r.provider == provider)
    }

    pub fn keyword_renames_for(&self, provider: PaymentProvider) -> impl Iterator<Item = &KeywordRename> {
        self.keyword_renames
            .iter()
            .filter(move |(p, _)| *p == provider)
            .map(|(_, rename)| rename)
    }

    pub fn preamble(&self) -> &ImportPreamble {
        &self.preamble
    }

    pub fn rules(&self) -> &[ConversionRule] {
        &self.rules
    }
}

fn rule(pattern: &str, replacement: &str, description: &str, provider: PaymentProvider) -> ConversionRule {
    ConversionRule::new(pattern, replacement, description, provider)
        .expect("built-in conversion rule must compile")
}
