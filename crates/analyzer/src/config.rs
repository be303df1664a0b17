use crate::provider::PaymentProvider;
use serde::{Deserialize, Serialize};

/// Module-name token that marks an import as provider-specific
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderToken {
    pub token: String,
    pub provider: PaymentProvider,
}

impl ProviderToken {
    pub fn new(token: impl Into<String>, provider: PaymentProvider) -> Self {
        Self {
            token: token.into(),
            provider,
        }
    }
}

/// Configuration for source analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Import tokens checked in order; the first contained token wins
    pub provider_tokens: Vec<ProviderToken>,

    /// Function names containing one of these (lowercased) are scanned as a whole
    pub payment_keywords: Vec<String>,

    /// Files above this size are skipped (0 = no limit)
    pub max_file_bytes: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            provider_tokens: vec![
                ProviderToken::new("stripe", PaymentProvider::Stripe),
                ProviderToken::new("square", PaymentProvider::Square),
            ],
            payment_keywords: ["payment", "charge", "subscription", "checkout", "billing"]
                .into_iter()
                .map(String::from)
                .collect(),
            max_file_bytes: 1024 * 1024,
        }
    }
}

impl AnalyzerConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(empty) = self.provider_tokens.iter().find(|t| t.token.trim().is_empty()) {
            return Err(format!(
                "provider token for {} must not be empty",
                empty.provider
            ));
        }

        if self.provider_tokens.iter().any(|t| !t.provider.is_known()) {
            return Err("provider tokens cannot map to the unknown provider".to_string());
        }

        if self.payment_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err("payment keywords must not be empty".to_string());
        }

        Ok(())
    }

    /// Provider whose token appears in `module_name` (case-insensitive)
    pub fn provider_for_module(&self, module_name: &str) -> Option<PaymentProvider> {
        let lowered = module_name.to_lowercase();
        self.provider_tokens
            .iter()
            .find(|t| lowered.contains(&t.token.to_lowercase()))
            .map(|t| t.provider)
    }

    /// Check whether a function name looks payment-related
    pub fn is_payment_function(&self, name: &str) -> bool {
        let lowered = name.to_lowercase();
        self.payment_keywords
            .iter()
            .any(|k| lowered.contains(&k.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(AnalyzerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = AnalyzerConfig::default();
        config.provider_tokens.push(ProviderToken::new("  ", PaymentProvider::PayPal));
        assert!(config.validate().is_err());

        let mut config = AnalyzerConfig::default();
        config
            .provider_tokens
            .push(ProviderToken::new("adyen", PaymentProvider::Unknown));
        assert!(config.validate().is_err());

        let mut config = AnalyzerConfig::default();
        config.payment_keywords.push(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_provider_for_module() {
        let config = AnalyzerConfig::default();
        assert_eq!(
            config.provider_for_module("Stripe.error"),
            Some(PaymentProvider::Stripe)
        );
        assert_eq!(
            config.provider_for_module("square.client"),
            Some(PaymentProvider::Square)
        );
        assert_eq!(config.provider_for_module("requests"), None);
    }

    #[test]
    fn test_is_payment_function() {
        let config = AnalyzerConfig::default();
        assert!(config.is_payment_function("create_Checkout_session"));
        assert!(config.is_payment_function("recurring_billing"));
        assert!(!config.is_payment_function("fibonacci"));
    }
}
