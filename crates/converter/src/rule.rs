use crate::error::{ConverterError, Result};
use payshift_analyzer::PaymentProvider;
use regex::Regex;
use std::borrow::Cow;

/// Pattern → replacement rewrite scoped to one provider.
///
/// Replacements may reference capture groups as `${1}`.
#[derive(Debug, Clone)]
pub struct ConversionRule {
    pattern: Regex,
    pub replacement: String,
    pub description: String,
    pub provider: PaymentProvider,
}

impl ConversionRule {
    pub fn new(
        pattern: &str,
        replacement: impl Into<String>,
        description: impl Into<String>,
        provider: PaymentProvider,
    ) -> Result<Self> {
        let compiled =
            Regex::new(pattern).map_err(|e| ConverterError::invalid_rule(pattern, e))?;

        Ok(Self {
            pattern: compiled,
            replacement: replacement.into(),
            description: description.into(),
            provider,
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Replace every non-overlapping match
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.pattern.replace_all(text, self.replacement.as_str())
    }
}

/// Rewrites the keyword argument `old=` to `new=`
#[derive(Debug, Clone)]
pub struct KeywordRename {
    pattern: Regex,
    pub old_name: String,
    pub new_name: String,
}

impl KeywordRename {
    pub fn new(old_name: &str, new_name: &str) -> Result<Self> {
        let is_ident = |s: &str| {
            !s.is_empty()
                && !s.starts_with(|c: char| c.is_ascii_digit())
                && s.chars().all(|c| c.is_alphanumeric() || c == '_')
        };
        if !is_ident(old_name) || !is_ident(new_name) {
            return Err(ConverterError::InvalidRename(format!(
                "`{old_name}` -> `{new_name}`"
            )));
        }

        let source = format!(r"\b{}=", regex::escape(old_name));
        let pattern =
            Regex::new(&source).map_err(|e| ConverterError::invalid_rule(source.clone(), e))?;

        Ok(Self {
            pattern,
            old_name: old_name.to_string(),
            new_name: new_name.to_string(),
        })
    }

    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.pattern
            .replace_all(text, regex::NoExpand(&format!("{}=", self.new_name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_group_replacement() {
        let rule = ConversionRule::new(
            r"stripe\.Stripe\((.*?)\)",
            "flowglad.FlowGlad(${1})",
            "Initialize client",
            PaymentProvider::Stripe,
        )
        .unwrap();
        assert_eq!(
            rule.apply("client = stripe.Stripe(api_key)"),
            "client = flowglad.FlowGlad(api_key)"
        );
    }

    #[test]
    fn test_apply_borrows_when_unchanged() {
        let rule = ConversionRule::new("import stripe", "import flowglad", "", PaymentProvider::Stripe)
            .unwrap();
        assert!(matches!(rule.apply("import os"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_invalid_rule() {
        assert!(ConversionRule::new("(", "", "", PaymentProvider::Stripe).is_err());
    }

    #[test]
    fn test_keyword_rename_is_word_anchored() {
        let rename = KeywordRename::new("customer", "customer_id").unwrap();
        assert_eq!(
            rename.apply("create(customer='c', stripe_customer='d')"),
            "create(customer_id='c', stripe_customer='d')"
        );
        assert_eq!(rename.apply("customer_id='c'"), "customer_id='c'");
    }

    #[test]
    fn test_keyword_rename_validation() {
        assert!(KeywordRename::new("", "x").is_err());
        assert!(KeywordRename::new("amount", "1amount").is_err());
        assert!(KeywordRename::new("a-b", "c").is_err());
    }
}
