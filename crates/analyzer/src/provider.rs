use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment SDK vendor a detected flow belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentProvider {
    Stripe,
    Square,
    PayPal,
    Braintree,
    Unknown,
}

impl PaymentProvider {
    /// Get provider name as string
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentProvider::Stripe => "stripe",
            PaymentProvider::Square => "square",
            PaymentProvider::PayPal => "paypal",
            PaymentProvider::Braintree => "braintree",
            PaymentProvider::Unknown => "unknown",
        }
    }

    /// Case-insensitive lookup; anything unrecognized maps to `Unknown`
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "stripe" => PaymentProvider::Stripe,
            "square" => PaymentProvider::Square,
            "paypal" => PaymentProvider::PayPal,
            "braintree" => PaymentProvider::Braintree,
            _ => PaymentProvider::Unknown,
        }
    }

    pub fn is_known(self) -> bool {
        self != PaymentProvider::Unknown
    }
}

impl fmt::Display for PaymentProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentProvider {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}
