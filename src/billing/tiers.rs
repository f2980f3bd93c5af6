// Subscription tiers and their Stripe prices

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::BillingError;
use crate::config::PriceConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Basic,
    Premium,
    Ultimate,
}

impl SubscriptionTier {
    pub const ALL: [SubscriptionTier; 3] = [
        SubscriptionTier::Basic,
        SubscriptionTier::Premium,
        SubscriptionTier::Ultimate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::Basic => "basic",
            SubscriptionTier::Premium => "premium",
            SubscriptionTier::Ultimate => "ultimate",
        }
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionTier {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(SubscriptionTier::Basic),
            "premium" => Ok(SubscriptionTier::Premium),
            "ultimate" => Ok(SubscriptionTier::Ultimate),
            _ => Err(BillingError::UnknownTier(s.to_string())),
        }
    }
}

/// Maps each tier to a Stripe price identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTable {
    prices: PriceConfig,
}

impl PriceTable {
    pub fn new(prices: PriceConfig) -> Self {
        Self { prices }
    }

    pub fn price_id(&self, tier: SubscriptionTier) -> &str {
        match tier {
            SubscriptionTier::Basic => &self.prices.basic,
            SubscriptionTier::Premium => &self.prices.premium,
            SubscriptionTier::Ultimate => &self.prices.ultimate,
        }
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::new(PriceConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::constants::{DEFAULT_PREMIUM_PRICE_ID, DEFAULT_ULTIMATE_PRICE_ID};

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Premium".parse::<SubscriptionTier>().unwrap(), SubscriptionTier::Premium);
        assert_eq!(" basic ".parse::<SubscriptionTier>().unwrap(), SubscriptionTier::Basic);
    }

    #[test]
    fn test_unknown_tier_is_rejected() {
        let err = "platinum".parse::<SubscriptionTier>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid tier: platinum");
    }

    #[test]
    fn test_default_price_table() {
        let table = PriceTable::default();
        assert_eq!(table.price_id(SubscriptionTier::Premium), DEFAULT_PREMIUM_PRICE_ID);
        assert_eq!(table.price_id(SubscriptionTier::Ultimate), DEFAULT_ULTIMATE_PRICE_ID);
    }

    #[test]
    fn test_round_trip_names() {
        for tier in SubscriptionTier::ALL {
            assert_eq!(tier.as_str().parse::<SubscriptionTier>().unwrap(), tier);
        }
    }
}
