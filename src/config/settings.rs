// Configuration structs

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use super::constants::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP service settings
    pub server: ServerConfig,

    /// Anthropic API settings
    pub anthropic: AnthropicConfig,

    /// Stripe checkout settings
    pub stripe: StripeConfig,

    /// Summary and metrics tuning
    pub conversation: ConversationConfig,

    /// Built-in companion name or path to a companion TOML file
    pub active_companion: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8787")
    pub bind_address: String,
    /// Origins allowed by CORS; empty means any origin
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_HTTP_ADDR.to_string(),
            allowed_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnthropicConfig {
    /// Server-side key; requests may still bring their own `apiKey`
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    /// Override for proxies and tests
    pub base_url: Option<String>,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            base_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StripeConfig {
    pub secret_key: String,
    pub success_url: String,
    pub cancel_url: String,
    pub base_url: Option<String>,
    pub prices: PriceConfig,
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            success_url: DEFAULT_SUCCESS_URL.to_string(),
            cancel_url: DEFAULT_CANCEL_URL.to_string(),
            base_url: None,
            prices: PriceConfig::default(),
        }
    }
}

/// Stripe price identifier per subscription tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceConfig {
    pub basic: String,
    pub premium: String,
    pub ultimate: String,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            basic: DEFAULT_BASIC_PRICE_ID.to_string(),
            premium: DEFAULT_PREMIUM_PRICE_ID.to_string(),
            ultimate: DEFAULT_ULTIMATE_PRICE_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationConfig {
    pub summary_interval_turns: usize,
    pub summary_window: usize,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            summary_interval_turns: DEFAULT_SUMMARY_INTERVAL_TURNS,
            summary_window: DEFAULT_SUMMARY_WINDOW,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.server.bind_address.parse::<SocketAddr>().is_err() {
            bail!("Invalid bind address: {}", self.server.bind_address);
        }
        if self.anthropic.max_tokens == 0 {
            bail!("anthropic.max_tokens must be greater than zero");
        }
        if self.anthropic.model.trim().is_empty() {
            bail!("anthropic.model must not be empty");
        }
        if self.conversation.summary_interval_turns == 0 {
            bail!("conversation.summary_interval_turns must be greater than zero");
        }
        if self.conversation.summary_window == 0 {
            bail!("conversation.summary_window must be greater than zero");
        }
        let prices = &self.stripe.prices;
        if [&prices.basic, &prices.premium, &prices.ultimate]
            .iter()
            .any(|p| p.trim().is_empty())
        {
            bail!("stripe.prices must define a price id for every tier");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [anthropic]
            api_key = "sk-ant-test"

            [stripe.prices]
            premium = "price_123"
            "#,
        )
        .unwrap();
        assert_eq!(config.anthropic.api_key, "sk-ant-test");
        assert_eq!(config.anthropic.model, DEFAULT_MODEL);
        assert_eq!(config.stripe.prices.premium, "price_123");
        assert_eq!(config.stripe.prices.basic, DEFAULT_BASIC_PRICE_ID);
        assert_eq!(config.conversation.summary_interval_turns, 8);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.server.bind_address = "not an address".into();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.conversation.summary_interval_turns = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.stripe.prices.ultimate = " ".into();
        assert!(config.validate().is_err());
    }
}
