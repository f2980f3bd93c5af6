// Stripe Checkout client

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::constants::STRIPE_API_URL;
use crate::config::StripeConfig;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct CheckoutSession {
    id: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
}

pub struct StripeClient {
    client: Client,
    secret_key: String,
    base_url: String,
    success_url: String,
    cancel_url: String,
}

impl StripeClient {
    pub fn new(config: &StripeConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| STRIPE_API_URL.to_string());

        Ok(Self {
            client,
            secret_key: config.secret_key.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
            success_url: config.success_url.clone(),
            cancel_url: config.cancel_url.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.secret_key.is_empty()
    }

    /// Create a subscription checkout session and return its id
    pub async fn create_checkout_session(&self, price_id: &str) -> Result<String> {
        if !self.is_configured() {
            anyhow::bail!("Stripe secret key is not configured");
        }

        let form = [
            ("mode", "subscription"),
            ("payment_method_types[0]", "card"),
            ("line_items[0][price]", price_id),
            ("line_items[0][quantity]", "1"),
            ("success_url", self.success_url.as_str()),
            ("cancel_url", self.cancel_url.as_str()),
        ];

        tracing::debug!(price_id, "Creating Stripe checkout session");

        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.base_url))
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await
            .context("Failed to send request to Stripe")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read Stripe response")?;

        if !status.is_success() {
            let message = serde_json::from_str::<StripeErrorBody>(&body)
                .ok()
                .and_then(|b| b.error.message)
                .unwrap_or(body);
            anyhow::bail!("Stripe request failed ({}): {}", status, message);
        }

        let session: CheckoutSession =
            serde_json::from_str(&body).context("Failed to parse Stripe checkout session")?;
        tracing::info!(session_id = %session.id, "Stripe checkout session created");
        Ok(session.id)
    }
}
