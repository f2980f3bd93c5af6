// Companion HTTP service
//
// Each route is a stateless request/response proxy: chat to Claude,
// checkout to Stripe, plus the pure metrics/summary/system-prompt helpers.

mod error;
mod handlers;
pub mod types;

pub use error::{ApiError, JsonBody};
pub use handlers::{
    create_router, handle_chat, handle_create_checkout_session, handle_list_companions,
    handle_list_packages, handle_metrics, handle_purchase, handle_summary, handle_system_prompt,
    health_check,
};

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::billing::{PriceTable, StripeClient};
use crate::claude::{ClaudeClient, CLAUDE_API_URL};
use crate::config::constants::{DEFAULT_COMPANION, MAX_BODY_BYTES};
use crate::config::{Companion, Config};

/// Shared, read-only state handed to every handler
pub struct AppState {
    pub config: Config,
    pub claude: Arc<ClaudeClient>,
    pub stripe: StripeClient,
    pub prices: PriceTable,
    pub companion: Companion,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let claude = ClaudeClient::with_base_url(
            config.anthropic.api_key.clone(),
            config
                .anthropic
                .base_url
                .clone()
                .unwrap_or_else(|| CLAUDE_API_URL.to_string()),
        )?;
        let stripe = StripeClient::new(&config.stripe)?;
        let prices = PriceTable::new(config.stripe.prices.clone());
        let companion = Companion::resolve(
            config
                .active_companion
                .as_deref()
                .unwrap_or(DEFAULT_COMPANION),
        )
        .context("Failed to load active companion")?;

        if !claude.has_api_key() {
            tracing::warn!("No Anthropic API key configured; chat requests must supply apiKey");
        }
        if !stripe.is_configured() {
            tracing::warn!("No Stripe secret key configured; checkout is disabled");
        }

        Ok(Self {
            config,
            claude: Arc::new(claude),
            stripe,
            prices,
            companion,
        })
    }
}

/// Router with CORS, tracing and body limit applied
pub fn build_app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server.allowed_origins);
    create_router(state)
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Bind and serve until the process is stopped
pub async fn serve(config: Config) -> Result<()> {
    let addr: SocketAddr = config
        .server
        .bind_address
        .parse()
        .with_context(|| format!("Invalid bind address: {}", config.server.bind_address))?;

    let state = Arc::new(AppState::new(config)?);
    let app = build_app(state);

    tracing::info!("Starting companion server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_uses_default_companion() {
        let state = AppState::new(Config::default()).unwrap();
        assert_eq!(state.companion.name, "Ava");
        assert!(!state.claude.has_api_key());
    }

    #[test]
    fn test_unknown_companion_fails_state_creation() {
        let config = Config {
            active_companion: Some("/definitely/missing/companion.toml".into()),
            ..Default::default()
        };
        assert!(AppState::new(config).is_err());
    }
}
