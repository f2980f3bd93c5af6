// HTTP request handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

use super::error::{ApiError, JsonBody};
use super::types::*;
use super::AppState;
use crate::billing::{self, PurchaseReceipt, SubscriptionTier, TokenPackage, TOKEN_PACKAGES};
use crate::claude::MessageRequest;
use crate::config::Companion;
use crate::conversation::{
    compose_system_prompt, count_turns, should_refresh, ConversationMetrics, Summarizer,
};
use crate::generators::ClaudeGenerator;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/chat", post(handle_chat))
        .route("/api/create-checkout-session", post(handle_create_checkout_session))
        .route("/api/packages", get(handle_list_packages))
        .route("/api/purchase", post(handle_purchase))
        .route("/api/metrics", post(handle_metrics))
        .route("/api/summary", post(handle_summary))
        .route("/api/system-prompt", post(handle_system_prompt))
        .route("/api/companions", get(handle_list_companions))
        .with_state(state)
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Forward a chat to Claude and return the provider JSON as-is.
///
/// Every failure on this route, including an unreadable body, is a 500.
pub async fn handle_chat(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::Internal(rejection.body_text()))?;
    if body.messages.is_empty() {
        return Err(ApiError::Internal("messages must not be empty".into()));
    }

    let anthropic = &state.config.anthropic;
    let mut request = MessageRequest::from_messages(body.messages)
        .with_model(body.model.unwrap_or_else(|| anthropic.model.clone()))
        .with_max_tokens(body.max_tokens.unwrap_or(anthropic.max_tokens));
    if let Some(system) = body.system_prompt {
        request = request.with_system(system);
    }

    tracing::info!(
        model = %request.model,
        messages = request.messages.len(),
        "Chat request"
    );

    let raw = state
        .claude
        .send_raw(&request, body.api_key.as_deref())
        .await
        .map_err(ApiError::internal)?;

    Ok(Json(raw))
}

/// Create a Stripe subscription checkout session for a tier
pub async fn handle_create_checkout_session(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let tier: SubscriptionTier = body.tier.parse()?;
    let price_id = state.prices.price_id(tier);

    tracing::info!(%tier, price_id, "Checkout session requested");

    let session_id = state
        .stripe
        .create_checkout_session(price_id)
        .await
        .map_err(ApiError::bad_request)?;

    Ok(Json(CheckoutResponse { session_id }))
}

pub async fn handle_list_packages() -> Json<&'static [TokenPackage]> {
    Json(&TOKEN_PACKAGES[..])
}

/// Simulated token purchase
pub async fn handle_purchase(
    JsonBody(body): JsonBody<PurchaseRequest>,
) -> Result<Json<PurchaseReceipt>, ApiError> {
    let receipt = billing::purchase(&body.package_id, |receipt| {
        tracing::debug!(receipt = %receipt.receipt_id, "Purchase completed");
    })?;
    Ok(Json(receipt))
}

pub async fn handle_metrics(
    JsonBody(body): JsonBody<MetricsRequest>,
) -> Json<ConversationMetrics> {
    Json(ConversationMetrics::compute(&body.messages))
}

/// Summarise recent history, merge with the previous summary, render prose.
///
/// Always succeeds; failures inside the pipeline degrade to defaults.
pub async fn handle_summary(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<SummaryRequest>,
) -> Json<SummaryResponse> {
    let generator = ClaudeGenerator::new(
        Arc::clone(&state.claude),
        state.config.anthropic.model.clone(),
    )
    .with_api_key(body.api_key);

    let summarizer = Summarizer::new(Arc::new(generator))
        .with_window(state.config.conversation.summary_window)
        .with_interval(state.config.conversation.summary_interval_turns);

    let latest = summarizer.summarize(&body.messages).await;
    let summary = match body.previous {
        Some(previous) => summarizer.merge(&previous, latest).await,
        None => latest,
    };
    let prose = summarizer.prose(&summary).await;

    Json(SummaryResponse {
        summary,
        prose,
        turns: count_turns(&body.messages),
    })
}

/// Build the system text for the next chat call
pub async fn handle_system_prompt(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<SystemPromptRequest>,
) -> Result<Json<SystemPromptResponse>, ApiError> {
    let companion = match body.companion.as_deref() {
        Some(name) => Companion::load_builtin(name).map_err(ApiError::bad_request)?,
        None => state.companion.clone(),
    };

    let prose = match (body.summary_prose, &body.summary) {
        (Some(prose), _) => prose,
        (None, Some(summary)) => summary.to_prose(),
        (None, None) => String::new(),
    };

    let metrics = ConversationMetrics::compute(&body.messages);
    let system_prompt =
        compose_system_prompt(&companion.to_system_message(), &prose, Some(&metrics));

    Ok(Json(SystemPromptResponse {
        companion: companion.name,
        system_prompt,
        summary_due: should_refresh(
            count_turns(&body.messages),
            state.config.conversation.summary_interval_turns,
        ),
    }))
}

pub async fn handle_list_companions() -> Result<Json<Vec<CompanionInfo>>, ApiError> {
    let companions = Companion::list_builtins()
        .into_iter()
        .map(|id| {
            Companion::load_builtin(id).map(|c| CompanionInfo {
                id: id.to_string(),
                name: c.name,
                description: c.description,
                greeting: c.greeting,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()
        .map_err(ApiError::internal)?;
    Ok(Json(companions))
}
