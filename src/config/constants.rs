// Project-wide constants
//
// Centralised here so ports, models and other magic values have one
// source of truth. Import via `use crate::config::constants::*;`.

/// Default bind address for the HTTP service (localhost only).
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:8787";

/// Default Claude model for companion replies.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Default maximum tokens for a companion reply.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Maximum tokens for summary, merge and prose calls.
pub const SUMMARY_MAX_TOKENS: u32 = 800;

/// The summary is recomputed after this many turns.
pub const DEFAULT_SUMMARY_INTERVAL_TURNS: usize = 8;

/// Number of trailing messages fed into a summary prompt.
pub const DEFAULT_SUMMARY_WINDOW: usize = 20;

/// Request body limit for the HTTP service.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Stripe REST API host.
pub const STRIPE_API_URL: &str = "https://api.stripe.com";

/// Hardcoded Stripe price identifiers per subscription tier.
pub const DEFAULT_BASIC_PRICE_ID: &str = "price_basic_monthly";
pub const DEFAULT_PREMIUM_PRICE_ID: &str = "price_premium_monthly";
pub const DEFAULT_ULTIMATE_PRICE_ID: &str = "price_ultimate_monthly";

/// Where Stripe sends the browser after checkout.
pub const DEFAULT_SUCCESS_URL: &str = "http://localhost:5173/success?session_id={CHECKOUT_SESSION_ID}";
pub const DEFAULT_CANCEL_URL: &str = "http://localhost:5173/";

/// Built-in companion used when none is configured.
pub const DEFAULT_COMPANION: &str = "default";
