// Billing: subscription checkout through Stripe, simulated token packages

pub mod packages;
mod stripe;
mod tiers;

pub use packages::{find_package, purchase, PurchaseReceipt, TokenPackage, TOKEN_PACKAGES};
pub use stripe::StripeClient;
pub use tiers::{PriceTable, SubscriptionTier};

#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    #[error("Invalid tier: {0}")]
    UnknownTier(String),

    #[error("Unknown token package: {0}")]
    UnknownPackage(String),
}
