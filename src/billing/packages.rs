// Token packages offered in the purchase modal
//
// Purchases are simulated: nothing is charged. A receipt is logged and
// handed to the caller's completion callback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BillingError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPackage {
    pub id: &'static str,
    pub name: &'static str,
    pub tokens: u32,
    pub price_cents: u32,
    /// Highlighted in the picker
    pub popular: bool,
}

pub static TOKEN_PACKAGES: [TokenPackage; 3] = [
    TokenPackage {
        id: "starter",
        name: "Starter",
        tokens: 100,
        price_cents: 499,
        popular: false,
    },
    TokenPackage {
        id: "plus",
        name: "Plus",
        tokens: 500,
        price_cents: 1999,
        popular: true,
    },
    TokenPackage {
        id: "mega",
        name: "Mega",
        tokens: 1200,
        price_cents: 3999,
        popular: false,
    },
];

pub fn find_package(id: &str) -> Option<&'static TokenPackage> {
    TOKEN_PACKAGES.iter().find(|p| p.id.eq_ignore_ascii_case(id))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    pub receipt_id: Uuid,
    pub package_id: String,
    pub tokens: u32,
    pub price_cents: u32,
    pub purchased_at: DateTime<Utc>,
    pub simulated: bool,
}

/// Simulate buying `package_id`, invoking `on_complete` with the receipt
pub fn purchase<F>(package_id: &str, on_complete: F) -> Result<PurchaseReceipt, BillingError>
where
    F: FnOnce(&PurchaseReceipt),
{
    let package =
        find_package(package_id).ok_or_else(|| BillingError::UnknownPackage(package_id.to_string()))?;

    let receipt = PurchaseReceipt {
        receipt_id: Uuid::new_v4(),
        package_id: package.id.to_string(),
        tokens: package.tokens,
        price_cents: package.price_cents,
        purchased_at: Utc::now(),
        simulated: true,
    };

    tracing::info!(
        package = package.id,
        tokens = package.tokens,
        receipt = %receipt.receipt_id,
        "Simulated token purchase"
    );

    on_complete(&receipt);
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_fixed_packages() {
        assert_eq!(TOKEN_PACKAGES.len(), 3);
        assert_eq!(TOKEN_PACKAGES.iter().filter(|p| p.popular).count(), 1);
        assert!(TOKEN_PACKAGES.windows(2).all(|w| w[0].tokens < w[1].tokens));
    }

    #[test]
    fn test_find_package() {
        assert_eq!(find_package("PLUS").unwrap().tokens, 500);
        assert!(find_package("gigantic").is_none());
    }

    #[test]
    fn test_purchase_invokes_callback_with_receipt() {
        let mut seen = None;
        let receipt = purchase("mega", |r| seen = Some(r.clone())).unwrap();
        assert_eq!(seen.as_ref(), Some(&receipt));
        assert_eq!(receipt.tokens, 1200);
        assert!(receipt.simulated);
    }

    #[test]
    fn test_unknown_package_skips_callback() {
        let mut called = false;
        let err = purchase("nope", |_| called = true).unwrap_err();
        assert!(!called);
        assert_eq!(err.to_string(), "Unknown token package: nope");
    }

    #[test]
    fn test_package_serializes_camel_case() {
        let json = serde_json::to_value(&TOKEN_PACKAGES[0]).unwrap();
        assert_eq!(json["priceCents"], 499);
    }
}
