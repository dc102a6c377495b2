//! Credit packages and purchase records backing the credit ledger.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::UserId;

/// Validation errors for credit records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreditValidationError {
    #[error("package name must not be empty")]
    EmptyName,
    #[error("credit amount must be positive")]
    NonPositiveCredits,
    #[error("price must not be negative")]
    NegativePrice,
}

/// A purchasable bundle of course credits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditPackage {
    pub id: Uuid,
    pub name: String,
    pub credit_amount: i32,
    pub price: i32,
}

impl CreditPackage {
    /// Creates a validated package.
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        credit_amount: i32,
        price: i32,
    ) -> Result<Self, CreditValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CreditValidationError::EmptyName);
        }
        if credit_amount <= 0 {
            return Err(CreditValidationError::NonPositiveCredits);
        }
        if price < 0 {
            return Err(CreditValidationError::NegativePrice);
        }
        Ok(Self {
            id,
            name,
            credit_amount,
            price,
        })
    }
}

/// One purchase event holding the credits still usable from it.
///
/// ## Invariants
/// - `purchased_credits >= 0` at rest. The ledger decrements it on booking
///   and increments it on cancellation; it must never be driven negative.
///   The amount originally bought is recorded on the package, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditPurchase {
    pub id: Uuid,
    pub user_id: UserId,
    pub credit_package_id: Uuid,
    pub purchased_credits: i32,
    pub price_paid: i32,
    pub purchase_at: DateTime<Utc>,
}

/// A purchase joined with its package name for the history listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseView {
    pub package_name: String,
    pub purchased_credits: i32,
    pub price_paid: i32,
    pub purchase_at: DateTime<Utc>,
}
