//! Promo codes.
//!
//! Validation of a user-entered promo code against the remote promo service
//! and the conversion of its percentage into an absolute discount. The
//! percentage is validated once and stays sticky on the cart; the absolute
//! amount is re-derived from whatever the subtotal currently is.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::remote::{PromoApi, RemoteError};

/// Default rejection message when the service does not provide one.
pub const NO_SUCH_CODE_MESSAGE: &str = "There is no such promo code. Please try again.";

/// Two distinct user-facing failures: a validation rejection and a
/// service/transport failure. Both reset the applied discount to zero.
#[derive(Debug, Error)]
pub enum PromoError {
    /// The code was blank; no network call is made.
    #[error("Please enter a promo code")]
    EmptyCode,

    /// The service rejected the code.
    #[error("{0}")]
    Rejected(String),

    /// The service could not be reached or answered unexpectedly.
    #[error("Invalid promo code. Please try again.")]
    Service(#[source] RemoteError),
}

/// A validated promo attached to a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoApplication {
    code: String,
    discount_percent: Decimal,
}

impl PromoApplication {
    /// Create an application from a validated code and its percentage.
    #[must_use]
    pub fn new(code: impl Into<String>, discount_percent: Decimal) -> Self {
        Self {
            code: code.into(),
            discount_percent,
        }
    }

    /// The upper-normalized code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Percentage off the subtotal, as provided by validation.
    #[must_use]
    pub fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }

    /// Absolute discount against a subtotal: `subtotal × percent / 100`.
    ///
    /// Not clamped to the subtotal; a percentage above 100 is the promo
    /// service's misconfiguration and the finalizer refuses the resulting
    /// negative total.
    #[must_use]
    pub fn discount_against(&self, subtotal: Decimal) -> Decimal {
        subtotal * self.discount_percent / Decimal::ONE_HUNDRED
    }
}

/// Validate `code` with the promo service and convert the verdict into a
/// [`PromoApplication`].
///
/// The code is trimmed and upper-normalized before submission. Blank codes
/// are rejected locally.
///
/// # Errors
///
/// - [`PromoError::EmptyCode`] for a blank code.
/// - [`PromoError::Rejected`] when the service declines the code, carrying
///   the service message or [`NO_SUCH_CODE_MESSAGE`].
/// - [`PromoError::Service`] for transport or unexpected-response failures.
pub async fn resolve_promo<A>(api: &A, code: &str) -> Result<PromoApplication, PromoError>
where
    A: PromoApi + ?Sized,
{
    let normalized = code.trim().to_uppercase();

    if normalized.is_empty() {
        return Err(PromoError::EmptyCode);
    }

    let validation = match api.validate_promo(&normalized).await {
        Ok(validation) => validation,
        Err(error) => {
            tracing::warn!(code = %normalized, %error, "promo validation call failed");
            return Err(PromoError::Service(error));
        }
    };

    match (validation.valid, validation.discount_percent) {
        (true, Some(percent)) => {
            tracing::info!(code = %normalized, %percent, "promo code applied");
            Ok(PromoApplication::new(normalized, percent))
        }
        _ => {
            let message = validation
                .message
                .unwrap_or_else(|| NO_SUCH_CODE_MESSAGE.to_string());

            Err(PromoError::Rejected(message))
        }
    }
}
