//! Remote collaborators.
//!
//! Async traits for the four backing services the POS core talks to, their
//! wire records, and a reqwest-backed client implementing all of them. The
//! core never calls the network directly; it goes through these traits so
//! tests can substitute mocks.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

pub mod http;
pub mod records;

pub use http::HttpPosClient;
pub use records::{
    CustomerRecord, NewCustomer, PersistedTransaction, PromoValidateRequest, PromoValidation,
    TransactionCustomizationRequest, TransactionItemRequest, TransactionRequest,
};

use crate::catalog::{CatalogItem, CustomizationDefinition};

/// Errors raised by remote calls.
///
/// Everything here is caught at the call site and converted to a user-facing
/// message; nothing propagates into the aggregate's invariants.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport-level failure (connection, timeout, TLS).
    #[error("http transport error")]
    Transport(#[from] reqwest::Error),

    /// The service answered with an unexpected status or body.
    #[error("unexpected response from service: {0}")]
    UnexpectedResponse(String),
}

/// Catalog fetches. Failure leaves any prior snapshot in place.
#[automock]
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch the full item catalog.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] when the service is unreachable or answers
    /// unexpectedly.
    async fn fetch_items(&self) -> Result<Vec<CatalogItem>, RemoteError>;

    /// Fetch all customization definitions.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] when the service is unreachable or answers
    /// unexpectedly.
    async fn fetch_customizations(&self) -> Result<Vec<CustomizationDefinition>, RemoteError>;
}

/// Promo code validation.
#[automock]
#[async_trait]
pub trait PromoApi: Send + Sync {
    /// Validate a promo code, returning the service's verdict.
    ///
    /// A rejected code is a successful call with `valid == false`, not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] when the service is unreachable or answers
    /// unexpectedly.
    async fn validate_promo(&self, code: &str) -> Result<PromoValidation, RemoteError>;
}

/// Customer identity resolution.
#[automock]
#[async_trait]
pub trait CustomerApi: Send + Sync {
    /// Persist a guest customer record.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] when the service is unreachable or answers
    /// unexpectedly.
    async fn create_customer(&self, customer: NewCustomer) -> Result<CustomerRecord, RemoteError>;

    /// Look up a member by membership id; `None` when no such member exists.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] when the service is unreachable or answers
    /// unexpectedly; an unknown id is `Ok(None)`.
    async fn find_member(&self, membership_id: &str)
    -> Result<Option<CustomerRecord>, RemoteError>;
}

/// Transaction persistence.
#[automock]
#[async_trait]
pub trait TransactionApi: Send + Sync {
    /// Submit a finalized transaction for persistence.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] when the service is unreachable or rejects
    /// the submission.
    async fn submit_transaction(
        &self,
        request: TransactionRequest,
    ) -> Result<PersistedTransaction, RemoteError>;
}
