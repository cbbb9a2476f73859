//! POS session.
//!
//! The screen-level transaction lifecycle:
//!
//! ```text
//! NoTransaction → CustomerCaptured → Composing → Finalized → NoTransaction
//! ```
//!
//! with a cancellation exit from any active state back to `NoTransaction`
//! that discards the cart without finalizing. All order mutations run
//! synchronously on the UI's single logical thread; only customer capture,
//! promo validation, catalog loading and transaction submission suspend at
//! the network boundary.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::catalog::{CatalogError, CatalogSnapshot};
use crate::customer::CustomerRef;
use crate::order::{OrderAggregate, OrderError, OrderLine, QuantityUpdate};
use crate::promo::{self, PromoApplication, PromoError};
use crate::remote::{
    CatalogApi, CustomerApi, NewCustomer, PersistedTransaction, PromoApi, RemoteError,
    TransactionApi,
};
use crate::transaction::{self, FinalizeError, TransactionRecord};

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The operation needs an active transaction.
    #[error("no transaction in progress")]
    NoActiveTransaction,

    /// A transaction is already in progress.
    #[error("a transaction is already in progress")]
    TransactionInProgress,

    /// A promo validation request is already in flight.
    #[error("promo validation already in progress")]
    PromoInFlight,

    /// The order has not been finalized yet.
    #[error("order is not finalized")]
    NotFinalized,

    /// No member exists with the entered membership id.
    #[error("Membership ID wrong please try again")]
    MemberNotFound,

    /// An aggregate mutation failed.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// Promo validation failed or was rejected.
    #[error(transparent)]
    Promo(#[from] PromoError),

    /// Finalization was refused.
    #[error(transparent)]
    Finalize(#[from] FinalizeError),

    /// A fetched catalog was internally inconsistent.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A remote call failed.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Where the session is in the transaction lifecycle.
#[derive(Debug)]
pub enum SessionState {
    /// No customer, no cart.
    NoTransaction,

    /// A customer was captured; the cart is still empty.
    CustomerCaptured {
        /// The captured identity.
        customer: CustomerRef,
        /// The empty cart awaiting its first line.
        order: OrderAggregate,
    },

    /// Lines are being added, removed and requantified.
    Composing {
        /// The captured identity.
        customer: CustomerRef,
        /// The in-progress cart.
        order: OrderAggregate,
    },

    /// The order was finalized and awaits submission.
    Finalized {
        /// The captured identity.
        customer: CustomerRef,
        /// The cart as finalized; kept for display until cleared.
        order: OrderAggregate,
        /// The submittable record.
        record: TransactionRecord,
    },
}

impl SessionState {
    fn name(&self) -> &'static str {
        match self {
            SessionState::NoTransaction => "NoTransaction",
            SessionState::CustomerCaptured { .. } => "CustomerCaptured",
            SessionState::Composing { .. } => "Composing",
            SessionState::Finalized { .. } => "Finalized",
        }
    }
}

/// One cashier's POS session: the catalog snapshot, the transaction state,
/// and handles to the remote collaborators.
pub struct PosSession {
    catalog_api: Arc<dyn CatalogApi>,
    promo_api: Arc<dyn PromoApi>,
    customer_api: Arc<dyn CustomerApi>,
    transaction_api: Arc<dyn TransactionApi>,
    catalog: CatalogSnapshot,
    state: SessionState,
    promo_in_flight: bool,
}

impl fmt::Debug for PosSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PosSession")
            .field("state", &self.state.name())
            .field("catalog_items", &self.catalog.len())
            .field("promo_in_flight", &self.promo_in_flight)
            .finish_non_exhaustive()
    }
}

impl PosSession {
    /// Create a session over the given collaborators, with an empty catalog
    /// and no transaction.
    #[must_use]
    pub fn new(
        catalog_api: Arc<dyn CatalogApi>,
        promo_api: Arc<dyn PromoApi>,
        customer_api: Arc<dyn CustomerApi>,
        transaction_api: Arc<dyn TransactionApi>,
    ) -> Self {
        Self {
            catalog_api,
            promo_api,
            customer_api,
            transaction_api,
            catalog: CatalogSnapshot::empty(),
            state: SessionState::NoTransaction,
            promo_in_flight: false,
        }
    }

    /// Fetch items and customizations and replace the catalog snapshot.
    ///
    /// On any failure the previous snapshot stays in place and the screen
    /// runs degraded; retries are manual.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Remote`] if either fetch fails.
    /// - [`SessionError::Catalog`] if the fetched data is inconsistent.
    pub async fn load_catalog(&mut self) -> Result<(), SessionError> {
        let api = Arc::clone(&self.catalog_api);

        let items = api.fetch_items().await.inspect_err(|error| {
            tracing::warn!(%error, "item fetch failed; keeping previous snapshot");
        })?;

        let customizations = api.fetch_customizations().await.inspect_err(|error| {
            tracing::warn!(%error, "customization fetch failed; keeping previous snapshot");
        })?;

        self.catalog = CatalogSnapshot::new(items, customizations)?;

        Ok(())
    }

    /// The current catalog snapshot; empty before the first successful load.
    #[must_use]
    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    /// The current lifecycle state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether a promo validation request is currently in flight.
    #[must_use]
    pub fn is_validating_promo(&self) -> bool {
        self.promo_in_flight
    }

    /// The in-progress cart, if a transaction is active.
    #[must_use]
    pub fn order(&self) -> Option<&OrderAggregate> {
        match &self.state {
            SessionState::NoTransaction => None,
            SessionState::CustomerCaptured { order, .. }
            | SessionState::Composing { order, .. }
            | SessionState::Finalized { order, .. } => Some(order),
        }
    }

    /// The captured customer, if a transaction is active.
    #[must_use]
    pub fn customer(&self) -> Option<&CustomerRef> {
        match &self.state {
            SessionState::NoTransaction => None,
            SessionState::CustomerCaptured { customer, .. }
            | SessionState::Composing { customer, .. }
            | SessionState::Finalized { customer, .. } => Some(customer),
        }
    }

    /// Start a transaction for a walk-in guest, persisting a customer record
    /// with the entered first name.
    ///
    /// # Errors
    ///
    /// - [`SessionError::TransactionInProgress`] if a transaction is active.
    /// - [`SessionError::Remote`] if the customer service call fails; the
    ///   session stays in `NoTransaction`.
    pub async fn start_guest(&mut self, first_name: &str) -> Result<(), SessionError> {
        if !matches!(self.state, SessionState::NoTransaction) {
            return Err(SessionError::TransactionInProgress);
        }

        let api = Arc::clone(&self.customer_api);

        let record = api
            .create_customer(NewCustomer {
                first_name: first_name.to_string(),
                last_name: String::new(),
                date_of_birth: jiff::Zoned::now().date().to_string(),
            })
            .await?;

        tracing::info!(customer_id = record.id, "guest customer created");

        self.state = SessionState::CustomerCaptured {
            customer: CustomerRef::Guest {
                id: record.id,
                first_name: record.first_name,
            },
            order: OrderAggregate::new(),
        };

        Ok(())
    }

    /// Start a transaction for a member, resolving the membership id.
    ///
    /// # Errors
    ///
    /// - [`SessionError::TransactionInProgress`] if a transaction is active.
    /// - [`SessionError::MemberNotFound`] if no member matches; the session
    ///   stays in `NoTransaction` and the caller clears the entered id.
    /// - [`SessionError::Remote`] if the lookup call fails.
    pub async fn start_member(&mut self, membership_id: &str) -> Result<(), SessionError> {
        if !matches!(self.state, SessionState::NoTransaction) {
            return Err(SessionError::TransactionInProgress);
        }

        let api = Arc::clone(&self.customer_api);

        let record = api
            .find_member(membership_id)
            .await?
            .ok_or(SessionError::MemberNotFound)?;

        let full_name = if record.last_name.is_empty() {
            record.first_name.clone()
        } else {
            format!("{} {}", record.first_name, record.last_name)
        };

        self.state = SessionState::CustomerCaptured {
            customer: CustomerRef::Member {
                id: record.id,
                membership_id: record
                    .membership_id
                    .unwrap_or_else(|| membership_id.to_string()),
                full_name,
            },
            order: OrderAggregate::new(),
        };

        Ok(())
    }

    /// Append a confirmed line to the cart, moving to `Composing`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveTransaction`] outside an active,
    /// unfinalized transaction.
    pub fn add_line(&mut self, line: OrderLine) -> Result<(), SessionError> {
        let state = std::mem::replace(&mut self.state, SessionState::NoTransaction);

        match state {
            SessionState::CustomerCaptured {
                customer,
                mut order,
            }
            | SessionState::Composing {
                customer,
                mut order,
            } => {
                order.add_line(line);
                self.state = SessionState::Composing { customer, order };
                Ok(())
            }
            other => {
                self.state = other;
                Err(SessionError::NoActiveTransaction)
            }
        }
    }

    /// Remove the line at `index` from the cart.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NoActiveTransaction`] outside composing.
    /// - [`SessionError::Order`] if `index` is out of range.
    pub fn remove_line(&mut self, index: usize) -> Result<OrderLine, SessionError> {
        Ok(self.order_mut()?.remove_line(index)?)
    }

    /// Increment or decrement the quantity of the line at `index`.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NoActiveTransaction`] outside composing.
    /// - [`SessionError::Order`] if `index` is out of range.
    pub fn update_quantity(
        &mut self,
        index: usize,
        update: QuantityUpdate,
    ) -> Result<(), SessionError> {
        Ok(self.order_mut()?.update_quantity(index, update)?)
    }

    /// Validate `code` and attach the resulting promo to the cart.
    ///
    /// While a validation is in flight the operation is gated; the UI keeps
    /// the Apply action disabled until the call completes. Any failure
    /// resets the cart's discount to zero and leaves its lines untouched.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NoActiveTransaction`] outside an active transaction.
    /// - [`SessionError::PromoInFlight`] if a validation is already running.
    /// - [`SessionError::Promo`] for blank, rejected or unreachable codes.
    pub async fn apply_promo(&mut self, code: &str) -> Result<PromoApplication, SessionError> {
        self.order_mut()?;

        if self.promo_in_flight {
            return Err(SessionError::PromoInFlight);
        }

        let api = Arc::clone(&self.promo_api);

        self.promo_in_flight = true;
        let resolved = promo::resolve_promo(api.as_ref(), code).await;
        self.promo_in_flight = false;

        match resolved {
            Ok(application) => {
                self.order_mut()?.apply_promo(application.clone());
                Ok(application)
            }
            Err(PromoError::EmptyCode) => Err(PromoError::EmptyCode.into()),
            Err(error) => {
                // Rejection and transport failure both clear the discount
                // and the code; the lines stay as they were.
                self.order_mut()?.clear_promo();
                Err(error.into())
            }
        }
    }

    /// Finalize the cart into a submittable [`TransactionRecord`].
    ///
    /// The cart is not cleared; completion or cancellation does that.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NoActiveTransaction`] outside composing.
    /// - [`SessionError::Finalize`] for an empty cart or a negative total.
    pub fn finalize(&mut self) -> Result<TransactionRecord, SessionError> {
        let state = std::mem::replace(&mut self.state, SessionState::NoTransaction);

        match state {
            SessionState::CustomerCaptured { customer, order }
            | SessionState::Composing { customer, order } => {
                match transaction::finalize(&order, &customer) {
                    Ok(record) => {
                        self.state = SessionState::Finalized {
                            customer,
                            order,
                            record: record.clone(),
                        };
                        Ok(record)
                    }
                    Err(error) => {
                        self.state = SessionState::Composing { customer, order };
                        Err(error.into())
                    }
                }
            }
            other => {
                self.state = other;
                Err(SessionError::NoActiveTransaction)
            }
        }
    }

    /// Submit the finalized transaction and clear the session back to
    /// `NoTransaction`.
    ///
    /// On a remote failure the session stays `Finalized` so submission can
    /// be retried.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NotFinalized`] if no finalized record exists.
    /// - [`SessionError::Remote`] if submission fails.
    pub async fn complete(&mut self) -> Result<PersistedTransaction, SessionError> {
        let request = match &self.state {
            SessionState::Finalized { record, .. } => record.to_request(),
            _ => return Err(SessionError::NotFinalized),
        };

        let api = Arc::clone(&self.transaction_api);
        let persisted = api.submit_transaction(request).await?;

        self.state = SessionState::NoTransaction;

        Ok(persisted)
    }

    /// Discard the transaction, if any, without finalizing or submitting.
    pub fn cancel(&mut self) {
        self.state = SessionState::NoTransaction;
        self.promo_in_flight = false;
    }

    fn order_mut(&mut self) -> Result<&mut OrderAggregate, SessionError> {
        match &mut self.state {
            SessionState::CustomerCaptured { order, .. }
            | SessionState::Composing { order, .. } => Ok(order),
            _ => Err(SessionError::NoActiveTransaction),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::catalog::{CatalogItem, ItemType, Size};
    use crate::order::SelectionSet;
    use crate::pricing::derive_size_prices;
    use crate::remote::{
        CustomerRecord, MockCatalogApi, MockCustomerApi, MockPromoApi, MockTransactionApi,
        PromoValidation,
    };

    use super::*;

    fn americano() -> CatalogItem {
        CatalogItem {
            code: "AM-001".into(),
            name: "Americano".into(),
            item_type: ItemType::Drinks,
            base_price: Decimal::from(100),
            size_prices: derive_size_prices(Decimal::from(100)).into_map(),
            active: true,
            category: None,
        }
    }

    fn americano_line(quantity: u32) -> OrderLine {
        OrderLine::build(
            &americano(),
            quantity,
            Some(Size::Medium),
            &SelectionSet::new(),
            &[],
        )
        .expect("line should build")
    }

    fn session(
        catalog: MockCatalogApi,
        promo: MockPromoApi,
        customer: MockCustomerApi,
        transaction: MockTransactionApi,
    ) -> PosSession {
        PosSession::new(
            Arc::new(catalog),
            Arc::new(promo),
            Arc::new(customer),
            Arc::new(transaction),
        )
    }

    fn guest_capturing_customer_api() -> MockCustomerApi {
        let mut api = MockCustomerApi::new();
        api.expect_create_customer().returning(|new| {
            Ok(CustomerRecord {
                id: 42,
                first_name: new.first_name,
                last_name: new.last_name,
                membership_id: None,
                email: None,
                phone: None,
            })
        });
        api
    }

    async fn composing_guest_session(promo: MockPromoApi) -> TestResult<PosSession> {
        let mut session = session(
            MockCatalogApi::new(),
            promo,
            guest_capturing_customer_api(),
            MockTransactionApi::new(),
        );

        session.start_guest("Ana").await?;

        Ok(session)
    }

    #[tokio::test]
    async fn start_guest_captures_created_customer() -> TestResult {
        let session = composing_guest_session(MockPromoApi::new()).await?;

        let customer = session.customer().ok_or("expected customer")?;
        assert_eq!(customer.customer_id(), 42);
        assert_eq!(customer.display_name(), "Ana");
        assert!(matches!(
            session.state(),
            SessionState::CustomerCaptured { .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn start_guest_twice_is_rejected() -> TestResult {
        let mut session = composing_guest_session(MockPromoApi::new()).await?;

        let result = session.start_guest("Ben").await;

        assert!(matches!(result, Err(SessionError::TransactionInProgress)));

        Ok(())
    }

    #[tokio::test]
    async fn start_member_resolves_full_name() -> TestResult {
        let mut customer_api = MockCustomerApi::new();
        customer_api
            .expect_find_member()
            .withf(|id| id == "M-0042")
            .returning(|_| {
                Ok(Some(CustomerRecord {
                    id: 9,
                    first_name: "Ana".into(),
                    last_name: "Reyes".into(),
                    membership_id: Some("M-0042".into()),
                    email: None,
                    phone: None,
                }))
            });

        let mut session = session(
            MockCatalogApi::new(),
            MockPromoApi::new(),
            customer_api,
            MockTransactionApi::new(),
        );

        session.start_member("M-0042").await?;

        let customer = session.customer().ok_or("expected customer")?;
        assert_eq!(customer.display_name(), "Ana Reyes");
        assert!(customer.is_member());

        Ok(())
    }

    #[tokio::test]
    async fn start_member_unknown_id_stays_idle() {
        let mut customer_api = MockCustomerApi::new();
        customer_api
            .expect_find_member()
            .returning(|_| Ok(None));

        let mut session = session(
            MockCatalogApi::new(),
            MockPromoApi::new(),
            customer_api,
            MockTransactionApi::new(),
        );

        let result = session.start_member("NOPE").await;

        assert!(matches!(result, Err(SessionError::MemberNotFound)));
        assert!(matches!(session.state(), SessionState::NoTransaction));
    }

    #[tokio::test]
    async fn add_line_moves_to_composing() -> TestResult {
        let mut session = composing_guest_session(MockPromoApi::new()).await?;

        session.add_line(americano_line(2))?;

        assert!(matches!(session.state(), SessionState::Composing { .. }));
        let order = session.order().ok_or("expected order")?;
        assert_eq!(order.subtotal(), Decimal::from(200));

        Ok(())
    }

    #[tokio::test]
    async fn add_line_without_transaction_is_rejected() {
        let mut session = session(
            MockCatalogApi::new(),
            MockPromoApi::new(),
            MockCustomerApi::new(),
            MockTransactionApi::new(),
        );

        let result = session.add_line(americano_line(1));

        assert!(matches!(result, Err(SessionError::NoActiveTransaction)));
    }

    #[tokio::test]
    async fn apply_promo_attaches_discount() -> TestResult {
        let mut promo_api = MockPromoApi::new();
        promo_api.expect_validate_promo().returning(|_| {
            Ok(PromoValidation {
                valid: true,
                discount_percent: Some(Decimal::from(10)),
                message: None,
            })
        });

        let mut session = composing_guest_session(promo_api).await?;
        session.add_line(americano_line(2))?;

        let application = session.apply_promo("save10").await?;

        assert_eq!(application.code(), "SAVE10");
        let order = session.order().ok_or("expected order")?;
        assert_eq!(order.discount_amount(), Decimal::from(20));
        assert_eq!(order.final_total(), Decimal::from(180));
        assert!(!session.is_validating_promo());

        Ok(())
    }

    #[tokio::test]
    async fn rejected_promo_resets_discount_and_keeps_lines() -> TestResult {
        let mut promo_api = MockPromoApi::new();
        promo_api
            .expect_validate_promo()
            .times(1)
            .returning(|_| {
                Ok(PromoValidation {
                    valid: true,
                    discount_percent: Some(Decimal::from(10)),
                    message: None,
                })
            });
        promo_api
            .expect_validate_promo()
            .times(1)
            .returning(|_| {
                Ok(PromoValidation {
                    valid: false,
                    discount_percent: None,
                    message: None,
                })
            });

        let mut session = composing_guest_session(promo_api).await?;
        session.add_line(americano_line(2))?;

        session.apply_promo("SAVE10").await?;
        let result = session.apply_promo("NOPE").await;

        assert!(matches!(
            result,
            Err(SessionError::Promo(PromoError::Rejected(_)))
        ));

        let order = session.order().ok_or("expected order")?;
        assert_eq!(order.len(), 1);
        assert_eq!(order.discount_amount(), Decimal::ZERO);

        Ok(())
    }

    #[tokio::test]
    async fn promo_service_failure_resets_discount() -> TestResult {
        let mut promo_api = MockPromoApi::new();
        promo_api
            .expect_validate_promo()
            .returning(|_| Err(RemoteError::UnexpectedResponse("boom".into())));

        let mut session = composing_guest_session(promo_api).await?;
        session.add_line(americano_line(1))?;

        let result = session.apply_promo("SAVE10").await;

        assert!(matches!(
            result,
            Err(SessionError::Promo(PromoError::Service(_)))
        ));
        let order = session.order().ok_or("expected order")?;
        assert_eq!(order.discount_amount(), Decimal::ZERO);
        assert!(!session.is_validating_promo());

        Ok(())
    }

    #[tokio::test]
    async fn finalize_then_complete_clears_the_session() -> TestResult {
        let mut transaction_api = MockTransactionApi::new();
        transaction_api
            .expect_submit_transaction()
            .withf(|request| {
                request.customer_id == 42
                    && request.items.len() == 1
                    && request.items.first().is_some_and(|item| item.quantity == 2)
            })
            .returning(|_| Ok(PersistedTransaction { id: 7, total: None }));

        let mut session = session(
            MockCatalogApi::new(),
            MockPromoApi::new(),
            guest_capturing_customer_api(),
            transaction_api,
        );

        session.start_guest("Ana").await?;
        session.add_line(americano_line(2))?;

        let record = session.finalize()?;
        assert_eq!(record.final_total, Decimal::from(200));
        assert!(matches!(session.state(), SessionState::Finalized { .. }));

        let persisted = session.complete().await?;
        assert_eq!(persisted.id, 7);
        assert!(matches!(session.state(), SessionState::NoTransaction));

        Ok(())
    }

    #[tokio::test]
    async fn failed_submission_keeps_session_finalized() -> TestResult {
        let mut transaction_api = MockTransactionApi::new();
        transaction_api
            .expect_submit_transaction()
            .returning(|_| Err(RemoteError::UnexpectedResponse("db down".into())));

        let mut session = session(
            MockCatalogApi::new(),
            MockPromoApi::new(),
            guest_capturing_customer_api(),
            transaction_api,
        );

        session.start_guest("Ana").await?;
        session.add_line(americano_line(1))?;
        session.finalize()?;

        let result = session.complete().await;

        assert!(matches!(result, Err(SessionError::Remote(_))));
        assert!(matches!(session.state(), SessionState::Finalized { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn finalize_empty_cart_stays_composing() -> TestResult {
        let mut session = composing_guest_session(MockPromoApi::new()).await?;

        let result = session.finalize();

        assert!(matches!(
            result,
            Err(SessionError::Finalize(FinalizeError::EmptyOrder))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn cancel_discards_the_cart() -> TestResult {
        let mut session = composing_guest_session(MockPromoApi::new()).await?;
        session.add_line(americano_line(3))?;

        session.cancel();

        assert!(matches!(session.state(), SessionState::NoTransaction));
        assert!(session.order().is_none());

        Ok(())
    }

    #[tokio::test]
    async fn load_catalog_replaces_snapshot() -> TestResult {
        let mut catalog_api = MockCatalogApi::new();
        catalog_api
            .expect_fetch_items()
            .returning(|| Ok(vec![]));
        catalog_api
            .expect_fetch_customizations()
            .returning(|| Ok(vec![]));

        let mut session = session(
            catalog_api,
            MockPromoApi::new(),
            MockCustomerApi::new(),
            MockTransactionApi::new(),
        );

        session.load_catalog().await?;

        assert!(session.catalog().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn failed_catalog_load_keeps_previous_snapshot() -> TestResult {
        let mut catalog_api = MockCatalogApi::new();
        catalog_api
            .expect_fetch_items()
            .times(1)
            .returning(|| Ok(vec![americano()]));
        catalog_api
            .expect_fetch_customizations()
            .times(1)
            .returning(|| Ok(vec![]));
        catalog_api
            .expect_fetch_items()
            .times(1)
            .returning(|| Err(RemoteError::UnexpectedResponse("offline".into())));

        let mut session = session(
            catalog_api,
            MockPromoApi::new(),
            MockCustomerApi::new(),
            MockTransactionApi::new(),
        );

        session.load_catalog().await?;
        assert_eq!(session.catalog().len(), 1);

        let result = session.load_catalog().await;

        assert!(matches!(result, Err(SessionError::Remote(_))));
        assert_eq!(session.catalog().len(), 1);
        assert!(session.catalog().item("AM-001").is_some());

        Ok(())
    }

    #[tokio::test]
    async fn update_quantity_and_remove_flow_through_the_aggregate() -> TestResult {
        let mut session = composing_guest_session(MockPromoApi::new()).await?;
        session.add_line(americano_line(1))?;
        session.add_line(americano_line(2))?;

        session.update_quantity(0, QuantityUpdate::Increment)?;
        let removed = session.remove_line(1)?;

        assert_eq!(removed.quantity(), 2);
        let order = session.order().ok_or("expected order")?;
        assert_eq!(order.len(), 1);
        assert_eq!(order.subtotal(), Decimal::from(200));

        Ok(())
    }
}
