//! Order wizard session
//!
//! One wizard session builds a single order: the operator picks a store and
//! a user, adjusts product quantities while the total refreshes, and
//! submits. Submission is a small state machine:
//!
//! ```text
//!   Idle --begin_submit--> Submitting --finish_submit(Ok)--> Succeeded
//!    ^                          |
//!    +----finish_submit(Err)----+
//! ```
//!
//! `begin_submit` while `Submitting` yields no ticket, so at most one
//! creation call is ever in flight per session. A failed call returns the
//! machine to `Idle` with the draft untouched. Tickets are stamped with the
//! session that issued them; a ticket from an earlier session finishes
//! without touching the current one.

use tracing::{error, info, warn};

use super::catalog::Catalog;
use super::operator::Notify;
use super::order_list::OrderListController;
use crate::backend::{Backend, BackendError};
use crate::domain::aggregates::{CreateOrderRequest, OrderDraft, ValidationError};
use crate::domain::events::WizardEvent;
use crate::domain::pricing::{self, SummaryLine};
use crate::{Money, Order, PanelError, ProductId, StoreId, UserId};

pub const SUBMIT_FAILED_ALERT: &str = "Failed to create order";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
}

/// Proof that a submission was started. Consumed by [`OrderWizard::finish_submit`].
#[derive(Debug)]
pub struct SubmitTicket {
    session: u64,
    request: CreateOrderRequest,
}

impl SubmitTicket {
    pub fn request(&self) -> &CreateOrderRequest { &self.request }
}

#[derive(Debug, Default)]
pub struct OrderWizard {
    open: bool,
    session: u64,
    catalog: Catalog,
    draft: OrderDraft,
    state: SubmitState,
    events: Vec<WizardEvent>,
}

impl OrderWizard {
    pub fn new() -> Self { Self::default() }

    pub fn is_open(&self) -> bool { self.open }
    pub fn catalog(&self) -> &Catalog { &self.catalog }
    pub fn draft(&self) -> &OrderDraft { &self.draft }
    pub fn state(&self) -> SubmitState { self.state }

    /// Starts a fresh session and loads the catalog.
    ///
    /// A failed load leaves the catalog empty; it is logged but the operator
    /// is not alerted.
    pub async fn open(&mut self, backend: &dyn Backend) {
        self.open = true;
        self.session += 1;
        self.draft.reset();
        self.state = SubmitState::Idle;

        match Catalog::load(backend).await {
            Ok(catalog) => {
                self.raise_event(WizardEvent::Opened {
                    products: catalog.products.len(),
                    stores: catalog.stores.len(),
                    users: catalog.users.len(),
                });
                self.catalog = catalog;
            }
            Err(e) => {
                warn!(error = %e, "catalog unavailable, wizard opened empty");
                self.catalog = Catalog::default();
                self.raise_event(WizardEvent::CatalogUnavailable { reason: e.to_string() });
            }
        }
    }

    /// Ends the session and discards the draft.
    pub fn close(&mut self) {
        self.open = false;
        self.session += 1;
        self.draft.reset();
        if self.state == SubmitState::Submitting {
            warn!("wizard closed while an order submission was in flight");
        }
        self.state = SubmitState::Idle;
        self.raise_event(WizardEvent::Closed);
    }

    pub fn select_store(&mut self, store: Option<StoreId>) { self.draft.select_store(store); }
    pub fn select_user(&mut self, user: Option<UserId>) { self.draft.select_user(user); }

    /// Applies `delta` to a product's quantity and returns the refreshed total.
    pub fn adjust_quantity(&mut self, product_id: ProductId, delta: i64) -> Money {
        let quantity = self.draft.adjust_quantity(product_id, delta).quantity(product_id);
        let total = self.total();
        self.raise_event(WizardEvent::QuantityChanged { product_id, quantity, total });
        total
    }

    pub fn total(&self) -> Money {
        pricing::total(self.draft.cart(), &self.catalog.products)
    }

    pub fn summary(&self) -> Vec<SummaryLine> {
        pricing::summary(self.draft.cart(), &self.catalog.products)
    }

    /// Whether the place-order action should be enabled.
    pub fn can_submit(&self) -> bool {
        self.open && self.state != SubmitState::Submitting && !self.draft.cart().is_empty()
    }

    /// Idle -> Submitting.
    ///
    /// Returns `Ok(None)` when the wizard is closed or a submission is
    /// already in flight. Validation failures leave the state unchanged.
    pub fn begin_submit(&mut self) -> Result<Option<SubmitTicket>, ValidationError> {
        if !self.open {
            info!("submit ignored, wizard is closed");
            return Ok(None);
        }
        if self.state == SubmitState::Submitting {
            info!("submit ignored, order creation already in flight");
            return Ok(None);
        }
        let request = self.draft.to_request()?;
        self.state = SubmitState::Submitting;
        self.raise_event(WizardEvent::SubmitStarted { lines: request.items.len() });
        Ok(Some(SubmitTicket { session: self.session, request }))
    }

    /// Submitting -> Succeeded on success (draft cleared, wizard closed),
    /// Submitting -> Idle on failure (draft kept for a retry).
    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        result: Result<Order, BackendError>,
    ) -> Result<Order, PanelError> {
        if ticket.session != self.session || self.state != SubmitState::Submitting {
            // session was closed or reopened while the call was in flight
            warn!(
                lines = ticket.request.items.len(),
                ok = result.is_ok(),
                "stale submission result ignored"
            );
            return result.map_err(PanelError::Submission);
        }

        match result {
            Ok(order) => {
                info!(order_id = %order.id, lines = order.items.len(), "order created");
                self.draft.reset();
                self.open = false;
                self.state = SubmitState::Succeeded;
                self.raise_event(WizardEvent::OrderCreated { order_id: order.id });
                Ok(order)
            }
            Err(e) => {
                error!(error = %e, "order creation failed");
                self.state = SubmitState::Idle;
                self.raise_event(WizardEvent::SubmitFailed { reason: e.to_string() });
                Err(PanelError::Submission(e))
            }
        }
    }

    /// Validates, creates the order and, on success, refreshes `orders`.
    ///
    /// Validation and creation failures are alerted through `notifier`.
    /// Returns `Ok(None)` if a submission was already in flight.
    pub async fn submit(
        &mut self,
        backend: &dyn Backend,
        notifier: &dyn Notify,
        orders: &mut OrderListController,
    ) -> Result<Option<Order>, PanelError> {
        let ticket = match self.begin_submit() {
            Ok(Some(ticket)) => ticket,
            Ok(None) => return Ok(None),
            Err(e) => {
                notifier.alert(&e.to_string());
                return Err(e.into());
            }
        };

        let result = backend.create_order(ticket.request()).await;
        match self.finish_submit(ticket, result) {
            Ok(order) => {
                orders.refresh(backend).await;
                Ok(Some(order))
            }
            Err(e) => {
                notifier.alert(SUBMIT_FAILED_ALERT);
                Err(e)
            }
        }
    }

    pub fn take_events(&mut self) -> Vec<WizardEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: WizardEvent) { self.events.push(e); }
}
