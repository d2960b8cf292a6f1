//! Orchestrator for the order-commit workflow.

use common::{BasketId, OrderId};
use domain::{Address, build_order};
use order_store::{OrderStore, OutboxEntry, OutboxKind, OutboxStore};
use serde::Serialize;

use crate::error::CheckoutError;
use crate::messages::{DeliveryRequest, OrderNotification};
use crate::services::{BasketService, CatalogService, DeliveryNotifier, QueuePublisher};
use crate::state::CheckoutState;

/// A post-persist side effect that failed and was parked for retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingSideEffect {
    /// The order-items notification was not published to the queue.
    QueueNotification,

    /// The delivery-fulfillment endpoint was not notified.
    DeliveryNotification,
}

impl PendingSideEffect {
    /// Returns the corresponding outbox kind.
    fn outbox_kind(&self) -> OutboxKind {
        match self {
            PendingSideEffect::QueueNotification => OutboxKind::QueueNotification,
            PendingSideEffect::DeliveryNotification => OutboxKind::DeliveryNotification,
        }
    }
}

/// Result of a checkout that persisted an order.
///
/// The order always exists once this is returned; `pending` lists any
/// downstream notifications that failed and were parked in the outbox.
#[derive(Debug, Clone)]
pub struct CheckoutOutcome {
    /// Identifier assigned to the persisted order.
    pub order_id: OrderId,

    /// `Committed`, or `CommittedWithWarnings` when side effects are
    /// pending.
    pub state: CheckoutState,

    /// Side effects that did not complete and await retry.
    pub pending: Vec<PendingSideEffect>,
}

impl CheckoutOutcome {
    /// Returns true if every downstream notification was delivered.
    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Orchestrates the order-commit workflow for one basket.
///
/// Sequences basket resolution, catalog resolution, the pure order build,
/// persistence, queue publication and delivery notification, and owns the
/// partial-failure policy: the order is persisted before anything is
/// published, and a downstream failure after a successful persist never
/// rolls the order back. The failed payload is parked in the outbox and
/// surfaced as a warning instead.
pub struct CheckoutOrchestrator<St, Ox, B, C, Q, D>
where
    St: OrderStore,
    Ox: OutboxStore,
    B: BasketService,
    C: CatalogService,
    Q: QueuePublisher,
    D: DeliveryNotifier,
{
    orders: St,
    outbox: Ox,
    baskets: B,
    catalog: C,
    queue: Q,
    delivery: D,
}

impl<St, Ox, B, C, Q, D> CheckoutOrchestrator<St, Ox, B, C, Q, D>
where
    St: OrderStore,
    Ox: OutboxStore,
    B: BasketService,
    C: CatalogService,
    Q: QueuePublisher,
    D: DeliveryNotifier,
{
    /// Creates a new orchestrator over the given collaborators.
    pub fn new(orders: St, outbox: Ox, baskets: B, catalog: C, queue: Q, delivery: D) -> Self {
        Self {
            orders,
            outbox,
            baskets,
            catalog,
            queue,
            delivery,
        }
    }

    /// Commits the basket as an order.
    ///
    /// Returns `Ok` only when the order has been persisted; the outcome
    /// distinguishes a clean commit from one with pending side effects.
    /// Every `Err` means nothing was committed.
    #[tracing::instrument(skip(self, shipping_address), fields(%basket_id))]
    pub async fn create_order(
        &self,
        basket_id: BasketId,
        shipping_address: Address,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        metrics::counter!("checkout_executions_total").increment(1);
        let started = std::time::Instant::now();

        let result = self.run_checkout(basket_id, shipping_address).await;

        metrics::histogram!("checkout_duration_seconds").record(started.elapsed().as_secs_f64());
        match &result {
            Ok(outcome) if outcome.is_complete() => {
                metrics::counter!("checkout_completed").increment(1);
            }
            Ok(_) => {
                metrics::counter!("checkout_completed_with_warnings").increment(1);
            }
            Err(_) => {
                metrics::counter!("checkout_failed").increment(1);
            }
        }

        result
    }

    async fn run_checkout(
        &self,
        basket_id: BasketId,
        shipping_address: Address,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        // Validating
        let basket = self
            .baskets
            .get_basket_with_items(basket_id)
            .await?
            .ok_or(CheckoutError::BasketNotFound(basket_id))?;

        if !basket.has_items() {
            return Err(CheckoutError::EmptyBasket(basket_id));
        }

        // Building
        tracing::debug!(state = %CheckoutState::Building, item_count = basket.items().len());
        let snapshots = self
            .catalog
            .list_catalog_items(&basket.catalog_item_ids())
            .await?;

        let order = match build_order(&basket, shipping_address, &snapshots) {
            Ok(order) => order,
            Err(e) => {
                // Basket/catalog mismatch is a data corruption signal.
                tracing::error!(%basket_id, error = %e, "order build failed");
                return Err(e.into());
            }
        };

        // Both outbound payloads are derived and serialized up front, so
        // nothing after the persist can fail except the sends themselves.
        let notification = OrderNotification::for_order(&order);
        let notification_payload = serde_json::to_value(&notification)?;
        let delivery_request = DeliveryRequest::for_order(&order);
        let delivery_payload = serde_json::to_value(&delivery_request)?;

        // Persisting: the order is only "created" once this succeeds.
        tracing::debug!(state = %CheckoutState::Persisting);
        let order_id = self.orders.add_order(order).await?;
        tracing::info!(%order_id, %basket_id, "order persisted");

        // NotifyingQueue / NotifyingDelivery: failures from here on are
        // warnings, never rollbacks.
        let mut pending = Vec::new();

        tracing::debug!(state = %CheckoutState::NotifyingQueue);
        if let Err(e) = self.queue.publish(&notification).await {
            self.park(
                order_id,
                PendingSideEffect::QueueNotification,
                notification_payload,
                &e,
            )
            .await;
            pending.push(PendingSideEffect::QueueNotification);
        }

        tracing::debug!(state = %CheckoutState::NotifyingDelivery);
        if let Err(e) = self.delivery.notify(&delivery_request).await {
            self.park(
                order_id,
                PendingSideEffect::DeliveryNotification,
                delivery_payload,
                &e,
            )
            .await;
            pending.push(PendingSideEffect::DeliveryNotification);
        }

        let state = if pending.is_empty() {
            tracing::info!(%order_id, "checkout committed");
            CheckoutState::Committed
        } else {
            tracing::warn!(%order_id, ?pending, "checkout committed with pending side effects");
            CheckoutState::CommittedWithWarnings
        };

        Ok(CheckoutOutcome {
            order_id,
            state,
            pending,
        })
    }

    /// Parks a failed side effect in the outbox for the relay to retry.
    async fn park(
        &self,
        order_id: OrderId,
        effect: PendingSideEffect,
        payload: serde_json::Value,
        cause: &CheckoutError,
    ) {
        tracing::warn!(%order_id, ?effect, error = %cause, "side effect failed after persist, parking in outbox");

        let mut entry = OutboxEntry::new(order_id, effect.outbox_kind(), payload);
        entry.attempts = 1;
        entry.last_error = Some(cause.to_string());

        // The warning is reported to the caller even if parking fails;
        // losing the retry record must not hide that the order exists.
        if let Err(e) = self.outbox.enqueue(entry).await {
            tracing::error!(%order_id, ?effect, error = %e, "failed to park side effect in outbox");
        }
    }
}
