//! Outbox relay: re-dispatches parked side effects.
//!
//! Entries land in the outbox when a queue publish or delivery
//! notification fails after an order has been persisted. The relay polls
//! for unprocessed entries and replays them through the same publisher
//! and notifier, giving at-least-once delivery decoupled from the
//! original checkout call.

use std::time::Duration;

use order_store::{OutboxEntry, OutboxKind, OutboxStore};

use crate::error::CheckoutError;
use crate::messages::{DeliveryRequest, OrderNotification};
use crate::services::{DeliveryNotifier, QueuePublisher};

/// Default number of entries processed per relay pass.
const DEFAULT_BATCH_SIZE: u32 = 32;

/// Summary of one relay pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayReport {
    /// Entries dispatched and marked processed.
    pub dispatched: usize,

    /// Entries that failed again and stay parked.
    pub failed: usize,
}

/// Re-dispatches parked side effects from the outbox.
pub struct OutboxRelay<Ox, Q, D>
where
    Ox: OutboxStore,
    Q: QueuePublisher,
    D: DeliveryNotifier,
{
    outbox: Ox,
    queue: Q,
    delivery: D,
    batch_size: u32,
}

impl<Ox, Q, D> OutboxRelay<Ox, Q, D>
where
    Ox: OutboxStore,
    Q: QueuePublisher,
    D: DeliveryNotifier,
{
    /// Creates a new relay over the given outbox and dispatch targets.
    pub fn new(outbox: Ox, queue: Q, delivery: D) -> Self {
        Self {
            outbox,
            queue,
            delivery,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Overrides the per-pass batch size.
    pub fn with_batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Runs a single relay pass over at most one batch of entries.
    #[tracing::instrument(skip(self))]
    pub async fn run_once(&self) -> Result<RelayReport, CheckoutError> {
        let entries = self.outbox.fetch_unprocessed(self.batch_size).await?;
        if entries.is_empty() {
            return Ok(RelayReport {
                dispatched: 0,
                failed: 0,
            });
        }

        let mut dispatched = Vec::new();
        let mut failed = 0;

        for entry in entries {
            match self.dispatch(&entry).await {
                Ok(()) => {
                    metrics::counter!("outbox_dispatched_total").increment(1);
                    tracing::info!(
                        entry_id = %entry.id,
                        order_id = %entry.order_id,
                        kind = %entry.kind,
                        "parked side effect dispatched"
                    );
                    dispatched.push(entry.id);
                }
                Err(e) => {
                    metrics::counter!("outbox_failed_total").increment(1);
                    tracing::warn!(
                        entry_id = %entry.id,
                        order_id = %entry.order_id,
                        kind = %entry.kind,
                        attempts = entry.attempts,
                        error = %e,
                        "outbox dispatch failed"
                    );
                    self.outbox.mark_failed(entry.id, e.to_string()).await?;
                    failed += 1;
                }
            }
        }

        let count = dispatched.len();
        self.outbox.mark_processed(&dispatched).await?;

        Ok(RelayReport {
            dispatched: count,
            failed,
        })
    }

    /// Runs relay passes forever at a fixed polling interval.
    pub async fn run(&self, poll_interval: Duration) {
        let mut ticker = tokio::time::interval(poll_interval);
        loop {
            ticker.tick().await;
            if let Err(e) = self.run_once().await {
                tracing::error!(error = %e, "outbox relay pass failed");
            }
        }
    }

    async fn dispatch(&self, entry: &OutboxEntry) -> Result<(), CheckoutError> {
        match entry.kind {
            OutboxKind::QueueNotification => {
                let notification: OrderNotification = serde_json::from_value(entry.payload.clone())?;
                self.queue.publish(&notification).await
            }
            OutboxKind::DeliveryNotification => {
                let request: DeliveryRequest = serde_json::from_value(entry.payload.clone())?;
                self.delivery.notify(&request).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::CheckoutOrchestrator;
    use crate::services::{
        InMemoryBasketService, InMemoryCatalogService, InMemoryDeliveryNotifier,
        InMemoryQueuePublisher,
    };
    use common::BasketId;
    use domain::{Address, Basket, BasketItem, CatalogSnapshot, Money};
    use order_store::{InMemoryOrderStore, InMemoryOutboxStore};

    fn address() -> Address {
        Address::new("1 Main St", "Springfield", "OR", "USA", "97477")
    }

    /// Runs a checkout with a failing queue so a notification lands in
    /// the outbox, then returns the pieces needed to relay it.
    async fn park_queue_notification() -> (
        InMemoryOutboxStore,
        InMemoryQueuePublisher,
        InMemoryDeliveryNotifier,
    ) {
        let orders = InMemoryOrderStore::new();
        let outbox = InMemoryOutboxStore::new();
        let baskets = InMemoryBasketService::new();
        let catalog = InMemoryCatalogService::new();
        let queue = InMemoryQueuePublisher::new();
        let delivery = InMemoryDeliveryNotifier::new();

        baskets.insert(Basket::new(
            1,
            7,
            vec![BasketItem::new(10, Money::from_cents(999), 2)],
        ));
        catalog.insert(CatalogSnapshot::new(10, "Widget", "/pics/10.png"));
        queue.set_fail_on_publish(true);

        let orchestrator = CheckoutOrchestrator::new(
            orders,
            outbox.clone(),
            baskets,
            catalog,
            queue.clone(),
            delivery.clone(),
        );
        let outcome = orchestrator
            .create_order(BasketId::new(1), address())
            .await
            .unwrap();
        assert!(!outcome.is_complete());

        (outbox, queue, delivery)
    }

    #[tokio::test]
    async fn test_relay_dispatches_parked_notification() {
        let (outbox, queue, delivery) = park_queue_notification().await;
        assert_eq!(outbox.pending_count().await, 1);

        // Broker is back
        queue.set_fail_on_publish(false);

        let relay = OutboxRelay::new(outbox.clone(), queue.clone(), delivery);
        let report = relay.run_once().await.unwrap();

        assert_eq!(report, RelayReport { dispatched: 1, failed: 0 });
        assert_eq!(outbox.pending_count().await, 0);
        assert_eq!(
            queue.messages(),
            vec![r#"{"items":[{"itemId":10,"quantity":2}]}"#.to_string()]
        );
    }

    #[tokio::test]
    async fn test_relay_records_repeated_failure() {
        let (outbox, queue, delivery) = park_queue_notification().await;

        // Broker still down
        let relay = OutboxRelay::new(outbox.clone(), queue, delivery);
        let report = relay.run_once().await.unwrap();

        assert_eq!(report, RelayReport { dispatched: 0, failed: 1 });

        let entries = outbox.pending_entries().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].attempts, 2);
        assert!(entries[0].last_error.is_some());
    }

    #[tokio::test]
    async fn test_relay_on_empty_outbox_is_a_noop() {
        let outbox = InMemoryOutboxStore::new();
        let queue = InMemoryQueuePublisher::new();
        let delivery = InMemoryDeliveryNotifier::new();

        let relay = OutboxRelay::new(outbox, queue.clone(), delivery);
        let report = relay.run_once().await.unwrap();

        assert_eq!(report, RelayReport { dispatched: 0, failed: 0 });
        assert_eq!(queue.published_count(), 0);
    }

    #[tokio::test]
    async fn test_relay_dispatches_delivery_kind_to_notifier() {
        let orders = InMemoryOrderStore::new();
        let outbox = InMemoryOutboxStore::new();
        let baskets = InMemoryBasketService::new();
        let catalog = InMemoryCatalogService::new();
        let queue = InMemoryQueuePublisher::new();
        let delivery = InMemoryDeliveryNotifier::new();

        baskets.insert(Basket::new(
            1,
            7,
            vec![BasketItem::new(10, Money::from_cents(999), 2)],
        ));
        catalog.insert(CatalogSnapshot::new(10, "Widget", "/pics/10.png"));
        delivery.set_fail_on_notify(true);

        let orchestrator = CheckoutOrchestrator::new(
            orders,
            outbox.clone(),
            baskets,
            catalog,
            queue.clone(),
            delivery.clone(),
        );
        orchestrator
            .create_order(BasketId::new(1), address())
            .await
            .unwrap();

        delivery.set_fail_on_notify(false);

        let relay = OutboxRelay::new(outbox.clone(), queue, delivery.clone());
        let report = relay.run_once().await.unwrap();

        assert_eq!(report.dispatched, 1);
        assert_eq!(delivery.notified_count(), 1);
        assert_eq!(outbox.pending_count().await, 0);
    }
}
