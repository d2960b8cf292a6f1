//! Order commit orchestration.
//!
//! This crate owns the workflow that turns a basket into a persisted,
//! immutable order and fans the result out to two downstream consumers:
//! an asynchronous message queue and a synchronous delivery-fulfillment
//! HTTP endpoint.
//!
//! The three side effects (persist, publish, call) share no transaction.
//! The orchestrator persists first, so the order is the durable source of
//! truth, then treats publish/notify failures as retryable post-commit
//! side effects parked in an outbox rather than reasons to fail the call.

pub mod config;
pub mod error;
pub mod messages;
pub mod orchestrator;
pub mod relay;
pub mod services;
pub mod state;

pub use config::CheckoutConfig;
pub use error::CheckoutError;
pub use messages::{DeliveryRequest, NotificationItem, OrderNotification};
pub use orchestrator::{CheckoutOrchestrator, CheckoutOutcome, PendingSideEffect};
pub use relay::{OutboxRelay, RelayReport};
pub use services::{
    BasketService, CatalogService, DeliveryNotifier, HttpDeliveryNotifier, InMemoryBasketService,
    InMemoryCatalogService, InMemoryDeliveryNotifier, InMemoryQueuePublisher, KafkaQueuePublisher,
    QueuePublisher,
};
pub use state::CheckoutState;
