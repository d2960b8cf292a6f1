//! Checkout error types.

use common::BasketId;
use domain::BuildError;
use order_store::StoreError;
use thiserror::Error;

/// Errors that can occur during checkout.
///
/// Only failures that leave no order behind surface as errors: once the
/// order has been persisted, downstream publish/notify failures are
/// reported as warnings on the outcome instead.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The basket does not exist.
    #[error("Basket not found: {0}")]
    BasketNotFound(BasketId),

    /// The basket exists but has nothing to order.
    #[error("Basket {0} is empty at checkout")]
    EmptyBasket(BasketId),

    /// The basket and catalog are out of sync. Not retryable.
    #[error("Order build failed: {0}")]
    Build(#[from] BuildError),

    /// Basket service error.
    #[error("Basket service error: {0}")]
    BasketService(String),

    /// Catalog service error.
    #[error("Catalog service error: {0}")]
    CatalogService(String),

    /// Order store error.
    #[error("Order store error: {0}")]
    Store(#[from] StoreError),

    /// Queue publish error.
    #[error("Queue publish error: {0}")]
    QueuePublish(String),

    /// Delivery notification error.
    #[error("Delivery notification error: {0}")]
    DeliveryNotify(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for checkout results.
pub type Result<T> = std::result::Result<T, CheckoutError>;
