use async_trait::async_trait;
use common::OrderId;
use domain::Order;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A persisted order together with its store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredOrder {
    /// Identifier assigned when the order was persisted.
    pub id: OrderId,

    /// The immutable order aggregate.
    pub order: Order,
}

/// Core trait for order store implementations.
///
/// The store is append-only: orders are written exactly once and never
/// updated or deleted. All implementations must be thread-safe
/// (Send + Sync).
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a new order and returns its assigned identifier.
    async fn add_order(&self, order: Order) -> Result<OrderId>;

    /// Retrieves a persisted order by identifier.
    ///
    /// Returns None if no order exists with that identifier.
    async fn get_order(&self, order_id: OrderId) -> Result<Option<StoredOrder>>;
}
