use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::OrderId;
use domain::Order;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::outbox::{OutboxEntry, OutboxStore};
use crate::store::{OrderStore, StoredOrder};
use crate::{Result, StoreError};

#[derive(Default)]
struct InMemoryOrderState {
    orders: HashMap<OrderId, StoredOrder>,
    fail_on_add: bool,
}

/// In-memory order store implementation for testing.
///
/// Provides the same interface as the PostgreSQL implementation.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    state: Arc<RwLock<InMemoryOrderState>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of orders stored.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }

    /// Configures the store to fail writes, simulating an unavailable
    /// database.
    pub async fn set_fail_on_add(&self, fail: bool) {
        self.state.write().await.fail_on_add = fail;
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn add_order(&self, order: Order) -> Result<OrderId> {
        let mut state = self.state.write().await;

        if state.fail_on_add {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }

        let id = OrderId::new();
        state.orders.insert(id, StoredOrder { id, order });
        Ok(id)
    }

    async fn get_order(&self, order_id: OrderId) -> Result<Option<StoredOrder>> {
        let state = self.state.read().await;
        Ok(state.orders.get(&order_id).cloned())
    }
}

/// In-memory outbox store implementation for testing.
#[derive(Clone, Default)]
pub struct InMemoryOutboxStore {
    entries: Arc<RwLock<Vec<OutboxEntry>>>,
}

impl InMemoryOutboxStore {
    /// Creates a new empty in-memory outbox store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of unprocessed entries.
    pub async fn pending_count(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns a copy of all unprocessed entries.
    pub async fn pending_entries(&self) -> Vec<OutboxEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl OutboxStore for InMemoryOutboxStore {
    async fn enqueue(&self, entry: OutboxEntry) -> Result<()> {
        self.entries.write().await.push(entry);
        Ok(())
    }

    async fn fetch_unprocessed(&self, limit: u32) -> Result<Vec<OutboxEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.iter().take(limit as usize).cloned().collect())
    }

    async fn mark_processed(&self, ids: &[Uuid]) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.retain(|e| !ids.contains(&e.id));
        Ok(())
    }

    async fn mark_failed(&self, id: Uuid, last_error: String) -> Result<()> {
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.iter_mut().find(|e| e.id == id) {
            entry.attempts += 1;
            entry.last_error = Some(last_error);
        }
        Ok(())
    }
}
