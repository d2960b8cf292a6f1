//! Durable outbox for post-persist side effects.
//!
//! When a downstream publish or notification fails after the order has
//! been persisted, the payload is written here and re-dispatched later by
//! a retrying relay, instead of failing the whole checkout.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::OrderId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Result;
use crate::error::StoreError;

/// The downstream consumer a pending side effect belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutboxKind {
    /// Order-items notification for the message queue.
    QueueNotification,

    /// Delivery request for the fulfillment HTTP endpoint.
    DeliveryNotification,
}

impl OutboxKind {
    /// Returns the kind name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutboxKind::QueueNotification => "queue_notification",
            OutboxKind::DeliveryNotification => "delivery_notification",
        }
    }

    /// Parses a stored kind name.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "queue_notification" => Ok(OutboxKind::QueueNotification),
            "delivery_notification" => Ok(OutboxKind::DeliveryNotification),
            other => Err(StoreError::UnknownOutboxKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for OutboxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A pending side effect awaiting re-dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboxEntry {
    /// Unique identifier of this entry.
    pub id: Uuid,

    /// The persisted order the side effect belongs to.
    pub order_id: OrderId,

    /// Which downstream consumer the payload targets.
    pub kind: OutboxKind,

    /// The JSON payload exactly as it would have been sent.
    pub payload: serde_json::Value,

    /// Number of failed dispatch attempts so far.
    pub attempts: u32,

    /// Error message from the most recent failed attempt.
    pub last_error: Option<String>,

    /// When the entry was enqueued.
    pub enqueued_at: DateTime<Utc>,
}

impl OutboxEntry {
    /// Creates a new entry for a payload that has never been dispatched
    /// successfully.
    pub fn new(order_id: OrderId, kind: OutboxKind, payload: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id,
            kind,
            payload,
            attempts: 0,
            last_error: None,
            enqueued_at: Utc::now(),
        }
    }
}

/// Trait for outbox storage implementations.
#[async_trait]
pub trait OutboxStore: Send + Sync {
    /// Persists a pending side effect for later dispatch.
    async fn enqueue(&self, entry: OutboxEntry) -> Result<()>;

    /// Fetches up to `limit` unprocessed entries, oldest first.
    async fn fetch_unprocessed(&self, limit: u32) -> Result<Vec<OutboxEntry>>;

    /// Marks entries as successfully dispatched.
    async fn mark_processed(&self, ids: &[Uuid]) -> Result<()>;

    /// Records a failed dispatch attempt for an entry.
    async fn mark_failed(&self, id: Uuid, last_error: String) -> Result<()>;
}
