//! Queue publisher trait with in-memory and Kafka implementations.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};

use crate::config::CheckoutConfig;
use crate::error::CheckoutError;
use crate::messages::OrderNotification;

/// Trait for publishing order-items notifications to a message broker.
///
/// Delivery is at-least-once and asynchronous to the caller's business
/// intent; failures must be observable so the orchestrator can park the
/// payload for retry.
#[async_trait]
pub trait QueuePublisher: Send + Sync {
    /// Publishes a notification as a JSON message.
    async fn publish(&self, notification: &OrderNotification) -> Result<(), CheckoutError>;
}

#[derive(Debug, Default)]
struct InMemoryQueueState {
    messages: Vec<String>,
    fail_on_publish: bool,
}

/// In-memory queue publisher for testing.
///
/// Records the serialized message bodies so tests can assert the exact
/// wire payload.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQueuePublisher {
    state: Arc<RwLock<InMemoryQueueState>>,
}

impl InMemoryQueuePublisher {
    /// Creates a new in-memory queue publisher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the publisher to fail on the next publish call.
    pub fn set_fail_on_publish(&self, fail: bool) {
        self.state.write().unwrap().fail_on_publish = fail;
    }

    /// Returns the number of messages published.
    pub fn published_count(&self) -> usize {
        self.state.read().unwrap().messages.len()
    }

    /// Returns the published message bodies in order.
    pub fn messages(&self) -> Vec<String> {
        self.state.read().unwrap().messages.clone()
    }
}

#[async_trait]
impl QueuePublisher for InMemoryQueuePublisher {
    async fn publish(&self, notification: &OrderNotification) -> Result<(), CheckoutError> {
        let body = serde_json::to_string(notification)?;
        let mut state = self.state.write().unwrap();

        if state.fail_on_publish {
            return Err(CheckoutError::QueuePublish(
                "broker unavailable".to_string(),
            ));
        }

        state.messages.push(body);
        Ok(())
    }
}

/// Kafka-backed queue publisher.
#[derive(Clone)]
pub struct KafkaQueuePublisher {
    producer: FutureProducer,
    topic: String,
}

impl KafkaQueuePublisher {
    /// Send timeout for a single message.
    const SEND_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a publisher connected to the given brokers, targeting one
    /// topic.
    pub fn new(brokers: &str, topic: impl Into<String>) -> Result<Self, CheckoutError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "5000")
            .create()
            .map_err(|e| CheckoutError::QueuePublish(e.to_string()))?;

        Ok(Self {
            producer,
            topic: topic.into(),
        })
    }

    /// Creates a publisher from checkout configuration.
    pub fn from_config(config: &CheckoutConfig) -> Result<Self, CheckoutError> {
        Self::new(&config.queue_connection, config.queue_name.clone())
    }
}

#[async_trait]
impl QueuePublisher for KafkaQueuePublisher {
    async fn publish(&self, notification: &OrderNotification) -> Result<(), CheckoutError> {
        let payload = serde_json::to_string(notification)?;
        let record = FutureRecord::<(), _>::to(&self.topic).payload(&payload);

        self.producer
            .send(record, rdkafka::util::Timeout::After(Self::SEND_TIMEOUT))
            .await
            .map_err(|(e, _)| CheckoutError::QueuePublish(e.to_string()))?;

        tracing::debug!(topic = %self.topic, "order notification published");
        Ok(())
    }
}
