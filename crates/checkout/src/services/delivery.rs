//! Delivery notifier trait with in-memory and HTTP implementations.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::CheckoutConfig;
use crate::error::CheckoutError;
use crate::messages::DeliveryRequest;

/// Trait for notifying the downstream delivery-fulfillment system of a
/// finalized order.
#[async_trait]
pub trait DeliveryNotifier: Send + Sync {
    /// Sends the delivery request. Any non-success response is an error.
    async fn notify(&self, request: &DeliveryRequest) -> Result<(), CheckoutError>;
}

#[derive(Debug, Default)]
struct InMemoryDeliveryState {
    requests: Vec<serde_json::Value>,
    fail_on_notify: bool,
}

/// In-memory delivery notifier for testing.
///
/// Records the JSON bodies that would have been POSTed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDeliveryNotifier {
    state: Arc<RwLock<InMemoryDeliveryState>>,
}

impl InMemoryDeliveryNotifier {
    /// Creates a new in-memory delivery notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the notifier to fail on the next notify call.
    pub fn set_fail_on_notify(&self, fail: bool) {
        self.state.write().unwrap().fail_on_notify = fail;
    }

    /// Returns the number of delivery requests sent.
    pub fn notified_count(&self) -> usize {
        self.state.read().unwrap().requests.len()
    }

    /// Returns the sent request bodies in order.
    pub fn requests(&self) -> Vec<serde_json::Value> {
        self.state.read().unwrap().requests.clone()
    }
}

#[async_trait]
impl DeliveryNotifier for InMemoryDeliveryNotifier {
    async fn notify(&self, request: &DeliveryRequest) -> Result<(), CheckoutError> {
        let body = serde_json::to_value(request)?;
        let mut state = self.state.write().unwrap();

        if state.fail_on_notify {
            return Err(CheckoutError::DeliveryNotify(
                "delivery endpoint returned 503 Service Unavailable".to_string(),
            ));
        }

        state.requests.push(body);
        Ok(())
    }
}

/// HTTP delivery notifier.
///
/// POSTs the delivery request as JSON to the configured endpoint and
/// treats anything but a 2xx response as failure.
#[derive(Clone)]
pub struct HttpDeliveryNotifier {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpDeliveryNotifier {
    /// Request timeout for a single notification.
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a notifier targeting the given endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, CheckoutError> {
        let client = reqwest::Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CheckoutError::DeliveryNotify(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Creates a notifier from checkout configuration.
    pub fn from_config(config: &CheckoutConfig) -> Result<Self, CheckoutError> {
        Self::new(config.delivery_endpoint())
    }
}

#[async_trait]
impl DeliveryNotifier for HttpDeliveryNotifier {
    async fn notify(&self, request: &DeliveryRequest) -> Result<(), CheckoutError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| CheckoutError::DeliveryNotify(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CheckoutError::DeliveryNotify(format!(
                "delivery endpoint returned {status}"
            )));
        }

        tracing::debug!(endpoint = %self.endpoint, "delivery request accepted");
        Ok(())
    }
}
