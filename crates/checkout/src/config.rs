//! Checkout configuration.
//!
//! All connection details the workflow's adapters need are carried here
//! explicitly and injected at construction. Nothing inside the workflow
//! body reads the environment.

/// Configuration for the checkout adapters.
///
/// Reads from environment variables:
/// - `QUEUE_CONNECTION` — broker bootstrap servers (default: `"localhost:9092"`)
/// - `QUEUE_NAME` — topic for order-items notifications (default: `"order-items"`)
/// - `DELIVERY_ORDER_BASE_URL` — base URL of the delivery processor
///   (default: `"http://localhost:8181/api/delivery/"`)
/// - `DELIVERY_ORDER_KEY` — access key appended to the base URL (default: empty)
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    pub queue_connection: String,
    pub queue_name: String,
    pub delivery_order_base_url: String,
    pub delivery_order_key: String,
}

impl CheckoutConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            queue_connection: std::env::var("QUEUE_CONNECTION")
                .unwrap_or(defaults.queue_connection),
            queue_name: std::env::var("QUEUE_NAME").unwrap_or(defaults.queue_name),
            delivery_order_base_url: std::env::var("DELIVERY_ORDER_BASE_URL")
                .unwrap_or(defaults.delivery_order_base_url),
            delivery_order_key: std::env::var("DELIVERY_ORDER_KEY")
                .unwrap_or(defaults.delivery_order_key),
        }
    }

    /// Returns the full delivery endpoint URL (base URL with the key
    /// appended).
    pub fn delivery_endpoint(&self) -> String {
        format!("{}{}", self.delivery_order_base_url, self.delivery_order_key)
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            queue_connection: "localhost:9092".to_string(),
            queue_name: "order-items".to_string(),
            delivery_order_base_url: "http://localhost:8181/api/delivery/".to_string(),
            delivery_order_key: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = CheckoutConfig::default();
        assert_eq!(config.queue_connection, "localhost:9092");
        assert_eq!(config.queue_name, "order-items");
        assert_eq!(
            config.delivery_order_base_url,
            "http://localhost:8181/api/delivery/"
        );
        assert_eq!(config.delivery_order_key, "");
    }

    #[test]
    fn test_delivery_endpoint_appends_key() {
        let config = CheckoutConfig {
            delivery_order_base_url: "https://fulfillment.example/api/orders?code=".to_string(),
            delivery_order_key: "secret".to_string(),
            ..CheckoutConfig::default()
        };
        assert_eq!(
            config.delivery_endpoint(),
            "https://fulfillment.example/api/orders?code=secret"
        );
    }
}
