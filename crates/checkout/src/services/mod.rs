//! External collaborator traits with in-memory and production
//! implementations.

pub mod basket;
pub mod catalog;
pub mod delivery;
pub mod queue;

pub use basket::{BasketService, InMemoryBasketService};
pub use catalog::{CatalogService, InMemoryCatalogService};
pub use delivery::{DeliveryNotifier, HttpDeliveryNotifier, InMemoryDeliveryNotifier};
pub use queue::{InMemoryQueuePublisher, KafkaQueuePublisher, QueuePublisher};
