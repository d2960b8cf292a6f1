pub mod types;

pub use types::{BasketId, BuyerId, CatalogItemId, OrderId};
