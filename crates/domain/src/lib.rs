//! Domain layer for the order-commit workflow.
//!
//! This crate provides the core domain types:
//! - Value objects (`Money`, `Address`, `CatalogSnapshot`, `OrderItem`)
//! - The mutable `Basket` input and the immutable `Order` aggregate
//! - The pure order builder that freezes a basket into an order

pub mod basket;
pub mod builder;
pub mod error;
pub mod order;
pub mod value_objects;

pub use basket::{Basket, BasketItem};
pub use builder::build_order;
pub use error::BuildError;
pub use order::Order;
pub use value_objects::{Address, CatalogSnapshot, Money, OrderItem};
