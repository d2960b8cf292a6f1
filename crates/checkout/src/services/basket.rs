//! Basket resolution trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::BasketId;
use domain::Basket;

use crate::error::CheckoutError;

/// Trait for resolving a buyer's basket at checkout time.
#[async_trait]
pub trait BasketService: Send + Sync {
    /// Loads a basket together with its items.
    ///
    /// Returns None if no basket exists with the given identifier.
    async fn get_basket_with_items(
        &self,
        basket_id: BasketId,
    ) -> Result<Option<Basket>, CheckoutError>;
}

#[derive(Debug, Default)]
struct InMemoryBasketState {
    baskets: HashMap<BasketId, Basket>,
    fail_on_get: bool,
}

/// In-memory basket service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBasketService {
    state: Arc<RwLock<InMemoryBasketState>>,
}

impl InMemoryBasketService {
    /// Creates a new in-memory basket service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a basket so the orchestrator can resolve it.
    pub fn insert(&self, basket: Basket) {
        self.state
            .write()
            .unwrap()
            .baskets
            .insert(basket.id(), basket);
    }

    /// Configures the service to fail on the next get call.
    pub fn set_fail_on_get(&self, fail: bool) {
        self.state.write().unwrap().fail_on_get = fail;
    }
}

#[async_trait]
impl BasketService for InMemoryBasketService {
    async fn get_basket_with_items(
        &self,
        basket_id: BasketId,
    ) -> Result<Option<Basket>, CheckoutError> {
        let state = self.state.read().unwrap();

        if state.fail_on_get {
            return Err(CheckoutError::BasketService(
                "basket backend unavailable".to_string(),
            ));
        }

        Ok(state.baskets.get(&basket_id).cloned())
    }
}
