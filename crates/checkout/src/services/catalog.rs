//! Catalog snapshot resolution trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::CatalogItemId;
use domain::CatalogSnapshot;

use crate::error::CheckoutError;

/// Trait for resolving current catalog snapshots.
///
/// The resolver may return fewer snapshots than requested; the order
/// builder detects the gap and fails the checkout rather than dropping
/// the basket item.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Resolves snapshots for the given catalog item identifiers.
    async fn list_catalog_items(
        &self,
        ids: &[CatalogItemId],
    ) -> Result<Vec<CatalogSnapshot>, CheckoutError>;
}

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    items: HashMap<CatalogItemId, CatalogSnapshot>,
    fail_on_list: bool,
}

/// In-memory catalog service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogService {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

impl InMemoryCatalogService {
    /// Creates a new in-memory catalog service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a snapshot so the orchestrator can resolve it.
    pub fn insert(&self, snapshot: CatalogSnapshot) {
        self.state
            .write()
            .unwrap()
            .items
            .insert(snapshot.id, snapshot);
    }

    /// Configures the service to fail on the next list call.
    pub fn set_fail_on_list(&self, fail: bool) {
        self.state.write().unwrap().fail_on_list = fail;
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalogService {
    async fn list_catalog_items(
        &self,
        ids: &[CatalogItemId],
    ) -> Result<Vec<CatalogSnapshot>, CheckoutError> {
        let state = self.state.read().unwrap();

        if state.fail_on_list {
            return Err(CheckoutError::CatalogService(
                "catalog backend unavailable".to_string(),
            ));
        }

        // Unknown IDs are simply absent from the response.
        Ok(ids
            .iter()
            .filter_map(|id| state.items.get(id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolves_known_items_only() {
        let service = InMemoryCatalogService::new();
        service.insert(CatalogSnapshot::new(10, "Widget", "/pics/10.png"));

        let snapshots = service
            .list_catalog_items(&[CatalogItemId::new(10), CatalogItemId::new(20)])
            .await
            .unwrap();

        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].id, CatalogItemId::new(10));
    }

    #[tokio::test]
    async fn test_fail_on_list() {
        let service = InMemoryCatalogService::new();
        service.set_fail_on_list(true);

        let result = service.list_catalog_items(&[CatalogItemId::new(10)]).await;
        assert!(matches!(result, Err(CheckoutError::CatalogService(_))));
    }
}
