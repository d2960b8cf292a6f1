//! Basket input types.
//!
//! Baskets are owned by an external basket service; this crate only reads
//! them at checkout time. Basket lifecycle (creation, add/remove) is out of
//! scope here.

use common::{BasketId, BuyerId, CatalogItemId};
use serde::{Deserialize, Serialize};

use crate::value_objects::Money;

/// A single line of a buyer's basket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketItem {
    /// The catalog item the buyer intends to purchase.
    pub catalog_item_id: CatalogItemId,

    /// Price recorded when the item was added to the basket.
    ///
    /// This price is authoritative at checkout; catalog price changes
    /// between basket-add and checkout must not leak into the order.
    pub unit_price: Money,

    /// Quantity the buyer intends to purchase.
    pub quantity: u32,
}

impl BasketItem {
    /// Creates a new basket item.
    pub fn new(catalog_item_id: impl Into<CatalogItemId>, unit_price: Money, quantity: u32) -> Self {
        Self {
            catalog_item_id: catalog_item_id.into(),
            unit_price,
            quantity,
        }
    }
}

/// A buyer's in-progress collection of intended purchases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basket {
    id: BasketId,
    buyer_id: BuyerId,
    items: Vec<BasketItem>,
}

impl Basket {
    /// Creates a basket with the given items.
    pub fn new(id: impl Into<BasketId>, buyer_id: impl Into<BuyerId>, items: Vec<BasketItem>) -> Self {
        Self {
            id: id.into(),
            buyer_id: buyer_id.into(),
            items,
        }
    }

    /// Returns the basket identifier.
    pub fn id(&self) -> BasketId {
        self.id
    }

    /// Returns the owning buyer's identifier.
    pub fn buyer_id(&self) -> BuyerId {
        self.buyer_id
    }

    /// Returns the basket items in order.
    pub fn items(&self) -> &[BasketItem] {
        &self.items
    }

    /// Returns true if the basket contains at least one item.
    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    /// Returns the distinct catalog item IDs referenced by this basket.
    pub fn catalog_item_ids(&self) -> Vec<CatalogItemId> {
        let mut ids: Vec<CatalogItemId> = self.items.iter().map(|i| i.catalog_item_id).collect();
        ids.sort();
        ids.dedup();
        ids
    }
}
