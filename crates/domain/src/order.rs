//! Immutable order aggregate.

use chrono::{DateTime, Utc};
use common::BuyerId;
use serde::{Deserialize, Serialize};

use crate::value_objects::{Address, Money, OrderItem};

/// An immutable record of a completed purchase intent.
///
/// Created once by the order builder and never mutated afterwards: all
/// fields are private and no update path exists. The total is always
/// recomputed from the items rather than stored, so it can never drift
/// from their sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    buyer_id: BuyerId,
    ship_to_address: Address,
    items: Vec<OrderItem>,
    placed_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new order, stamped with the current time.
    pub fn new(buyer_id: BuyerId, ship_to_address: Address, items: Vec<OrderItem>) -> Self {
        Self {
            buyer_id,
            ship_to_address,
            items,
            placed_at: Utc::now(),
        }
    }

    /// Returns the buyer who placed the order.
    pub fn buyer_id(&self) -> BuyerId {
        self.buyer_id
    }

    /// Returns the shipping address.
    pub fn ship_to_address(&self) -> &Address {
        &self.ship_to_address
    }

    /// Returns the order items in the sequence they were ordered.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns the number of line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns when the order was placed.
    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }

    /// Returns the order total, computed as the sum of
    /// `unit_price * quantity` over all items.
    pub fn total(&self) -> Money {
        self.items.iter().map(OrderItem::total_price).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::CatalogSnapshot;

    fn sample_address() -> Address {
        Address::new("1 Main St", "Springfield", "OR", "USA", "97477")
    }

    fn sample_item(id: i64, cents: i64, quantity: u32) -> OrderItem {
        OrderItem::new(
            CatalogSnapshot::new(id, format!("Item {id}"), format!("/pics/{id}.png")),
            Money::from_cents(cents),
            quantity,
        )
    }

    #[test]
    fn test_total_is_sum_of_item_totals() {
        let order = Order::new(
            BuyerId::new(7),
            sample_address(),
            vec![sample_item(10, 999, 2), sample_item(20, 500, 3)],
        );

        assert_eq!(order.total().cents(), 999 * 2 + 500 * 3);
    }

    #[test]
    fn test_order_preserves_item_sequence() {
        let order = Order::new(
            BuyerId::new(7),
            sample_address(),
            vec![sample_item(20, 500, 1), sample_item(10, 999, 1)],
        );

        let ids: Vec<i64> = order
            .items()
            .iter()
            .map(|i| i.item_ordered.id.as_i64())
            .collect();
        assert_eq!(ids, vec![20, 10]);
    }

    #[test]
    fn test_order_serialization_roundtrip() {
        let order = Order::new(BuyerId::new(7), sample_address(), vec![sample_item(10, 999, 2)]);

        let json = serde_json::to_string(&order).unwrap();
        let deserialized: Order = serde_json::from_str(&json).unwrap();

        assert_eq!(order, deserialized);
        assert_eq!(deserialized.total().cents(), 1998);
    }
}
