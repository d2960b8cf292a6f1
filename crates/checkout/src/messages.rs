//! Outbound message schemas.
//!
//! These types are the stable wire contracts for downstream consumers,
//! owned by this crate so they can evolve independently of the order's
//! internal shape.

use common::CatalogItemId;
use domain::{Address, Money, Order, OrderItem};
use serde::{Deserialize, Serialize};

/// A single line of an order-items notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationItem {
    /// The ordered catalog item.
    pub item_id: CatalogItemId,

    /// Quantity ordered.
    pub quantity: u32,
}

/// Payload published to the message queue after an order commits.
///
/// Deliberately minimal: item IDs and quantities only, no prices and no
/// address, for consumers that react to line items (e.g. inventory
/// reservation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderNotification {
    /// The ordered items.
    pub items: Vec<NotificationItem>,
}

impl OrderNotification {
    /// Derives the notification from an order.
    pub fn for_order(order: &Order) -> Self {
        Self {
            items: order
                .items()
                .iter()
                .map(|item| NotificationItem {
                    item_id: item.item_ordered.id,
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

/// Payload sent to the delivery-fulfillment endpoint.
///
/// A superset of [`OrderNotification`] with a different contract: the
/// fulfillment system needs the full line items, the final price, and
/// where to ship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRequest {
    /// The order total.
    pub final_price: Money,

    /// The full order line items.
    pub items: Vec<OrderItem>,

    /// Where the order ships to.
    pub shipping_address: Address,
}

impl DeliveryRequest {
    /// Derives the delivery request from a persisted order.
    pub fn for_order(order: &Order) -> Self {
        Self {
            final_price: order.total(),
            items: order.items().to_vec(),
            shipping_address: order.ship_to_address().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Basket, BasketItem, CatalogSnapshot, build_order};

    fn sample_order() -> Order {
        let basket = Basket::new(1, 7, vec![BasketItem::new(10, Money::from_cents(999), 2)]);
        let snapshots = vec![CatalogSnapshot::new(10, "Widget", "/pics/10.png")];
        let address = Address::new("1 Main St", "Springfield", "OR", "USA", "97477");
        build_order(&basket, address, &snapshots).unwrap()
    }

    #[test]
    fn test_notification_body_is_exact() {
        let notification = OrderNotification::for_order(&sample_order());
        let json = serde_json::to_string(&notification).unwrap();
        assert_eq!(json, r#"{"items":[{"itemId":10,"quantity":2}]}"#);
    }

    #[test]
    fn test_notification_excludes_price_and_address() {
        let notification = OrderNotification::for_order(&sample_order());
        let json = serde_json::to_string(&notification).unwrap();
        assert!(!json.contains("price"));
        assert!(!json.contains("address"));
        assert!(!json.contains("999"));
    }

    #[test]
    fn test_delivery_request_carries_total_items_and_address() {
        let order = sample_order();
        let request = DeliveryRequest::for_order(&order);

        assert_eq!(request.final_price, order.total());
        assert_eq!(request.items, order.items().to_vec());
        assert_eq!(&request.shipping_address, order.ship_to_address());
    }

    #[test]
    fn test_delivery_request_wire_shape() {
        let request = DeliveryRequest::for_order(&sample_order());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["finalPrice"]["cents"], 1998);
        assert_eq!(json["items"][0]["itemOrdered"]["id"], 10);
        assert_eq!(json["items"][0]["unitPrice"]["cents"], 999);
        assert_eq!(json["shippingAddress"]["zipCode"], "97477");
    }

    #[test]
    fn test_delivery_request_roundtrip() {
        let request = DeliveryRequest::for_order(&sample_order());
        let json = serde_json::to_string(&request).unwrap();
        let deserialized: DeliveryRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, deserialized);
    }
}
