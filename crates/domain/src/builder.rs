//! Pure transformation from a basket into an immutable order.

use crate::basket::Basket;
use crate::error::BuildError;
use crate::order::Order;
use crate::value_objects::{Address, CatalogSnapshot, OrderItem};

/// Builds an immutable [`Order`] from a basket and resolved catalog
/// snapshots.
///
/// Pure: no I/O and no side effects. Every basket item must resolve to
/// exactly one snapshot; a missing snapshot means the basket and catalog
/// are out of sync and the build fails rather than silently dropping the
/// item. Each order item carries the basket's recorded unit price and an
/// owned copy of the snapshot.
pub fn build_order(
    basket: &Basket,
    ship_to_address: Address,
    snapshots: &[CatalogSnapshot],
) -> Result<Order, BuildError> {
    if !basket.has_items() {
        return Err(BuildError::EmptyBasket {
            basket_id: basket.id(),
        });
    }

    let mut items = Vec::with_capacity(basket.items().len());
    for basket_item in basket.items() {
        let snapshot = snapshots
            .iter()
            .find(|s| s.id == basket_item.catalog_item_id)
            .ok_or(BuildError::MissingSnapshot {
                catalog_item_id: basket_item.catalog_item_id,
            })?;

        items.push(OrderItem::new(
            snapshot.clone(),
            basket_item.unit_price,
            basket_item.quantity,
        ));
    }

    Ok(Order::new(basket.buyer_id(), ship_to_address, items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basket::BasketItem;
    use crate::value_objects::Money;
    use common::BuyerId;

    fn address() -> Address {
        Address::new("1 Main St", "Springfield", "OR", "USA", "97477")
    }

    #[test]
    fn test_builds_order_from_basket_and_snapshots() {
        let basket = Basket::new(1, 7, vec![BasketItem::new(10, Money::from_cents(999), 2)]);
        let snapshots = vec![CatalogSnapshot::new(10, "Widget", "/pics/10.png")];

        let order = build_order(&basket, address(), &snapshots).unwrap();

        assert_eq!(order.buyer_id(), BuyerId::new(7));
        assert_eq!(order.item_count(), 1);
        assert_eq!(order.items()[0].unit_price.cents(), 999);
        assert_eq!(order.items()[0].quantity, 2);
        assert_eq!(order.items()[0].item_ordered.name, "Widget");
        assert_eq!(order.total().cents(), 1998);
    }

    #[test]
    fn test_basket_price_wins_over_catalog_price() {
        // The snapshot carries only display data; the unit price must come
        // from the basket even if the catalog has since changed.
        let basket = Basket::new(1, 7, vec![BasketItem::new(10, Money::from_cents(750), 1)]);
        let snapshots = vec![CatalogSnapshot::new(10, "Widget", "/pics/10.png")];

        let order = build_order(&basket, address(), &snapshots).unwrap();
        assert_eq!(order.items()[0].unit_price.cents(), 750);
    }

    #[test]
    fn test_snapshot_is_copied_not_referenced() {
        let basket = Basket::new(1, 7, vec![BasketItem::new(10, Money::from_cents(999), 1)]);
        let mut snapshots = vec![CatalogSnapshot::new(10, "Widget", "/pics/10.png")];

        let order = build_order(&basket, address(), &snapshots).unwrap();

        // Mutating the resolver's snapshot afterwards must not affect the order.
        snapshots[0].name = "Renamed".to_string();
        assert_eq!(order.items()[0].item_ordered.name, "Widget");
    }

    #[test]
    fn test_empty_basket_fails() {
        let basket = Basket::new(1, 7, vec![]);
        let result = build_order(&basket, address(), &[]);
        assert!(matches!(result, Err(BuildError::EmptyBasket { .. })));
    }

    #[test]
    fn test_missing_snapshot_fails() {
        let basket = Basket::new(
            1,
            7,
            vec![
                BasketItem::new(10, Money::from_cents(999), 1),
                BasketItem::new(20, Money::from_cents(500), 1),
            ],
        );
        let snapshots = vec![CatalogSnapshot::new(10, "Widget", "/pics/10.png")];

        let result = build_order(&basket, address(), &snapshots);
        assert!(matches!(
            result,
            Err(BuildError::MissingSnapshot { catalog_item_id }) if catalog_item_id.as_i64() == 20
        ));
    }

    #[test]
    fn test_duplicate_basket_lines_each_become_order_items() {
        let basket = Basket::new(
            1,
            7,
            vec![
                BasketItem::new(10, Money::from_cents(999), 1),
                BasketItem::new(10, Money::from_cents(999), 2),
            ],
        );
        let snapshots = vec![CatalogSnapshot::new(10, "Widget", "/pics/10.png")];

        let order = build_order(&basket, address(), &snapshots).unwrap();
        assert_eq!(order.item_count(), 2);
        assert_eq!(order.total().cents(), 999 * 3);
    }
}
