//! Value objects for the order domain.

use common::CatalogItemId;
use serde::{Deserialize, Serialize};

/// Money amount represented in cents to avoid floating point issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money {
    /// Amount in cents (e.g., 1000 = $10.00)
    cents: i64,
}

impl Money {
    /// Creates a new Money amount from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the dollar portion (whole number).
    pub fn dollars(&self) -> i64 {
        self.cents / 100
    }

    /// Returns the cents portion (remainder after dollars).
    pub fn cents_part(&self) -> i64 {
        self.cents.abs() % 100
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Multiplies by a quantity.
    pub fn multiply(&self, quantity: u32) -> Money {
        Money {
            cents: self.cents * quantity as i64,
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.cents < 0 {
            write!(f, "-${}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            write!(f, "${}.{:02}", self.dollars(), self.cents_part())
        }
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money {
            cents: self.cents + rhs.cents,
        }
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.cents += rhs.cents;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// A postal address orders are shipped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: String,
}

impl Address {
    /// Creates a new address.
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        country: impl Into<String>,
        zip_code: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            state: state.into(),
            country: country.into(),
            zip_code: zip_code.into(),
        }
    }
}

/// A frozen copy of a catalog item's display attributes, taken at
/// order-build time.
///
/// Later catalog changes must never retroactively alter a placed order,
/// so order items own a snapshot instead of referencing the live catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    /// The catalog item this snapshot was taken from.
    pub id: CatalogItemId,

    /// Display name at snapshot time.
    pub name: String,

    /// Canonical picture URI at snapshot time.
    pub picture_uri: String,
}

impl CatalogSnapshot {
    /// Creates a new catalog snapshot.
    pub fn new(
        id: impl Into<CatalogItemId>,
        name: impl Into<String>,
        picture_uri: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            picture_uri: picture_uri.into(),
        }
    }
}

/// A line item of an immutable order.
///
/// Owned exclusively by the order it belongs to. The unit price is the
/// basket's recorded price, not a fresh catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Frozen display data for the ordered catalog item.
    pub item_ordered: CatalogSnapshot,

    /// Price per unit recorded when the item was added to the basket.
    pub unit_price: Money,

    /// Quantity ordered.
    pub quantity: u32,
}

impl OrderItem {
    /// Creates a new order item.
    pub fn new(item_ordered: CatalogSnapshot, unit_price: Money, quantity: u32) -> Self {
        Self {
            item_ordered,
            unit_price,
            quantity,
        }
    }

    /// Returns the total price for this item (quantity * unit_price).
    pub fn total_price(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_cents() {
        let money = Money::from_cents(1234);
        assert_eq!(money.cents(), 1234);
        assert_eq!(money.dollars(), 12);
        assert_eq!(money.cents_part(), 34);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(1234).to_string(), "$12.34");
        assert_eq!(Money::from_cents(100).to_string(), "$1.00");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-1234).to_string(), "-$12.34");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!(a.multiply(3).cents(), 3000);
    }

    #[test]
    fn test_money_sum() {
        let total: Money = [100, 200, 300].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_money_add_assign() {
        let mut money = Money::from_cents(100);
        money += Money::from_cents(50);
        assert_eq!(money.cents(), 150);
    }

    #[test]
    fn test_order_item_total_price() {
        let snapshot = CatalogSnapshot::new(10, "Widget", "/pics/10.png");
        let item = OrderItem::new(snapshot, Money::from_cents(1000), 3);
        assert_eq!(item.total_price().cents(), 3000);
    }

    #[test]
    fn test_order_item_serializes_camel_case() {
        let snapshot = CatalogSnapshot::new(10, "Widget", "/pics/10.png");
        let item = OrderItem::new(snapshot, Money::from_cents(999), 2);
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["itemOrdered"]["id"], 10);
        assert_eq!(json["itemOrdered"]["pictureUri"], "/pics/10.png");
        assert_eq!(json["unitPrice"]["cents"], 999);
        assert_eq!(json["quantity"], 2);
    }

    #[test]
    fn test_address_serialization_roundtrip() {
        let address = Address::new("1 Main St", "Springfield", "OR", "USA", "97477");
        let json = serde_json::to_string(&address).unwrap();
        let deserialized: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(address, deserialized);
        assert!(json.contains("zipCode"));
    }
}
