//! Domain error types.

use common::{BasketId, CatalogItemId};
use thiserror::Error;

/// Errors that can occur while building an order from a basket.
///
/// These are never transient: an empty basket is a caller error and a
/// missing snapshot means the basket and catalog are out of sync. Neither
/// should be retried.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The basket has no items to order.
    #[error("basket {basket_id} has no items")]
    EmptyBasket { basket_id: BasketId },

    /// A basket item references a catalog item with no matching snapshot.
    #[error("basket references catalog item {catalog_item_id} with no matching snapshot")]
    MissingSnapshot { catalog_item_id: CatalogItemId },
}
