pub mod error;
pub mod memory;
pub mod outbox;
pub mod postgres;
pub mod store;

pub use common::OrderId;
pub use error::{Result, StoreError};
pub use memory::{InMemoryOrderStore, InMemoryOutboxStore};
pub use outbox::{OutboxEntry, OutboxKind, OutboxStore};
pub use postgres::{PostgresOrderStore, PostgresOutboxStore};
pub use store::{OrderStore, StoredOrder};
