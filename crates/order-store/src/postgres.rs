use async_trait::async_trait;
use common::OrderId;
use domain::Order;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::Result;
use crate::outbox::{OutboxEntry, OutboxKind, OutboxStore};
use crate::store::{OrderStore, StoredOrder};

/// PostgreSQL-backed order store implementation.
///
/// Orders are stored append-only: a row per order, with the serialized
/// aggregate as the source of truth. There is no UPDATE or DELETE path.
#[derive(Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    /// Creates a new PostgreSQL order store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn add_order(&self, order: Order) -> Result<OrderId> {
        let id = OrderId::new();
        let payload = serde_json::to_value(&order)?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, buyer_id, placed_at, payload)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id.as_uuid())
        .bind(order.buyer_id().as_i64())
        .bind(order.placed_at())
        .bind(&payload)
        .execute(&self.pool)
        .await?;

        tracing::debug!(order_id = %id, buyer_id = %order.buyer_id(), "order persisted");
        Ok(id)
    }

    async fn get_order(&self, order_id: OrderId) -> Result<Option<StoredOrder>> {
        let row = sqlx::query("SELECT payload FROM orders WHERE id = $1")
            .bind(order_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let payload: serde_json::Value = row.try_get("payload")?;
                let order: Order = serde_json::from_value(payload)?;
                Ok(Some(StoredOrder {
                    id: order_id,
                    order,
                }))
            }
            None => Ok(None),
        }
    }
}

/// PostgreSQL-backed outbox store implementation.
#[derive(Clone)]
pub struct PostgresOutboxStore {
    pool: PgPool,
}

impl PostgresOutboxStore {
    /// Creates a new PostgreSQL outbox store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_entry(row: PgRow) -> Result<OutboxEntry> {
        let kind: String = row.try_get("kind")?;

        Ok(OutboxEntry {
            id: row.try_get("id")?,
            order_id: OrderId::from_uuid(row.try_get::<Uuid, _>("order_id")?),
            kind: OutboxKind::parse(&kind)?,
            payload: row.try_get("payload")?,
            attempts: row.try_get::<i32, _>("attempts")? as u32,
            last_error: row.try_get("last_error")?,
            enqueued_at: row.try_get("enqueued_at")?,
        })
    }
}

#[async_trait]
impl OutboxStore for PostgresOutboxStore {
    async fn enqueue(&self, entry: OutboxEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO outbox (id, order_id, kind, payload, attempts, last_error, processed, enqueued_at)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7)
            "#,
        )
        .bind(entry.id)
        .bind(entry.order_id.as_uuid())
        .bind(entry.kind.as_str())
        .bind(&entry.payload)
        .bind(entry.attempts as i32)
        .bind(&entry.last_error)
        .bind(entry.enqueued_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn fetch_unprocessed(&self, limit: u32) -> Result<Vec<OutboxEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, order_id, kind, payload, attempts, last_error, enqueued_at
            FROM outbox
            WHERE NOT processed
            ORDER BY enqueued_at ASC
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_entry).collect()
    }

    async fn mark_processed(&self, ids: &[Uuid]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }

        sqlx::query("UPDATE outbox SET processed = TRUE WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn mark_failed(&self, id: Uuid, last_error: String) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE outbox
            SET attempts = attempts + 1, last_error = $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(last_error)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
