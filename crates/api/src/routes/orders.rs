//! Checkout, order lookup, and outbox drain endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use checkout::{
    CheckoutOrchestrator, DeliveryNotifier, InMemoryBasketService, InMemoryCatalogService,
    OutboxRelay, PendingSideEffect, QueuePublisher,
};
use common::{BasketId, OrderId};
use domain::Address;
use order_store::{OrderStore, OutboxStore};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
///
/// Basket and catalog resolution are external concerns; the in-memory
/// services stand in for them here.
pub struct AppState<St, Ox, Q, D>
where
    St: OrderStore,
    Ox: OutboxStore,
    Q: QueuePublisher,
    D: DeliveryNotifier,
{
    pub orchestrator:
        CheckoutOrchestrator<St, Ox, InMemoryBasketService, InMemoryCatalogService, Q, D>,
    pub relay: OutboxRelay<Ox, Q, D>,
    pub orders: St,
    pub baskets: InMemoryBasketService,
    pub catalog: InMemoryCatalogService,
}

// -- Request types --

#[derive(Deserialize)]
pub struct CheckoutRequest {
    pub shipping_address: AddressRequest,
}

#[derive(Deserialize)]
pub struct AddressRequest {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct CheckoutResponse {
    pub order_id: String,
    pub state: String,
    pub pending: Vec<PendingSideEffect>,
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub buyer_id: i64,
    pub placed_at: String,
    pub total_cents: i64,
    pub items: Vec<OrderItemResponse>,
}

#[derive(Serialize)]
pub struct OrderItemResponse {
    pub catalog_item_id: i64,
    pub name: String,
    pub picture_uri: String,
    pub unit_price_cents: i64,
    pub quantity: u32,
}

#[derive(Serialize)]
pub struct DrainResponse {
    pub dispatched: usize,
    pub failed: usize,
}

// -- Handlers --

/// POST /baskets/:id/checkout — commit the basket as an order.
#[tracing::instrument(skip(state, req))]
pub async fn checkout<St, Ox, Q, D>(
    State(state): State<Arc<AppState<St, Ox, Q, D>>>,
    Path(id): Path<i64>,
    Json(req): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutResponse>), ApiError>
where
    St: OrderStore + 'static,
    Ox: OutboxStore + 'static,
    Q: QueuePublisher + 'static,
    D: DeliveryNotifier + 'static,
{
    let address = Address::new(
        req.shipping_address.street,
        req.shipping_address.city,
        req.shipping_address.state,
        req.shipping_address.country,
        req.shipping_address.zip_code,
    );

    let outcome = state
        .orchestrator
        .create_order(BasketId::new(id), address)
        .await?;

    let response = CheckoutResponse {
        order_id: outcome.order_id.to_string(),
        state: outcome.state.to_string(),
        pending: outcome.pending,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /orders/:id — load a persisted order by ID.
#[tracing::instrument(skip(state))]
pub async fn get<St, Ox, Q, D>(
    State(state): State<Arc<AppState<St, Ox, Q, D>>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError>
where
    St: OrderStore + 'static,
    Ox: OutboxStore + 'static,
    Q: QueuePublisher + 'static,
    D: DeliveryNotifier + 'static,
{
    let order_id = parse_order_id(&id)?;
    let stored = state
        .orders
        .get_order(order_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Order {id} not found")))?;

    let items: Vec<OrderItemResponse> = stored
        .order
        .items()
        .iter()
        .map(|item| OrderItemResponse {
            catalog_item_id: item.item_ordered.id.as_i64(),
            name: item.item_ordered.name.clone(),
            picture_uri: item.item_ordered.picture_uri.clone(),
            unit_price_cents: item.unit_price.cents(),
            quantity: item.quantity,
        })
        .collect();

    Ok(Json(OrderResponse {
        id: stored.id.to_string(),
        buyer_id: stored.order.buyer_id().as_i64(),
        placed_at: stored.order.placed_at().to_rfc3339(),
        total_cents: stored.order.total().cents(),
        items,
    }))
}

/// POST /outbox/drain — run one relay pass over parked side effects.
#[tracing::instrument(skip(state))]
pub async fn drain_outbox<St, Ox, Q, D>(
    State(state): State<Arc<AppState<St, Ox, Q, D>>>,
) -> Result<Json<DrainResponse>, ApiError>
where
    St: OrderStore + 'static,
    Ox: OutboxStore + 'static,
    Q: QueuePublisher + 'static,
    D: DeliveryNotifier + 'static,
{
    let report = state.relay.run_once().await?;

    Ok(Json(DrainResponse {
        dispatched: report.dispatched,
        failed: report.failed,
    }))
}

fn parse_order_id(id: &str) -> Result<OrderId, ApiError> {
    uuid::Uuid::parse_str(id)
        .map(OrderId::from_uuid)
        .map_err(|e| ApiError::BadRequest(format!("Invalid order id: {e}")))
}
