//! HTTP API server with observability for the order-commit workflow.
//!
//! Exposes the checkout endpoint plus order lookup and an outbox drain
//! trigger, with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use checkout::{
    CheckoutOrchestrator, DeliveryNotifier, InMemoryBasketService, InMemoryCatalogService,
    InMemoryDeliveryNotifier, InMemoryQueuePublisher, OutboxRelay, QueuePublisher,
};
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::{InMemoryOrderStore, InMemoryOutboxStore, OrderStore, OutboxStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<St, Ox, Q, D>(
    state: Arc<AppState<St, Ox, Q, D>>,
    metrics_handle: PrometheusHandle,
) -> Router
where
    St: OrderStore + 'static,
    Ox: OutboxStore + 'static,
    Q: QueuePublisher + 'static,
    D: DeliveryNotifier + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/baskets/{id}/checkout",
            post(routes::orders::checkout::<St, Ox, Q, D>),
        )
        .route("/orders/{id}", get(routes::orders::get::<St, Ox, Q, D>))
        .route(
            "/outbox/drain",
            post(routes::orders::drain_outbox::<St, Ox, Q, D>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state over the given stores and messaging
/// adapters, plus a second relay instance for background polling.
pub fn create_state<St, Ox, Q, D>(
    orders: St,
    outbox: Ox,
    queue: Q,
    delivery: D,
) -> (Arc<AppState<St, Ox, Q, D>>, OutboxRelay<Ox, Q, D>)
where
    St: OrderStore + Clone,
    Ox: OutboxStore + Clone,
    Q: QueuePublisher + Clone,
    D: DeliveryNotifier + Clone,
{
    let baskets = InMemoryBasketService::new();
    let catalog = InMemoryCatalogService::new();

    let orchestrator = CheckoutOrchestrator::new(
        orders.clone(),
        outbox.clone(),
        baskets.clone(),
        catalog.clone(),
        queue.clone(),
        delivery.clone(),
    );
    let relay = OutboxRelay::new(outbox.clone(), queue.clone(), delivery.clone());
    let background_relay = OutboxRelay::new(outbox, queue, delivery);

    let state = Arc::new(AppState {
        orchestrator,
        relay,
        orders,
        baskets,
        catalog,
    });

    (state, background_relay)
}

/// Creates the default application state with in-memory stores and
/// messaging.
pub fn create_default_state() -> (
    Arc<
        AppState<
            InMemoryOrderStore,
            InMemoryOutboxStore,
            InMemoryQueuePublisher,
            InMemoryDeliveryNotifier,
        >,
    >,
    OutboxRelay<InMemoryOutboxStore, InMemoryQueuePublisher, InMemoryDeliveryNotifier>,
) {
    create_state(
        InMemoryOrderStore::new(),
        InMemoryOutboxStore::new(),
        InMemoryQueuePublisher::new(),
        InMemoryDeliveryNotifier::new(),
    )
}
