//! API server entry point.

use std::sync::Arc;
use std::time::Duration;

use api::routes::orders::AppState;
use checkout::{
    CheckoutConfig, DeliveryNotifier, HttpDeliveryNotifier, KafkaQueuePublisher, OutboxRelay,
    QueuePublisher,
};
use domain::{Basket, BasketItem, CatalogSnapshot, Money};
use order_store::{InMemoryOrderStore, InMemoryOutboxStore, OrderStore, OutboxStore};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Interval between background outbox relay passes.
const RELAY_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

/// Spawns the relay loop and serves the app until shutdown.
async fn serve<St, Ox, Q, D>(
    state: Arc<AppState<St, Ox, Q, D>>,
    background_relay: OutboxRelay<Ox, Q, D>,
    metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
) where
    St: OrderStore + 'static,
    Ox: OutboxStore + 'static,
    Q: QueuePublisher + 'static,
    D: DeliveryNotifier + 'static,
{
    tokio::spawn(async move {
        background_relay.run(RELAY_POLL_INTERVAL).await;
    });

    let app = api::create_app(state, metrics_handle);

    let config = api::config::Config::from_env();
    let addr = config.addr();
    tracing::info!(%addr, "starting API server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}

/// Seeds a catalog and one basket so the in-memory wiring is drivable
/// out of the box: `POST /baskets/1/checkout`.
fn seed_demo_data<St, Ox, Q, D>(state: &AppState<St, Ox, Q, D>)
where
    St: OrderStore,
    Ox: OutboxStore,
    Q: QueuePublisher,
    D: DeliveryNotifier,
{
    state
        .catalog
        .insert(CatalogSnapshot::new(10, "Widget", "/pics/10.png"));
    state
        .catalog
        .insert(CatalogSnapshot::new(20, "Gadget", "/pics/20.png"));
    state.baskets.insert(Basket::new(
        1,
        7,
        vec![
            BasketItem::new(10, Money::from_cents(999), 2),
            BasketItem::new(20, Money::from_cents(2500), 1),
        ],
    ));
    tracing::info!("seeded demo catalog and basket 1");
}

#[tokio::main]
async fn main() {
    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let prometheus_builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let metrics_handle = prometheus_builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Wire stores and messaging adapters.
    //
    // MESSAGING=kafka switches the queue publisher and delivery notifier
    // to the production adapters configured through CheckoutConfig;
    // anything else runs fully in memory.
    let checkout_config = CheckoutConfig::from_env();

    match std::env::var("MESSAGING").as_deref() {
        Ok("kafka") => {
            let queue = KafkaQueuePublisher::from_config(&checkout_config)
                .expect("failed to create Kafka producer");
            let delivery = HttpDeliveryNotifier::from_config(&checkout_config)
                .expect("failed to create delivery HTTP client");
            tracing::info!(
                queue = %checkout_config.queue_name,
                delivery = %checkout_config.delivery_endpoint(),
                "using Kafka queue and HTTP delivery notifier"
            );

            let (state, background_relay) = api::create_state(
                InMemoryOrderStore::new(),
                InMemoryOutboxStore::new(),
                queue,
                delivery,
            );
            seed_demo_data(&state);
            serve(state, background_relay, metrics_handle).await;
        }
        _ => {
            let (state, background_relay) = api::create_default_state();
            seed_demo_data(&state);
            serve(state, background_relay, metrics_handle).await;
        }
    }
}
