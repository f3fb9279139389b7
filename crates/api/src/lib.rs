//! HTTP API serving battle catalog views as JSON.
//!
//! A thin adapter over [`catalog::CatalogService`]: each route parses its
//! identifier, runs one query and serializes the resulting view. Catalog
//! errors map to 404 (not found) or 500 (storage or assembly failure).

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use catalog::CatalogService;
use catalog_store::CatalogStore;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: CatalogStore + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::system::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::system::health::<S>))
        .route("/battles", get(routes::battles::list::<S>))
        .route("/battles/{id}", get(routes::battles::get::<S>))
        .route("/characters", get(routes::characters::list::<S>))
        .route("/characters/{id}", get(routes::characters::get::<S>))
        .route(
            "/characters/{id}/battles",
            get(routes::characters::battles::<S>),
        )
        .route("/actors/{id}", get(routes::actors::get::<S>))
        .route(
            "/actors/{id}/characters",
            get(routes::actors::characters::<S>),
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

/// Creates the application state around a catalog store.
pub fn create_state<S: CatalogStore + Clone + 'static>(
    store: S,
    backend: &'static str,
) -> Arc<AppState<S>> {
    Arc::new(AppState {
        catalog: CatalogService::new(store),
        backend,
    })
}
