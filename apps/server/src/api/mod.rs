//! HTTP API surface.

pub mod shared;

mod demo;
mod greeting;
mod health;
mod stock;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::main_lib::AppState;

pub fn app_router(state: Arc<AppState>, _config: &Config) -> Router {
    // Static paths (health, stock, httpTrigger) win over the demo CRUD
    // catch-all {id} segment.
    let api = Router::new()
        .merge(health::router())
        .merge(stock::router())
        .merge(greeting::router())
        .merge(demo::router());

    Router::new()
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
