mod dto;
mod handlers;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::main_lib::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stock", get(handlers::stock_data))
        .route("/stock/{symbol}", get(handlers::stock_data))
        .route("/stock/search", get(handlers::stock_search))
        .route("/stock/search/{query}", get(handlers::stock_search))
}
